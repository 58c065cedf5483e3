use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

use salesdesk::{build_record_store, Backend, LocalBackupStore, StoreConfig};

fn entry(i: usize) -> serde_json::Value {
    json!({
        "employeeName": format!("Rep {}", i),
        "boxesSold": i,
        "category": "Vitamins",
        "weekDate": "2024-W10"
    })
}

#[tokio::test]
async fn test_backup_keeps_newest_hundred() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::default().with_backup_file(dir.path().join("backup.json"));
    let store = build_record_store(&config, None);

    for i in 1..=101 {
        store.submit(&entry(i)).await.unwrap();
    }

    let listed = store.list().await;
    assert_eq!(listed.source, Backend::Local);
    assert_eq!(listed.records.len(), 100);
    assert_eq!(listed.records[0].employee_name, "Rep 101");
    assert_eq!(listed.records[99].employee_name, "Rep 2");

    let raw = std::fs::read_to_string(dir.path().join("backup.json")).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 100);
}

#[tokio::test]
async fn test_concurrent_submits_never_fail() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::default().with_backup_file(dir.path().join("backup.json"));
    let store = Arc::new(build_record_store(&config, None));

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move { store.submit(&entry(i)).await }));
    }
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.backend(), Backend::Local);
    }

    // Last writer wins; the file must still be a valid list.
    let backup = LocalBackupStore::from_config(&config);
    let records = backup.try_read_all().unwrap();
    assert!(!records.is_empty());
    assert!(records.len() <= 20);
    assert!(records.iter().all(|r| r.boxes_sold < 20));
}

#[tokio::test]
async fn test_corrupt_backup_is_replaced_on_next_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("backup.json");
    std::fs::write(&path, "{ this is not a list").unwrap();

    let config = StoreConfig::default().with_backup_file(&path);
    let store = build_record_store(&config, None);
    assert!(store.list().await.records.is_empty());

    store.submit(&entry(1)).await.unwrap();
    let listed = store.list().await;
    assert_eq!(listed.records.len(), 1);
    assert_eq!(listed.records[0].employee_name, "Rep 1");
}
