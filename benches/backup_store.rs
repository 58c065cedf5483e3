use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use salesdesk::{LocalBackupStore, SalesRecord, SalesSubmission};
use serde_json::json;
use tempfile::TempDir;

fn record(i: usize) -> SalesRecord {
    SalesRecord {
        timestamp: format!("2024-03-01T10:{:02}:00.000000", i % 60),
        employee_name: format!("Rep {}", i),
        boxes_sold: i as u64,
        category: "Antibiotics".to_string(),
        week_date: "2024-W09".to_string(),
        remarks: "weekly sales".to_string(),
    }
}

fn filled_store(dir: &TempDir, capacity: usize, entries: usize) -> LocalBackupStore {
    let store = LocalBackupStore::new(dir.path().join("backup.json"), capacity);
    for i in 0..entries {
        store.append(&record(i)).unwrap();
    }
    store
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("backup_append");
    group.throughput(Throughput::Elements(1));

    for entries in [0usize, 50, 100] {
        let dir = TempDir::new().unwrap();
        let store = filled_store(&dir, 100, entries);
        let next = record(entries);
        group.bench_with_input(BenchmarkId::from_parameter(entries), &entries, |b, _| {
            b.iter(|| store.append(&next).unwrap())
        });
    }
    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = filled_store(&dir, 100, 100);
    c.bench_function("backup_read_full", |b| b.iter(|| store.read_all()));
}

fn bench_validate(c: &mut Criterion) {
    let body = json!({
        "employeeName": "Alice",
        "boxesSold": "12",
        "category": "Antibiotics",
        "weekDate": "2024-W03",
        "remarks": "ok"
    });
    c.bench_function("submission_from_json", |b| {
        b.iter(|| SalesSubmission::from_json(&body).unwrap())
    });
}

criterion_group!(benches, bench_append, bench_read, bench_validate);
criterion_main!(benches);
