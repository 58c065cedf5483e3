use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const VALUES_PATH: &str = "/v4/spreadsheets/sheet-123/values/Sheet1%21A%3AF";

fn entry() -> Value {
    json!({
        "employeeName": "Alice",
        "boxesSold": 12,
        "category": "Antibiotics",
        "weekDate": "2024-W03"
    })
}

#[tokio::test]
async fn test_submit_appends_to_sheet() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r":append$"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updates": {"updatedRange": "Sheet1!A5:F5", "updatedRows": 1}
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let server = common::spawn_server_with_sheet(&mock.uri()).await;
    let resp = reqwest::Client::new()
        .post(server.url("/api/sales"))
        .json(&entry())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["backend"], "remote");
    assert_eq!(body["message"], "Sales entry saved successfully");
    assert_eq!(body["updates"]["updatedRows"], 1);
    assert_eq!(body["updates"]["updatedRange"], "Sheet1!A5:F5");
    assert!(body.get("warning").is_none());

    // Written to exactly one place.
    assert!(server.backup_entries().is_none());
}

#[tokio::test]
async fn test_missing_field_never_reaches_sheet_or_backup() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r":append$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"updates": {"updatedRows": 1}})),
        )
        .expect(0)
        .mount(&mock)
        .await;

    let server = common::spawn_server_with_sheet(&mock.uri()).await;
    let mut body = entry();
    body.as_object_mut().unwrap().remove("category");

    let resp = reqwest::Client::new()
        .post(server.url("/api/sales"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let err: Value = resp.json().await.unwrap();
    assert_eq!(err["code"], "missing_field");
    assert!(err["error"].as_str().unwrap().contains("category"));

    assert!(server.backup_entries().is_none());
    mock.verify().await;
}

#[tokio::test]
async fn test_sheet_error_falls_back_with_warning() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r":append$"))
        .respond_with(ResponseTemplate::new(403).set_body_string("The caller does not have permission"))
        .mount(&mock)
        .await;

    let server = common::spawn_server_with_sheet(&mock.uri()).await;
    let resp = reqwest::Client::new()
        .post(server.url("/api/sales"))
        .json(&entry())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["backend"], "local");
    assert_eq!(body["message"], "Sales entry saved locally (Google Sheets error)");
    assert!(body["warning"].as_str().unwrap().contains("403"));
    assert!(body.get("updates").is_none());

    let stored = server.backup_entries().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["boxesSold"], 12);
}

#[tokio::test]
async fn test_list_maps_sheet_rows() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:F3",
            "values": [
                ["Timestamp", "Employee Name", "Boxes Sold", "Category", "Week Date", "Remarks"],
                ["2024-01-15T10:00:00", "Bob", "7", "A", "2024-W03", "ok"],
                ["2024-01-15T11:00:00", "Eve", "seven", "B", "2024-W03", ""],
                ["2024-01-15T12:00:00", "Short row"]
            ]
        })))
        .mount(&mock)
        .await;

    let server = common::spawn_server_with_sheet(&mock.uri()).await;
    let body: Value = reqwest::get(server.url("/api/sales"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["source"], "remote");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(
        data[0],
        json!({
            "timestamp": "2024-01-15T10:00:00",
            "employeeName": "Bob",
            "boxesSold": 7,
            "category": "A",
            "weekDate": "2024-W03",
            "remarks": "ok"
        })
    );
    assert_eq!(data[1]["employeeName"], "Eve");
    assert_eq!(data[1]["boxesSold"], 0);
}

#[tokio::test]
async fn test_list_falls_back_when_sheet_fails() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r":append$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock)
        .await;

    let server = common::spawn_server_with_sheet(&mock.uri()).await;
    let client = reqwest::Client::new();
    client
        .post(server.url("/api/sales"))
        .json(&entry())
        .send()
        .await
        .unwrap();

    let body: Value = client
        .get(server.url("/api/sales"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "local");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["employeeName"], "Alice");
}

#[tokio::test]
async fn test_empty_sheet_reads_backup() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALUES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"range": "Sheet1!A1:F1"})))
        .mount(&mock)
        .await;

    let server = common::spawn_server_with_sheet(&mock.uri()).await;
    let body: Value = reqwest::get(server.url("/api/sales"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["source"], "local");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_health_reports_initialized_service() {
    let mock = MockServer::start().await;
    let server = common::spawn_server_with_sheet(&mock.uri()).await;

    let body: Value = reqwest::get(server.url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["spreadsheet_configured"], true);
    assert_eq!(body["service_initialized"], true);
    assert_eq!(body["credentials_file_exists"], false);
}
