//! HTTP surface tests. Starts an axum server and drives it with reqwest.

use archive_date_dialog::http;
use serde_json::{json, Value};

use crate::support::{self, Fixture, DB};

async fn start_server(fixture: &Fixture) -> String {
    let app = http::router(fixture.dialog.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn url(base: &str) -> String {
    format!("{base}/archive-date?id={}&db={DB}", support::item_id())
}

#[tokio::test]
async fn open_returns_view() {
    let fixture = Fixture::new(support::multilingual_item());
    let base = start_server(&fixture).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(url(&base))
        .header("x-user", "sitecore\\admin")
        .header("x-roles", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["item_date"], "");
    assert_eq!(body["rows"].as_array().unwrap().len(), 4);
    assert_eq!(body["rows"][0]["key"], json!({ "language": "da", "number": 1 }));
}

#[tokio::test]
async fn open_without_role_is_forbidden() {
    let fixture = Fixture::new(support::plain_item());
    let base = start_server(&fixture).await;
    let resp = reqwest::Client::new()
        .get(url(&base))
        .header("x-user", "sitecore\\author")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn html_form() {
    let fixture = Fixture::new(support::plain_item());
    let base = start_server(&fixture).await;
    let resp = reqwest::Client::new()
        .get(format!(
            "{base}/archive-date/html?id={}&db={DB}",
            support::item_id()
        ))
        .header("x-user", "sitecore\\admin")
        .header("x-roles", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("name=\"archive_en_1\""));
}

#[tokio::test]
async fn confirm_sets_and_alerts() {
    let fixture = Fixture::new(support::plain_item());
    let base = start_server(&fixture).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(url(&base))
        .header("x-user", "sitecore\\admin")
        .header("x-roles", "admin")
        .json(&json!({
            "item_date": "2024-01-15",
            "version_dates": [{ "language": "en", "number": 1, "date": "" }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["close"]["item"],
        json!({ "change": "set", "value": "20240115T000000Z" })
    );
    assert_eq!(fixture.item().archive_date(), "20240115T000000Z");

    let resp = client
        .post(url(&base))
        .header("x-user", "sitecore\\admin")
        .header("x-roles", "admin")
        .json(&json!({ "item_date": "not-a-date" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["alert"],
        "Failed to parse date not-a-date. No changes have been made."
    );
    assert_eq!(fixture.item().archive_date(), "20240115T000000Z");
}

#[tokio::test]
async fn missing_item_is_not_found() {
    let fixture = Fixture::new(support::plain_item());
    let base = start_server(&fixture).await;
    let resp = reqwest::Client::new()
        .get(format!(
            "{base}/archive-date?id={{00000000-0000-0000-0000-000000000001}}&db={DB}"
        ))
        .header("x-user", "sitecore\\admin")
        .header("x-roles", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
