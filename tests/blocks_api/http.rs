//! HTTP transport tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use serde_json::{json, Value};
use smart_blocks::api::{self, BlockService};
use smart_blocks::InMemoryBlockStore;

use crate::support::{block_json, seeded, service};

/// Bind to port 0 and return the base url.
async fn start_server(service: BlockService<InMemoryBlockStore>) -> String {
    let app = api::router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_check() {
    let base = start_server(seeded()).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "blocks": 3 }));
}

#[tokio::test]
async fn crud_round_trip() {
    let base = start_server(service()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/blocks"))
        .json(&block_json("Figma", "https://figma.com", "Technology"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let id = body["data"]["id"].as_u64().unwrap();

    let resp = client
        .put(format!("{base}/api/blocks/{id}"))
        .json(&json!({ "category": "Education" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["category"], "Education");

    let resp = client
        .get(format!("{base}/api/blocks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(format!("{base}/api/blocks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{base}/api/blocks/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_query_string() {
    let base = start_server(seeded()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/blocks"))
        .query(&[("category", "Technology"), ("limit", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["blocks"][0]["title"], "Notion");
    assert_eq!(body["data"]["hasMore"], true);

    let resp = client
        .get(format!("{base}/api/blocks?limit=500"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid query parameters");
}

#[tokio::test]
async fn category_with_spaces_and_ampersand() {
    let service = service();
    crate::support::create(
        &service,
        block_json("MyFitnessPal", "https://myfitnesspal.com", "Health & Fitness"),
    );
    let base = start_server(service).await;

    let resp = reqwest::Client::new()
        .get(format!("{base}/api/blocks"))
        .query(&[("category", "Health & Fitness")])
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn malformed_body_is_400_envelope() {
    let base = start_server(service()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/blocks"))
        .header("content-type", "application/json")
        .body("{ nope")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn stats_route_is_not_an_id() {
    let base = start_server(seeded()).await;
    let resp = reqwest::get(format!("{base}/api/blocks/stats")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["topCategory"], "Technology");
}

#[tokio::test]
async fn unknown_route_gets_envelope() {
    let base = start_server(service()).await;
    let resp = reqwest::get(format!("{base}/api/nothing")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let base = start_server(service()).await;
    let resp = reqwest::Client::new()
        .get(format!("{base}/api/blocks"))
        .header("origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn unsupported_method_gets_envelope() {
    let base = start_server(seeded()).await;
    let client = reqwest::Client::new();

    let cases = [
        (reqwest::Method::PATCH, format!("{base}/api/blocks/1")),
        (reqwest::Method::POST, format!("{base}/api/blocks/1")),
        (reqwest::Method::DELETE, format!("{base}/api/blocks")),
        (reqwest::Method::PUT, format!("{base}/api/blocks/stats")),
    ];
    for (method, url) in cases {
        let resp = client.request(method.clone(), &url).send().await.unwrap();
        assert_eq!(resp.status(), 405, "{method} {url}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Method not allowed");
    }

    let resp = reqwest::get(format!("{base}/api/blocks/1")).await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn oversized_body_gets_envelope() {
    let base = start_server(service()).await;
    let title = "x".repeat(3 * 1024 * 1024);
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/blocks"))
        .json(&block_json(&title, "https://big.example.com", "Technology"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 413);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Payload too large");

    let resp = reqwest::get(format!("{base}/api/blocks")).await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["total"], 0);
}
