//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use quiz_results::{service, InMemoryRecordStore, Service};
use serde_json::{json, Value};

use crate::support::{in_memory_service, result_body, timestamp};

/// Bind to port 0 and return the actual address.
async fn start_server(service: Arc<Service<InMemoryRecordStore>>) -> String {
    let app = service::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_routes() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let routes = body["routes"].as_array().unwrap();
    assert!(routes.iter().any(|r| r == "results.save"));
    assert!(routes.iter().any(|r| r == "results.leaderboard"));
}

#[tokio::test]
async fn post_then_history() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/"))
        .json(&result_body("u1", &timestamp(1), "g", json!(87.5)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Success" }));

    let resp = client
        .get(format!("{base}/?userId=u1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body[0]["score"], json!(87.5));
    assert_eq!(body[0]["userId"], json!("u1"));
}

#[tokio::test]
async fn leaderboard_over_http() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    for (user, score) in [("a", 3), ("b", 9), ("c", 6)] {
        client
            .post(format!("{base}/"))
            .json(&result_body(user, &timestamp(1), "g", json!(score)))
            .send()
            .await
            .unwrap();
    }

    let resp = client
        .get(format!("{base}/?type=leaderboard&gameId=g"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let users: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["userId"].as_str().unwrap())
        .collect();
    assert_eq!(users, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn preflight_returns_cors() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let methods = resp
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(methods.as_deref(), Some("POST, GET, OPTIONS"));
}

#[tokio::test]
async fn malformed_body_is_400_with_cors() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn delete_is_unsupported() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    let resp = client.delete(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Unsupported method" }));
}

fn allow_origin(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn health_carries_cors() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));
}

#[tokio::test]
async fn any_path_dispatches() {
    let base = start_server(Arc::new(in_memory_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/results"))
        .json(&result_body("u1", &timestamp(1), "g", json!(5)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));

    let resp = client
        .get(format!("{base}/results?userId=u1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body[0]["score"], json!(5));

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/results/nested"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(allow_origin(&resp).as_deref(), Some("*"));
}
