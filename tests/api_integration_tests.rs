//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mini_cache::{api::create_router, AppState, Cache};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(max_entries: usize) -> Router {
    let cache = Cache::new(Duration::ZERO, max_entries).unwrap();
    create_router(AppState::new(cache, Duration::from_secs(300)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

// == PUT Endpoint Tests ==

#[tokio::test]
async fn test_put_endpoint_success() {
    let app = create_test_app(100);

    let (status, json) = send(
        &app,
        "PUT",
        "/cache/test_key",
        Some(json!({"value": "test_value"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("test_key"));
    assert_eq!(json["ttl_ms"], 300_000);
}

#[tokio::test]
async fn test_put_endpoint_numeric_ttl() {
    let app = create_test_app(100);

    let (status, json) = send(
        &app,
        "PUT",
        "/cache/ttl_key",
        Some(json!({"value": 1, "ttl": 60})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ttl_ms"], 60_000);
}

#[tokio::test]
async fn test_put_endpoint_bad_ttl() {
    let app = create_test_app(100);

    for ttl in [json!("5 minutes"), json!("-1s"), json!("")] {
        let (status, json) = send(
            &app,
            "PUT",
            "/cache/key",
            Some(json!({"value": "v", "ttl": ttl})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "ttl {:?}", ttl);
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_put_endpoint_key_too_long() {
    let app = create_test_app(100);
    let uri = format!("/cache/{}", "k".repeat(300));

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"value": "v"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(100);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/cache/key")
                .header("content-type", "application/json")
                .body(Body::from("not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(100);
    let value = json!({"city": "chita", "population": [1, 2, 3]});

    send(&app, "PUT", "/cache/get_key", Some(json!({"value": value.clone()}))).await;
    let (status, json) = send(&app, "GET", "/cache/get_key", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], value);
    let remaining = json["ttl_remaining_ms"].as_u64().unwrap();
    assert!(remaining > 290_000 && remaining <= 300_000);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(100);

    let (status, json) = send(&app, "GET", "/cache/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nonexistent"));
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app(100);

    send(&app, "PUT", "/cache/del_key", Some(json!({"value": "v"}))).await;

    let (status, json) = send(&app, "DELETE", "/cache/del_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["existed"], true);

    let (status, json) = send(&app, "DELETE", "/cache/del_key", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["existed"], false);

    let (status, _) = send(&app, "GET", "/cache/del_key", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Keys Endpoint Tests ==

#[tokio::test]
async fn test_keys_endpoint() {
    let app = create_test_app(100);

    for key in ["zeta", "alpha", "mid"] {
        send(&app, "PUT", &format!("/cache/{}", key), Some(json!({"value": key}))).await;
    }

    let (status, json) = send(&app, "GET", "/cache", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["keys"], json!(["alpha", "mid", "zeta"]));
    assert_eq!(json["count"], 3);
}

// == Capacity Tests ==

#[tokio::test]
async fn test_capacity_evicts_least_recently_used() {
    let app = create_test_app(2);

    send(&app, "PUT", "/cache/a", Some(json!({"value": 1}))).await;
    send(&app, "PUT", "/cache/b", Some(json!({"value": 2}))).await;
    send(&app, "GET", "/cache/a", None).await;
    send(&app, "PUT", "/cache/c", Some(json!({"value": 3}))).await;

    assert_eq!(send(&app, "GET", "/cache/b", None).await.0, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "GET", "/cache/a", None).await.0, StatusCode::OK);
    assert_eq!(send(&app, "GET", "/cache/c", None).await.0, StatusCode::OK);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["evictions"], 1);
    assert_eq!(stats["total_entries"], 2);
}

// == Stats and Health Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(100);

    send(&app, "PUT", "/cache/s", Some(json!({"value": "v"}))).await;
    send(&app, "GET", "/cache/s", None).await;
    send(&app, "GET", "/cache/missing", None).await;

    let (status, json) = send(&app, "GET", "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert!((json["hit_rate"].as_f64().unwrap() - 0.5).abs() < 0.001);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(100);

    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == TTL Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app(100);

    send(
        &app,
        "PUT",
        "/cache/short",
        Some(json!({"value": "v", "ttl": "50ms"})),
    )
    .await;
    assert_eq!(send(&app, "GET", "/cache/short", None).await.0, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(
        send(&app, "GET", "/cache/short", None).await.0,
        StatusCode::NOT_FOUND
    );
    let (_, keys) = send(&app, "GET", "/cache", None).await;
    assert_eq!(keys["count"], 0);
}

// == Live Server Test ==

#[tokio::test]
async fn test_live_server_roundtrip() {
    let cache = Cache::new(Duration::from_millis(50), 100).unwrap();
    let app = create_router(AppState::new(cache, Duration::from_secs(300)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let response = client
        .put(format!("{}/cache/live", base))
        .json(&json!({"value": {"n": 7}, "ttl": "1m"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = client
        .get(format!("{}/cache/live", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["value"]["n"], 7);

    let health = client.get(format!("{}/health", base)).send().await.unwrap();
    assert!(health.status().is_success());
}
