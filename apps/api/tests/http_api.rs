//! End-to-end tests of the HTTP surface, driven through `tower::ServiceExt`.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tally_api::rate_limit::RateLimiter;
use tally_api::{router, AppState};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    router(AppState::new(RateLimiter::per_minute(0)))
}

fn supermart() -> Value {
    json!({
        "retailer": "SuperMart",
        "purchaseDate": "2024-11-06",
        "purchaseTime": "15:30",
        "items": [
            { "shortDescription": "Apple", "price": 1.50 },
            { "shortDescription": "Banana", "price": 0.75 }
        ],
        "total": 2.25
    })
}

fn post_receipt(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/v0/receipts/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_process_then_get_points() {
    let app = app();

    let (status, body) = send(&app, post_receipt(supermart().to_string())).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&id).is_ok());

    let (status, body) = send(&app, get(&format!("/v0/receipts/{}/points", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "points": 50 }));
}

#[tokio::test]
async fn test_invalid_receipt_names_field() {
    let app = app();
    let mut payload = supermart();
    payload["purchaseTime"] = json!("25:00");

    let (status, body) = send(&app, post_receipt(payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field"], "purchaseTime");

    let (_, body) = send(&app, get("/health")).await;
    assert_eq!(body["receipts"], 0);
}

#[tokio::test]
async fn test_total_mismatch_rejected() {
    let app = app();
    let mut payload = supermart();
    payload["total"] = json!("2.26");

    let (status, body) = send(&app, post_receipt(payload.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "total");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, post_receipt("{ not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body.get("field").is_none());
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app();
    let id = Uuid::new_v4();

    let (status, body) = send(&app, get(&format!("/v0/receipts/{}/points", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_resubmission_gets_distinct_ids() {
    let app = app();

    let (_, first) = send(&app, post_receipt(supermart().to_string())).await;
    let (_, second) = send(&app, post_receipt(supermart().to_string())).await;
    assert_ne!(first["id"], second["id"]);

    for body in [first, second] {
        let uri = format!("/v0/receipts/{}/points", body["id"].as_str().unwrap());
        let (_, points) = send(&app, get(&uri)).await;
        assert_eq!(points["points"], 50);
    }

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "receipts": 2 }));
}

#[tokio::test]
async fn test_rate_limit_per_client() {
    let app = router(AppState::new(RateLimiter::per_minute(3)));

    let from = |client: &str| {
        Request::builder()
            .uri(format!("/v0/receipts/{}/points", Uuid::new_v4()))
            .header("X-Forwarded-For", client)
            .body(Body::empty())
            .unwrap()
    };

    for _ in 0..3 {
        let (status, _) = send(&app, from("198.51.100.1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    let response = app.clone().oneshot(from("198.51.100.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "RATE_LIMITED");
    assert_eq!(body["message"], "ratelimit exceeded: 3 per 60 seconds");

    let (status, _) = send(&app, from("198.51.100.2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Health sits outside the limited routes
    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}
