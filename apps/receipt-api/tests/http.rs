//! End-to-end HTTP tests against the router, backed by an in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use receipt_api::{router, ReceiptService};
use receipt_core::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(ReceiptService::new(Arc::new(MemoryStore::new())))
}

fn scenario_a() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
            {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
            {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
            {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
            {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
        ],
        "total": "35.35"
    })
}

fn scenario_b() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"}
        ],
        "total": "9.00"
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn process(app: &Router, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn points(app: &Router, id: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(format!("/receipts/{id}/points"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_process_then_lookup() {
    let app = app();

    let (status, body) = process(&app, &scenario_a()).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = points(&app, &id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"points": 28}));

    let (status, body) = process(&app, &scenario_b()).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = points(&app, body["id"].as_str().unwrap()).await;
    assert_eq!(body, json!({"points": 109}));
}

#[tokio::test]
async fn test_missing_retailer() {
    let app = app();
    let mut receipt = scenario_a();
    receipt.as_object_mut().unwrap().remove("retailer");

    let (status, body) = process(&app, &receipt).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Mandatory value retailer not found."}));
}

#[tokio::test]
async fn test_invalid_date() {
    let app = app();
    let mut receipt = scenario_a();
    receipt["purchaseDate"] = json!("2022/01/01");

    let (status, body) = process(&app, &receipt).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Date format is incorrect. Please use YYYY-MM-DD format."
    );
}

#[tokio::test]
async fn test_total_mismatch() {
    let app = app();
    let mut receipt = scenario_a();
    receipt["total"] = json!("35.350");

    let (status, body) = process(&app, &receipt).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "total value is incorrect.");
}

#[tokio::test]
async fn test_duplicate_submission() {
    let app = app();
    let (status, _) = process(&app, &scenario_a()).await;
    assert_eq!(status, StatusCode::OK);

    let mut again = scenario_a();
    again["items"] = json!([{"shortDescription": "Pepsi", "price": "35.35"}]);

    let (status, body) = process(&app, &again).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Receipt is already used."}));
}

#[tokio::test]
async fn test_unknown_id() {
    let app = app();

    let (status, body) = points(&app, "7fb1377b-b223-49d9-a31a-5a02701dd310").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "No points found for id 7fb1377b-b223-49d9-a31a-5a02701dd310"
    );

    let (status, _) = points(&app, "not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_id() {
    let app = app();

    let (status, body) = points(&app, "%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "id in url is invalid"}));
}

#[tokio::test]
async fn test_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}
