//! # HTTP Routes
//!
//! ```text
//! POST /receipts/process       {receipt}   → 200 {"id": "..."}
//! GET  /receipts/{id}/points               → 200 {"points": 28}
//! GET  /health                             → 200 {"status": "healthy"}
//!                                            503 {"status": "unhealthy"}
//! ```
//!
//! Failures are `{"message": "..."}`; see [`crate::error`] for the statuses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use receipt_core::RawReceipt;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::service::ReceiptService;

/// Body of a successful submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

/// Body of a successful lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}

/// Body of the health probe.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Builds the application router.
pub fn router(service: ReceiptService) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/{id}/points", get(get_points))
        .route("/health", get(health))
        .with_state(service)
}

/// Submits a receipt.
async fn process_receipt(
    State(service): State<ReceiptService>,
    payload: Result<Json<RawReceipt>, JsonRejection>,
) -> ApiResult<Json<ProcessResponse>> {
    let Json(raw) = payload?;
    let id = service.submit(raw).await?;
    Ok(Json(ProcessResponse { id }))
}

/// Looks up the points of a stored receipt.
async fn get_points(
    State(service): State<ReceiptService>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let points = service.lookup(&id).await?;
    Ok(Json(PointsResponse { points }))
}

/// Health check endpoint.
async fn health(State(service): State<ReceiptService>) -> impl IntoResponse {
    let (status, label) = if service.is_healthy().await {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
        }),
    )
}
