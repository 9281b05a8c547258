//! # HTTP Handlers
//!
//! ```text
//! POST /v0/receipts/process      body: receipt JSON  ──► { "id": "..." }
//! GET  /v0/receipts/{id}/points                      ──► { "points": 32 }
//! GET  /health                                       ──► { "status": "ok", ... }
//! ```
//!
//! Handlers are thin: decode, call [`ReceiptService`](tally_store::ReceiptService),
//! map errors with [`ApiError`].

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tally_core::Points;
use ts_rs::TS;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

// =============================================================================
// Response Bodies
// =============================================================================

/// Returned after a receipt is accepted.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ProcessResponse {
    pub id: String,
}

/// Returned by the points lookup.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct PointsResponse {
    #[ts(type = "number")]
    pub points: Points,
}

/// Liveness report.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
    /// Number of receipts currently stored
    #[ts(type = "number")]
    pub receipts: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /v0/receipts/process`
///
/// The body is decoded here rather than with the `Json` extractor so that
/// malformed input yields the same error body as every other failure.
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ProcessResponse>> {
    let raw: Value = serde_json::from_slice(&body).map_err(|err| {
        ApiError::bad_request(format!("Request body is not valid JSON: {}", err))
    })?;

    let id = state.service.process_submission(&raw)?;
    Ok(Json(ProcessResponse { id }))
}

/// `GET /v0/receipts/{id}/points`
pub async fn get_receipt_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let points = state.service.points_for(&id)?;
    Ok(Json(PointsResponse { points }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let receipts = state.service.receipt_count()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        receipts,
    }))
}
