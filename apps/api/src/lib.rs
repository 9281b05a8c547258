//! # Tally API
//!
//! HTTP server that accepts purchase receipts and reports their loyalty
//! points.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Tally API                                     │
//! │                                                                         │
//! │  TraceLayer                                                             │
//! │     │                                                                   │
//! │     ├── /v0 ── rate_limit ──┬── POST /receipts/process                  │
//! │     │                       └── GET  /receipts/{id}/points              │
//! │     │                                     │                             │
//! │     │                                     ▼                             │
//! │     │                      ReceiptService<MemoryStore>                  │
//! │     │                                                                   │
//! │     └── GET /health                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ApiConfig`] for the `TALLY_*` environment variables.

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tally_store::{MemoryStore, ReceiptService};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::rate_limit::RateLimiter;

// Re-exports
pub use crate::error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReceiptService<MemoryStore>>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates state over an empty store.
    pub fn new(limiter: RateLimiter) -> Self {
        AppState {
            service: Arc::new(ReceiptService::new(MemoryStore::new())),
            limiter: Arc::new(limiter),
        }
    }

    /// Creates state from loaded configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(RateLimiter::per_minute(config.rate_limit_per_minute))
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let receipts = Router::new()
        .route("/receipts/process", post(routes::process_receipt))
        .route("/receipts/{id}/points", get(routes::get_receipt_points))
        .layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit::rate_limit,
        ));

    Router::new()
        .nest("/v0", receipts)
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
