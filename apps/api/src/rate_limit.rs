//! # Per-Client Rate Limiting
//!
//! Fixed-window request counting keyed by client address.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request ──► client_key ──► RateLimiter::check                          │
//! │                                 │                                       │
//! │                 ┌───────────────┴───────────────┐                       │
//! │                 ▼                               ▼                       │
//! │          Decision::Allowed             Decision::Limited                │
//! │          next.run(request)             429 + Retry-After                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Each client gets `limit` requests per window; the window starts at the
//!   client's first request.
//! - A limit of 0 disables the limiter entirely.
//! - The client key is the first `X-Forwarded-For` entry, else the peer IP.
//! - Expired windows are dropped at most once per window.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::ApiError;

/// Length of one counting window.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Header carrying the original client address behind a proxy.
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Per-client windows plus the time expired ones were last dropped.
#[derive(Debug, Default)]
struct Clients {
    windows: HashMap<String, Window>,
    last_pruned: Option<Instant>,
}

impl Clients {
    /// Drops expired windows, at most once per `window`.
    fn prune(&mut self, now: Instant, window: Duration) {
        match self.last_pruned {
            Some(at) if now.saturating_duration_since(at) < window => {}
            Some(_) => {
                self.windows
                    .retain(|_, w| now.saturating_duration_since(w.started) < window);
                self.last_pruned = Some(now);
            }
            None => self.last_pruned = Some(now),
        }
    }
}

/// Counts requests per client in fixed windows.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: Mutex<Clients>,
}

impl RateLimiter {
    /// Creates a limiter allowing `limit` requests per `window`.
    pub fn new(limit: u32, window: Duration) -> Self {
        RateLimiter {
            limit,
            window,
            clients: Mutex::new(Clients::default()),
        }
    }

    /// Creates a limiter allowing `limit` requests per minute.
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, WINDOW)
    }

    /// Returns false when limiting is switched off.
    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// Records a request from `client` and decides whether it may proceed.
    pub fn check(&self, client: &str) -> Decision {
        self.check_at(client, Instant::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(&self, client: &str, now: Instant) -> Decision {
        if !self.is_enabled() {
            return Decision::Allowed;
        }

        // Counters stay usable even if a holder panicked mid-update
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);

        clients.prune(now, self.window);

        let entry = clients.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.limit {
            let retry_after = self
                .window
                .saturating_sub(now.saturating_duration_since(entry.started));
            return Decision::Limited { retry_after };
        }

        entry.count += 1;
        Decision::Allowed
    }

    /// Human-readable limit, e.g. `30 per 60 seconds`.
    pub fn describe(&self) -> String {
        format!("{} per {} seconds", self.limit, self.window.as_secs())
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .windows
            .len()
    }
}

/// Identifies the client behind a request.
pub fn client_key(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(client) = forwarded {
        return client.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware rejecting clients that exceed their window.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if !limiter.is_enabled() {
        return next.run(request).await;
    }

    let client = client_key(&request);
    match limiter.check(&client) {
        Decision::Allowed => next.run(request).await,
        Decision::Limited { retry_after } => {
            warn!(client = %client, path = %request.uri().path(), "Rate limit exceeded");

            let mut response = ApiError::rate_limited(limiter.describe()).into_response();
            let seconds = retry_after.as_secs().max(1);
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(seconds));
            response
        }
    }
}
