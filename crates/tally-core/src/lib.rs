//! # tally-core: Pure Receipt Logic for Tally
//!
//! This crate is the **heart** of Tally. It decides whether a submitted
//! receipt is acceptable and how many loyalty points it earns, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    POST /v0/receipts/process      GET /v0/receipts/{id}/points  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tally-store (ReceiptService + MemoryStore)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │  scoring  │  │   │
//! │  │   │  Receipt  │  │   Money   │  │  validate │  │   score   │  │   │
//! │  │   │   Item    │  │  (cents)  │  │   rules   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Receipt, Item)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Acceptance rules, produces a scored `Receipt`
//! - [`scoring`] - Point rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same receipt = same points, every time
//! 2. **No I/O**: storage and transport live in other crates
//! 3. **Integer Money**: amounts are cents (i64), never floats
//! 4. **Explicit Errors**: rejections are typed values, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use tally_core::validate;
//!
//! let receipt = validate(&json!({
//!     "retailer": "Target",
//!     "purchaseDate": "2022-01-02",
//!     "purchaseTime": "13:13",
//!     "items": [{ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }],
//!     "total": "1.25"
//! }))
//! .unwrap();
//!
//! // 6 (retailer) + 25 (quarter) = 31
//! assert_eq!(receipt.points(), 31);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod scoring;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use scoring::score;
pub use types::*;
pub use validation::validate;
