//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── ValidationError  - A submitted receipt broke an acceptance rule   │
//! │  └── CoreError        - What the receipt service reports upward        │
//! │                                                                         │
//! │  tally-store errors (separate crate)                                   │
//! │  └── StoreError       - Storage failures (become InvariantViolation)   │
//! │                                                                         │
//! │  HTTP errors (in apps/api)                                             │
//! │  └── ApiError         - What clients see (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation failure names the offending field path
//! 3. Rejections, lookups, and defects are distinct variants

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Errors reported by the receipt service.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The submitted receipt was rejected.
    ///
    /// Always recoverable: the caller fixes the payload and resubmits.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No receipt is stored under the given id.
    #[error("Receipt not found: {0}")]
    NotFound(String),

    /// An internal guarantee was broken (e.g. the store refused a receipt
    /// that had already been validated and scored).
    ///
    /// ## When This Occurs
    /// - A generated id collided with a stored one
    /// - The store lock was poisoned by a panicking writer
    ///
    /// This is a defect, not bad input. Nothing is stored when it happens.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Receipt acceptance rule violations.
///
/// `field` is a path into the submitted payload: `retailer`, `items[2].price`,
/// or `$` for the payload itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent (or `null`).
    #[error("{field} is required")]
    Missing { field: String },

    /// Field has the wrong JSON type.
    #[error("{field} must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// Field is empty (blank string, empty list).
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Field does not match its required format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Amount is below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Receipt total disagrees with the item prices.
    ///
    /// ## User Workflow
    /// ```text
    /// items: [$1.50, $0.75] ──► sum $2.25
    /// total: $2.30
    ///      │
    ///      ▼
    /// TotalMismatch { total: $2.30, items_sum: $2.25 }
    /// ```
    #[error("total ({total}) does not match the sum of item prices ({items_sum})")]
    TotalMismatch { total: Money, items_sum: Money },
}

impl ValidationError {
    /// Path of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::WrongType { field, .. }
            | ValidationError::Empty { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Negative { field } => field,
            ValidationError::TotalMismatch { .. } => "total",
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
