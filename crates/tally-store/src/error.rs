//! # Store Error Types
//!
//! Error types for receipt storage.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError::InvariantViolation ← a scored receipt could not be stored  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in apps/api) ← 500, detail only in the logs                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::CoreError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A receipt with this id is already stored.
    ///
    /// ## When This Occurs
    /// - Two receipts were generated with the same UUID (should never happen)
    /// - The same `Receipt` value was put twice
    ///
    /// The existing entry is left untouched.
    #[error("Duplicate receipt id: '{0}' already exists")]
    DuplicateId(String),

    /// A writer panicked while holding the store lock.
    #[error("Receipt store lock poisoned")]
    LockPoisoned,
}

/// A storage failure after successful validation is a defect, not bad input.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::InvariantViolation(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_become_invariant_violations() {
        let core_err: CoreError = StoreError::DuplicateId("abc".to_string()).into();
        assert!(matches!(core_err, CoreError::InvariantViolation(_)));
        assert_eq!(
            core_err.to_string(),
            "Invariant violation: Duplicate receipt id: 'abc' already exists"
        );
    }
}
