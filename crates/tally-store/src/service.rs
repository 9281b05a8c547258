//! # Receipt Service
//!
//! The two operations the transport layer calls.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ReceiptService                                   │
//! │                                                                         │
//! │  process_submission(raw)                                               │
//! │       │                                                                 │
//! │       ├── validate(raw) ──✗──► CoreError::Validation  (nothing stored) │
//! │       │        │                                                        │
//! │       │        ▼  Receipt { id, points }                               │
//! │       ├── store.put ─────✗──► CoreError::InvariantViolation            │
//! │       │                                                                 │
//! │       └── Ok(id)                                                       │
//! │                                                                         │
//! │  points_for(id)                                                        │
//! │       ├── store.get ─ None ──► CoreError::NotFound                     │
//! │       └── Ok(receipt.points())                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is passed in at construction; there is no process-wide
//! registry.

use serde_json::Value;
use tally_core::{validate, CoreError, CoreResult, Points};
use tracing::{debug, error, info};

use crate::repository::ReceiptStore;

/// Validates, scores and stores receipts; answers points lookups.
#[derive(Debug)]
pub struct ReceiptService<S> {
    store: S,
}

impl<S: ReceiptStore> ReceiptService<S> {
    /// Creates a service over the given store.
    pub fn new(store: S) -> Self {
        ReceiptService { store }
    }

    /// Accepts a raw submission and returns the new receipt id.
    ///
    /// Storage happens only after validation and scoring both succeed.
    pub fn process_submission(&self, raw: &Value) -> CoreResult<String> {
        let receipt = validate(raw).map_err(|err| {
            debug!(field = err.field(), error = %err, "Receipt rejected");
            err
        })?;

        let points = receipt.points();
        let id = self.store.put(receipt).map_err(|err| {
            error!(error = %err, "Failed to store an accepted receipt");
            CoreError::from(err)
        })?;

        info!(id = %id, points, "Receipt accepted");
        Ok(id)
    }

    /// Returns the points of a stored receipt.
    pub fn points_for(&self, id: &str) -> CoreResult<Points> {
        match self.store.get(id) {
            Ok(Some(receipt)) => Ok(receipt.points()),
            Ok(None) => {
                debug!(id = %id, "Receipt not found");
                Err(CoreError::NotFound(id.to_string()))
            }
            Err(err) => {
                error!(id = %id, error = %err, "Failed to read receipt store");
                Err(err.into())
            }
        }
    }

    /// Number of receipts accepted so far.
    pub fn receipt_count(&self) -> CoreResult<usize> {
        Ok(self.store.len()?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::repository::MemoryStore;
    use serde_json::json;
    use tally_core::{Receipt, ValidationError};
    use uuid::Uuid;

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

    /// Store whose lock is always poisoned.
    struct PoisonedStore;

    impl ReceiptStore for PoisonedStore {
        fn put(&self, _receipt: Receipt) -> StoreResult<String> {
            Err(StoreError::LockPoisoned)
        }

        fn get(&self, _id: &str) -> StoreResult<Option<Receipt>> {
            Err(StoreError::LockPoisoned)
        }

        fn len(&self) -> StoreResult<usize> {
            Err(StoreError::LockPoisoned)
        }
    }

    #[test]
    fn test_process_then_lookup() {
        let service = ReceiptService::new(MemoryStore::new());

        let id = service.process_submission(&supermart()).unwrap();
        assert_eq!(service.points_for(&id).unwrap(), 50);
        assert_eq!(service.receipt_count().unwrap(), 1);
    }

    #[test]
    fn test_resubmission_gets_new_id_same_points() {
        let service = ReceiptService::new(MemoryStore::new());

        let first = service.process_submission(&supermart()).unwrap();
        let second = service.process_submission(&supermart()).unwrap();

        assert_ne!(first, second);
        assert_eq!(
            service.points_for(&first).unwrap(),
            service.points_for(&second).unwrap()
        );
    }

    #[test]
    fn test_rejection_stores_nothing() {
        let service = ReceiptService::new(MemoryStore::new());
        let mut payload = supermart();
        payload["total"] = json!(9.99);

        let err = service.process_submission(&payload).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TotalMismatch { .. })
        ));
        assert_eq!(service.receipt_count().unwrap(), 0);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let service = ReceiptService::new(MemoryStore::new());
        let id = Uuid::new_v4().to_string();

        let err = service.points_for(&id).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(missing) if missing == id));
    }

    #[test]
    fn test_store_failure_is_invariant_violation() {
        let service = ReceiptService::new(PoisonedStore);

        let err = service.process_submission(&supermart()).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));

        let err = service.points_for("anything").unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
    }

    #[test]
    fn test_validation_runs_before_store() {
        let service = ReceiptService::new(PoisonedStore);

        let err = service.process_submission(&json!({})).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
