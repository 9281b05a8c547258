//! # Memory Store
//!
//! In-memory receipt storage. All data is lost when the process exits.
//!
//! ## Thread Safety
//! The map is wrapped in an `RwLock` because:
//! 1. Many request handlers read points concurrently
//! 2. Inserts must check-and-insert atomically
//! 3. Ids are unique per receipt, so writers never contend on one key
//!
//! A poisoned lock is reported as [`StoreError::LockPoisoned`] instead of
//! panicking the caller.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use tally_core::Receipt;
use tracing::debug;

use super::ReceiptStore;
use crate::error::{StoreError, StoreResult};

/// Process-lifetime receipt store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    receipts: RwLock<HashMap<String, Receipt>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ReceiptStore for MemoryStore {
    fn put(&self, receipt: Receipt) -> StoreResult<String> {
        let mut receipts = self
            .receipts
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        match receipts.entry(receipt.id().to_string()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                debug!(id = %id, points = receipt.points(), "Storing receipt");
                entry.insert(receipt);
                Ok(id)
            }
        }
    }

    fn get(&self, id: &str) -> StoreResult<Option<Receipt>> {
        let receipts = self
            .receipts
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;

        Ok(receipts.get(id).cloned())
    }

    fn len(&self) -> StoreResult<usize> {
        let receipts = self
            .receipts
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;

        Ok(receipts.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
