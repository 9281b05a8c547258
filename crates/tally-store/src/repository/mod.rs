//! # Repository Module
//!
//! Storage for accepted receipts.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ReceiptService                                                        │
//! │       │                                                                 │
//! │       │  store.put(receipt) / store.get(id)                            │
//! │       ▼                                                                 │
//! │  ReceiptStore (trait, this module)                                     │
//! │  ├── put(&self, receipt) -> id                                         │
//! │  ├── get(&self, id)      -> Option<Receipt>                            │
//! │  └── len(&self)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MemoryStore (RwLock<HashMap>)                                         │
//! │                                                                         │
//! │  The service only sees the trait, so tests can hand it any store.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`MemoryStore`] - process-lifetime, in-memory map

pub mod memory;

pub use memory::MemoryStore;

use tally_core::Receipt;

use crate::error::StoreResult;

/// Holds accepted receipts keyed by their generated id.
///
/// ## Contract
/// - `put` is atomic: the id check and the insert happen under one lock
/// - `put` never rejects a well-formed receipt with a fresh id
/// - `get` on an unknown id is `Ok(None)`, not an error
pub trait ReceiptStore: Send + Sync {
    /// Stores a validated, scored receipt and returns its id.
    fn put(&self, receipt: Receipt) -> StoreResult<String>;

    /// Looks up a receipt by id.
    fn get(&self, id: &str) -> StoreResult<Option<Receipt>>;

    /// Number of stored receipts.
    fn len(&self) -> StoreResult<usize>;

    /// Whether the store holds no receipts.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
