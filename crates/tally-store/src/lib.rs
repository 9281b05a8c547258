//! # tally-store: Receipt Storage for Tally
//!
//! This crate owns where accepted receipts live and exposes the service the
//! HTTP layer calls.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         tally-store                                     │
//! │                                                                         │
//! │  ┌──────────────────────┐      ┌──────────────────────────────────┐    │
//! │  │   ReceiptService<S>  │─────►│  S: ReceiptStore                 │    │
//! │  │  process_submission  │      │  ├── put(receipt) -> id          │    │
//! │  │  points_for          │      │  ├── get(id) -> Option<Receipt>  │    │
//! │  └──────────┬───────────┘      │  └── len()                       │    │
//! │             │                  └──────────────┬───────────────────┘    │
//! │             ▼                                 ▼                        │
//! │   tally-core::validate            MemoryStore (RwLock<HashMap>)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use tally_store::{MemoryStore, ReceiptService};
//!
//! let service = ReceiptService::new(MemoryStore::new());
//! let id = service
//!     .process_submission(&json!({
//!         "retailer": "Target",
//!         "purchaseDate": "2022-01-02",
//!         "purchaseTime": "13:13",
//!         "items": [{ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }],
//!         "total": "1.25"
//!     }))
//!     .unwrap();
//!
//! assert_eq!(service.points_for(&id).unwrap(), 31);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::{MemoryStore, ReceiptStore};
pub use service::ReceiptService;
