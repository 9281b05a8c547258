//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────┐              │
//! │  │      Receipt        │ 1     n  │        Item         │              │
//! │  │  ─────────────────  │─────────►│  ─────────────────  │              │
//! │  │  id (UUID)          │          │  shortDescription   │              │
//! │  │  retailer           │          │  price (Money)      │              │
//! │  │  purchaseDate       │          └─────────────────────┘              │
//! │  │  purchaseTime       │                                                │
//! │  │  total (Money)      │                                                │
//! │  │  points (computed)  │                                                │
//! │  └─────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! A `Receipt` can only be built by [`crate::validation::validate`]. Its
//! fields are private and its points are scored once, inside the acceptance
//! constructor. There is no way to change a receipt afterwards.

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::scoring::score;

/// Points awarded for a receipt.
pub type Points = u64;

// =============================================================================
// Item
// =============================================================================

/// One line entry of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Description, stored with surrounding whitespace trimmed.
    pub short_description: String,

    /// Line price.
    #[ts(as = "String")]
    pub price: Money,
}

impl Item {
    /// Number of characters in the (already trimmed) description.
    #[inline]
    pub fn description_len(&self) -> usize {
        self.short_description.chars().count()
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A validated purchase receipt with its loyalty points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    id: String,
    retailer: String,
    #[ts(as = "String")]
    purchase_date: NaiveDate,
    #[ts(as = "String")]
    purchase_time: ClockTime,
    items: Vec<Item>,
    #[ts(as = "String")]
    total: Money,
    #[ts(type = "number")]
    points: Points,
}

/// Purchase time, written back out in its submitted `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockTime(NaiveTime);

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format(crate::validation::TIME_FORMAT))
    }
}

impl Receipt {
    /// Accepts validated parts: assigns a fresh id and scores the receipt.
    ///
    /// ## Acceptance Flow
    /// ```text
    /// validated fields ──► new UUID v4 ──► score() ──► Receipt { points }
    /// ```
    pub(crate) fn accept(
        retailer: String,
        purchase_date: NaiveDate,
        purchase_time: NaiveTime,
        items: Vec<Item>,
        total: Money,
    ) -> Self {
        let mut receipt = Receipt {
            id: Uuid::new_v4().to_string(),
            retailer,
            purchase_date,
            purchase_time: ClockTime(purchase_time),
            items,
            total,
            points: 0,
        };
        receipt.points = score(&receipt);
        receipt
    }

    /// Unique identifier assigned at acceptance.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Retailer display name.
    #[inline]
    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    #[inline]
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    #[inline]
    pub fn purchase_time(&self) -> NaiveTime {
        self.purchase_time.0
    }

    /// Line items, in submission order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    /// Points computed when the receipt was accepted.
    #[inline]
    pub fn points(&self) -> Points {
        self.points
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Receipt {
        Receipt::accept(
            "Target".to_string(),
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(13, 1, 0).unwrap(),
            vec![Item {
                short_description: "Mountain Dew 12PK".to_string(),
                price: Money::from_cents(649),
            }],
            Money::from_cents(649),
        )
    }

    #[test]
    fn test_accept_assigns_uuid_and_points() {
        let receipt = sample();
        assert!(Uuid::parse_str(receipt.id()).is_ok());
        assert_eq!(receipt.points(), score(&receipt));
    }

    #[test]
    fn test_accept_generates_distinct_ids() {
        assert_ne!(sample().id(), sample().id());
    }

    #[test]
    fn test_description_len_counts_chars() {
        let item = Item {
            short_description: "Crème".to_string(),
            price: Money::zero(),
        };
        assert_eq!(item.description_len(), 5);
    }

    #[test]
    fn test_receipt_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["retailer"], "Target");
        assert_eq!(json["purchaseDate"], "2022-01-01");
        assert_eq!(json["purchaseTime"], "13:01");
        assert_eq!(json["items"][0]["shortDescription"], "Mountain Dew 12PK");
        assert_eq!(json["items"][0]["price"], "6.49");
        assert_eq!(json["total"], "6.49");
        assert!(json["points"].is_u64());
    }

    #[test]
    fn test_clock_time_drops_seconds() {
        let time = ClockTime(NaiveTime::from_hms_opt(9, 5, 42).unwrap());
        assert_eq!(serde_json::to_value(time).unwrap(), "09:05");
    }
}
