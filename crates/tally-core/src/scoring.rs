//! # Scoring Module
//!
//! Computes loyalty points for an accepted receipt.
//!
//! ## Point Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Point Rules (all additive)                        │
//! │                                                                         │
//! │  retailer      +1 per alphanumeric character                            │
//! │  total         +50 if whole dollars                                     │
//! │  total         +25 if a multiple of $0.25                               │
//! │  items         +5 per pair of items                                     │
//! │  items[i]      +ceil(price * 0.2) if trimmed description length % 3 == 0│
//! │  purchaseDate  +6 if the day is odd                                     │
//! │  purchaseTime  +10 if 14:00 <= time < 16:00                             │
//! │                                                                         │
//! │  No rule subtracts, so the minimum score is 0.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule reads typed fields, so scoring cannot fail: a `Receipt` with a
//! malformed date or a float total cannot be constructed.

use chrono::{Datelike, Timelike};

use crate::money::Money;
use crate::types::{Item, Points, Receipt};

/// Bonus for a total with no cents.
pub const WHOLE_DOLLAR_BONUS: Points = 50;

/// Bonus for a total that is a multiple of a quarter.
pub const QUARTER_MULTIPLE_BONUS: Points = 25;

/// Bonus per complete pair of items.
pub const ITEM_PAIR_BONUS: Points = 5;

/// Bonus for an odd day of month.
pub const ODD_DAY_BONUS: Points = 6;

/// Bonus for a purchase in the afternoon window.
pub const AFTERNOON_BONUS: Points = 10;

/// Afternoon window, half-open: `[14:00, 16:00)`.
pub const AFTERNOON_HOURS: std::ops::Range<u32> = 14..16;

/// Computes the points for a receipt.
///
/// Pure and deterministic: the receipt's `id` and stored `points` are never
/// read.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::{scoring::score, validation::validate};
///
/// let receipt = validate(&json!({
///     "retailer": "M&M Corner Market",
///     "purchaseDate": "2022-03-20",
///     "purchaseTime": "14:33",
///     "items": [
///         { "shortDescription": "Gatorade", "price": "2.25" },
///         { "shortDescription": "Gatorade", "price": "2.25" },
///         { "shortDescription": "Gatorade", "price": "2.25" },
///         { "shortDescription": "Gatorade", "price": "2.25" }
///     ],
///     "total": "9.00"
/// }))
/// .unwrap();
///
/// assert_eq!(score(&receipt), 109);
/// ```
pub fn score(receipt: &Receipt) -> Points {
    [
        retailer_points(receipt.retailer()),
        round_total_points(receipt.total()),
        item_pair_points(receipt.items().len()),
        receipt
            .items()
            .iter()
            .map(description_points)
            .fold(0, Points::saturating_add),
        odd_day_points(receipt.purchase_date().day()),
        afternoon_points(receipt.purchase_time().hour()),
    ]
    .into_iter()
    .fold(0, Points::saturating_add)
}

/// One point per alphanumeric character (Unicode letters and digits).
pub fn retailer_points(retailer: &str) -> Points {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as Points
}

/// Whole-dollar and quarter bonuses for the total.
///
/// A whole-dollar total is also a quarter multiple, so it earns both (75).
pub fn round_total_points(total: Money) -> Points {
    let mut points = 0;
    if total.is_whole_dollar() {
        points += WHOLE_DOLLAR_BONUS;
    }
    if total.is_multiple_of(25) {
        points += QUARTER_MULTIPLE_BONUS;
    }
    points
}

/// Five points for every two items.
pub fn item_pair_points(item_count: usize) -> Points {
    (item_count / 2) as Points * ITEM_PAIR_BONUS
}

/// `ceil(price * 0.2)` when the trimmed description length is a multiple of 3.
///
/// In cents: `ceil(cents * 0.2 / 100) == ceil(cents / 500)`.
pub fn description_points(item: &Item) -> Points {
    let len = item.description_len();
    if len == 0 || len % 3 != 0 {
        return 0;
    }

    let cents = item.price.cents().max(0) as u64;
    cents.div_ceil(500)
}

/// Six points if the day of month is odd.
pub fn odd_day_points(day: u32) -> Points {
    if day % 2 == 1 {
        ODD_DAY_BONUS
    } else {
        0
    }
}

/// Ten points if the purchase hour is 14 or 15.
pub fn afternoon_points(hour: u32) -> Points {
    if AFTERNOON_HOURS.contains(&hour) {
        AFTERNOON_BONUS
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn item(description: &str, cents: i64) -> Item {
        Item {
            short_description: description.to_string(),
            price: Money::from_cents(cents),
        }
    }

    fn receipt(
        retailer: &str,
        date: (i32, u32, u32),
        time: (u32, u32),
        items: Vec<Item>,
    ) -> Receipt {
        let total = Money::from_cents(items.iter().map(|i| i.price.cents()).sum());
        Receipt::accept(
            retailer.to_string(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            items,
            total,
        )
    }

    #[test]
    fn test_supermart_scenario() {
        let receipt = receipt(
            "SuperMart",
            (2024, 11, 6),
            (15, 30),
            vec![item("Apple", 150), item("Banana", 75)],
        );
        // 9 retailer + 25 quarter + 5 pair + 1 description + 10 afternoon
        assert_eq!(score(&receipt), 50);
    }

    #[test]
    fn test_target_receipt() {
        let receipt = receipt(
            "Target",
            (2022, 1, 1),
            (13, 1),
            vec![
                item("Mountain Dew 12PK", 649),
                item("Emils Cheese Pizza", 1225),
                item("Knorr Creamy Chicken", 126),
                item("Doritos Nacho Cheese", 335),
                item("Klarbrunn 12-PK 12 FL OZ", 1200),
            ],
        );
        // 6 retailer + 10 pairs + 3 + 3 description + 6 odd day
        assert_eq!(score(&receipt), 28);
    }

    #[test]
    fn test_retailer_points() {
        assert_eq!(retailer_points("Target"), 6);
        assert_eq!(retailer_points("M&M Corner Market"), 14);
        assert_eq!(retailer_points("   "), 0);
        assert_eq!(retailer_points("Café 42"), 6);
    }

    #[test]
    fn test_round_total_points() {
        assert_eq!(round_total_points(Money::from_cents(900)), 75);
        assert_eq!(round_total_points(Money::from_cents(0)), 75);
        assert_eq!(round_total_points(Money::from_cents(225)), 25);
        assert_eq!(round_total_points(Money::from_cents(3535)), 0);
    }

    #[test]
    fn test_item_pair_points() {
        assert_eq!(item_pair_points(1), 0);
        assert_eq!(item_pair_points(2), 5);
        assert_eq!(item_pair_points(5), 10);
    }

    #[test]
    fn test_description_points() {
        // "Emils Cheese Pizza" is 18 chars: ceil(12.25 * 0.2) = ceil(2.45) = 3
        assert_eq!(description_points(&item("Emils Cheese Pizza", 1225)), 3);
        // exact multiples do not round up
        assert_eq!(description_points(&item("Pie", 1500)), 3);
        assert_eq!(description_points(&item("Pie", 1501)), 4);
        assert_eq!(description_points(&item("Pie", 0)), 0);
        assert_eq!(description_points(&item("Apple", 150)), 0);
    }

    #[test]
    fn test_odd_day_points() {
        assert_eq!(odd_day_points(1), 6);
        assert_eq!(odd_day_points(31), 6);
        assert_eq!(odd_day_points(6), 0);
    }

    #[test]
    fn test_afternoon_window_is_half_open() {
        assert_eq!(afternoon_points(13), 0);
        assert_eq!(afternoon_points(14), 10);
        assert_eq!(afternoon_points(15), 10);
        assert_eq!(afternoon_points(16), 0);
    }

    #[test]
    fn test_score_ignores_id() {
        let a = receipt("Corner", (2024, 3, 3), (14, 0), vec![item("Tea", 300)]);
        let b = receipt("Corner", (2024, 3, 3), (14, 0), vec![item("Tea", 300)]);
        assert_ne!(a.id(), b.id());
        assert_eq!(score(&a), score(&b));
        assert_eq!(a.points(), score(&a));
    }
}
