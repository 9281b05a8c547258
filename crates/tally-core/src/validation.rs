//! # Validation Module
//!
//! Turns a raw receipt submission into an accepted [`Receipt`].
//!
//! ## Validation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Acceptance Rules (in order)                        │
//! │                                                                         │
//! │  raw JSON payload                                                       │
//! │       │                                                                 │
//! │       ├── 1. retailer       present, string, non-empty                  │
//! │       ├── 2. purchaseDate   YYYY-MM-DD, real calendar date              │
//! │       ├── 3. purchaseTime   HH:MM, 24-hour clock                        │
//! │       ├── 4. items          list with at least one entry                │
//! │       ├── 5. items[i]       shortDescription non-blank, price >= 0      │
//! │       ├── 6. total          numeric, >= 0                               │
//! │       └── 7. total == sum(items[i].price)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Receipt::accept ──► new id + score() ──► Receipt                       │
//! │                                                                         │
//! │  The first failing rule is returned; nothing is corrected silently.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use tally_core::validation::validate;
//!
//! let receipt = validate(&json!({
//!     "retailer": "SuperMart",
//!     "purchaseDate": "2024-11-06",
//!     "purchaseTime": "15:30",
//!     "items": [
//!         { "shortDescription": "Apple", "price": "1.50" },
//!         { "shortDescription": "Banana", "price": "0.75" }
//!     ],
//!     "total": "2.25"
//! }))
//! .unwrap();
//!
//! assert_eq!(receipt.points(), 50);
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::money::{Money, MoneyParseError};
use crate::types::{Item, Receipt};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// `purchaseDate` format (chrono syntax).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `purchaseTime` format (chrono syntax).
pub const TIME_FORMAT: &str = "%H:%M";

// =============================================================================
// Receipt Validator
// =============================================================================

/// Validates a raw submission and, if every rule passes, accepts it.
///
/// The returned receipt carries a fresh id and its computed points.
pub fn validate(raw: &Value) -> ValidationResult<Receipt> {
    let payload = raw.as_object().ok_or_else(|| ValidationError::WrongType {
        field: "$".to_string(),
        expected: "an object",
    })?;

    let retailer = validate_retailer(require_str(payload, "retailer")?)?;
    let purchase_date = validate_purchase_date(require_str(payload, "purchaseDate")?)?;
    let purchase_time = validate_purchase_time(require_str(payload, "purchaseTime")?)?;
    let items = validate_items(require(payload, "items")?)?;
    let total = validate_amount("total", require(payload, "total")?)?;
    validate_total(total, &items)?;

    Ok(Receipt::accept(
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    ))
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the retailer name.
///
/// ## Rules
/// - Must not be empty
/// - Any characters are allowed (only alphanumerics score points)
pub fn validate_retailer(retailer: &str) -> ValidationResult<String> {
    if retailer.is_empty() {
        return Err(ValidationError::Empty {
            field: "retailer".to_string(),
        });
    }

    Ok(retailer.to_string())
}

/// Validates a purchase date.
///
/// ## Rules
/// - Exactly `YYYY-MM-DD` (zero-padded)
/// - Must be a real Gregorian date
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_purchase_date;
///
/// assert!(validate_purchase_date("2024-02-29").is_ok());
/// assert!(validate_purchase_date("2023-02-29").is_err());
/// assert!(validate_purchase_date("06-11-2024").is_err());
/// ```
pub fn validate_purchase_date(text: &str) -> ValidationResult<NaiveDate> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "purchaseDate".to_string(),
        reason: reason.to_string(),
    };

    if !has_shape(text, "dddd-dd-dd") {
        return Err(invalid("must be in YYYY-MM-DD format"));
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid("not a calendar date"))
}

/// Validates a purchase time.
///
/// ## Rules
/// - Exactly `HH:MM` (zero-padded)
/// - Hour 00-23, minute 00-59
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_purchase_time;
///
/// assert!(validate_purchase_time("14:33").is_ok());
/// assert!(validate_purchase_time("25:00").is_err());
/// assert!(validate_purchase_time("2:33pm").is_err());
/// ```
pub fn validate_purchase_time(text: &str) -> ValidationResult<NaiveTime> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "purchaseTime".to_string(),
        reason: reason.to_string(),
    };

    if !has_shape(text, "dd:dd") {
        return Err(invalid("must be in HH:MM format"));
    }

    NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|_| invalid("not a valid 24-hour time"))
}

/// Validates the item list.
///
/// ## Rules
/// - Must be a list with at least one entry
/// - Every entry must pass [`validate_item`]
pub fn validate_items(value: &Value) -> ValidationResult<Vec<Item>> {
    let entries = value.as_array().ok_or_else(|| ValidationError::WrongType {
        field: "items".to_string(),
        expected: "a list",
    })?;

    if entries.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| validate_item(index, entry))
        .collect()
}

/// Validates one entry of the item list.
///
/// ## Rules
/// - Must be an object
/// - `shortDescription` must be a string that is not blank; it is trimmed
/// - `price` must be a non-negative amount
pub fn validate_item(index: usize, value: &Value) -> ValidationResult<Item> {
    let path = format!("items[{}]", index);
    let entry = value.as_object().ok_or_else(|| ValidationError::WrongType {
        field: path.clone(),
        expected: "an object",
    })?;

    let description_field = format!("{}.shortDescription", path);
    let description = match entry.get("shortDescription") {
        None | Some(Value::Null) => {
            return Err(ValidationError::Missing {
                field: description_field,
            })
        }
        Some(Value::String(text)) => text.trim(),
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: description_field,
                expected: "a string",
            })
        }
    };

    if description.is_empty() {
        return Err(ValidationError::Empty {
            field: description_field,
        });
    }

    let price_field = format!("{}.price", path);
    let price = match entry.get("price") {
        None | Some(Value::Null) => return Err(ValidationError::Missing { field: price_field }),
        Some(price) => validate_amount(&price_field, price)?,
    };

    Ok(Item {
        short_description: description.to_string(),
        price,
    })
}

/// Validates a monetary amount (`price` or `total`).
///
/// ## Rules
/// - JSON number or numeric string (`2.25` or `"2.25"`)
/// - Rounded to cents
/// - Must be non-negative (zero is allowed); the sign is checked before
///   rounding, so `-0.004` is rejected
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tally_core::validation::validate_amount;
///
/// assert_eq!(validate_amount("total", &json!("6.49")).unwrap().cents(), 649);
/// assert_eq!(validate_amount("total", &json!(35)).unwrap().cents(), 3500);
/// assert!(validate_amount("total", &json!(-1.0)).is_err());
/// assert!(validate_amount("total", &json!(true)).is_err());
/// ```
pub fn validate_amount(field: &str, value: &Value) -> ValidationResult<Money> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        _ => {
            return Err(ValidationError::WrongType {
                field: field.to_string(),
                expected: "a number",
            })
        }
    };

    Money::parse_non_negative(&text).map_err(|e| match e {
        MoneyParseError::Negative(_) => ValidationError::Negative {
            field: field.to_string(),
        },
        other => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: other.to_string(),
        },
    })
}

/// Validates that the receipt total equals the sum of its item prices.
///
/// Both sides are already whole cents, so the comparison is exact.
pub fn validate_total(total: Money, items: &[Item]) -> ValidationResult<()> {
    let items_sum = items
        .iter()
        .try_fold(Money::zero(), |sum, item| sum.checked_add(item.price))
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "items".to_string(),
            reason: "sum of item prices is out of range".to_string(),
        })?;

    if items_sum != total {
        return Err(ValidationError::TotalMismatch { total, items_sum });
    }

    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

/// Fetches a required field; `null` counts as missing.
fn require<'a>(payload: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a Value> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing {
            field: field.to_string(),
        }),
        Some(value) => Ok(value),
    }
}

/// Fetches a required string field.
fn require_str<'a>(payload: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a str> {
    require(payload, field)?
        .as_str()
        .ok_or_else(|| ValidationError::WrongType {
            field: field.to_string(),
            expected: "a string",
        })
}

/// Checks `text` against a shape where `d` is any ASCII digit and every other
/// byte must match literally.
fn has_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(t, s)| match s {
            b'd' => t.is_ascii_digit(),
            literal => t == literal,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
