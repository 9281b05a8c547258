//! Property tests for the validate-then-score pipeline.

use proptest::prelude::*;
use serde_json::{json, Value};

use tally_core::{score, validate, Money, ValidationError};

/// Parameters for generating an acceptable receipt payload.
#[derive(Debug, Clone)]
struct PayloadParams {
    retailer: String,
    date: (u32, u32, u32),
    time: (u32, u32),
    items: Vec<(String, i64)>,
}

impl PayloadParams {
    fn items_sum(&self) -> i64 {
        self.items.iter().map(|(_, cents)| cents).sum()
    }

    fn to_json(&self, total_cents: i64) -> Value {
        let items: Vec<Value> = self
            .items
            .iter()
            .map(|(description, cents)| {
                json!({
                    "shortDescription": description,
                    "price": Money::from_cents(*cents).to_decimal_string(),
                })
            })
            .collect();

        json!({
            "retailer": self.retailer,
            "purchaseDate": format!("{:04}-{:02}-{:02}", self.date.0, self.date.1, self.date.2),
            "purchaseTime": format!("{:02}:{:02}", self.time.0, self.time.1),
            "items": items,
            "total": Money::from_cents(total_cents).to_decimal_string(),
        })
    }

    fn valid_json(&self) -> Value {
        self.to_json(self.items_sum())
    }
}

fn item() -> impl Strategy<Value = (String, i64)> {
    ("[A-Za-z][A-Za-z0-9 ]{0,20}", 0i64..100_000)
}

fn payload_params() -> impl Strategy<Value = PayloadParams> {
    (
        "[A-Za-z0-9&' -]{1,24}",
        (2000u32..2030, 1u32..=12, 1u32..=28),
        (0u32..24, 0u32..60),
        prop::collection::vec(item(), 1..8),
    )
        .prop_map(|(retailer, date, time, items)| PayloadParams {
            retailer,
            date,
            time,
            items,
        })
}

proptest! {
    #[test]
    fn test_valid_payloads_are_accepted(params in payload_params()) {
        let receipt = validate(&params.valid_json());
        prop_assert!(receipt.is_ok(), "rejected: {:?}", receipt.err());
    }

    #[test]
    fn test_scoring_is_deterministic(params in payload_params()) {
        let payload = params.valid_json();
        let first = validate(&payload).unwrap();
        let second = validate(&payload).unwrap();

        prop_assert_ne!(first.id(), second.id());
        prop_assert_eq!(first.points(), second.points());
        prop_assert_eq!(first.points(), score(&first));
        prop_assert_eq!(score(&first), score(&first));
    }

    #[test]
    fn test_total_mismatch_is_rejected(params in payload_params(), delta in 1i64..10_000) {
        let payload = params.to_json(params.items_sum() + delta);
        let rejected = matches!(
            validate(&payload),
            Err(ValidationError::TotalMismatch { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn test_negative_price_is_rejected(params in payload_params(), index in any::<prop::sample::Index>()) {
        let mut payload = params.valid_json();
        let slot = index.index(params.items.len());
        payload["items"][slot]["price"] = json!(-0.01);

        let err = validate(&payload).unwrap_err();
        prop_assert_eq!(err.field(), format!("items[{}].price", slot));
    }

    #[test]
    fn test_negative_total_is_rejected(params in payload_params()) {
        let mut payload = params.valid_json();
        payload["total"] = json!("-1.00");

        let rejected = matches!(validate(&payload), Err(ValidationError::Negative { .. }));
        prop_assert!(rejected);
    }

    #[test]
    fn test_empty_items_are_rejected(params in payload_params()) {
        let mut payload = params.valid_json();
        payload["items"] = json!([]);
        payload["total"] = json!("0.00");

        let rejected = matches!(validate(&payload), Err(ValidationError::Empty { .. }));
        prop_assert!(rejected);
    }

    #[test]
    fn test_time_window_bonus_matches_hour(params in payload_params()) {
        let receipt = validate(&params.valid_json()).unwrap();
        let mut shifted = params.clone();
        shifted.time = (if (14..16).contains(&params.time.0) { 9 } else { 14 }, params.time.1);
        let other = validate(&shifted.valid_json()).unwrap();

        let diff = receipt.points().abs_diff(other.points());
        prop_assert_eq!(diff, 10);
    }
}
