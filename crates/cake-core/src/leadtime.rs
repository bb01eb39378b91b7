//! # Lead Time Validator
//!
//! Computes the earliest allowed fulfillment instant for a product and
//! validates requested pickup/delivery times against it.
//!
//! The source system mixed hour-granularity (UI guidance) with rounded-up
//! day-granularity (submission enforcement); this engine uses the product's
//! preparation hours everywhere, so guidance and enforcement agree.

use crate::error::{OrderError, OrderResult};
use crate::product::Product;
use chrono::{DateTime, Duration, Utc};

/// Minimum whole days of notice, rounded up from preparation hours.
///
/// Display-only; enforcement uses [`earliest_fulfillment`].
pub fn min_days_notice(product: &Product) -> i64 {
    (product.preparation_hours + 23) / 24
}

/// The earliest instant at which this product can be fulfilled
pub fn earliest_fulfillment(product: &Product, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::hours(product.preparation_hours)
}

/// Validate a requested fulfillment instant against the product's lead time.
///
/// Exactly-at-earliest passes; anything strictly earlier fails.
pub fn validate(
    requested: DateTime<Utc>,
    product: &Product,
    now: DateTime<Utc>,
) -> OrderResult<()> {
    let required = earliest_fulfillment(product, now);
    if requested < required {
        return Err(OrderError::LeadTimeViolation {
            required,
            requested,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product_with_prep(hours: i64) -> Product {
        Product {
            product_code: "croquembouche".into(),
            name: "Croquembouche".into(),
            description: String::new(),
            base_price: dec!(800.00),
            price_per_serving: dec!(60.00),
            min_servings: 10,
            max_servings: 40,
            preparation_hours: hours,
            active: true,
        }
    }

    #[test]
    fn test_min_days_notice_rounds_up() {
        assert_eq!(min_days_notice(&product_with_prep(24)), 1);
        assert_eq!(min_days_notice(&product_with_prep(25)), 2);
        assert_eq!(min_days_notice(&product_with_prep(48)), 2);
        assert_eq!(min_days_notice(&product_with_prep(72)), 3);
    }

    #[test]
    fn test_earliest_is_hour_granular() {
        // A 36-hour prep does not round up to 2 days.
        let product = product_with_prep(36);
        let now = Utc::now();
        assert_eq!(
            earliest_fulfillment(&product, now),
            now + Duration::hours(36)
        );
    }

    #[test]
    fn test_validate_boundary() {
        let product = product_with_prep(48);
        let now = Utc::now();
        let earliest = earliest_fulfillment(&product, now);

        // Exactly at the earliest instant succeeds.
        assert!(validate(earliest, &product, now).is_ok());
        // One second earlier fails with the required instant attached.
        let err = validate(earliest - Duration::seconds(1), &product, now).unwrap_err();
        match err {
            OrderError::LeadTimeViolation {
                required,
                requested,
            } => {
                assert_eq!(required, earliest);
                assert_eq!(requested, earliest - Duration::seconds(1));
            }
            other => panic!("expected LeadTimeViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_well_after_earliest() {
        let product = product_with_prep(48);
        let now = Utc::now();
        assert!(validate(now + Duration::days(30), &product, now).is_ok());
    }
}
