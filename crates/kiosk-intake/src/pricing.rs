// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order total computation.
//!
//! Pure decimal arithmetic; no I/O. Rounding to two fractional digits
//! happens only in [`format_price`], the presentation helper, never inside
//! computation, so repeated calculations cannot accumulate rounding drift.

use kiosk_core::error::KioskError;
use rust_decimal::Decimal;

/// Computes the order total: `unit_price * quantity`.
///
/// Rejects non-positive quantities with [`KioskError::InvalidQuantity`].
/// The unit price is trusted to be positive (backend invariant).
pub fn compute_total(unit_price: Decimal, quantity: Decimal) -> Result<Decimal, KioskError> {
    if quantity <= Decimal::ZERO {
        return Err(KioskError::InvalidQuantity { quantity });
    }
    Ok(unit_price * quantity)
}

/// Renders a decimal amount for display, rounded to two fractional digits.
pub fn format_price(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quantity_one_yields_unit_price() {
        let price = Decimal::new(4500, 1); // 450.0
        assert_eq!(compute_total(price, Decimal::ONE).unwrap(), price);
    }

    #[test]
    fn fractional_quantities_multiply_exactly() {
        let price = Decimal::new(4500, 1); // 450.0
        let quantity = Decimal::new(25, 1); // 2.5
        assert_eq!(
            compute_total(price, quantity).unwrap(),
            Decimal::new(11250, 1) // 1125.0
        );
    }

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        let price = Decimal::new(4500, 1);
        assert!(matches!(
            compute_total(price, Decimal::ZERO),
            Err(KioskError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            compute_total(price, Decimal::new(-1, 0)),
            Err(KioskError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn format_price_rounds_only_at_presentation() {
        // 0.1 + 0.2 is exact in decimal arithmetic.
        let total = compute_total(Decimal::new(1, 1) + Decimal::new(2, 1), Decimal::ONE).unwrap();
        assert_eq!(total, Decimal::new(3, 1));
        assert_eq!(format_price(Decimal::new(123456, 3)), "123.46");
        assert_eq!(format_price(Decimal::new(4500, 1)), "450.0");
    }

    proptest! {
        #[test]
        fn total_is_monotonic_in_quantity(
            price in 1i64..1_000_000,
            q1 in 1i64..100_000,
            q2 in 1i64..100_000,
        ) {
            let price = Decimal::new(price, 2);
            let (lo, hi) = (q1.min(q2), q1.max(q2));
            let total_lo = compute_total(price, Decimal::new(lo, 2)).unwrap();
            let total_hi = compute_total(price, Decimal::new(hi, 2)).unwrap();
            prop_assert!(total_lo <= total_hi);
            if lo < hi {
                prop_assert!(total_lo < total_hi);
            }
        }

        #[test]
        fn identity_holds_for_all_positive_prices(price in 1i64..1_000_000_000) {
            let price = Decimal::new(price, 2);
            prop_assert_eq!(compute_total(price, Decimal::ONE).unwrap(), price);
        }
    }
}
