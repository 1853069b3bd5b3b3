//! Order Minimums
//!
//! Every line must reach a minimum extended value, and wide sheets carry a
//! higher one. Minimums raise the unit price; they never change quantity.

use crate::materials::custom_rules::{
    MINIMUM_ORDER_VALUE, WIDE_SHEET_MINIMUM_VALUE, WIDE_SHEET_THRESHOLD,
};

/// Raise `price_per_unit` so the line meets the order minimums.
///
/// 1. If `price × quantity` is under [`MINIMUM_ORDER_VALUE`], the unit price
///    becomes `minimum / quantity`.
/// 2. If `item_width` exceeds [`WIDE_SHEET_THRESHOLD`] and the extended value
///    *after step 1* is still under [`WIDE_SHEET_MINIMUM_VALUE`], the unit
///    price becomes `wide minimum / quantity`.
///
/// A non-positive quantity returns the price unchanged.
///
/// # Example
///
/// ```rust
/// use quote_core::pricing::minimums::apply_order_minimums;
///
/// // $10 x 5 = $50, raised to the $150 minimum
/// assert_eq!(apply_order_minimums(10.0, 5.0, 40.0), 30.0);
/// // A 48" sheet must reach $550
/// assert_eq!(apply_order_minimums(10.0, 5.0, 48.0), 110.0);
/// ```
pub fn apply_order_minimums(price_per_unit: f64, quantity: f64, item_width: f64) -> f64 {
    if quantity <= 0.0 {
        return price_per_unit;
    }

    let mut price = price_per_unit;
    let mut extended = price * quantity;

    if extended < MINIMUM_ORDER_VALUE {
        price = MINIMUM_ORDER_VALUE / quantity;
        extended = price * quantity;
    }

    if item_width > WIDE_SHEET_THRESHOLD && extended < WIDE_SHEET_MINIMUM_VALUE {
        price = WIDE_SHEET_MINIMUM_VALUE / quantity;
    }

    price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_quantity_is_unchanged() {
        assert_eq!(apply_order_minimums(1.2345, 0.0, 60.0), 1.2345);
        assert_eq!(apply_order_minimums(1.2345, -4.0, 60.0), 1.2345);
    }

    #[test]
    fn test_above_minimum_is_unchanged() {
        assert_eq!(apply_order_minimums(50.0, 4.0, 40.0), 50.0);
        assert_eq!(apply_order_minimums(200.0, 3.0, 60.0), 200.0);
    }

    #[test]
    fn test_global_minimum() {
        let price = apply_order_minimums(2.0, 7.0, 24.0);
        assert!(price * 7.0 >= MINIMUM_ORDER_VALUE - 1e-9);
        assert!((price * 7.0 - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_wide_sheet_minimum() {
        let price = apply_order_minimums(2.0, 7.0, 48.0);
        assert!((price * 7.0 - 550.0).abs() < 1e-9);

        // Exactly at the threshold is not wide
        let price = apply_order_minimums(2.0, 7.0, 47.0);
        assert!((price * 7.0 - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_wide_minimum_checks_value_after_global_minimum() {
        // $300 clears the global minimum but not the wide-sheet one
        let price = apply_order_minimums(100.0, 3.0, 50.0);
        assert!((price * 3.0 - 550.0).abs() < 1e-9);
    }

    #[test]
    fn test_minimums_hold_across_inputs() {
        for quantity in [0.5, 1.0, 3.0, 17.0, 250.0] {
            for price in [0.01, 1.0, 9.99, 40.0] {
                let narrow = apply_order_minimums(price, quantity, 30.0);
                assert!(narrow * quantity >= MINIMUM_ORDER_VALUE - 1e-6);

                let wide = apply_order_minimums(price, quantity, 54.0);
                assert!(wide * quantity >= WIDE_SHEET_MINIMUM_VALUE - 1e-6);
            }
        }
    }
}
