//! Core Pricing Routine
//!
//! Shared by every line kind: turn a base column into a total column and a
//! unit price.
//!
//! ```text
//! total_column = base_column
//!              + material delta        (materials::codes::COLUMN_ADJUSTMENTS)
//!              + freight offset        (only when the quote includes freight)
//!              + weight-break delta    (on quantity × weight_per_unit)
//!
//! price_per_unit = base_cost_per_unit × multiplier(total_column)
//! ```
//!
//! Order minimums are not applied here; each line pricer applies them with
//! the width that fits its line kind.

use serde::{Deserialize, Serialize};

use super::columns::compute_weight_column;
use super::multiplier::lookup_multiplier;
use crate::materials::codes::column_adjustment;
use crate::settings::{ColumnMultipliers, WeightBreak};

/// Per-line inputs to [`core_engine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInput {
    pub base_cost_per_unit: f64,
    pub weight_per_unit: f64,
    pub quantity: f64,
    /// Column from the customer's column break (plus any line-kind surcharge)
    pub base_column: i32,
    /// Two-letter material code (any case)
    pub material_code: String,
    pub include_freight: bool,
    pub freight_column_offset: i32,
}

/// Unit price before minimums, and the column it was priced at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    pub price_per_unit: f64,
    pub total_column: i32,
}

/// Run the column/multiplier pricing for one line.
///
/// # Example
///
/// ```rust
/// use quote_core::pricing::engine::{core_engine, EngineInput};
/// use quote_core::settings::ColumnMultipliers;
///
/// let mut multipliers = ColumnMultipliers::default();
/// multipliers.multipliers.insert(6, 2.0);
///
/// // APET moves 4 columns down: 10 - 4 = 6
/// let out = core_engine(
///     &EngineInput {
///         base_cost_per_unit: 5.0,
///         weight_per_unit: 2.0,
///         quantity: 10.0,
///         base_column: 10,
///         material_code: "AP".to_string(),
///         include_freight: false,
///         freight_column_offset: 3,
///     },
///     &[],
///     &multipliers,
/// );
/// assert_eq!(out.total_column, 6);
/// assert_eq!(out.price_per_unit, 10.0);
/// ```
pub fn core_engine(
    input: &EngineInput,
    weight_breaks: &[WeightBreak],
    multipliers: &ColumnMultipliers,
) -> EngineOutput {
    let order_weight = input.quantity * input.weight_per_unit;

    let mut column = input
        .base_column
        .saturating_add(column_adjustment(&input.material_code, order_weight));

    if input.include_freight {
        column = column.saturating_add(input.freight_column_offset);
    }

    let weight_column = compute_weight_column(order_weight, weight_breaks);
    let total_column = column.saturating_add(weight_column);

    let multiplier = lookup_multiplier(total_column, multipliers);
    let price_per_unit = input.base_cost_per_unit * multiplier;

    tracing::debug!(
        material_code = %input.material_code,
        base_column = input.base_column,
        weight_column,
        total_column,
        multiplier,
        "priced line"
    );

    EngineOutput {
        price_per_unit,
        total_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(material_code: &str, quantity: f64, weight_per_unit: f64) -> EngineInput {
        EngineInput {
            base_cost_per_unit: 10.0,
            weight_per_unit,
            quantity,
            base_column: 10,
            material_code: material_code.to_string(),
            include_freight: false,
            freight_column_offset: 0,
        }
    }

    fn flat_multipliers() -> ColumnMultipliers {
        ColumnMultipliers {
            default_above_max: 1.0,
            multipliers: (-20..=60).map(|c| (c, 1.0 + c as f64 / 100.0)).collect(),
        }
    }

    #[test]
    fn test_material_column_deltas() {
        let m = flat_multipliers();
        let cases = [("PC", 18), ("PE", 8), ("AP", 6), ("ST", 26), ("VN", 10), ("AD", 10), ("", 10)];
        for (code, expected) in cases {
            let out = core_engine(&input(code, 1.0, 1.0), &[], &m);
            assert_eq!(out.total_column, expected, "code {}", code);
        }
    }

    #[test]
    fn test_material_code_is_case_insensitive() {
        let m = flat_multipliers();
        assert_eq!(core_engine(&input("pc", 1.0, 1.0), &[], &m).total_column, 18);
    }

    #[test]
    fn test_heavy_styrene_gets_second_delta() {
        let m = flat_multipliers();
        // 100 x 9.99 = 999 lbs, not over the threshold
        assert_eq!(core_engine(&input("ST", 100.0, 9.99), &[], &m).total_column, 26);
        // 100 x 10 = 1000 lbs
        assert_eq!(core_engine(&input("ST", 100.0, 10.0), &[], &m).total_column, 42);
    }

    #[test]
    fn test_freight_offset_only_with_freight() {
        let m = flat_multipliers();
        let mut with_freight = input("VN", 1.0, 1.0);
        with_freight.freight_column_offset = -3;
        assert_eq!(core_engine(&with_freight, &[], &m).total_column, 10);

        with_freight.include_freight = true;
        assert_eq!(core_engine(&with_freight, &[], &m).total_column, 7);
    }

    #[test]
    fn test_extreme_freight_offset_saturates() {
        let m = flat_multipliers();
        let mut line = input("PC", 1.0, 1.0);
        line.include_freight = true;

        line.freight_column_offset = i32::MAX;
        let out = core_engine(&line, &[], &m);
        assert_eq!(out.total_column, i32::MAX);
        assert_eq!(out.price_per_unit, 10.0 * m.default_above_max);

        line.freight_column_offset = i32::MIN;
        assert_eq!(core_engine(&line, &[], &m).total_column, i32::MIN + 18);
    }

    #[test]
    fn test_weight_break_adds_to_column() {
        let m = flat_multipliers();
        let breaks = vec![
            WeightBreak {
                min_weight: 0.0,
                weight_column: 1,
            },
            WeightBreak {
                min_weight: 500.0,
                weight_column: 5,
            },
        ];
        assert_eq!(core_engine(&input("VN", 10.0, 10.0), &breaks, &m).total_column, 11);
        assert_eq!(core_engine(&input("VN", 100.0, 10.0), &breaks, &m).total_column, 15);
    }

    #[test]
    fn test_price_is_base_cost_times_multiplier() {
        let m = flat_multipliers();
        let out = core_engine(&input("VN", 1.0, 1.0), &[], &m);
        assert!((out.price_per_unit - 10.0 * 1.10).abs() < 1e-9);
    }
}
