//! Base Cost
//!
//! Cost of one unit before the column multiplier: the material's $/lb plus
//! any color/surface upcharges, times the unit weight.

use crate::materials::upcharges::applicable_keys;
use crate::settings::CostTable;

/// Base cost per unit from the cost table.
///
/// A material missing from the cost table prices at $1.00/lb (the unit
/// weight becomes the cost) so quoting keeps working on incomplete settings.
///
/// # Example
///
/// ```rust
/// use quote_core::pricing::cost::build_base_cost_per_unit;
/// use quote_core::settings::CostTable;
///
/// let table: CostTable = serde_json::from_str(
///     r#"{"vinyl": {"base_per_lb": 2.0, "color_up": 0.5}}"#,
/// ).unwrap();
///
/// // Red vinyl carries the color upcharge: (2.0 + 0.5) x 4 lbs
/// assert_eq!(build_base_cost_per_unit("Vinyl", "Red", "Matte/Matte", 4.0, &table), 10.0);
/// // Unconfigured material: $1/lb
/// assert_eq!(build_base_cost_per_unit("PETG", "Clear", "Gloss/Gloss", 4.0, &table), 4.0);
/// ```
pub fn build_base_cost_per_unit(
    material: &str,
    color: &str,
    surface: &str,
    weight_per_unit: f64,
    cost_table: &CostTable,
) -> f64 {
    let Some(cost) = cost_table.get(material) else {
        tracing::warn!(material, "material missing from cost table, pricing at $1/lb");
        return weight_per_unit;
    };

    let per_lb = applicable_keys(material, color, surface)
        .into_iter()
        .fold(cost.base_per_lb, |acc, key| acc + cost.upcharge(key));

    per_lb * weight_per_unit
}
