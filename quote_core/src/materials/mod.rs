//! # Materials
//!
//! Static material data for sheet pricing. Nothing here is loaded from
//! settings; these tables change only with a release.
//!
//! - [`codes`] - two-letter material codes and per-code column deltas
//! - [`upcharges`] - which cost-table upcharges apply to a color/surface
//! - [`custom_rules`] - custom sheet dimension limits, weights and validation
//! - [`stock_options`] - stock catalog material/color/surface lists
//!
//! ## Example
//!
//! ```rust
//! use quote_core::materials::{get_material_spec, MaterialCode};
//!
//! let spec = get_material_spec("Vinyl").unwrap();
//! assert_eq!(spec.material_code, MaterialCode::Vinyl);
//! assert_eq!(spec.sheet_weight(0.020, 25.0, 40.0), 0.05 * 0.020 * 25.0 * 40.0);
//! ```

pub mod codes;
pub mod custom_rules;
pub mod stock_options;
pub mod upcharges;

pub use codes::{column_adjustment, custom_sheet_surcharge, ColumnAdjustment, MaterialCode};
pub use custom_rules::{
    calculate_minimum_sheets, calculate_sheet_weight, custom_colors, custom_surfaces,
    get_material_spec, material_constraints, sheet_weight, validate_custom_sheet, MaterialConstraints,
    MaterialSpec, SheetSpec, ValidationReport, CUSTOM_MATERIALS, CUSTOM_MATERIAL_KEYS,
};
pub use stock_options::{stock_colors, stock_surfaces, STOCK_MATERIALS};

/// Options for a material from a table keyed by lowercase material name
/// (empty when the material is not listed)
pub(crate) fn options_for(
    table: &'static [(&'static str, &'static [&'static str])],
    material: &str,
) -> &'static [&'static str] {
    let key = material.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, options)| *options)
        .unwrap_or(&[])
}
