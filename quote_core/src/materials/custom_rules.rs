//! Custom Sheet Rules
//!
//! Dimension limits, weight factors and allowed colors/surfaces for
//! made-to-order cut sheets, plus the order minimums shared with stock pricing.
//!
//! Sheet weight is `weight_factor × gauge × width × length` (lbs), with gauge
//! and dimensions in inches.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::codes::MaterialCode;
use super::options_for;

/// Minimum total weight (lbs) for a custom run
pub const MINIMUM_WEIGHT_LBS: f64 = 2000.0;

/// Target weight (lbs) when a custom run is bumped up to the minimum
pub const MINIMUM_RUN_TARGET_LBS: f64 = 2010.0;

/// Minimum extended value of any line ($)
pub const MINIMUM_ORDER_VALUE: f64 = 150.0;

/// Width (inches) above which the wide-sheet minimum applies
pub const WIDE_SHEET_THRESHOLD: f64 = 47.0;

/// Minimum extended value of a wide-sheet line ($)
pub const WIDE_SHEET_MINIMUM_VALUE: f64 = 550.0;

/// Weight factor used when a material has no spec
pub const FALLBACK_WEIGHT_FACTOR: f64 = 0.05;

/// Allowed dimensions and weight factor for one custom material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub min_gauge: f64,
    pub max_gauge: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub min_length: f64,
    pub max_length: f64,
    /// lbs per (gauge × width × length)
    pub weight_factor: f64,
    pub material_code: MaterialCode,
}

impl MaterialSpec {
    /// Weight of a single sheet in pounds
    pub fn sheet_weight(&self, gauge: f64, width: f64, length: f64) -> f64 {
        sheet_weight(self.weight_factor, gauge, width, length)
    }
}

/// Sheet weight in pounds for a weight factor (lbs per gauge × width × length)
pub fn sheet_weight(weight_factor: f64, gauge: f64, width: f64, length: f64) -> f64 {
    weight_factor * gauge * width * length
}

/// Custom sheet specs keyed by lowercase material name
pub static MATERIAL_SPECS: Lazy<HashMap<&'static str, MaterialSpec>> = Lazy::new(|| {
    let mut specs = HashMap::new();
    specs.insert(
        "vinyl",
        MaterialSpec {
            min_gauge: 0.009,
            max_gauge: 0.030,
            min_width: 20.0,
            max_width: 50.0,
            min_length: 20.0,
            max_length: 70.0,
            weight_factor: 0.05,
            material_code: MaterialCode::Vinyl,
        },
    );
    specs.insert(
        "apet",
        MaterialSpec {
            min_gauge: 0.009,
            max_gauge: 0.030,
            min_width: 20.0,
            max_width: 50.0,
            min_length: 20.0,
            max_length: 70.0,
            weight_factor: 0.05,
            material_code: MaterialCode::Apet,
        },
    );
    specs.insert(
        "styrene",
        MaterialSpec {
            min_gauge: 0.009,
            max_gauge: 0.250,
            min_width: 20.0,
            max_width: 65.0,
            min_length: 20.0,
            max_length: 130.0,
            weight_factor: 0.04,
            material_code: MaterialCode::Styrene,
        },
    );
    specs
});

/// Keys of [`MATERIAL_SPECS`] in the order they are listed to users
pub const CUSTOM_MATERIAL_KEYS: [&str; 3] = ["vinyl", "apet", "styrene"];

/// Display names of the materials offered as custom sheets
pub const CUSTOM_MATERIALS: [&str; 3] = ["Vinyl", "Styrene", "APET"];

/// Allowed custom colors by lowercase material name
pub const CUSTOM_COLORS: &[(&str, &[&str])] = &[
    ("vinyl", &["White", "Clear", "Stock Color"]),
    ("styrene", &["White", "Translucent White", "Dead White"]),
    ("apet", &["Clear"]),
];

/// Allowed custom surfaces by lowercase material name
pub const CUSTOM_SURFACES: &[(&str, &[&str])] = &[
    ("vinyl", &["Matte/Matte", "Gloss/Gloss", "Gloss/Matte", "Velvet One Side"]),
    ("styrene", &["Matte/Matte", "Gloss/Matte"]),
    ("apet", &["Gloss/Gloss"]),
];

fn contains_ignore_case(options: &[&str], value: &str) -> bool {
    options.iter().any(|o| o.eq_ignore_ascii_case(value))
}

/// Spec for a custom material, or None if it is not offered as a custom sheet
pub fn get_material_spec(material: &str) -> Option<&'static MaterialSpec> {
    MATERIAL_SPECS.get(material.to_lowercase().as_str())
}

/// Valid colors for a custom sheet material
pub fn custom_colors(material: &str) -> &'static [&'static str] {
    options_for(CUSTOM_COLORS, material)
}

/// Valid surfaces for a custom sheet material
pub fn custom_surfaces(material: &str) -> &'static [&'static str] {
    options_for(CUSTOM_SURFACES, material)
}

/// Inclusive min/max pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// Dimension constraints for a custom material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConstraints {
    pub gauge: Range,
    pub width: Range,
    pub length: Range,
    pub weight_factor: f64,
}

/// Constraints for a material, or None if it is not a custom material
pub fn material_constraints(material: &str) -> Option<MaterialConstraints> {
    get_material_spec(material).map(|spec| MaterialConstraints {
        gauge: Range {
            min: spec.min_gauge,
            max: spec.max_gauge,
        },
        width: Range {
            min: spec.min_width,
            max: spec.max_width,
        },
        length: Range {
            min: spec.min_length,
            max: spec.max_length,
        },
        weight_factor: spec.weight_factor,
    })
}

/// Outcome of checking a custom sheet against the rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// A custom sheet as requested, before pricing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSpec<'a> {
    pub material: &'a str,
    pub color: &'a str,
    pub surface: &'a str,
    pub gauge: f64,
    pub width: f64,
    pub length: f64,
    pub sheets: f64,
}

/// Validate a custom sheet specification.
///
/// An unknown material is reported on its own, since no other rule can be
/// checked without a spec. Otherwise every violated rule is reported.
///
/// # Example
///
/// ```rust
/// use quote_core::materials::custom_rules::{validate_custom_sheet, SheetSpec};
///
/// let report = validate_custom_sheet(&SheetSpec {
///     material: "Styrene",
///     color: "White",
///     surface: "Matte/Matte",
///     gauge: 0.060,
///     width: 30.0,
///     length: 40.0,
///     sheets: 1.0,
/// });
/// assert!(report.valid);
/// ```
pub fn validate_custom_sheet(sheet: &SheetSpec<'_>) -> ValidationReport {
    let mut errors = Vec::new();

    let Some(spec) = get_material_spec(sheet.material) else {
        errors.push(format!(
            "Material '{}' is not valid for custom sheets. Valid materials: {}",
            sheet.material,
            CUSTOM_MATERIAL_KEYS.join(", ")
        ));
        return ValidationReport { valid: false, errors };
    };

    if sheet.gauge < spec.min_gauge || sheet.gauge > spec.max_gauge {
        errors.push(format!(
            "Gauge must be between {} and {} for {}. Got: {}",
            spec.min_gauge, spec.max_gauge, sheet.material, sheet.gauge
        ));
    }
    if sheet.width < spec.min_width || sheet.width > spec.max_width {
        errors.push(format!(
            "Width must be between {} and {} inches for {}. Got: {}",
            spec.min_width, spec.max_width, sheet.material, sheet.width
        ));
    }
    if sheet.length < spec.min_length || sheet.length > spec.max_length {
        errors.push(format!(
            "Length must be between {} and {} inches for {}. Got: {}",
            spec.min_length, spec.max_length, sheet.material, sheet.length
        ));
    }
    if sheet.sheets <= 0.0 {
        errors.push("Number of sheets must be greater than 0".to_string());
    }

    let colors = custom_colors(sheet.material);
    if !sheet.color.is_empty() && !contains_ignore_case(colors, sheet.color) {
        errors.push(format!(
            "Color '{}' is not valid for {}. Valid colors: {}",
            sheet.color,
            sheet.material,
            colors.join(", ")
        ));
    }

    let surfaces = custom_surfaces(sheet.material);
    if !sheet.surface.is_empty() && !contains_ignore_case(surfaces, sheet.surface) {
        errors.push(format!(
            "Surface '{}' is not valid for {}. Valid surfaces: {}",
            sheet.surface,
            sheet.material,
            surfaces.join(", ")
        ));
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Weight of one sheet in pounds; unknown materials use the vinyl factor
pub fn calculate_sheet_weight(material: &str, gauge: f64, width: f64, length: f64) -> f64 {
    match get_material_spec(material) {
        Some(spec) => spec.sheet_weight(gauge, width, length),
        None => sheet_weight(FALLBACK_WEIGHT_FACTOR, gauge, width, length),
    }
}

/// Sheets needed to reach the minimum run weight for a given sheet weight.
///
/// Returns 1 when the sheet weight is not positive.
pub fn minimum_sheets_for_weight(weight_per_sheet: f64) -> f64 {
    if weight_per_sheet <= 0.0 {
        return 1.0;
    }
    (MINIMUM_RUN_TARGET_LBS / weight_per_sheet).ceil()
}

/// Sheets needed to reach the minimum run weight for a custom sheet size
pub fn calculate_minimum_sheets(material: &str, gauge: f64, width: f64, length: f64) -> f64 {
    minimum_sheets_for_weight(calculate_sheet_weight(material, gauge, width, length))
}
