//! # Quote Requests and Results
//!
//! The engine's input and output contract. Everything here serializes to the
//! JSON the quoting front end sends and receives.
//!
//! ## Request JSON
//!
//! ```json
//! {
//!   "customer_id": "ACME",
//!   "include_freight": true,
//!   "lines": [
//!     { "type": "stock", "sku": "VN-030-WHT-4896", "quantity": 5 },
//!     { "type": "custom", "material": "Styrene", "color": "White",
//!       "surface": "Matte/Matte", "gauge": 0.060, "width": 30, "length": 40, "sheets": 1 },
//!     { "type": "ad_hoc", "description": "Freight-in pallet", "quantity": 2,
//!       "weight_per_unit": 40, "landed_cost_per_unit": 55.0 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};
use crate::materials::custom_rules::{validate_custom_sheet, SheetSpec};

fn default_true() -> bool {
    true
}

/// Which pricer a line goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Stock,
    Custom,
    AdHoc,
}

/// A catalog item by SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLine {
    #[serde(default)]
    pub sku: String,
    pub quantity: f64,
}

/// A made-to-order cut sheet.
///
/// Every field is optional on the wire so a request missing several of them
/// is reported in one validation error rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomLine {
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    /// Thickness in inches
    #[serde(default)]
    pub gauge: Option<f64>,
    /// Inches
    #[serde(default)]
    pub width: Option<f64>,
    /// Inches
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub sheets: Option<f64>,
    /// Overrides the generated description
    #[serde(default)]
    pub description: Option<String>,
}

/// A line priced from caller-supplied weight and landed cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdHocLine {
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: f64,
    /// lbs per unit
    #[serde(default)]
    pub weight_per_unit: Option<f64>,
    /// Already includes freight etc.
    #[serde(default)]
    pub landed_cost_per_unit: Option<f64>,
}

/// One requested line, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineRequest {
    Stock(StockLine),
    Custom(CustomLine),
    AdHoc(AdHocLine),
}

impl LineRequest {
    pub fn kind(&self) -> LineKind {
        match self {
            LineRequest::Stock(_) => LineKind::Stock,
            LineRequest::Custom(_) => LineKind::Custom,
            LineRequest::AdHoc(_) => LineKind::AdHoc,
        }
    }

    /// Problems with this line, empty when it can be priced
    pub fn validation_errors(&self) -> Vec<String> {
        match self {
            LineRequest::Stock(line) => {
                let mut errors = Vec::new();
                if line.sku.trim().is_empty() {
                    errors.push("SKU is required for stock items".to_string());
                }
                check_non_negative(&mut errors, "Quantity", Some(line.quantity));
                errors
            }
            LineRequest::Custom(line) => line.validation_errors(),
            LineRequest::AdHoc(line) => {
                let mut errors = Vec::new();
                check_non_negative(&mut errors, "Quantity", Some(line.quantity));
                check_non_negative(&mut errors, "Weight per unit", line.weight_per_unit);
                check_non_negative(&mut errors, "Landed cost per unit", line.landed_cost_per_unit);
                errors
            }
        }
    }
}

fn check_non_negative(errors: &mut Vec<String>, label: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            errors.push(format!("{} must be a non-negative number. Got: {}", label, v));
        }
    }
}

impl CustomLine {
    /// Missing required fields, or failing that, every material-rule violation
    pub fn validation_errors(&self) -> Vec<String> {
        let required: [(&str, bool); 7] = [
            ("Material", self.material.as_deref().is_some_and(|s| !s.is_empty())),
            ("Color", self.color.as_deref().is_some_and(|s| !s.is_empty())),
            ("Surface", self.surface.as_deref().is_some_and(|s| !s.is_empty())),
            ("Gauge", self.gauge.is_some()),
            ("Width", self.width.is_some()),
            ("Length", self.length.is_some()),
            ("Sheets", self.sheets.is_some()),
        ];

        let missing: Vec<String> = required
            .iter()
            .filter(|(_, present)| !present)
            .map(|(field, _)| format!("{} is required for custom items", field))
            .collect();
        if !missing.is_empty() {
            return missing;
        }

        validate_custom_sheet(&self.sheet_spec()).errors
    }

    /// The sheet as the material rules see it (absent fields read as empty/zero)
    pub fn sheet_spec(&self) -> SheetSpec<'_> {
        SheetSpec {
            material: self.material.as_deref().unwrap_or(""),
            color: self.color.as_deref().unwrap_or(""),
            surface: self.surface.as_deref().unwrap_or(""),
            gauge: self.gauge.unwrap_or(0.0),
            width: self.width.unwrap_or(0.0),
            length: self.length.unwrap_or(0.0),
            sheets: self.sheets.unwrap_or(0.0),
        }
    }
}

/// A request to price a quote for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub customer_id: String,
    #[serde(default = "default_true")]
    pub include_freight: bool,
    pub lines: Vec<LineRequest>,
}

impl QuoteRequest {
    /// Check every line, reporting all problems at once.
    ///
    /// Messages are prefixed with the 1-based line number.
    pub fn validate(&self) -> QuoteResult<()> {
        let errors: Vec<String> = self
            .lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| {
                line.validation_errors()
                    .into_iter()
                    .map(move |e| format!("line {}: {}", i + 1, e))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(QuoteError::validation(errors))
        }
    }
}

/// One priced line.
///
/// `base_cost_per_unit` and `sell_price_per_unit` are rounded to 4 decimals
/// and `extended_sell_price` to 2 for display; pricing never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePriceResult {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub sku: Option<String>,
    pub description: String,
    /// May exceed the request for custom sheets under the minimum run weight
    pub quantity: f64,
    pub weight_per_unit: f64,
    pub base_cost_per_unit: f64,
    pub sell_price_per_unit: f64,
    pub extended_sell_price: f64,
    pub total_column: i32,
}

/// A priced quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub customer_id: String,
    pub include_freight: bool,
    pub lines: Vec<LinePriceResult>,
    /// Sum of line extended prices, rounded to 2 decimals
    pub quote_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parsing() {
        let json = r#"{
            "customer_id": "ACME",
            "lines": [
                {"type": "stock", "sku": "VN-1", "quantity": 5},
                {"type": "custom", "material": "Vinyl", "color": "White", "surface": "Matte/Matte",
                 "gauge": 0.02, "width": 30, "length": 40, "sheets": 100},
                {"type": "ad_hoc", "quantity": 2, "weight_per_unit": 4, "landed_cost_per_unit": 12.5}
            ]
        }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert!(req.include_freight);
        assert_eq!(req.lines.len(), 3);
        assert_eq!(req.lines[0].kind(), LineKind::Stock);
        assert_eq!(req.lines[1].kind(), LineKind::Custom);
        assert_eq!(req.lines[2].kind(), LineKind::AdHoc);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_line_type_fails_to_parse() {
        let json = r#"{"customer_id": "A", "lines": [{"type": "rental", "quantity": 1}]}"#;
        assert!(serde_json::from_str::<QuoteRequest>(json).is_err());
    }

    #[test]
    fn test_custom_missing_fields_all_reported() {
        let line = LineRequest::Custom(CustomLine {
            material: Some("Vinyl".to_string()),
            ..Default::default()
        });
        let errors = line.validation_errors();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&"Sheets is required for custom items".to_string()));
    }

    #[test]
    fn test_custom_rule_violations_reported() {
        let line = LineRequest::Custom(CustomLine {
            material: Some("Vinyl".to_string()),
            color: Some("Clear".to_string()),
            surface: Some("Gloss/Gloss".to_string()),
            gauge: Some(0.5),
            width: Some(30.0),
            length: Some(90.0),
            sheets: Some(10.0),
            description: None,
        });
        let errors = line.validation_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Gauge"));
        assert!(errors[1].starts_with("Length"));
    }

    #[test]
    fn test_validate_collects_across_lines() {
        let req = QuoteRequest {
            customer_id: "ACME".to_string(),
            include_freight: false,
            lines: vec![
                LineRequest::Stock(StockLine {
                    sku: String::new(),
                    quantity: -1.0,
                }),
                LineRequest::AdHoc(AdHocLine {
                    description: None,
                    quantity: 1.0,
                    weight_per_unit: Some(f64::NAN),
                    landed_cost_per_unit: None,
                }),
            ],
        };
        match req.validate() {
            Err(QuoteError::Validation { errors }) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].starts_with("line 1: SKU"));
                assert!(errors[1].starts_with("line 1: Quantity"));
                assert!(errors[2].starts_with("line 2: Weight per unit"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_line_result_field_names() {
        let line = LinePriceResult {
            kind: LineKind::AdHoc,
            sku: None,
            description: "Ad-hoc line".to_string(),
            quantity: 1.0,
            weight_per_unit: 2.0,
            base_cost_per_unit: 3.0,
            sell_price_per_unit: 150.0,
            extended_sell_price: 150.0,
            total_column: 4,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["type"], "ad_hoc");
        assert!(value["sku"].is_null());
        for key in [
            "description",
            "quantity",
            "weight_per_unit",
            "base_cost_per_unit",
            "sell_price_per_unit",
            "extended_sell_price",
            "total_column",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }
}
