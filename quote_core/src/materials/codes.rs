//! Material Codes and Column Adjustments
//!
//! Two-letter material codes as they appear on stock items and in customer
//! column-break strings, plus the per-material column deltas applied by the
//! pricing engine.
//!
//! The deltas encode historical pricing agreements. Adding a material is a
//! new row in [`COLUMN_ADJUSTMENTS`], not a new branch in the engine.

use serde::{Deserialize, Serialize};

/// Total order weight (lbs) above which heavy-order deltas apply
pub const HEAVY_ORDER_WEIGHT_LBS: f64 = 999.0;

/// Known two-letter material codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCode {
    #[serde(rename = "VN")]
    Vinyl,
    #[serde(rename = "ST")]
    Styrene,
    #[serde(rename = "AP")]
    Apet,
    #[serde(rename = "PC")]
    Polycarbonate,
    #[serde(rename = "PE")]
    Polyethylene,
    /// Generic marker used to resolve columns for ad-hoc lines
    #[serde(rename = "AD")]
    AdHoc,
}

impl MaterialCode {
    pub const ALL: [MaterialCode; 6] = [
        MaterialCode::Vinyl,
        MaterialCode::Styrene,
        MaterialCode::Apet,
        MaterialCode::Polycarbonate,
        MaterialCode::Polyethylene,
        MaterialCode::AdHoc,
    ];

    /// The two-letter code (e.g., "VN")
    pub fn code(&self) -> &'static str {
        match self {
            MaterialCode::Vinyl => "VN",
            MaterialCode::Styrene => "ST",
            MaterialCode::Apet => "AP",
            MaterialCode::Polycarbonate => "PC",
            MaterialCode::Polyethylene => "PE",
            MaterialCode::AdHoc => "AD",
        }
    }

    /// Parse a code, ignoring case and surrounding whitespace
    pub fn from_code(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        MaterialCode::ALL.into_iter().find(|c| c.code() == upper)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCode::Vinyl => "Vinyl",
            MaterialCode::Styrene => "Styrene",
            MaterialCode::Apet => "APET",
            MaterialCode::Polycarbonate => "Polycarbonate",
            MaterialCode::Polyethylene => "Polyethylene",
            MaterialCode::AdHoc => "Ad-hoc",
        }
    }
}

impl std::fmt::Display for MaterialCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Column delta for one material code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAdjustment {
    /// Always applied
    pub delta: i32,
    /// Added on top of `delta` when the order weighs more than [`HEAVY_ORDER_WEIGHT_LBS`]
    pub heavy_order_delta: i32,
}

impl ColumnAdjustment {
    const fn flat(delta: i32) -> Self {
        ColumnAdjustment {
            delta,
            heavy_order_delta: 0,
        }
    }

    /// Resolve the delta for an order of the given total weight
    pub fn for_order_weight(&self, order_weight_lbs: f64) -> i32 {
        if order_weight_lbs > HEAVY_ORDER_WEIGHT_LBS {
            self.delta + self.heavy_order_delta
        } else {
            self.delta
        }
    }
}

/// Engine column deltas by material code. Codes not listed get 0.
pub const COLUMN_ADJUSTMENTS: &[(MaterialCode, ColumnAdjustment)] = &[
    (MaterialCode::Polycarbonate, ColumnAdjustment::flat(8)),
    (MaterialCode::Polyethylene, ColumnAdjustment::flat(-2)),
    (MaterialCode::Apet, ColumnAdjustment::flat(-4)),
    (
        MaterialCode::Styrene,
        ColumnAdjustment {
            delta: 16,
            heavy_order_delta: 16,
        },
    ),
];

/// Extra base columns for custom-cut sheets, by material code
pub const CUSTOM_SHEET_SURCHARGES: &[(MaterialCode, i32)] = &[(MaterialCode::Styrene, 10)];

/// Column delta for a raw material code string at a given order weight.
///
/// Unknown or empty codes resolve to 0.
pub fn column_adjustment(material_code: &str, order_weight_lbs: f64) -> i32 {
    MaterialCode::from_code(material_code)
        .and_then(|code| {
            COLUMN_ADJUSTMENTS
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, adj)| adj.for_order_weight(order_weight_lbs))
        })
        .unwrap_or(0)
}

/// Extra base columns applied to custom sheets of this material
pub fn custom_sheet_surcharge(code: MaterialCode) -> i32 {
    CUSTOM_SHEET_SURCHARGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, extra)| *extra)
        .unwrap_or(0)
}
