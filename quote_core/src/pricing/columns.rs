//! Column Resolution
//!
//! Two sources of column numbers that feed the multiplier lookup:
//!
//! - a customer's **column break** string, which encodes a base column per
//!   material as consecutive `<code><1-2 digits>` tokens (e.g. `VN10ST20AP15`)
//! - the **weight break** table, which moves heavier orders to other columns
//!
//! ## Column-break parsing
//!
//! For a material code, find its *rightmost* occurrence in the string and
//! read the one or two characters after it. A two-character number wins;
//! otherwise a one-character number; otherwise 0. A missing code, an empty
//! string or trailing garbage all resolve to 0. Parsing never fails.
//!
//! ```rust
//! use quote_core::pricing::columns::extract_column_from_breaks;
//!
//! assert_eq!(extract_column_from_breaks("ST", "VN10ST20AP15"), 20);
//! assert_eq!(extract_column_from_breaks("AP", "VN10ST20AP5"), 5);
//! assert_eq!(extract_column_from_breaks("PC", "VN10ST20AP15"), 0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::settings::WeightBreak;

fn parse_column(candidate: &str) -> Option<i32> {
    candidate.trim().parse().ok()
}

/// Base column for a material from a customer's column-break string.
pub fn extract_column_from_breaks(material_code: &str, column_break: &str) -> i32 {
    if material_code.is_empty() || column_break.is_empty() {
        return 0;
    }

    let Some(idx) = column_break.rfind(material_code) else {
        return 0;
    };

    let start = idx + material_code.len();
    let one_digit = column_break.get(start..start + 1);
    let two_digit = if column_break.len() > start + 1 {
        column_break.get(start..start + 2)
    } else {
        one_digit
    };

    [two_digit, one_digit]
        .into_iter()
        .flatten()
        .find_map(parse_column)
        .unwrap_or(0)
}

/// Structured view of a column-break string.
///
/// Lookups go through [`extract_column_from_breaks`], so the structured
/// entries always agree with what pricing uses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnBreaks {
    raw: String,
}

impl ColumnBreaks {
    pub fn parse(raw: impl Into<String>) -> Self {
        ColumnBreaks { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Base column for a material code (0 when absent or malformed)
    pub fn column_for(&self, material_code: &str) -> i32 {
        extract_column_from_breaks(material_code, &self.raw)
    }

    /// Material codes found in token position (two letters followed by a digit),
    /// in order of first appearance
    pub fn codes(&self) -> Vec<String> {
        let bytes = self.raw.as_bytes();
        let mut codes: Vec<String> = Vec::new();
        let mut i = 0;
        while i + 2 < bytes.len() {
            if bytes[i].is_ascii_alphabetic()
                && bytes[i + 1].is_ascii_alphabetic()
                && bytes[i + 2].is_ascii_digit()
            {
                let code = &self.raw[i..i + 2];
                if !codes.iter().any(|c| c == code) {
                    codes.push(code.to_string());
                }
                i += 3;
            } else {
                i += 1;
            }
        }
        codes
    }

    /// Material code to base column for every code in the string
    pub fn entries(&self) -> BTreeMap<String, i32> {
        self.codes()
            .into_iter()
            .map(|code| {
                let column = self.column_for(&code);
                (code, column)
            })
            .collect()
    }
}

/// Column delta for an order of `total_weight` lbs.
///
/// Rows are evaluated from the highest threshold down regardless of input
/// order; the first threshold strictly below the weight wins. Returns 0 when
/// the weight does not exceed any threshold.
pub fn compute_weight_column(total_weight: f64, weight_breaks: &[WeightBreak]) -> i32 {
    let mut sorted: Vec<&WeightBreak> = weight_breaks.iter().collect();
    sorted.sort_by(|a, b| b.min_weight.total_cmp(&a.min_weight));

    sorted
        .into_iter()
        .find(|row| total_weight > row.min_weight)
        .map(|row| row.weight_column)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaks(rows: &[(f64, i32)]) -> Vec<WeightBreak> {
        rows.iter()
            .map(|&(min_weight, weight_column)| WeightBreak {
                min_weight,
                weight_column,
            })
            .collect()
    }

    #[test]
    fn test_extract_basic_codes() {
        assert_eq!(extract_column_from_breaks("VN", "VN10ST20AP15"), 10);
        assert_eq!(extract_column_from_breaks("ST", "VN10ST20AP15"), 20);
        assert_eq!(extract_column_from_breaks("AP", "VN10ST20AP15"), 15);
    }

    #[test]
    fn test_extract_absent_or_empty() {
        assert_eq!(extract_column_from_breaks("PC", "VN10ST20AP15"), 0);
        assert_eq!(extract_column_from_breaks("", "VN10"), 0);
        assert_eq!(extract_column_from_breaks("VN", ""), 0);
    }

    #[test]
    fn test_extract_uses_rightmost_occurrence() {
        assert_eq!(extract_column_from_breaks("VN", "VN10ST20VN30"), 30);
    }

    #[test]
    fn test_extract_single_digit() {
        assert_eq!(extract_column_from_breaks("VN", "VN5ST20"), 5);
        assert_eq!(extract_column_from_breaks("AP", "VN10AP7"), 7);
    }

    #[test]
    fn test_extract_malformed_trailing_data() {
        assert_eq!(extract_column_from_breaks("AP", "VN10AP"), 0);
        assert_eq!(extract_column_from_breaks("AP", "VN10APxx"), 0);
        assert_eq!(extract_column_from_breaks("AP", "VN10AP4x"), 4);
        assert_eq!(extract_column_from_breaks("VN", "VN\u{e9}12"), 0);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let raw = "VN10ST20AP15VN3";
        let first = extract_column_from_breaks("VN", raw);
        assert_eq!(first, extract_column_from_breaks("VN", raw));
        assert_eq!(first, 3);
    }

    #[test]
    fn test_column_breaks_entries() {
        let parsed = ColumnBreaks::parse("VN10ST20AP15");
        let entries = parsed.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["VN"], 10);
        assert_eq!(entries["ST"], 20);
        assert_eq!(entries["AP"], 15);
        assert_eq!(parsed.column_for("PE"), 0);
        assert_eq!(parsed.raw(), "VN10ST20AP15");
    }

    #[test]
    fn test_column_breaks_entries_agree_with_lookup() {
        let parsed = ColumnBreaks::parse("VN10ST2VN7AP");
        assert_eq!(parsed.codes(), vec!["VN".to_string(), "ST".to_string()]);
        for (code, column) in parsed.entries() {
            assert_eq!(column, extract_column_from_breaks(&code, parsed.raw()));
        }
        assert_eq!(parsed.entries()["VN"], 7);
    }

    #[test]
    fn test_weight_column_picks_highest_threshold_below() {
        let table = breaks(&[(2000.0, 4), (1000.0, 2), (0.0, 1)]);
        assert_eq!(compute_weight_column(2500.0, &table), 4);
        assert_eq!(compute_weight_column(2000.0, &table), 2);
        assert_eq!(compute_weight_column(1000.5, &table), 2);
        assert_eq!(compute_weight_column(1.0, &table), 1);
        assert_eq!(compute_weight_column(0.0, &table), 0);
    }

    #[test]
    fn test_weight_column_ignores_input_order() {
        let sorted = breaks(&[(2000.0, 4), (1000.0, 2), (0.0, 1)]);
        let shuffled = breaks(&[(1000.0, 2), (0.0, 1), (2000.0, 4)]);
        for weight in [0.0, 0.5, 999.0, 1000.0, 1500.0, 2000.0, 10_000.0] {
            assert_eq!(
                compute_weight_column(weight, &sorted),
                compute_weight_column(weight, &shuffled)
            );
        }
    }

    #[test]
    fn test_weight_column_empty_table() {
        assert_eq!(compute_weight_column(5000.0, &[]), 0);
    }
}
