//! Multiplier Lookup
//!
//! Maps a total column to the multiplier applied to base cost. Columns are
//! not interpolated: every column between the lowest and highest configured
//! one is expected to be present in `column_multipliers.json`.

use crate::settings::ColumnMultipliers;

/// Multiplier for a total column.
///
/// - exact match: the configured multiplier
/// - empty table: `default_above_max`
/// - below the lowest configured column: the lowest column's multiplier
/// - above the highest configured column: `default_above_max`
/// - a gap inside the configured range: `default_above_max`, logged as a
///   configuration problem
///
/// # Example
///
/// ```rust
/// use quote_core::pricing::multiplier::lookup_multiplier;
/// use quote_core::settings::ColumnMultipliers;
///
/// let mut table = ColumnMultipliers::default();
/// table.multipliers.insert(0, 4.35);
/// table.multipliers.insert(1, 4.20);
///
/// assert_eq!(lookup_multiplier(1, &table), 4.20);
/// assert_eq!(lookup_multiplier(-3, &table), 4.35);
/// assert_eq!(lookup_multiplier(9, &table), table.default_above_max);
/// ```
pub fn lookup_multiplier(total_column: i32, table: &ColumnMultipliers) -> f64 {
    let mapping = &table.multipliers;

    if let Some(multiplier) = mapping.get(&total_column) {
        return *multiplier;
    }

    let (Some((&min_column, &min_multiplier)), Some((&max_column, _))) =
        (mapping.first_key_value(), mapping.last_key_value())
    else {
        return table.default_above_max;
    };

    if total_column < min_column {
        return min_multiplier;
    }

    if total_column < max_column {
        tracing::warn!(
            total_column,
            min_column,
            max_column,
            "column missing from multiplier table, using default multiplier"
        );
    }

    table.default_above_max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(i32, f64)], default_above_max: f64) -> ColumnMultipliers {
        ColumnMultipliers {
            default_above_max,
            multipliers: rows.iter().copied().collect(),
        }
    }

    #[test]
    fn test_exact_match() {
        let t = table(&[(0, 4.35), (1, 4.20), (2, 4.05)], 1.10);
        assert_eq!(lookup_multiplier(0, &t), 4.35);
        assert_eq!(lookup_multiplier(2, &t), 4.05);
    }

    #[test]
    fn test_empty_table_uses_default() {
        let t = table(&[], 1.5);
        assert_eq!(lookup_multiplier(0, &t), 1.5);
        assert_eq!(lookup_multiplier(-10, &t), 1.5);
    }

    #[test]
    fn test_below_min_clamps_to_min_column() {
        let t = table(&[(5, 3.0), (6, 2.9)], 1.10);
        for column in [-100, -1, 0, 4] {
            assert_eq!(lookup_multiplier(column, &t), 3.0);
        }
    }

    #[test]
    fn test_above_max_uses_default() {
        let t = table(&[(5, 3.0), (6, 2.9)], 1.10);
        for column in [7, 50, i32::MAX] {
            assert_eq!(lookup_multiplier(column, &t), 1.10);
        }
    }

    #[test]
    fn test_gap_falls_back_to_default() {
        let t = table(&[(0, 4.0), (10, 2.0)], 1.10);
        assert_eq!(lookup_multiplier(5, &t), 1.10);
    }
}
