//! Quote Aggregation
//!
//! Validates a request, resolves the customer and prices every line in
//! request order. Any failure aborts the whole quote; there are no partial
//! results.

use super::lines::{price_ad_hoc_line, price_custom_line, price_stock_line, LineContext};
use super::round_to;
use crate::errors::{QuoteError, QuoteResult};
use crate::quote::{LinePriceResult, LineRequest, Quote, QuoteRequest};
use crate::settings::Settings;

/// Price a full quote request.
///
/// # Errors
///
/// * `Validation` - one or more lines are malformed (all problems listed)
/// * `CustomerNotFound` - unknown `customer_id`
/// * `ItemNotFound` - a stock line names an unknown SKU
///
/// # Example
///
/// ```rust
/// use quote_core::pricing::calculate_quote;
/// use quote_core::quote::QuoteRequest;
/// use quote_core::settings::{Customer, Settings};
///
/// let mut settings = Settings::default();
/// settings.customers.insert("ACME".to_string(), Customer::default());
///
/// let request: QuoteRequest = serde_json::from_str(
///     r#"{"customer_id": "ACME", "lines": []}"#,
/// ).unwrap();
///
/// let quote = calculate_quote(&request, &settings).unwrap();
/// assert_eq!(quote.quote_total, 0.0);
/// assert!(quote.lines.is_empty());
/// ```
pub fn calculate_quote(request: &QuoteRequest, settings: &Settings) -> QuoteResult<Quote> {
    request.validate()?;

    let customer = settings
        .customer(&request.customer_id)
        .ok_or_else(|| QuoteError::customer_not_found(&request.customer_id))?;

    let ctx = LineContext {
        customer,
        settings,
        include_freight: request.include_freight,
    };

    let lines = request
        .lines
        .iter()
        .map(|line| match line {
            LineRequest::Stock(stock) => price_stock_line(stock, &ctx),
            LineRequest::Custom(custom) => Ok(price_custom_line(custom, &ctx)),
            LineRequest::AdHoc(ad_hoc) => Ok(price_ad_hoc_line(ad_hoc, &ctx)),
        })
        .collect::<QuoteResult<Vec<LinePriceResult>>>()?;

    let quote_total = round_to(lines.iter().map(|l| l.extended_sell_price).sum(), 2);

    tracing::info!(
        customer_id = %request.customer_id,
        lines = lines.len(),
        quote_total,
        "calculated quote"
    );

    Ok(Quote {
        customer_id: request.customer_id.clone(),
        include_freight: request.include_freight,
        lines,
        quote_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{AdHocLine, StockLine};
    use crate::settings::{ColumnMultipliers, Customer};

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.customers.insert(
            "ACME".to_string(),
            Customer {
                name: Some("Acme Signs".to_string()),
                column_break: "VN10".to_string(),
                freight_column_offset: 0,
            },
        );
        settings.column_multipliers = ColumnMultipliers {
            default_above_max: 1.0,
            multipliers: [(0, 1.0)].into_iter().collect(),
        };
        settings
    }

    fn ad_hoc(quantity: f64, cost: f64) -> LineRequest {
        LineRequest::AdHoc(AdHocLine {
            description: None,
            quantity,
            weight_per_unit: Some(1.0),
            landed_cost_per_unit: Some(cost),
        })
    }

    #[test]
    fn test_total_is_sum_of_rounded_lines() {
        let request = QuoteRequest {
            customer_id: "ACME".to_string(),
            include_freight: true,
            lines: vec![ad_hoc(3.0, 200.003), ad_hoc(1.0, 600.0)],
        };
        let quote = calculate_quote(&request, &settings()).unwrap();

        assert_eq!(quote.lines.len(), 2);
        assert_eq!(quote.lines[0].extended_sell_price, 600.01);
        assert_eq!(quote.lines[1].extended_sell_price, 600.0);
        assert_eq!(quote.quote_total, 1200.01);
        assert!(quote.include_freight);
    }

    #[test]
    fn test_exact_half_cent_rounds_to_even() {
        let request = QuoteRequest {
            customer_id: "ACME".to_string(),
            include_freight: false,
            lines: vec![ad_hoc(1.0, 600.125)],
        };
        let quote = calculate_quote(&request, &settings()).unwrap();
        assert_eq!(quote.lines[0].sell_price_per_unit, 600.125);
        assert_eq!(quote.lines[0].extended_sell_price, 600.12);
        assert_eq!(quote.quote_total, 600.12);
    }

    #[test]
    fn test_unknown_customer() {
        let request = QuoteRequest {
            customer_id: "NOBODY".to_string(),
            include_freight: true,
            lines: vec![ad_hoc(1.0, 10.0)],
        };
        let err = calculate_quote(&request, &settings()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.error_code(), "CUSTOMER_NOT_FOUND");
    }

    #[test]
    fn test_validation_runs_before_customer_lookup() {
        let request = QuoteRequest {
            customer_id: "NOBODY".to_string(),
            include_freight: true,
            lines: vec![ad_hoc(-1.0, 10.0)],
        };
        let err = calculate_quote(&request, &settings()).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    fn sample_settings() -> Settings {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../settings");
        crate::settings::load_settings(&crate::settings::SettingsPaths::from_root(root)).unwrap()
    }

    fn sample_request(include_freight: bool) -> QuoteRequest {
        let json = format!(
            r#"{{
                "customer_id": "ACME",
                "include_freight": {},
                "lines": [
                    {{"type": "stock", "sku": "VN-020-RED-2540", "quantity": 200}},
                    {{"type": "custom", "material": "Styrene", "color": "White", "surface": "Matte/Matte",
                      "gauge": 0.060, "width": 30, "length": 40, "sheets": 1}},
                    {{"type": "ad_hoc", "description": "Pallet", "quantity": 2,
                      "weight_per_unit": 40, "landed_cost_per_unit": 55.0}}
                ]
            }}"#,
            include_freight
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_sample_settings_end_to_end() {
        let settings = sample_settings();
        let quote = calculate_quote(&sample_request(false), &settings).unwrap();
        assert_eq!(quote.lines.len(), 3);

        // Red vinyl: (1.35 + 0.18 color upcharge) x 1 lb, column VN10 -> 3.85
        let stock = &quote.lines[0];
        assert_eq!(stock.total_column, 10);
        assert!((stock.base_cost_per_unit - 1.53).abs() < 1e-9);
        assert!((stock.sell_price_per_unit - 5.8905).abs() < 1e-9);
        assert!((stock.extended_sell_price - 1178.1).abs() < 1e-9);

        // 2.88 lb sheets bumped to a 698-sheet run; ST20 + 10 + 16 + 16 + 6 = 68
        let custom = &quote.lines[1];
        assert_eq!(custom.quantity, 698.0);
        assert_eq!(custom.total_column, 68);
        assert!((custom.sell_price_per_unit - 3.1046).abs() < 1e-9);
        assert!((custom.extended_sell_price - 2167.04).abs() < 1e-9);

        // $478.50 is lifted to the 48" minimum
        let ad_hoc = &quote.lines[2];
        assert_eq!(ad_hoc.description, "Pallet");
        assert!((ad_hoc.extended_sell_price - 550.0).abs() < 1e-9);

        assert!((quote.quote_total - 3895.14).abs() < 1e-9);
    }

    #[test]
    fn test_sample_settings_freight_moves_columns() {
        let settings = sample_settings();
        let without = calculate_quote(&sample_request(false), &settings).unwrap();
        let with = calculate_quote(&sample_request(true), &settings).unwrap();

        for (a, b) in without.lines.iter().zip(&with.lines) {
            assert_eq!(b.total_column, a.total_column - 2);
        }
        assert!(with.include_freight);
    }

    #[test]
    fn test_unknown_customer_leaves_log_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let log = crate::quote_log::QuoteLog::new(dir.path().join("quotes.json"));
        let settings = sample_settings();

        let mut request = sample_request(true);
        request.customer_id = "GHOST".to_string();

        let result = calculate_quote(&request, &settings).and_then(|quote| log.append(&quote, None));
        assert!(result.unwrap_err().is_not_found());
        assert!(log.records().is_empty());
        assert!(!log.path().exists());
    }

    #[test]
    fn test_unknown_sku_aborts_quote() {
        let request = QuoteRequest {
            customer_id: "ACME".to_string(),
            include_freight: false,
            lines: vec![
                ad_hoc(1.0, 10.0),
                LineRequest::Stock(StockLine {
                    sku: "MISSING".to_string(),
                    quantity: 1.0,
                }),
            ],
        };
        let err = calculate_quote(&request, &settings()).unwrap_err();
        assert_eq!(err.error_code(), "ITEM_NOT_FOUND");
    }
}
