//! # Pricing Engine
//!
//! Turns a [`QuoteRequest`](crate::quote::QuoteRequest) plus loaded
//! [`Settings`](crate::settings::Settings) into a priced
//! [`Quote`](crate::quote::Quote).
//!
//! ## Pipeline (per line)
//!
//! ```text
//! base cost  ─┐
//! base column ┼─► core_engine ─► order minimums ─► rounding ─► LinePriceResult
//! quantity   ─┘   (columns, multiplier)
//! ```
//!
//! ## Submodules
//!
//! - [`columns`]: column-break parsing and weight-break resolution
//! - [`multiplier`]: column to multiplier lookup
//! - [`cost`]: base cost per unit from the cost table
//! - [`minimums`]: order minimums
//! - [`engine`]: the shared column/multiplier routine
//! - [`lines`]: stock, custom and ad-hoc pricers
//! - [`aggregate`]: whole-quote pricing
//!
//! Pricing is pure: it reads settings and never writes anything.

pub mod aggregate;
pub mod columns;
pub mod cost;
pub mod engine;
pub mod lines;
pub mod minimums;
pub mod multiplier;

pub use aggregate::calculate_quote;
pub use columns::{compute_weight_column, extract_column_from_breaks, ColumnBreaks};
pub use cost::build_base_cost_per_unit;
pub use engine::{core_engine, EngineInput, EngineOutput};
pub use lines::{price_ad_hoc_line, price_custom_line, price_stock_line, LineContext};
pub use minimums::apply_order_minimums;
pub use multiplier::lookup_multiplier;

/// Round to `places` decimals, ties to even
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
