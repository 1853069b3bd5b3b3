//! # quote_core - Sheet-Material Pricing Engine
//!
//! `quote_core` prices quotes for plastic sheet stock: catalog items,
//! made-to-order cut sheets and ad-hoc lines. A customer's pricing agreement
//! is a string of per-material base columns; weight, material and freight
//! move a line across columns, and the final column selects a price
//! multiplier. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pricing takes a settings snapshot and a request and
//!   returns a quote, with no I/O
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Safe Persistence**: Atomic writes and locked quote-log appends
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::{calculate_quote, QuoteRequest, Settings};
//! use quote_core::settings::Customer;
//!
//! let mut settings = Settings::default();
//! settings.customers.insert(
//!     "ACME".to_string(),
//!     Customer { column_break: "VN10ST20AP15".to_string(), ..Default::default() },
//! );
//!
//! let request: QuoteRequest = serde_json::from_str(r#"{
//!     "customer_id": "ACME",
//!     "lines": [{"type": "ad_hoc", "quantity": 1, "weight_per_unit": 5, "landed_cost_per_unit": 20}]
//! }"#).unwrap();
//!
//! let quote = calculate_quote(&request, &settings).unwrap();
//! // The 48" ad-hoc line is lifted to the $550 wide-sheet minimum
//! assert_eq!(quote.quote_total, 550.0);
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Column resolution, multipliers, minimums and line pricing
//! - [`materials`] - Material codes, custom-sheet rules and upcharge rules
//! - [`quote`] - Request and result types
//! - [`settings`] - Settings snapshot, loading and administration
//! - [`quote_log`] - Append-only quote history
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod errors;
pub mod file_io;
pub mod materials;
pub mod pricing;
pub mod quote;
pub mod quote_log;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use errors::{QuoteError, QuoteResult};
pub use file_io::{write_json_atomic, FileLock};
pub use pricing::calculate_quote;
pub use quote::{LineKind, LinePriceResult, LineRequest, Quote, QuoteRequest};
pub use quote_log::{QuoteLog, QuoteRecord, QuoteSummary};
pub use settings::{load_settings, Settings, SettingsPaths};
