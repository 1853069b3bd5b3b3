//! # Error Types
//!
//! Structured error types for quote_core. A quote request either prices in
//! full or is rejected with one of these; there is no partial quote.
//!
//! Configuration gaps (a material missing from the cost table, a column
//! missing from the multiplier table, a malformed column break) never show up
//! here. Those degrade to documented defaults inside the engine.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn check_quantity(quantity: f64) -> QuoteResult<()> {
//!     if quantity < 0.0 {
//!         return Err(QuoteError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for pricing and persistence operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// One or more request lines broke a validation rule.
    ///
    /// Every violation found is listed, not just the first.
    #[error("Validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    /// The request names a customer that is not configured
    #[error("Unknown customer: {customer_id}")]
    CustomerNotFound { customer_id: String },

    /// A stock line names a SKU that is not in the item list
    #[error("Item not found: {sku}")]
    ItemNotFound { sku: String },

    /// A single input value is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QuoteError {
    /// Create a Validation error from collected messages
    pub fn validation(errors: Vec<String>) -> Self {
        QuoteError::Validation { errors }
    }

    /// Create a CustomerNotFound error
    pub fn customer_not_found(customer_id: impl Into<String>) -> Self {
        QuoteError::CustomerNotFound {
            customer_id: customer_id.into(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(sku: impl Into<String>) -> Self {
        QuoteError::ItemNotFound { sku: sku.into() }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        QuoteError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for lookups that failed because the key does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            QuoteError::CustomerNotFound { .. } | QuoteError::ItemNotFound { .. }
        )
    }

    /// True when the caller's request was at fault (as opposed to storage or internal errors)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            QuoteError::Validation { .. }
                | QuoteError::CustomerNotFound { .. }
                | QuoteError::ItemNotFound { .. }
                | QuoteError::InvalidInput { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::Validation { .. } => "VALIDATION_FAILED",
            QuoteError::CustomerNotFound { .. } => "CUSTOMER_NOT_FOUND",
            QuoteError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::serialization(e.to_string())
    }
}
