//! # Quote Log
//!
//! Append-only history of priced quotes, stored as one JSON array.
//!
//! ## Storage
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "created_at": "2026-03-02T14:05:11Z",
//!     "requested_by": "sales@example.com",
//!     "num_lines": 2,
//!     "customer_id": "ACME",
//!     "include_freight": true,
//!     "lines": [ ... ],
//!     "quote_total": 812.4
//!   }
//! ]
//! ```
//!
//! ## Guarantees
//!
//! - Appends run under an exclusive [`FileLock`], so ids are unique and
//!   increasing across threads and processes.
//! - Reads never fail. A missing, unreadable or corrupt store reads as empty,
//!   and entries that don't parse as records are skipped.
//! - Appending over a corrupt store first copies it to `<log>.corrupt`.
//! - Entries are never rewritten; unreadable ones are carried forward as-is.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::{QuoteError, QuoteResult};
use crate::file_io::{read_to_string, sibling_with_suffix, write_json_atomic, FileLock};
use crate::quote::Quote;

/// Timestamp format for `created_at`
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const DEFAULT_LOCK_HOLDER: &str = "quote_log";

/// A logged quote: the priced quote plus its log metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_lines: Option<usize>,
    #[serde(flatten)]
    pub quote: Quote,
}

/// History-list view of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub id: u64,
    pub customer_id: String,
    pub include_freight: bool,
    pub quote_total: f64,
    pub num_lines: Option<usize>,
    pub created_at: String,
    pub requested_by: Option<String>,
}

impl From<&QuoteRecord> for QuoteSummary {
    fn from(record: &QuoteRecord) -> Self {
        QuoteSummary {
            id: record.id,
            customer_id: record.quote.customer_id.clone(),
            include_freight: record.quote.include_freight,
            quote_total: record.quote.quote_total,
            num_lines: record.num_lines,
            created_at: record.created_at.clone(),
            requested_by: record.requested_by.clone(),
        }
    }
}

/// What was found on disk
enum Store {
    Missing,
    Entries(Vec<Value>),
    Corrupt(String),
}

/// Integer value of a stored id.
///
/// Whole numbers, floats (truncated toward zero), integer strings and
/// booleans (1/0) count. Negative or non-finite values do not.
fn id_from_value(id: &Value) -> Option<u64> {
    match id {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(u64::from(*b)),
        _ => None,
    }
}

fn entry_id(entry: &Value) -> Option<u64> {
    entry.get("id").and_then(id_from_value)
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    id_from_value(&raw).ok_or_else(|| de::Error::custom(format!("invalid quote id: {}", raw)))
}

/// The quote log at one path
#[derive(Debug, Clone)]
pub struct QuoteLog {
    path: PathBuf,
}

impl QuoteLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        QuoteLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_store(&self) -> Store {
        if !self.path.exists() {
            return Store::Missing;
        }

        let contents = match read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => return Store::Corrupt(e.to_string()),
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Array(entries)) => Store::Entries(entries),
            Ok(_) => Store::Corrupt("store is not a JSON array".to_string()),
            Err(e) => Store::Corrupt(e.to_string()),
        }
    }

    fn load_entries(&self) -> Vec<Value> {
        match self.load_store() {
            Store::Missing => Vec::new(),
            Store::Entries(entries) => entries,
            Store::Corrupt(reason) => {
                tracing::warn!(path = %self.path.display(), %reason, "quote log unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append a priced quote, returning the stored record.
    ///
    /// Blocks while another writer holds the log.
    pub fn append(&self, quote: &Quote, requested_by: Option<&str>) -> QuoteResult<QuoteRecord> {
        let _lock = FileLock::acquire(&self.path, requested_by.unwrap_or(DEFAULT_LOCK_HOLDER))?;

        let mut entries = match self.load_store() {
            Store::Missing => Vec::new(),
            Store::Entries(entries) => entries,
            Store::Corrupt(reason) => {
                let backup = sibling_with_suffix(&self.path, "corrupt");
                tracing::warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    %reason,
                    "quote log corrupt, starting a new one"
                );
                fs::copy(&self.path, &backup).map_err(|e| {
                    QuoteError::file_error("back up corrupt log", backup.display().to_string(), e.to_string())
                })?;
                Vec::new()
            }
        };

        let next_id = entries.iter().filter_map(entry_id).max().unwrap_or(0) + 1;

        let record = QuoteRecord {
            id: next_id,
            created_at: Utc::now().format(CREATED_AT_FORMAT).to_string(),
            requested_by: requested_by.map(str::to_string),
            num_lines: Some(quote.lines.len()),
            quote: quote.clone(),
        };

        entries.push(serde_json::to_value(&record)?);
        write_json_atomic(&entries, &self.path)?;

        tracing::info!(
            id = record.id,
            customer_id = %record.quote.customer_id,
            quote_total = record.quote.quote_total,
            "logged quote"
        );

        Ok(record)
    }

    /// Every readable record, in storage order
    pub fn records(&self) -> Vec<QuoteRecord> {
        self.load_entries()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<QuoteRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed quote log entry");
                    None
                }
            })
            .collect()
    }

    /// Summaries, newest id first
    pub fn summaries(&self) -> Vec<QuoteSummary> {
        let mut summaries: Vec<QuoteSummary> = self.records().iter().map(QuoteSummary::from).collect();
        summaries.sort_by(|a, b| b.id.cmp(&a.id));
        summaries
    }

    /// Full record for an id
    pub fn get(&self, id: u64) -> Option<QuoteRecord> {
        self.records().into_iter().find(|r| r.id == id)
    }
}
