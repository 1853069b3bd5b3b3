//! # Pricing Settings
//!
//! The read-only configuration bundle the pricing engine consumes, and the
//! JSON files it is loaded from.
//!
//! ## Directory Layout
//!
//! ```text
//! <root>/
//! ├── config/
//! │   ├── items.json               (stock item list)
//! │   └── customers.json           (customers keyed by id)
//! └── data/
//!     ├── base_costs.json          (per-material $/lb and upcharges)
//!     ├── weight_breaks.json       (min_weight -> weight_column)
//!     └── column_multipliers.json  (column -> multiplier)
//! ```
//!
//! Settings are loaded once at startup. The engine only ever sees a shared
//! reference to one snapshot, so a pricing call cannot observe a change
//! halfway through. Administrative edits mutate an owned copy which is then
//! saved; the running snapshot is replaced only on restart.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::settings::{load_settings, SettingsPaths};
//!
//! let paths = SettingsPaths::from_root("settings");
//! let settings = load_settings(&paths)?;
//! println!("{} customers", settings.customers.len());
//! # Ok::<(), quote_core::errors::QuoteError>(())
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};
use crate::file_io::{read_json, write_json_atomic};

fn default_item_width() -> f64 {
    48.0
}

fn default_base_per_lb() -> f64 {
    1.0
}

fn default_above_max() -> f64 {
    1.10
}

/// A customer and the pricing agreement attached to it.
///
/// The id is the key in `customers.json`, not a field of the record.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Acme Signs", "column_break": "VN10ST20AP15", "freight_column_offset": -2 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    /// Display name (the id is shown when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Encoded per-material base columns, e.g. "VN10ST20AP15"
    #[serde(default)]
    pub column_break: String,

    /// Columns added when a quote includes freight
    #[serde(default)]
    pub freight_column_offset: i32,
}

/// A stock (catalog) sheet item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,

    #[serde(default)]
    pub description: String,

    /// Material name, also the cost-table key (e.g., "Vinyl")
    #[serde(default)]
    pub material: String,

    /// Two-letter code used for column resolution (e.g., "VN")
    #[serde(default)]
    pub material_code: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub surface: String,

    /// Pounds per sheet
    #[serde(default)]
    pub weight_per_unit: f64,

    /// Sheet width in inches, used for the wide-sheet minimum
    #[serde(default = "default_item_width")]
    pub width: f64,
}

/// Cost-table entry for one material.
///
/// Upcharge amounts sit next to `base_per_lb` under their own keys
/// (`color_up`, `gloss_up`, ...). Which keys apply is decided by
/// [`crate::materials::upcharges`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCost {
    #[serde(default = "default_base_per_lb")]
    pub base_per_lb: f64,

    #[serde(flatten)]
    pub upcharges: BTreeMap<String, f64>,
}

impl MaterialCost {
    /// Upcharge amount for a key, 0.0 when not configured
    pub fn upcharge(&self, key: &str) -> f64 {
        self.upcharges.get(key).copied().unwrap_or(0.0)
    }
}

/// Base costs keyed by lowercase material name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable(pub HashMap<String, MaterialCost>);

impl CostTable {
    /// Case-insensitive material lookup
    pub fn get(&self, material: &str) -> Option<&MaterialCost> {
        let key = material.to_lowercase();
        self.0
            .get(&key)
            .or_else(|| self.0.iter().find(|(k, _)| k.to_lowercase() == key).map(|(_, v)| v))
    }
}

/// One weight-break row: orders heavier than `min_weight` move `weight_column` columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBreak {
    pub min_weight: f64,
    pub weight_column: i32,
}

/// Column number to price multiplier.
///
/// ## JSON Example
///
/// ```json
/// { "default_above_max": 1.10, "multipliers": { "0": 4.35, "1": 4.20 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMultipliers {
    /// Applied to any column above the highest configured one
    #[serde(default = "default_above_max")]
    pub default_above_max: f64,

    #[serde(default)]
    pub multipliers: BTreeMap<i32, f64>,
}

impl Default for ColumnMultipliers {
    fn default() -> Self {
        ColumnMultipliers {
            default_above_max: default_above_max(),
            multipliers: BTreeMap::new(),
        }
    }
}

/// Everything the engine needs to price a quote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub items: Vec<Item>,
    pub customers: BTreeMap<String, Customer>,
    pub base_costs: CostTable,
    pub weight_breaks: Vec<WeightBreak>,
    pub column_multipliers: ColumnMultipliers,
}

/// Id and display name of a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
}

/// SKU and description of a stock item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub sku: String,
    pub description: String,
}

/// Fields to change on a customer; `None` leaves a field as it is
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub column_break: Option<String>,
    #[serde(default)]
    pub freight_column_offset: Option<i32>,
}

impl Settings {
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn item(&self, sku: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.sku == sku)
    }

    /// Customers with display names, in id order
    pub fn customer_summaries(&self) -> Vec<CustomerSummary> {
        self.customers
            .iter()
            .map(|(id, customer)| CustomerSummary {
                id: id.clone(),
                name: customer.name.clone().unwrap_or_else(|| id.clone()),
            })
            .collect()
    }

    /// Items in catalog order
    pub fn item_summaries(&self) -> Vec<ItemSummary> {
        self.items
            .iter()
            .map(|item| ItemSummary {
                sku: item.sku.clone(),
                description: item.description.clone(),
            })
            .collect()
    }

    /// Create a customer or change an existing one. Returns the stored record.
    pub fn upsert_customer(&mut self, id: &str, update: CustomerUpdate) -> QuoteResult<&Customer> {
        if id.trim().is_empty() {
            return Err(QuoteError::invalid_input("customer_id", id, "Customer id cannot be empty"));
        }
        let customer = self.customers.entry(id.to_string()).or_default();
        if let Some(name) = update.name {
            customer.name = Some(name);
        }
        if let Some(column_break) = update.column_break {
            customer.column_break = column_break;
        }
        if let Some(offset) = update.freight_column_offset {
            customer.freight_column_offset = offset;
        }
        Ok(customer)
    }

    /// Change a stock item's description (the only editable item field)
    pub fn update_item_description(&mut self, sku: &str, description: impl Into<String>) -> QuoteResult<&Item> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.sku == sku)
            .ok_or_else(|| QuoteError::item_not_found(sku))?;
        item.description = description.into();
        Ok(item)
    }
}

/// Locations of the five settings files
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl SettingsPaths {
    /// Standard layout under one root: `<root>/config` and `<root>/data`
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        SettingsPaths {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    pub fn items(&self) -> PathBuf {
        self.config_dir.join("items.json")
    }

    pub fn customers(&self) -> PathBuf {
        self.config_dir.join("customers.json")
    }

    pub fn base_costs(&self) -> PathBuf {
        self.data_dir.join("base_costs.json")
    }

    pub fn weight_breaks(&self) -> PathBuf {
        self.data_dir.join("weight_breaks.json")
    }

    pub fn column_multipliers(&self) -> PathBuf {
        self.data_dir.join("column_multipliers.json")
    }
}

/// Load all settings files into one snapshot.
///
/// Any missing or malformed file fails the load; the service should not
/// start half-configured.
pub fn load_settings(paths: &SettingsPaths) -> QuoteResult<Settings> {
    let settings = Settings {
        items: read_json(&paths.items())?,
        customers: read_json(&paths.customers())?,
        base_costs: read_json(&paths.base_costs())?,
        weight_breaks: read_json(&paths.weight_breaks())?,
        column_multipliers: read_json(&paths.column_multipliers())?,
    };

    tracing::info!(
        items = settings.items.len(),
        customers = settings.customers.len(),
        materials = settings.base_costs.0.len(),
        "loaded pricing settings"
    );

    Ok(settings)
}

/// Persist the customer table
pub fn save_customers(paths: &SettingsPaths, settings: &Settings) -> QuoteResult<()> {
    write_json_atomic(&settings.customers, &paths.customers())?;
    tracing::info!(customers = settings.customers.len(), "saved customers");
    Ok(())
}

/// Persist the item list
pub fn save_items(paths: &SettingsPaths, settings: &Settings) -> QuoteResult<()> {
    write_json_atomic(&settings.items, &paths.items())?;
    tracing::info!(items = settings.items.len(), "saved items");
    Ok(())
}
