//! Product and Customer Models

use serde::{Deserialize, Serialize};

use crate::util::{lenient_f64, lenient_id, lenient_string};

/// Catalog product as listed by the backend (`/active/products`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sku: Option<String>,
    /// Default unit price for new rows
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sale_price: f64,
    #[serde(default, deserialize_with = "lenient_id")]
    pub unit_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_name: Option<String>,
}

impl Product {
    /// Display label, e.g. `"Widget (W-100)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.sku.as_deref().unwrap_or(""))
    }
}

/// Customer reference (`/active/customers`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
}

impl Customer {
    /// Display label, e.g. `"Acme Traders (C-001)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code.as_deref().unwrap_or(""))
    }
}
