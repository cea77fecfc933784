//! Invoice / Invoice Return Document Model

use serde::{Deserialize, Deserializer, Serialize};

use super::discount::Discount;
use super::line_item::{LineItem, RecordLine};
use crate::util::{lenient_id, lenient_string};

/// Which setup screen a document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    InvoiceReturn,
}

impl DocumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::InvoiceReturn => "invoice return",
        }
    }
}

/// Document lifecycle status
///
/// `Posted` documents are final and read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum DocumentStatus {
    #[default]
    Active,
    Inactive,
    Posted,
}

impl DocumentStatus {
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Unknown or empty values fall back to `Active`
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "posted" => Self::Posted,
            "inactive" => Self::Inactive,
            _ => Self::Active,
        }
    }
}

impl<'de> Deserialize<'de> for DocumentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse_lenient).unwrap_or_default())
    }
}

/// Derived document totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentTotals {
    pub total_quantity: f64,
    /// Gross: Σ quantity × unit price, before any discount
    pub total_price: f64,
    /// Row discounts plus footer discount
    pub total_discount: f64,
    /// max(0, total_price - total_discount)
    pub grand_total: f64,
}

/// Invoice or invoice return as fetched from the backend
///
/// Header totals in the record are ignored; they are recomputed from the
/// lines on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub invoice_number: Option<String>,
    /// Invoice being returned (returns only)
    #[serde(default, deserialize_with = "lenient_id")]
    pub invoice_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub invoice_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub return_date: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Footer discount, when the backend stores one
    #[serde(flatten)]
    pub discount: Discount,
    #[serde(default)]
    pub details: Vec<RecordLine>,
}

/// `POST/PUT /invoices` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub id: Option<i64>,
    pub invoice_number: Option<String>,
    pub customer_id: Option<i64>,
    pub invoice_date: String,
    pub status: DocumentStatus,
    pub description: Option<String>,
    #[serde(flatten)]
    pub totals: DocumentTotals,
    pub items: Vec<LineItem>,
}

/// `POST/PUT /invoice/returns` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnPayload {
    pub id: Option<i64>,
    pub invoice_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub return_date: String,
    pub status: DocumentStatus,
    #[serde(flatten)]
    pub totals: DocumentTotals,
    pub items: Vec<LineItem>,
}

/// Submit body for either document kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocumentPayload {
    Invoice(InvoicePayload),
    Return(ReturnPayload),
}

impl DocumentPayload {
    pub fn totals(&self) -> &DocumentTotals {
        match self {
            Self::Invoice(p) => &p.totals,
            Self::Return(p) => &p.totals,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        match self {
            Self::Invoice(p) => &p.items,
            Self::Return(p) => &p.items,
        }
    }

    pub fn status(&self) -> DocumentStatus {
        match self {
            Self::Invoice(p) => p.status,
            Self::Return(p) => p.status,
        }
    }
}
