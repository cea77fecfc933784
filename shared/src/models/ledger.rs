//! Customer Ledger Model

use serde::{Deserialize, Serialize};

use super::product::Customer;
use crate::util::{lenient_f64, lenient_string};

/// One ledger movement (invoice, return, payment, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LedgerEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub debit: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub credit: f64,
}

/// Ledger entry with the running balance after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLine {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    pub balance: f64,
}

/// Totals over a ledger range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LedgerSummary {
    pub total_debit: f64,
    pub total_credit: f64,
    /// total_debit - total_credit
    pub balance: f64,
}

/// `GET /customer/ledgers` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LedgerRecord {
    #[serde(default)]
    pub ledgers: Vec<LedgerEntry>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub credit_balance: f64,
}

/// Ledger report ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub customer: Option<Customer>,
    pub credit_balance: f64,
    pub lines: Vec<LedgerLine>,
    pub summary: LedgerSummary,
}
