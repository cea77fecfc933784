//! Command-line host
//!
//! Reads one fetched record (invoice, return, stock sheet or customer
//! ledger) as JSON, runs it through the matching form or report, and
//! produces the recalculated submit payload / ledger report.
//!
//! ```sh
//! billing-engine invoice invoice.json
//! cat return.json | billing-engine return --catalog products.json --post
//! billing-engine ledger ledger.json --summary
//! ```

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use shared::models::{
    DocumentKind, DocumentPayload, DocumentRecord, LedgerRecord, LedgerReport, Product,
    StockPayload, StockRecord,
};
use shared::AppResult;

use crate::forms::{DocumentForm, StockForm};
use crate::ledger::build_report;
use crate::money::format_money;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RecordKind {
    /// Invoice record (`details[]` with `price` / `total_amount`)
    Invoice,
    /// Invoice return record (`details[]` with `sale_price` / `total`)
    Return,
    /// Stock sheet record
    Stock,
    /// Customer ledger (`ledgers[]`, `customer`, `credit_balance`)
    Ledger,
}

#[derive(Parser, Debug)]
#[command(
    name = "billing-engine",
    version,
    about = "Recalculate invoice, return and stock documents and customer ledgers"
)]
pub struct Cli {
    /// Kind of record on the input
    #[arg(value_enum)]
    pub kind: RecordKind,

    /// JSON record file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Product catalog JSON, used for missing row prices and units
    #[arg(long, env = "BILLING_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Build the payload with status Posted
    #[arg(long)]
    pub post: bool,

    /// Print a human-readable summary instead of JSON
    #[arg(long)]
    pub summary: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Result of processing one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Document(DocumentPayload),
    Stock(StockPayload),
    Ledger(LedgerReport),
}

impl Output {
    /// Human-readable totals, amounts formatted with `currency_sign`
    pub fn summary(&self, currency_sign: &str) -> String {
        let money = |amount: f64| format_money(amount, currency_sign);
        let mut out = String::new();

        match self {
            Self::Document(payload) => {
                let totals = payload.totals();
                let _ = writeln!(out, "Items:          {}", payload.items().len());
                let _ = writeln!(out, "Status:         {:?}", payload.status());
                let _ = writeln!(out, "Total quantity: {}", totals.total_quantity);
                let _ = writeln!(out, "Total price:    {}", money(totals.total_price));
                let _ = writeln!(out, "Total discount: {}", money(totals.total_discount));
                let _ = writeln!(out, "Grand total:    {}", money(totals.grand_total));
            }
            Self::Stock(payload) => {
                let _ = writeln!(out, "Items:       {}", payload.items.len());
                let _ = writeln!(out, "Status:      {:?}", payload.status);
                let _ = writeln!(out, "Total stock: {}", payload.totals.total_stock);
                let _ = writeln!(out, "Total price: {}", money(payload.totals.total_price));
            }
            Self::Ledger(report) => {
                if let Some(customer) = &report.customer {
                    let _ = writeln!(out, "Customer:       {}", customer.label());
                }
                let _ = writeln!(out, "Entries:        {}", report.lines.len());
                let _ = writeln!(out, "Total debit:    {}", money(report.summary.total_debit));
                let _ = writeln!(out, "Total credit:   {}", money(report.summary.total_credit));
                let _ = writeln!(out, "Balance:        {}", money(report.summary.balance));
                let _ = writeln!(out, "Credit balance: {}", money(report.credit_balance));
            }
        }
        out
    }
}

/// Process one JSON record
pub fn process(kind: RecordKind, input: &str, catalog: &[Product], post: bool) -> AppResult<Output> {
    let output = match kind {
        RecordKind::Invoice | RecordKind::Return => {
            let document_kind = if kind == RecordKind::Invoice {
                DocumentKind::Invoice
            } else {
                DocumentKind::InvoiceReturn
            };
            let record: DocumentRecord = serde_json::from_str(input)?;
            let form = DocumentForm::from_record(document_kind, record, catalog)?;
            Output::Document(form.build_payload(post)?)
        }
        RecordKind::Stock => {
            let record: StockRecord = serde_json::from_str(input)?;
            let form = StockForm::from_record(record, catalog)?;
            Output::Stock(form.build_payload(post)?)
        }
        RecordKind::Ledger => {
            let record: LedgerRecord = serde_json::from_str(input)?;
            Output::Ledger(build_report(record))
        }
    };
    Ok(output)
}

/// Read the record from `file`, or stdin when `None`
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Load a product catalog (JSON array of products); no file → empty
pub fn load_catalog(file: Option<&Path>) -> anyhow::Result<Vec<Product>> {
    let Some(path) = file else {
        return Ok(Vec::new());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: Vec<Product> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    tracing::debug!(products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
