//! Billing Engine - line-item totals and discount calculator
//!
//! # Overview
//!
//! Calculation core behind the invoice, invoice-return and stock setup
//! screens of a small business management system:
//!
//! - **Money** (`money`): `rust_decimal` arithmetic, 2 dp half-up rounding, display formatting
//! - **Pricing** (`pricing`): row totals, document totals, stock sheet totals
//! - **Catalog** (`catalog`): per-row product availability and the duplicate guard
//! - **Forms** (`forms`): serializable view-models and the submit guard
//! - **Ledger** (`ledger`): customer ledger running balances
//!
//! # Module layout
//!
//! ```text
//! billing-engine/src/
//! ├── core/          # Config
//! ├── money/         # Decimal helpers
//! ├── pricing/       # Row / document / stock calculators
//! ├── catalog/       # Availability filter, duplicate guard
//! ├── forms/         # DocumentForm, StockForm, SubmitGuard
//! ├── ledger.rs      # Customer ledger report
//! ├── cli.rs         # Command-line host
//! └── utils/         # Logging
//! ```

pub mod catalog;
pub mod cli;
pub mod core;
pub mod forms;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use catalog::{ProductSelection, ProductSlot, available_products};
pub use cli::{Cli, Output, RecordKind, process};
pub use crate::core::Config;
pub use forms::{DocumentForm, DocumentHeader, RemovedRow, StockForm, SubmitGuard, SubmitTicket};
pub use money::format_money;
pub use pricing::{document_totals, recalculate_document, row_total};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};
