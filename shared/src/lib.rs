//! Shared types for the billing workspace
//!
//! Wire/data model types for invoices, invoice returns, stock sheets and
//! customer ledgers, calendar date handling, lenient decoding helpers and
//! the unified error system.

pub mod date;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use date::{DateInput, WireDate, from_wire_date, to_wire_date};
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
