//! Pricing
//!
//! Row totals, document totals and stock sheet totals. Pure functions over
//! the shared models; the form view-models call these after every edit.

pub mod document_calculator;
pub mod row_calculator;
pub mod stock_calculator;

pub use document_calculator::{document_totals, footer_discount_amount, recalculate_document};
pub use row_calculator::{
    RowBreakdown, recalculate_row, row_breakdown, row_discount_amount, row_total,
};
pub use stock_calculator::{recalculate_stock, stock_row_total, stock_totals};
