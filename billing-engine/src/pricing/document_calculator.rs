//! Document Aggregator
//!
//! Folds line items and the footer discount into the document totals.
//!
//! - `total_quantity` = Σ quantity
//! - `total_price` = Σ quantity × unit price (gross, before discounts)
//! - `total_discount` = Σ row discounts + footer discount
//! - `grand_total` = max(0, total_price - total_discount)
//!
//! A footer `Percentage` applies to the amount left after row discounts.
//! Everything is accumulated in `Decimal` and rounded once at the end, so
//! `grand_total == max(0, total_price - total_discount)` holds exactly on
//! the rounded outputs.

use rust_decimal::prelude::*;
use shared::models::{Discount, DiscountType, DocumentTotals, LineItem};

use super::row_calculator::{recalculate_row, row_breakdown};
use crate::money::{coerce, non_negative, percent_of, round2, to_f64};

/// Footer discount amount for a document whose net (after row discounts)
/// is `net`
pub fn footer_discount_amount(net: Decimal, footer: &Discount) -> Decimal {
    let value = coerce(footer.value);
    match footer.kind {
        DiscountType::Percentage => percent_of(non_negative(net), value),
        DiscountType::Fixed => value,
    }
}

/// Compute document totals from the rows and the footer discount
///
/// Rows are read as-is; `total_amount` values are not trusted.
pub fn document_totals(items: &[LineItem], footer: &Discount) -> DocumentTotals {
    let mut total_quantity = Decimal::ZERO;
    let mut total_price = Decimal::ZERO;
    let mut row_discounts = Decimal::ZERO;

    for item in items {
        let row = row_breakdown(item.quantity, item.unit_price, &item.discount);
        total_quantity = total_quantity.saturating_add(row.quantity);
        total_price = total_price.saturating_add(row.gross);
        row_discounts = row_discounts.saturating_add(row.discount);
    }

    let footer_amount = footer_discount_amount(total_price.saturating_sub(row_discounts), footer);

    let total_price = round2(total_price);
    let total_discount = round2(row_discounts.saturating_add(footer_amount));
    let grand_total = non_negative(total_price - total_discount);

    DocumentTotals {
        total_quantity: to_f64(total_quantity),
        total_price: to_f64(total_price),
        total_discount: to_f64(total_discount),
        grand_total: to_f64(grand_total),
    }
}

/// Refresh every row's `total_amount`, then return the document totals
pub fn recalculate_document(items: &mut [LineItem], footer: &Discount) -> DocumentTotals {
    for item in items.iter_mut() {
        recalculate_row(item);
    }
    document_totals(items, footer)
}
