//! Row Total Calculator
//!
//! A line item's total is its gross amount (quantity × unit price) minus
//! its own discount, rounded to cents and never negative.

use rust_decimal::prelude::*;
use shared::models::{Discount, DiscountType, LineItem};

use crate::money::{clean, coerce, non_negative, percent_of, round2, to_f64};

/// Decimal breakdown of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowBreakdown {
    pub quantity: Decimal,
    /// quantity × unit price
    pub gross: Decimal,
    /// Row discount amount (unclamped: a fixed discount may exceed gross)
    pub discount: Decimal,
    /// max(0, round2(gross - discount))
    pub total: Decimal,
}

/// Row discount amount
///
/// - `Percentage`: `unit_price × quantity × value / 100`
/// - `Fixed`: `value`
pub fn row_discount_amount(quantity: Decimal, unit_price: Decimal, discount: &Discount) -> Decimal {
    let value = coerce(discount.value);
    match discount.kind {
        DiscountType::Percentage => percent_of(unit_price.saturating_mul(quantity), value),
        DiscountType::Fixed => value,
    }
}

/// Compute the full breakdown of a row from raw form values
pub fn row_breakdown(quantity: f64, unit_price: f64, discount: &Discount) -> RowBreakdown {
    let quantity = coerce(quantity);
    let unit_price = coerce(unit_price);
    let gross = unit_price.saturating_mul(quantity);
    let discount = row_discount_amount(quantity, unit_price, discount);

    RowBreakdown {
        quantity,
        gross,
        discount,
        total: non_negative(round2(gross.saturating_sub(discount))),
    }
}

/// Row total as stored in `total_amount`
pub fn row_total(quantity: f64, unit_price: f64, discount: &Discount) -> f64 {
    to_f64(row_breakdown(quantity, unit_price, discount).total)
}

/// Clean the row's inputs, then refresh `item.total_amount` from them
///
/// The stored quantity, price and discount value are the ones the total
/// was computed from.
pub fn recalculate_row(item: &mut LineItem) -> RowBreakdown {
    item.quantity = clean(item.quantity);
    item.unit_price = clean(item.unit_price);
    item.discount.value = clean(item.discount.value);
    let breakdown = row_breakdown(item.quantity, item.unit_price, &item.discount);
    item.total_amount = to_f64(breakdown.total);
    breakdown
}
