//! Stock sheet calculator: `total_amount = stock × price`, no discounts

use rust_decimal::prelude::*;
use shared::models::{StockItem, StockTotals};

use crate::money::{clean, coerce, round2, to_f64};

/// Row amount for `stock` units at `price`
pub fn stock_row_total(stock: f64, price: f64) -> f64 {
    to_f64(coerce(stock).saturating_mul(coerce(price)))
}

pub fn stock_totals(items: &[StockItem]) -> StockTotals {
    let (total_stock, total_price) = items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(stock, price), item| {
            let qty = coerce(item.stock);
            (
                stock.saturating_add(qty),
                price.saturating_add(qty.saturating_mul(coerce(item.price))),
            )
        },
    );

    StockTotals {
        total_stock: to_f64(total_stock),
        total_price: to_f64(round2(total_price)),
    }
}

/// Clean every row's stock and price, refresh its `total_amount`, then
/// return the sheet totals
pub fn recalculate_stock(items: &mut [StockItem]) -> StockTotals {
    for item in items.iter_mut() {
        item.stock = clean(item.stock);
        item.price = clean(item.price);
        item.total_amount = stock_row_total(item.stock, item.price);
    }
    stock_totals(items)
}
