//! Stock sheet form view-model
//!
//! Same shape as the document form without discounts: rows of
//! `stock × price`, the duplicate guard, and `total_stock`/`total_price`.

use serde::{Deserialize, Serialize};
use shared::models::{DocumentStatus, Product, StockItem, StockPayload, StockRecord, StockTotals};
use shared::{AppError, AppResult, DateInput, WireDate, to_wire_date};

use crate::catalog::availability::check_selection;
use crate::catalog::{ProductSelection, available_products, find_product};
use crate::pricing::recalculate_stock;

use super::{RemovedRow, bounded_input, date_from_record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStockForm")]
pub struct StockForm {
    id: Option<i64>,
    stock_date: DateInput,
    status: DocumentStatus,
    rows: Vec<StockItem>,
    totals: StockTotals,
    edit_mode: bool,
}

#[derive(Deserialize)]
struct RawStockForm {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    stock_date: DateInput,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    rows: Vec<StockItem>,
    #[serde(default)]
    edit_mode: bool,
}

impl From<RawStockForm> for StockForm {
    fn from(raw: RawStockForm) -> Self {
        let mut form = Self {
            id: raw.id,
            stock_date: raw.stock_date,
            status: raw.status,
            rows: raw.rows,
            totals: StockTotals::default(),
            edit_mode: raw.edit_mode,
        };
        form.recalculate();
        form
    }
}

impl Default for StockForm {
    fn default() -> Self {
        Self::new()
    }
}

impl StockForm {
    pub fn new() -> Self {
        Self {
            id: None,
            stock_date: DateInput::Picked(WireDate::today()),
            status: DocumentStatus::Active,
            rows: vec![StockItem::empty()],
            totals: StockTotals::default(),
            edit_mode: false,
        }
    }

    pub fn from_record(record: StockRecord, catalog: &[Product]) -> AppResult<Self> {
        let stock_date = date_from_record(record.stock_date.as_deref())?;

        let mut rows: Vec<StockItem> = record
            .details
            .into_iter()
            .map(|mut item| {
                if let Some(product) = item.product_id.and_then(|id| catalog.iter().find(|p| p.id == id)) {
                    item.unit_id = item.unit_id.or(product.unit_id);
                    item.unit_name = item.unit_name.or_else(|| product.unit_name.clone());
                }
                item
            })
            .collect();
        if rows.is_empty() {
            rows.push(StockItem::empty());
        }

        let mut form = Self {
            id: record.id,
            stock_date,
            status: record.status,
            rows,
            totals: StockTotals::default(),
            edit_mode: record.id.is_some(),
        };
        form.recalculate();
        Ok(form)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn stock_date(&self) -> &DateInput {
        &self.stock_date
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn rows(&self) -> &[StockItem] {
        &self.rows
    }

    pub fn totals(&self) -> &StockTotals {
        &self.totals
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_locked(&self) -> bool {
        self.status.is_posted()
    }

    pub fn available_products<'a>(&self, catalog: &'a [Product], index: usize) -> Vec<&'a Product> {
        available_products(catalog, &self.rows, index)
    }

    pub fn set_stock_date(&mut self, date: DateInput) -> AppResult<()> {
        self.ensure_editable()?;
        self.stock_date = date;
        Ok(())
    }

    pub fn set_status(&mut self, status: DocumentStatus) -> AppResult<()> {
        self.ensure_editable()?;
        self.status = status;
        Ok(())
    }

    pub fn add_row(&mut self) -> AppResult<usize> {
        self.ensure_editable()?;
        self.rows.push(StockItem::empty());
        self.recalculate();
        Ok(self.rows.len() - 1)
    }

    /// TAB on the last row appends a row
    pub fn on_tab(&mut self, index: usize) -> bool {
        if self.is_locked() || index + 1 != self.rows.len() {
            return false;
        }
        self.rows.push(StockItem::empty());
        self.recalculate();
        true
    }

    pub fn remove_row(&mut self, index: usize) -> AppResult<RemovedRow<StockItem>> {
        self.ensure_editable()?;
        if index >= self.rows.len() {
            return Err(AppError::row_not_found(index));
        }
        let item = self.rows.remove(index);
        self.recalculate();
        Ok(RemovedRow { index, item })
    }

    pub fn reinsert(&mut self, removed: RemovedRow<StockItem>) -> AppResult<()> {
        self.ensure_editable()?;
        let index = removed.index.min(self.rows.len());
        self.rows.insert(index, removed.item);
        self.recalculate();
        Ok(())
    }

    pub fn set_stock(&mut self, index: usize, stock: f64) -> AppResult<StockTotals> {
        let stock = bounded_input("stock", stock)?;
        self.edit_row(index, |row| row.stock = stock)
    }

    pub fn set_price(&mut self, index: usize, price: f64) -> AppResult<StockTotals> {
        let price = bounded_input("price", price)?;
        self.edit_row(index, |row| row.price = price)
    }

    pub fn select_product(
        &mut self,
        index: usize,
        product: Option<&Product>,
    ) -> AppResult<ProductSelection> {
        self.ensure_editable()?;
        if index >= self.rows.len() {
            return Err(AppError::row_not_found(index));
        }

        let outcome = match product {
            None => {
                self.rows[index].clear_product();
                ProductSelection::Cleared
            }
            Some(p) => match check_selection(&self.rows, index, p.id) {
                Some(rejected) => {
                    self.rows[index].clear_product();
                    rejected
                }
                None => {
                    self.rows[index].apply_product(p);
                    ProductSelection::Applied
                }
            },
        };
        self.recalculate();
        Ok(outcome)
    }

    pub fn select_product_by_id(
        &mut self,
        index: usize,
        product_id: i64,
        catalog: &[Product],
    ) -> AppResult<ProductSelection> {
        let product = find_product(catalog, product_id)?;
        self.select_product(index, Some(product))
    }

    pub fn recalculate(&mut self) -> StockTotals {
        self.totals = recalculate_stock(&mut self.rows);
        tracing::debug!(
            rows = self.rows.len(),
            total_price = self.totals.total_price,
            "Stock totals recalculated"
        );
        self.totals
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn build_payload(&self, post: bool) -> AppResult<StockPayload> {
        self.ensure_editable()?;
        if self.rows.is_empty() {
            return Err(AppError::document_empty("At least one item is required."));
        }

        let stock_date = match &self.stock_date {
            DateInput::Empty => WireDate::today().to_string(),
            other => to_wire_date(other),
        };
        let payload = StockPayload {
            id: self.id,
            stock_date,
            status: if post { DocumentStatus::Posted } else { self.status },
            totals: self.totals,
            items: self.rows.clone(),
        };

        tracing::info!(
            id = ?self.id,
            status = ?payload.status,
            items = payload.items.len(),
            total_price = payload.totals.total_price,
            "Stock payload built"
        );
        Ok(payload)
    }

    pub fn mark_submitted(&mut self, id: Option<i64>, posted: bool) {
        if id.is_some() {
            self.id = id;
        }
        self.edit_mode = self.id.is_some();
        if posted {
            self.status = DocumentStatus::Posted;
        }
    }

    fn ensure_editable(&self) -> AppResult<()> {
        if self.is_locked() {
            return Err(AppError::document_locked());
        }
        Ok(())
    }

    fn edit_row(&mut self, index: usize, edit: impl FnOnce(&mut StockItem)) -> AppResult<StockTotals> {
        self.ensure_editable()?;
        let row = self
            .rows
            .get_mut(index)
            .ok_or_else(|| AppError::row_not_found(index))?;
        edit(row);
        Ok(self.recalculate())
    }
}
