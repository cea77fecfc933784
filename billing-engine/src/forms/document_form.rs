//! Invoice / invoice-return form view-model
//!
//! Owns everything the setup screen shows: header fields, editable rows,
//! the footer discount and the derived totals. Every mutation recomputes
//! row totals and document totals before returning, so `totals()` is
//! always consistent with `rows()`.
//!
//! Posted documents are read-only: every mutating operation returns
//! `DocumentLocked`.

use serde::{Deserialize, Serialize};
use shared::models::{
    Discount, DocumentKind, DocumentPayload, DocumentRecord, DocumentStatus, DocumentTotals,
    InvoicePayload, LineItem, Product, ReturnPayload,
};
use shared::{AppError, AppResult, DateInput, WireDate, to_wire_date};

use crate::catalog::availability::check_selection;
use crate::catalog::{ProductSelection, available_products, find_product};
use crate::money::clean;
use crate::pricing::{document_totals, recalculate_document};

use super::{RemovedRow, bounded_discount, bounded_input, date_from_record};

/// Header fields of an invoice or invoice return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocumentHeader {
    pub id: Option<i64>,
    pub invoice_number: Option<String>,
    /// Invoice being returned (returns only)
    pub invoice_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    /// Invoice date or return date
    pub date: DateInput,
    pub status: DocumentStatus,
    pub description: Option<String>,
}

impl DocumentHeader {
    fn dated_today() -> Self {
        Self {
            date: DateInput::Picked(WireDate::today()),
            ..Default::default()
        }
    }
}

/// Setup screen state for an invoice or an invoice return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDocumentForm")]
pub struct DocumentForm {
    kind: DocumentKind,
    header: DocumentHeader,
    rows: Vec<LineItem>,
    footer: Discount,
    totals: DocumentTotals,
    edit_mode: bool,
}

/// Deserialization shape: totals are never trusted, they are recomputed
#[derive(Deserialize)]
struct RawDocumentForm {
    kind: DocumentKind,
    #[serde(default)]
    header: DocumentHeader,
    #[serde(default)]
    rows: Vec<LineItem>,
    #[serde(default)]
    footer: Discount,
    #[serde(default)]
    edit_mode: bool,
}

impl From<RawDocumentForm> for DocumentForm {
    fn from(raw: RawDocumentForm) -> Self {
        let mut form = Self {
            kind: raw.kind,
            header: raw.header,
            rows: raw.rows,
            footer: raw.footer,
            totals: DocumentTotals::default(),
            edit_mode: raw.edit_mode,
        };
        form.recalculate();
        form
    }
}

impl DocumentForm {
    /// Create screen: today's date, one empty row, no discounts
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            header: DocumentHeader::dated_today(),
            rows: vec![LineItem::empty()],
            footer: Discount::NONE,
            totals: DocumentTotals::default(),
            edit_mode: false,
        }
    }

    /// Edit screen: load a fetched record
    ///
    /// Missing row prices and units fall back to the catalog; stored totals
    /// are ignored and recomputed.
    pub fn from_record(
        kind: DocumentKind,
        record: DocumentRecord,
        catalog: &[Product],
    ) -> AppResult<Self> {
        let date = match kind {
            DocumentKind::Invoice => record.invoice_date.as_deref(),
            DocumentKind::InvoiceReturn => record.return_date.as_deref(),
        };
        let date = date_from_record(date)?;

        let mut rows: Vec<LineItem> = record
            .details
            .into_iter()
            .map(|line| line.into_line_item(catalog))
            .collect();
        if rows.is_empty() {
            rows.push(LineItem::empty());
        }

        let mut form = Self {
            kind,
            header: DocumentHeader {
                id: record.id,
                invoice_number: record.invoice_number,
                invoice_id: record.invoice_id,
                customer_id: record.customer_id,
                customer_name: record.customer_name,
                date,
                status: record.status,
                description: record.description,
            },
            rows,
            footer: record.discount,
            totals: DocumentTotals::default(),
            edit_mode: record.id.is_some(),
        };
        form.recalculate();

        tracing::debug!(
            kind = form.kind.name(),
            id = ?form.header.id,
            rows = form.rows.len(),
            "Document loaded"
        );
        Ok(form)
    }

    // ========== Accessors ==========

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn header(&self) -> &DocumentHeader {
        &self.header
    }

    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    pub fn footer(&self) -> &Discount {
        &self.footer
    }

    pub fn totals(&self) -> &DocumentTotals {
        &self.totals
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_locked(&self) -> bool {
        self.header.status.is_posted()
    }

    /// Products the picker on row `index` may offer
    pub fn available_products<'a>(&self, catalog: &'a [Product], index: usize) -> Vec<&'a Product> {
        available_products(catalog, &self.rows, index)
    }

    // ========== Header ==========

    /// Mutable header access for field edits
    pub fn header_mut(&mut self) -> AppResult<&mut DocumentHeader> {
        self.ensure_editable()?;
        Ok(&mut self.header)
    }

    /// Prefill a new return from the invoice being returned
    ///
    /// Copies customer and lines; line ids are cleared because the lines
    /// become new return rows. Does nothing in edit mode. Returns whether
    /// the form was prefilled.
    pub fn prefill_from_invoice(
        &mut self,
        invoice: DocumentRecord,
        catalog: &[Product],
    ) -> AppResult<bool> {
        if self.kind != DocumentKind::InvoiceReturn {
            return Err(AppError::validation(
                "Only an invoice return can be prefilled from an invoice",
            ));
        }
        self.ensure_editable()?;
        if self.edit_mode {
            return Ok(false);
        }

        self.header.invoice_id = invoice.id;
        self.header.customer_id = invoice.customer_id;
        self.header.customer_name = invoice.customer_name;

        self.rows = invoice
            .details
            .into_iter()
            .map(|line| LineItem {
                id: None,
                ..line.into_line_item(catalog)
            })
            .collect();
        if self.rows.is_empty() {
            self.rows.push(LineItem::empty());
        }
        self.recalculate();
        Ok(true)
    }

    // ========== Rows ==========

    /// Append an empty row
    pub fn add_row(&mut self) -> AppResult<usize> {
        self.ensure_editable()?;
        self.rows.push(LineItem::empty());
        self.recalculate();
        Ok(self.rows.len() - 1)
    }

    /// TAB pressed on row `index`: append a row when it is the last one
    ///
    /// A posted document ignores the key. Returns whether a row was added.
    pub fn on_tab(&mut self, index: usize) -> bool {
        if self.is_locked() || index + 1 != self.rows.len() {
            return false;
        }
        self.rows.push(LineItem::empty());
        self.recalculate();
        true
    }

    /// Remove row `index`
    ///
    /// If the returned row is persisted the host deletes it server-side,
    /// and calls [`reinsert`](Self::reinsert) when that delete fails.
    pub fn remove_row(&mut self, index: usize) -> AppResult<RemovedRow<LineItem>> {
        self.ensure_editable()?;
        self.row(index)?;
        let item = self.rows.remove(index);
        self.recalculate();
        Ok(RemovedRow { index, item })
    }

    /// Put a removed row back where it was
    pub fn reinsert(&mut self, removed: RemovedRow<LineItem>) -> AppResult<()> {
        self.ensure_editable()?;
        let index = removed.index.min(self.rows.len());
        self.rows.insert(index, removed.item);
        self.recalculate();
        Ok(())
    }

    // Setters store the cleaned value, so a payload row always matches the
    // totals computed from it.

    pub fn set_quantity(&mut self, index: usize, quantity: f64) -> AppResult<DocumentTotals> {
        let quantity = bounded_input("quantity", quantity)?;
        self.edit_row(index, |row| row.quantity = quantity)
    }

    pub fn set_unit_price(&mut self, index: usize, unit_price: f64) -> AppResult<DocumentTotals> {
        let unit_price = bounded_input("unit_price", unit_price)?;
        self.edit_row(index, |row| row.unit_price = unit_price)
    }

    pub fn set_row_discount(&mut self, index: usize, discount: Discount) -> AppResult<DocumentTotals> {
        let discount = bounded_discount(discount)?;
        self.edit_row(index, |row| row.discount = discount)
    }

    pub fn set_footer_discount(&mut self, discount: Discount) -> AppResult<DocumentTotals> {
        self.ensure_editable()?;
        self.footer = bounded_discount(discount)?;
        Ok(self.recalculate())
    }

    /// Select (or clear, with `None`) the product on row `index`
    ///
    /// A product already used by another row is rejected and the row's
    /// product, unit, price and total are reset.
    pub fn select_product(
        &mut self,
        index: usize,
        product: Option<&Product>,
    ) -> AppResult<ProductSelection> {
        self.ensure_editable()?;
        self.row(index)?;

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

    /// [`select_product`](Self::select_product) by catalog id
    pub fn select_product_by_id(
        &mut self,
        index: usize,
        product_id: i64,
        catalog: &[Product],
    ) -> AppResult<ProductSelection> {
        let product = find_product(catalog, product_id)?;
        self.select_product(index, Some(product))
    }

    // ========== Derived state ==========

    /// Recompute every row total and the document totals
    pub fn recalculate(&mut self) -> DocumentTotals {
        self.footer.value = clean(self.footer.value);
        self.totals = recalculate_document(&mut self.rows, &self.footer);
        tracing::debug!(
            kind = self.kind.name(),
            rows = self.rows.len(),
            grand_total = self.totals.grand_total,
            "Document totals recalculated"
        );
        self.totals
    }

    /// Back to the create-screen defaults
    ///
    /// A return keeps its chosen date; an invoice starts over from today.
    pub fn reset(&mut self) {
        let date = match self.kind {
            DocumentKind::InvoiceReturn => std::mem::take(&mut self.header.date),
            DocumentKind::Invoice => DateInput::Empty,
        };
        *self = Self::new(self.kind);
        if date != DateInput::Empty {
            self.header.date = date;
        }
    }

    // ========== Submit ==========

    /// Build the submit body
    ///
    /// `post = true` submits the document as `Posted`. Invoices send every
    /// row; returns send only rows with a product and a positive quantity,
    /// and their totals cover exactly those rows.
    pub fn build_payload(&self, post: bool) -> AppResult<DocumentPayload> {
        self.ensure_editable()?;

        let status = if post {
            DocumentStatus::Posted
        } else {
            self.header.status
        };
        let date = match &self.header.date {
            DateInput::Empty => WireDate::today().to_string(),
            other => to_wire_date(other),
        };

        let payload = match self.kind {
            DocumentKind::Invoice => {
                if self.rows.is_empty() {
                    return Err(AppError::document_empty("At least one item is required."));
                }
                DocumentPayload::Invoice(InvoicePayload {
                    id: self.header.id,
                    invoice_number: self.header.invoice_number.clone(),
                    customer_id: self.header.customer_id,
                    invoice_date: date,
                    status,
                    description: self.header.description.clone(),
                    totals: self.totals,
                    items: self.rows.clone(),
                })
            }
            DocumentKind::InvoiceReturn => {
                let items: Vec<LineItem> = self
                    .rows
                    .iter()
                    .filter(|row| row.is_complete())
                    .cloned()
                    .collect();
                if items.is_empty() {
                    return Err(AppError::document_empty(
                        "At least one valid item with product and quantity is required.",
                    ));
                }
                DocumentPayload::Return(ReturnPayload {
                    id: self.header.id,
                    invoice_id: self.header.invoice_id,
                    customer_id: self.header.customer_id,
                    return_date: date,
                    status,
                    totals: document_totals(&items, &self.footer),
                    items,
                })
            }
        };

        tracing::info!(
            kind = self.kind.name(),
            id = ?self.header.id,
            status = ?payload.status(),
            items = payload.items().len(),
            grand_total = payload.totals().grand_total,
            "Document payload built"
        );
        Ok(payload)
    }

    /// Record a successful submit: the form now edits the saved document
    pub fn mark_submitted(&mut self, id: Option<i64>, posted: bool) {
        if id.is_some() {
            self.header.id = id;
        }
        self.edit_mode = self.header.id.is_some();
        if posted {
            self.header.status = DocumentStatus::Posted;
        }
    }

    // ========== Internals ==========

    fn ensure_editable(&self) -> AppResult<()> {
        if self.is_locked() {
            return Err(AppError::document_locked());
        }
        Ok(())
    }

    fn row(&self, index: usize) -> AppResult<&LineItem> {
        self.rows
            .get(index)
            .ok_or_else(|| AppError::row_not_found(index))
    }

    fn edit_row(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut LineItem),
    ) -> AppResult<DocumentTotals> {
        self.ensure_editable()?;
        let row = self
            .rows
            .get_mut(index)
            .ok_or_else(|| AppError::row_not_found(index))?;
        edit(row);
        Ok(self.recalculate())
    }
}
