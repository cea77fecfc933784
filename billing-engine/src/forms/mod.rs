//! Form view-models
//!
//! Explicit, serializable state for the invoice, invoice-return and stock
//! setup screens. A host (UI, CLI, test) drives them through methods; all
//! derived values are recomputed inside.

pub mod document_form;
pub mod stock_form;
pub mod submit;

pub use document_form::{DocumentForm, DocumentHeader};
pub use stock_form::StockForm;
pub use submit::{SubmitGuard, SubmitTicket};

use shared::date::from_optional_wire_date;
use shared::models::{Discount, LineItem, StockItem};
use shared::{AppError, AppResult, DateInput};

use crate::money::{MAX_AMOUNT, clean};

/// A row that may already exist on the server
pub trait SavedRow {
    fn row_id(&self) -> Option<i64>;
}

impl SavedRow for LineItem {
    fn row_id(&self) -> Option<i64> {
        self.id
    }
}

impl SavedRow for StockItem {
    fn row_id(&self) -> Option<i64> {
        self.id
    }
}

/// A row taken out of a form, with the position it came from
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedRow<T> {
    pub index: usize,
    pub item: T,
}

impl<T: SavedRow> RemovedRow<T> {
    /// Server-side id to delete, if the row was saved
    pub fn row_id(&self) -> Option<i64> {
        self.item.row_id()
    }

    pub fn is_persisted(&self) -> bool {
        self.row_id().is_some()
    }
}

/// Validate a typed-in number: above [`MAX_AMOUNT`] is refused, anything
/// else is cleaned (non-finite or negative → 0)
pub(crate) fn bounded_input(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value > MAX_AMOUNT {
        tracing::warn!(field, value, "Form input out of range");
        return Err(AppError::value_out_of_range(field, value, MAX_AMOUNT));
    }
    Ok(clean(value))
}

pub(crate) fn bounded_discount(discount: Discount) -> AppResult<Discount> {
    Ok(Discount {
        value: bounded_input("discount_value", discount.value)?,
        ..discount
    })
}

/// Date field of a fetched record; missing or empty stays empty
pub(crate) fn date_from_record(input: Option<&str>) -> AppResult<DateInput> {
    Ok(from_optional_wire_date(input)?
        .map(DateInput::Picked)
        .unwrap_or_default())
}
