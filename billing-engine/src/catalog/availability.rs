//! Product availability per row and the duplicate-product guard
//!
//! A product may appear on at most one row of a document. Each row's
//! picker only offers products that no *other* row has selected, but it
//! always keeps the row's own product so the current selection still
//! renders.

use std::collections::HashSet;

use shared::models::{LineItem, Product, StockItem};
use shared::{AppError, ErrorCode};

/// A row that references at most one catalog product
pub trait ProductSlot {
    fn product_id(&self) -> Option<i64>;
}

impl ProductSlot for LineItem {
    fn product_id(&self) -> Option<i64> {
        self.product_id
    }
}

impl ProductSlot for StockItem {
    fn product_id(&self) -> Option<i64> {
        self.product_id
    }
}

/// Product ids selected by rows other than `row_index`
fn selected_elsewhere<R: ProductSlot>(rows: &[R], row_index: usize) -> HashSet<i64> {
    rows.iter()
        .enumerate()
        .filter(|(j, _)| *j != row_index)
        .filter_map(|(_, row)| row.product_id())
        .collect()
}

/// Products selectable on row `row_index`, in catalog order
///
/// An out-of-range `row_index` is treated as a new, unset row.
pub fn available_products<'a, R: ProductSlot>(
    catalog: &'a [Product],
    rows: &[R],
    row_index: usize,
) -> Vec<&'a Product> {
    if catalog.is_empty() {
        return Vec::new();
    }

    let taken = selected_elsewhere(rows, row_index);
    let own = rows.get(row_index).and_then(ProductSlot::product_id);

    catalog
        .iter()
        .filter(|p| Some(p.id) == own || !taken.contains(&p.id))
        .collect()
}

/// Whether `product_id` may be selected on row `row_index`
pub fn is_product_available<R: ProductSlot>(rows: &[R], row_index: usize, product_id: i64) -> bool {
    find_duplicate(rows, row_index, product_id).is_none()
}

/// Index of another row already holding `product_id`
pub fn find_duplicate<R: ProductSlot>(rows: &[R], row_index: usize, product_id: i64) -> Option<usize> {
    rows.iter()
        .enumerate()
        .find(|(j, row)| *j != row_index && row.product_id() == Some(product_id))
        .map(|(j, _)| j)
}

/// Outcome of a product selection on a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSelection {
    /// Product, unit and default price were copied onto the row
    Applied,
    /// The row's product was cleared
    Cleared,
    /// Another row already holds the product; this row was reset
    RejectedDuplicate {
        conflicting_row: usize,
        warning: String,
    },
}

impl ProductSelection {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// User-facing warning, if the selection was rejected
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::RejectedDuplicate { warning, .. } => Some(warning),
            _ => None,
        }
    }

    /// `DuplicateProduct` error for hosts that surface rejections as errors
    pub fn to_error(&self) -> Option<AppError> {
        match self {
            Self::RejectedDuplicate {
                conflicting_row,
                warning,
            } => Some(
                AppError::with_message(ErrorCode::DuplicateProduct, warning.clone())
                    .with_detail("conflicting_row", *conflicting_row),
            ),
            _ => None,
        }
    }
}

/// Warning shown when a duplicate selection is rejected
pub const DUPLICATE_PRODUCT_WARNING: &str = "You cannot choose the duplicate product!";

/// Check a selection against the other rows, logging a rejection
pub(crate) fn check_selection<R: ProductSlot>(
    rows: &[R],
    row_index: usize,
    product_id: i64,
) -> Option<ProductSelection> {
    let conflicting_row = find_duplicate(rows, row_index, product_id)?;
    tracing::warn!(
        row = row_index,
        conflicting_row,
        product_id,
        "Duplicate product selection rejected"
    );
    Some(ProductSelection::RejectedDuplicate {
        conflicting_row,
        warning: DUPLICATE_PRODUCT_WARNING.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            sku: None,
            sale_price: 10.0,
            unit_id: None,
            unit_name: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![product(1, "Apple"), product(2, "Banana"), product(3, "Cherry")]
    }

    fn rows(ids: &[Option<i64>]) -> Vec<LineItem> {
        ids.iter()
            .map(|id| LineItem {
                product_id: *id,
                ..LineItem::empty()
            })
            .collect()
    }

    fn ids(products: Vec<&Product>) -> Vec<i64> {
        products.into_iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_unset_row_excludes_other_selections() {
        let rows = rows(&[Some(1), None]);
        assert_eq!(ids(available_products(&catalog(), &rows, 1)), vec![2, 3]);
    }

    #[test]
    fn test_set_row_keeps_own_product() {
        let rows = rows(&[Some(1), Some(2)]);
        assert_eq!(ids(available_products(&catalog(), &rows, 0)), vec![1, 3]);
        assert_eq!(ids(available_products(&catalog(), &rows, 1)), vec![2, 3]);
    }

    #[test]
    fn test_empty_catalog() {
        let rows = rows(&[None]);
        assert!(available_products(&[], &rows, 0).is_empty());
    }

    #[test]
    fn test_out_of_range_row_is_unset() {
        let rows = rows(&[Some(3)]);
        assert_eq!(ids(available_products(&catalog(), &rows, 5)), vec![1, 2]);
    }

    #[test]
    fn test_stock_rows_share_the_filter() {
        let rows = vec![
            StockItem {
                product_id: Some(2),
                ..StockItem::empty()
            },
            StockItem::empty(),
        ];
        assert_eq!(ids(available_products(&catalog(), &rows, 1)), vec![1, 3]);
    }

    #[test]
    fn test_find_duplicate() {
        let rows = rows(&[Some(1), None, Some(3)]);
        assert_eq!(find_duplicate(&rows, 1, 3), Some(2));
        assert_eq!(find_duplicate(&rows, 2, 3), None);
        assert!(is_product_available(&rows, 1, 2));
        assert!(!is_product_available(&rows, 1, 1));
    }

    #[test]
    fn test_check_selection_warning() {
        let rows = rows(&[Some(1), None]);
        let outcome = check_selection(&rows, 1, 1).unwrap();
        assert_eq!(
            outcome,
            ProductSelection::RejectedDuplicate {
                conflicting_row: 0,
                warning: DUPLICATE_PRODUCT_WARNING.to_string(),
            }
        );
        assert!(check_selection(&rows, 1, 2).is_none());

        let err = outcome.to_error().unwrap();
        assert_eq!(err.code, ErrorCode::DuplicateProduct);
        assert_eq!(err.message, DUPLICATE_PRODUCT_WARNING);
        assert!(ProductSelection::Applied.to_error().is_none());
    }
}
