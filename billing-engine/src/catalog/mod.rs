//! Catalog lookups for the setup forms

pub mod availability;

pub use availability::{
    DUPLICATE_PRODUCT_WARNING, ProductSelection, ProductSlot, available_products, find_duplicate,
    is_product_available,
};

use shared::models::Product;
use shared::{AppError, AppResult};

/// Look up a catalog product by id
pub fn find_product(catalog: &[Product], product_id: i64) -> AppResult<&Product> {
    catalog
        .iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| AppError::product_not_found(product_id))
}
