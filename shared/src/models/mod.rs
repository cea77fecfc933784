//! Data models
//!
//! Wire types exchanged with the backend and the form view-models.
//! All IDs are `i64`; monetary values are `f64` on the wire and are only
//! computed with `rust_decimal` inside the engine.

pub mod discount;
pub mod document;
pub mod ledger;
pub mod line_item;
pub mod product;
pub mod stock;

// Re-exports
pub use discount::*;
pub use document::*;
pub use ledger::*;
pub use line_item::*;
pub use product::*;
pub use stock::*;
