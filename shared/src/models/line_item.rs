//! Line Item Model

use serde::{Deserialize, Serialize};

use super::discount::Discount;
use super::product::Product;
use crate::util::{lenient_f64, lenient_id, lenient_opt_f64, lenient_string};

/// One row of an invoice or invoice return
///
/// The serialized form is exactly the `items[]` entry the backend expects:
/// `id, product_id, quantity, unit_id, unit_name, price, discount_type,
/// discount_value, total_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LineItem {
    /// Server-side row id (None for rows not yet persisted)
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient_id")]
    pub unit_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_name: Option<String>,
    #[serde(rename = "price", default, deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    #[serde(flatten)]
    pub discount: Discount,
    /// Derived: see the row calculator
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
}

impl LineItem {
    /// Blank row (create screen default, TAB-appended row)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Forget the selected product and everything derived from it
    pub fn clear_product(&mut self) {
        self.product_id = None;
        self.unit_id = None;
        self.unit_name = None;
        self.unit_price = 0.0;
        self.total_amount = 0.0;
    }

    /// Take product id, unit and default price from a catalog product
    pub fn apply_product(&mut self, product: &Product) {
        self.product_id = Some(product.id);
        self.unit_id = product.unit_id;
        self.unit_name = product.unit_name.clone();
        self.unit_price = product.sale_price;
    }

    /// Row has a product and a positive quantity
    pub fn is_complete(&self) -> bool {
        self.product_id.is_some() && self.quantity > 0.0
    }
}

/// A `details[]` entry of a fetched invoice or return
///
/// Invoices carry `price` + `total_amount`, returns carry `sale_price` +
/// `total`; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecordLine {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient_id")]
    pub unit_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub sale_price: Option<f64>,
    #[serde(flatten)]
    pub discount: Discount,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub total: Option<f64>,
}

impl RecordLine {
    /// Convert into an editable row, falling back to the catalog for a
    /// missing unit or price
    pub fn into_line_item(self, catalog: &[Product]) -> LineItem {
        let product = self
            .product_id
            .and_then(|id| catalog.iter().find(|p| p.id == id));

        let unit_price = self
            .price
            .filter(|p| *p != 0.0)
            .or(self.sale_price.filter(|p| *p != 0.0))
            .or(product.map(|p| p.sale_price))
            .unwrap_or_default();

        LineItem {
            id: self.id,
            product_id: self.product_id,
            quantity: self.quantity,
            unit_id: self.unit_id.or(product.and_then(|p| p.unit_id)),
            unit_name: self
                .unit_name
                .or_else(|| product.and_then(|p| p.unit_name.clone())),
            unit_price,
            discount: self.discount,
            total_amount: self.total_amount.or(self.total).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountType;

    fn catalog() -> Vec<Product> {
        vec![Product {
            id: 7,
            name: "Widget".into(),
            sku: Some("W-7".into()),
            sale_price: 25.0,
            unit_id: Some(1),
            unit_name: Some("pcs".into()),
        }]
    }

    #[test]
    fn test_line_item_wire_shape() {
        let item = LineItem {
            id: None,
            product_id: Some(7),
            quantity: 2.0,
            unit_id: Some(1),
            unit_name: Some("pcs".into()),
            unit_price: 100.0,
            discount: Discount::fixed(10.0),
            total_amount: 190.0,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["price"], 100.0);
        assert_eq!(json["discount_type"], "Fixed");
        assert_eq!(json["discount_value"], 10.0);
        assert_eq!(json["total_amount"], 190.0);
        assert!(json["id"].is_null());
    }

    #[test]
    fn test_clear_and_apply_product() {
        let mut item = LineItem::empty();
        item.apply_product(&catalog()[0]);
        assert_eq!(item.product_id, Some(7));
        assert_eq!(item.unit_price, 25.0);
        assert_eq!(item.unit_name.as_deref(), Some("pcs"));

        item.total_amount = 25.0;
        item.clear_product();
        assert_eq!(item.product_id, None);
        assert_eq!(item.unit_id, None);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.total_amount, 0.0);
    }

    #[test]
    fn test_record_line_invoice_shape() {
        let line: RecordLine = serde_json::from_str(
            r#"{"id":11,"product_id":7,"quantity":"3","price":"20.00","discount_type":"Percentage","discount_value":"10","total_amount":"54.00"}"#,
        )
        .unwrap();
        let item = line.into_line_item(&catalog());
        assert_eq!(item.id, Some(11));
        assert_eq!(item.quantity, 3.0);
        assert_eq!(item.unit_price, 20.0);
        assert_eq!(item.discount.kind, DiscountType::Percentage);
        assert_eq!(item.total_amount, 54.0);
        // unit falls back to the catalog
        assert_eq!(item.unit_id, Some(1));
    }

    #[test]
    fn test_record_line_return_shape() {
        let line: RecordLine = serde_json::from_str(
            r#"{"id":5,"product_id":7,"quantity":1,"sale_price":"30","discount_type":"","discount_value":null,"total":"30"}"#,
        )
        .unwrap();
        let item = line.into_line_item(&[]);
        assert_eq!(item.unit_price, 30.0);
        assert_eq!(item.discount, Discount::NONE);
        assert_eq!(item.total_amount, 30.0);
    }

    #[test]
    fn test_record_line_price_from_catalog() {
        let line = RecordLine {
            product_id: Some(7),
            quantity: 1.0,
            ..Default::default()
        };
        assert_eq!(line.into_line_item(&catalog()).unit_price, 25.0);
    }
}
