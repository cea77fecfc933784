//! Stock Sheet Model

use serde::{Deserialize, Serialize};

use super::document::DocumentStatus;
use super::product::Product;
use crate::util::{lenient_f64, lenient_id, lenient_string};

/// One row of a stock entry sheet: `stock` units at `price` each
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StockItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stock: f64,
    #[serde(default, deserialize_with = "lenient_id")]
    pub unit_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
}

impl StockItem {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn clear_product(&mut self) {
        self.product_id = None;
        self.unit_id = None;
        self.unit_name = None;
        self.price = 0.0;
        self.total_amount = 0.0;
    }

    pub fn apply_product(&mut self, product: &Product) {
        self.product_id = Some(product.id);
        self.unit_id = product.unit_id;
        self.unit_name = product.unit_name.clone();
        self.price = product.sale_price;
    }
}

/// Derived stock sheet totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct StockTotals {
    pub total_stock: f64,
    pub total_price: f64,
}

/// Stock sheet as fetched from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StockRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub stock_date: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub details: Vec<StockItem>,
}

/// `POST/PUT /stocks` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPayload {
    pub id: Option<i64>,
    pub stock_date: String,
    pub status: DocumentStatus,
    #[serde(flatten)]
    pub totals: StockTotals,
    pub items: Vec<StockItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_item_decode() {
        let item: StockItem = serde_json::from_str(
            r#"{"id":"3","product_id":8,"stock":"12","price":"1.5","total_amount":null}"#,
        )
        .unwrap();
        assert_eq!(item.id, Some(3));
        assert_eq!(item.stock, 12.0);
        assert_eq!(item.price, 1.5);
        assert_eq!(item.total_amount, 0.0);
    }

    #[test]
    fn test_stock_payload_shape() {
        let payload = StockPayload {
            id: None,
            stock_date: "2024-03-07".into(),
            status: DocumentStatus::Posted,
            totals: StockTotals {
                total_stock: 12.0,
                total_price: 18.0,
            },
            items: vec![],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["total_stock"], 12.0);
        assert_eq!(json["status"], "Posted");
    }
}
