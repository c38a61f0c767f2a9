//! Catalog product record.
//!
//! This is the shape returned by the remote product listing service. The cart
//! never fetches products itself; callers fetch them and hand a snapshot to
//! the cart when the customer adds one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::status::ProductStatus;

/// A product as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price in the store currency.
    pub price: Decimal,
    pub category: String,
    /// Units available for purchase.
    pub stock_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.status.is_purchasable() && self.stock_quantity > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": "p-1",
        "name": "Teapot",
        "sku": "TP-001",
        "price": 1250000,
        "category": "kitchen",
        "stockQuantity": 4,
        "status": "active",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z"
    }"#;

    #[test]
    fn test_deserialize_api_product() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.id.as_str(), "p-1");
        assert_eq!(product.price, Decimal::from(1_250_000));
        assert_eq!(product.stock_quantity, 4);
        assert!(product.image.is_none());
        assert!(product.is_available());
    }

    #[test]
    fn test_out_of_stock_is_unavailable() {
        let mut product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        product.stock_quantity = 0;
        assert!(!product.is_available());
    }

    #[test]
    fn test_draft_is_unavailable() {
        let mut product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        product.status = ProductStatus::Draft;
        assert!(!product.is_available());
    }
}
