//! Cart line items.

use pinaka_core::{LineItemId, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock level below which a line is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// One row of the cart: a quantity of a single product.
///
/// Name, SKU, price, stock and image are snapshotted when the product is first
/// added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sku: String,
    pub stock_quantity: u32,
}

impl CartItem {
    /// Materialize a new line from an add candidate.
    pub(crate) fn from_new(id: LineItemId, item: NewCartItem) -> Self {
        Self {
            id,
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            image: item.image,
            sku: item.sku,
            stock_quantity: item.stock_quantity,
        }
    }

    /// `price * quantity`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Whether one more unit fits within the snapshotted stock.
    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.stock_quantity
    }

    /// Whether one unit can be taken off without removing the line.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    /// Whether stock is positive but below [`LOW_STOCK_THRESHOLD`].
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock_quantity > 0 && self.stock_quantity < LOW_STOCK_THRESHOLD
    }
}

/// Sum of line totals, saturating at the `Decimal` bounds.
pub(crate) fn sum_line_totals(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .map(CartItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Everything needed to add a product to the cart; a [`CartItem`] without its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sku: String,
    pub stock_quantity: u32,
}

impl NewCartItem {
    /// Snapshot a catalog product as an add candidate.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            image: product.image.clone(),
            sku: product.sku.clone(),
            stock_quantity: product.stock_quantity,
        }
    }
}
