//! Integration tests for the Pinaka cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pinaka-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_behavior` - Merging, removal, quantities and totals
//! - `cart_persistence` - Reload, legacy records and storage failures
//! - `storefront_config` - Environment configuration and file-backed contexts
//!
//! This library holds the fixtures the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use pinaka_core::ProductId;
use pinaka_storefront::NewCartItem;
use rust_decimal::Decimal;

/// A product candidate with the given price and stock.
#[must_use]
pub fn product(id: &str, price: i64, stock: u32, quantity: u32) -> NewCartItem {
    NewCartItem {
        product_id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::from(price),
        quantity,
        image: Some(format!("https://cdn.example/{id}.jpg")),
        sku: format!("SKU-{}", id.to_uppercase()),
        stock_quantity: stock,
    }
}

/// The same candidate with different display metadata.
#[must_use]
pub fn relabeled(item: NewCartItem, name: &str, price: i64) -> NewCartItem {
    NewCartItem {
        name: name.to_string(),
        price: Decimal::from(price),
        image: None,
        ..item
    }
}
