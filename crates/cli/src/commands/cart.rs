//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! pinaka-cart show
//!
//! # Add two units of a product
//! pinaka-cart add --product-id p-1 --name Teapot --sku TP-001 --price 1250000 --stock 4 -q 2
//!
//! # Add a product from a catalog API response saved to disk
//! pinaka-cart add-product product.json -q 1
//!
//! # Change or remove a line
//! pinaka-cart update p-1-6f1c... 3
//! pinaka-cart remove p-1-6f1c...
//! ```
//!
//! Command output is written to the given writer; logs go to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use pinaka_core::{LineItemId, Price, Product, ProductId};
use pinaka_storefront::{CartContext, CartError, KeyValueStorage, NewCartItem};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart operation failed to persist.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The product file could not be read.
    #[error("Failed to read product file {}: {source}", path.display())]
    ProductFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The product file is not a catalog product.
    #[error("Invalid product JSON: {0}")]
    ProductJson(#[from] serde_json::Error),

    /// The product cannot be purchased.
    #[error("Product {0} is not available for purchase")]
    Unavailable(ProductId),

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Fields of a product added by hand.
#[derive(Debug, Clone)]
pub struct AddArgs {
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: u32,
    pub quantity: u32,
    pub image: Option<String>,
}

/// Print every line and the cart totals.
pub fn show<S: KeyValueStorage>(
    ctx: &CartContext<S>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let summary = ctx.summary();

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    if summary.items.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for line in &summary.items {
        let badge = if line.low_stock { " [low stock]" } else { "" };
        writeln!(
            out,
            "{}  {} ({})  {} x {} = {}{badge}",
            line.id, line.name, line.sku, line.quantity, line.price, line.line_price
        )?;
    }
    writeln!(out, "Items: {}", summary.item_count)?;
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    Ok(())
}

/// Print only the totals.
pub fn totals<S: KeyValueStorage>(
    ctx: &CartContext<S>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let total = Price::new(ctx.total_price(), ctx.config().currency);
    writeln!(out, "Items: {}", ctx.total_items())?;
    writeln!(out, "Subtotal: {total}")?;
    Ok(())
}

/// Add a product described on the command line.
pub fn add<S: KeyValueStorage>(
    ctx: &CartContext<S>,
    args: AddArgs,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let item = NewCartItem {
        product_id: ProductId::new(args.product_id),
        name: args.name,
        price: args.price,
        quantity: args.quantity,
        image: args.image,
        sku: args.sku,
        stock_quantity: args.stock,
    };
    add_candidate(ctx, item, out)
}

/// Add a product read from a catalog JSON file.
pub fn add_product<S: KeyValueStorage>(
    ctx: &CartContext<S>,
    path: &Path,
    quantity: u32,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let content = std::fs::read_to_string(path).map_err(|source| CommandError::ProductFile {
        path: path.to_path_buf(),
        source,
    })?;
    let product: Product = serde_json::from_str(&content)?;

    if !product.is_available() {
        return Err(CommandError::Unavailable(product.id));
    }

    add_candidate(ctx, NewCartItem::from_product(&product, quantity), out)
}

fn add_candidate<S: KeyValueStorage>(
    ctx: &CartContext<S>,
    item: NewCartItem,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let product_id = item.product_id.clone();
    ctx.add_item(item)?;

    if let Some(line) = ctx.item_by_product(&product_id) {
        if line.quantity > line.stock_quantity {
            warn!(
                line_id = %line.id,
                quantity = line.quantity,
                stock = line.stock_quantity,
                "Quantity exceeds available stock"
            );
        }
        info!(line_id = %line.id, quantity = line.quantity, "Product added to cart");
        writeln!(out, "{}", line.id)?;
    }
    Ok(())
}

/// Remove a line.
pub fn remove<S: KeyValueStorage>(ctx: &CartContext<S>, line_id: &str) -> Result<(), CommandError> {
    let id = LineItemId::new(line_id);
    if ctx.item_by_id(&id).is_none() {
        warn!(line_id, "Line not in cart");
    }
    ctx.remove_item(&id)?;
    info!(line_id, "Line removed");
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
pub fn update<S: KeyValueStorage>(
    ctx: &CartContext<S>,
    line_id: &str,
    quantity: i64,
) -> Result<(), CommandError> {
    let id = LineItemId::new(line_id);
    match ctx.item_by_id(&id) {
        None => warn!(line_id, "Line not in cart"),
        Some(line) if quantity > i64::from(line.stock_quantity) => warn!(
            line_id,
            quantity,
            stock = line.stock_quantity,
            "Quantity exceeds available stock"
        ),
        Some(_) => {}
    }
    ctx.update_quantity(&id, quantity)?;
    info!(line_id, quantity, "Line quantity updated");
    Ok(())
}

/// Empty the cart.
pub fn clear<S: KeyValueStorage>(ctx: &CartContext<S>) -> Result<(), CommandError> {
    ctx.clear_cart()?;
    info!("Cart cleared");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pinaka_storefront::{CartStore, MemoryStorage, StorefrontConfig};

    use super::*;

    fn context() -> CartContext<MemoryStorage> {
        let store = CartStore::new(MemoryStorage::new()).unwrap();
        CartContext::new(StorefrontConfig::default(), store)
    }

    fn teapot(quantity: u32) -> AddArgs {
        AddArgs {
            product_id: "p-1".to_string(),
            name: "Teapot".to_string(),
            sku: "TP-001".to_string(),
            price: Decimal::from(1_250_000),
            stock: 4,
            quantity,
            image: None,
        }
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<(), CommandError>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_show_empty() {
        let ctx = context();
        assert_eq!(output(|out| show(&ctx, false, out)), "Cart is empty\n");
    }

    #[test]
    fn test_add_prints_line_id_and_merges() {
        let ctx = context();
        let first = output(|out| add(&ctx, teapot(1), out));
        let second = output(|out| add(&ctx, teapot(2), out));
        assert_eq!(first, second);
        assert!(first.starts_with("p-1-"));
        assert_eq!(ctx.total_items(), 3);
    }

    #[test]
    fn test_show_lists_lines_and_totals() {
        let ctx = context();
        output(|out| add(&ctx, teapot(2), out));

        let text = output(|out| show(&ctx, false, out));
        assert!(text.contains("Teapot (TP-001)  2 x 1,250,000 IRR = 2,500,000 IRR [low stock]"));
        assert!(text.contains("Items: 2"));
        assert!(text.contains("Subtotal: 2,500,000 IRR"));
    }

    #[test]
    fn test_show_json() {
        let ctx = context();
        output(|out| add(&ctx, teapot(1), out));

        let text = output(|out| show(&ctx, true, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["item_count"], 1);
        assert_eq!(value["items"][0]["sku"], "TP-001");
    }

    #[test]
    fn test_update_and_remove() {
        let ctx = context();
        let id = output(|out| add(&ctx, teapot(1), out));
        let id = id.trim();

        update(&ctx, id, 3).unwrap();
        assert_eq!(ctx.total_items(), 3);

        update(&ctx, id, -1).unwrap();
        assert!(ctx.items().is_empty());

        remove(&ctx, "missing").unwrap();
        clear(&ctx).unwrap();
        assert_eq!(output(|out| totals(&ctx, out)), "Items: 0\nSubtotal: 0 IRR\n");
    }

    #[test]
    fn test_add_product_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.json");
        std::fs::write(
            &path,
            r#"{"id":"p-7","name":"Mug","sku":"MUG","price":150000,"category":"kitchen",
                "stockQuantity":12,"status":"active","createdAt":"","updatedAt":""}"#,
        )
        .unwrap();

        let ctx = context();
        output(|out| add_product(&ctx, &path, 2, out));
        let line = ctx.item_by_product(&ProductId::new("p-7")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Decimal::from(150_000));
    }

    #[test]
    fn test_add_product_rejects_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.json");
        std::fs::write(
            &path,
            r#"{"id":"p-8","name":"Bowl","sku":"BWL","price":1,"category":"kitchen",
                "stockQuantity":3,"status":"draft","createdAt":"","updatedAt":""}"#,
        )
        .unwrap();

        let ctx = context();
        let err = add_product(&ctx, &path, 1, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, CommandError::Unavailable(_)));
        assert!(ctx.items().is_empty());
    }

    #[test]
    fn test_add_product_missing_file() {
        let ctx = context();
        let err = add_product(&ctx, Path::new("/nonexistent/product.json"), 1, &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(err, CommandError::ProductFile { .. }));
    }
}
