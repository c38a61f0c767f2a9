//! Display-ready cart views.

use pinaka_core::{CurrencyCode, LineItemId, Price};
use rust_decimal::Decimal;
use serde::Serialize;

use super::item::{CartItem, sum_line_totals};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: LineItemId,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
    pub low_stock: bool,
    pub can_increment: bool,
    pub can_decrement: bool,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal: String,
}

impl CartSummary {
    pub(crate) fn new(items: &[CartItem], currency: CurrencyCode) -> Self {
        let fmt_amount = |amount: Decimal| Price::new(amount, currency).display();

        Self {
            items: items
                .iter()
                .map(|line| CartLineView {
                    id: line.id.clone(),
                    name: line.name.clone(),
                    sku: line.sku.clone(),
                    quantity: line.quantity,
                    price: fmt_amount(line.price),
                    line_price: fmt_amount(line.line_total()),
                    image: line.image.clone(),
                    low_stock: line.is_low_stock(),
                    can_increment: line.can_increment(),
                    can_decrement: line.can_decrement(),
                })
                .collect(),
            item_count: items.iter().map(|line| u64::from(line.quantity)).sum(),
            subtotal: fmt_amount(sum_line_totals(items)),
        }
    }

    /// Create an empty cart summary.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self::new(&[], currency)
    }
}
