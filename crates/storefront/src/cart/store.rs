//! The cart store.

use pinaka_core::{CurrencyCode, LineItemId, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use super::item::{CartItem, NewCartItem, sum_line_totals};
use super::record::{self, DEFAULT_STORAGE_KEY};
use super::summary::CartSummary;
use crate::error::Result;
use crate::storage::KeyValueStorage;

/// Client-side cart: an ordered list of line items kept in sync with storage.
///
/// Every mutator applies its change in memory first and then writes the whole
/// record. When the write fails the change is kept and the error is returned,
/// so callers can warn that it may not survive a reload.
///
/// Invariants:
/// - at most one line per product; adding a product already in the cart
///   increases that line's quantity and keeps its original name, price, SKU,
///   stock and image
/// - every line has `quantity >= 1`
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    items: Vec<CartItem>,
    is_open: bool,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Open the cart stored under [`DEFAULT_STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Persistence` if the storage cannot be read.
    pub fn new(storage: S) -> Result<Self> {
        Self::open(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open the cart stored under `key`, starting empty if there is none.
    ///
    /// A record that cannot be decoded is logged and ignored; it is replaced
    /// by the next mutation.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Persistence` if the storage cannot be read.
    #[instrument(skip(storage, key), fields(key = tracing::field::Empty))]
    pub fn open(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        tracing::Span::current().record("key", key.as_str());

        let items = match storage.load(&key)? {
            None => {
                debug!("No persisted cart, starting empty");
                Vec::new()
            }
            Some(bytes) => match record::decode(&bytes) {
                Ok(items) => normalize(items),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable cart record");
                    Vec::new()
                }
            },
        };

        debug!(lines = items.len(), "Cart loaded");
        Ok(Self {
            storage,
            key,
            items,
            is_open: false,
        })
    }

    /// Storage key of the persisted record.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// If the product is already in the cart its quantity grows by
    /// `item.quantity` and nothing else about the line changes. Otherwise a
    /// new line with a fresh id is appended. A zero quantity is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the change is kept.
    #[instrument(skip(self, item), fields(product_id = %item.product_id, quantity = item.quantity))]
    pub fn add_item(&mut self, item: NewCartItem) -> Result<()> {
        if item.quantity == 0 {
            debug!("Ignoring add with zero quantity");
            return Ok(());
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            debug!(line_id = %existing.id, quantity = existing.quantity, "Merged into existing line");
        } else {
            let id = LineItemId::generate(&item.product_id);
            debug!(line_id = %id, "Added new line");
            self.items.push(CartItem::from_new(id, item));
        }

        self.persist()
    }

    /// Remove a line. Removing a line that is not in the cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the change is kept.
    #[instrument(skip(self, id), fields(line_id = %id))]
    pub fn remove_item(&mut self, id: &LineItemId) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|line| &line.id != id);
        debug!(removed = before != self.items.len(), "Remove line");
        self.persist()
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Positive quantities are
    /// stored as given, without checking them against the line's stock; values
    /// beyond `u32::MAX` saturate. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the change is kept.
    #[instrument(skip(self, id), fields(line_id = %id))]
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.items.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
            debug!(quantity, "Updated line quantity");
        } else {
            debug!("Line not in cart");
        }

        self.persist()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the cart is still
    /// emptied in memory.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<()> {
        self.items.clear();
        debug!("Cart cleared");
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let bytes = record::encode(&self.items)?;
        self.storage.save(&self.key, &bytes)?;
        Ok(())
    }

    // =========================================================================
    // Panel state (never persisted)
    // =========================================================================

    /// Whether the cart panel is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn open_cart(&mut self) {
        self.is_open = true;
    }

    pub const fn close_cart(&mut self) {
        self.is_open = false;
    }

    pub const fn toggle_cart(&mut self) {
        self.is_open = !self.is_open;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines, saturating at the
    /// `Decimal` bounds instead of overflowing.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        sum_line_totals(&self.items)
    }

    #[must_use]
    pub fn item_by_id(&self, id: &LineItemId) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn item_by_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.product_id == product_id)
    }

    /// Display-ready view of the cart with amounts formatted in `currency`.
    #[must_use]
    pub fn summary(&self, currency: CurrencyCode) -> CartSummary {
        CartSummary::new(&self.items, currency)
    }
}

/// Restore the cart invariants on a loaded record.
///
/// Lines for a product already seen are folded into the first one and lines
/// with zero quantity are dropped.
fn normalize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut lines: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            warn!(line_id = %item.id, "Dropping persisted line with zero quantity");
            continue;
        }
        match lines.iter_mut().find(|l| l.product_id == item.product_id) {
            Some(first) => {
                warn!(line_id = %item.id, into = %first.id, "Folding duplicate persisted line");
                first.quantity = first.quantity.saturating_add(item.quantity);
            }
            None => lines.push(item),
        }
    }
    lines
}
