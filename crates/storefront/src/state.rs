//! Cart context shared across components.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pinaka_core::{LineItemId, ProductId};
use rust_decimal::Decimal;

use crate::cart::{CartItem, CartStore, CartSummary, NewCartItem};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::storage::{FileStorage, KeyValueStorage};

/// Handle to one cart store, owned by the application root and handed to
/// every component that reads or changes the cart.
///
/// This struct is cheaply cloneable via `Arc`; clones operate on the same
/// cart. Tests construct a fresh context per case instead of sharing global
/// state.
pub struct CartContext<S> {
    inner: Arc<CartContextInner<S>>,
}

struct CartContextInner<S> {
    config: StorefrontConfig,
    store: Mutex<CartStore<S>>,
}

impl<S> Clone for CartContext<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl CartContext<FileStorage> {
    /// Open the file-backed cart described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Persistence` if the cart record cannot be read.
    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let store = CartStore::open(config.storage(), config.cart_key.clone())?;
        Ok(Self::new(config, store))
    }
}

impl<S: KeyValueStorage> CartContext<S> {
    /// Wrap an already opened store.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: CartStore<S>) -> Self {
        Self {
            inner: Arc::new(CartContextInner {
                config,
                store: Mutex::new(store),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Lock the store for a sequence of operations.
    ///
    /// Every store operation finishes before the lock is released, so a lock
    /// poisoned by a panicking caller still guards a consistent cart and is
    /// recovered.
    pub fn lock(&self) -> MutexGuard<'_, CartStore<S>> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`CartStore::add_item`].
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the change is kept.
    pub fn add_item(&self, item: NewCartItem) -> Result<()> {
        self.lock().add_item(item)
    }

    /// See [`CartStore::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the change is kept.
    pub fn remove_item(&self, id: &LineItemId) -> Result<()> {
        self.lock().remove_item(id)
    }

    /// See [`CartStore::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the change is kept.
    pub fn update_quantity(&self, id: &LineItemId, quantity: i64) -> Result<()> {
        self.lock().update_quantity(id, quantity)
    }

    /// See [`CartStore::clear_cart`].
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be written; the cart is still
    /// emptied in memory.
    pub fn clear_cart(&self) -> Result<()> {
        self.lock().clear_cart()
    }

    pub fn open_cart(&self) {
        self.lock().open_cart();
    }

    pub fn close_cart(&self) {
        self.lock().close_cart();
    }

    pub fn toggle_cart(&self) {
        self.lock().toggle_cart();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().is_open()
    }

    /// Snapshot of the current line items.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().items().to_vec()
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lock().total_items()
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lock().total_price()
    }

    #[must_use]
    pub fn item_by_id(&self, id: &LineItemId) -> Option<CartItem> {
        self.lock().item_by_id(id).cloned()
    }

    #[must_use]
    pub fn item_by_product(&self, product_id: &ProductId) -> Option<CartItem> {
        self.lock().item_by_product(product_id).cloned()
    }

    /// Cart summary in the configured currency.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.lock().summary(self.inner.config.currency)
    }
}
