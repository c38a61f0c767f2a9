//! Client-side shopping cart.
//!
//! The cart is a list of line items with merge-by-product adds, persisted as a
//! single record after every change.
//!
//! - [`store`] - the cart store and its operations
//! - [`item`] - line items and add candidates
//! - [`record`] - persisted record format
//! - [`summary`] - formatted views for presentation

pub mod item;
pub mod record;
pub mod store;
pub mod summary;

pub use item::{CartItem, LOW_STOCK_THRESHOLD, NewCartItem};
pub use record::{DEFAULT_STORAGE_KEY, RECORD_VERSION, RecordError};
pub use store::CartStore;
pub use summary::{CartLineView, CartSummary};
