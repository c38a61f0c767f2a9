//! Pinaka Storefront library.
//!
//! Client-side cart state for the storefront: line items with merge-by-product
//! adds, derived totals, and a record persisted after every change.
//!
//! # Modules
//!
//! - [`cart`] - Cart store, line items, persisted record format, summaries
//! - [`storage`] - Key-value storage backends
//! - [`state`] - Shared cart context for injection into components
//! - [`config`] - Configuration from environment variables
//! - [`error`] - Cart error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;

pub use cart::{CartItem, CartStore, CartSummary, NewCartItem};
pub use config::{ConfigError, StorefrontConfig};
pub use error::CartError;
pub use state::CartContext;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
