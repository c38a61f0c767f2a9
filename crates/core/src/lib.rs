//! Pinaka Core - Shared types library.
//!
//! This crate provides common types used across all Pinaka components:
//! - `storefront` - Cart store, storage backends, and configuration
//! - `cli` - Command-line tools for inspecting and editing a persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, catalog products, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
