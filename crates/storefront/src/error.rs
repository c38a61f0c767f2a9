//! Cart error types.
//!
//! Normal cart operations never fail: removing or updating a line that does
//! not exist is a no-op. The only failures are writing the record out, and in
//! both cases the in-memory cart has already been updated.

use thiserror::Error;

use crate::cart::record::RecordError;
use crate::storage::StorageError;

/// Error returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend failed to read or write the cart record.
    ///
    /// Changes made by the failing call are kept in memory but may not
    /// survive a reload.
    #[error("cart persistence failed: {0}")]
    Persistence(#[from] StorageError),

    /// The cart could not be serialized into a record.
    #[error("cart encoding failed: {0}")]
    Encode(#[from] RecordError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
