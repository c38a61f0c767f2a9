//! Persistent key-value storage for the cart record.
//!
//! The cart store loads its record once when opened and writes the full
//! record after every mutation. Backends only move opaque bytes; encoding is
//! handled by [`crate::cart::record`].
//!
//! # Backends
//!
//! - [`MemoryStorage`] - shared in-process map, used in tests and embeddings
//! - [`FileStorage`] - one file per key under a directory

use std::sync::Arc;

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur while reading or writing a storage record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend cannot currently serve requests.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous key-value store holding serialized records.
pub trait KeyValueStorage {
    /// Load the record stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails to read.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails to write.
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}
