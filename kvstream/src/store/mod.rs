//! Backing store layer
//!
//! A backing store keeps whole objects addressed by string keys. It has no
//! partial-write or append primitive: a stream session reads an object once
//! and writes it back as a whole.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  StreamBuffer (session layer)       │
//! │  - cursor, dirty flag               │
//! │  - in-memory content                │
//! └─────────────────────────────────────┘
//!          ▲
//!          │ has / read / write (whole objects)
//!          ▼
//! ┌─────────────────────────────────────┐
//! │  BackingStore (storage layer)       │
//! │  - names objects by key             │
//! │  - multiple backends                │
//! └─────────────────────────────────────┘
//!      ▲              ▲
//!      │              │
//!   MemStore     SqliteStore
//! ```

pub mod memstore;
#[cfg(feature = "sqlitestore")]
pub mod sqlitestore;

use std::sync::Arc;

use thiserror::Error;

pub use memstore::MemStore;
#[cfg(feature = "sqlitestore")]
pub use sqlitestore::SqliteStore;

/// Errors that can occur in backing store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key was not found in the store
    #[error("key not found: {0}")]
    NotFound(String),

    /// Key exists and the write did not allow overwriting
    #[error("key already exists: {0}")]
    AlreadyExists(String),

    /// The backend rejected the operation
    #[error("backend error for '{key}': {message}")]
    Backend { key: String, message: String },
}

impl StoreError {
    pub fn backend(key: &str, message: impl Into<String>) -> Self {
        Self::Backend {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Trait for key-addressed whole-object storage
///
/// Each object is an opaque byte sequence identified by a string key.
pub trait BackingStore {
    /// Check whether an object exists at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot answer.
    fn has(&self, key: &str) -> Result<bool, StoreError>;

    /// Read the whole object at `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no such object, or a backend error.
    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Store `content` as the whole object at `key`.
    ///
    /// - `overwrite == true`: replaces any existing object
    /// - `overwrite == false`: fails with `AlreadyExists` if the key exists
    ///
    /// Returns the number of bytes stored.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` or a backend error.
    fn write(&self, key: &str, content: &[u8], overwrite: bool) -> Result<usize, StoreError>;
}

impl<T: BackingStore + ?Sized> BackingStore for &T {
    fn has(&self, key: &str) -> Result<bool, StoreError> {
        (**self).has(key)
    }

    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, content: &[u8], overwrite: bool) -> Result<usize, StoreError> {
        (**self).write(key, content, overwrite)
    }
}

impl<T: BackingStore + ?Sized> BackingStore for Box<T> {
    fn has(&self, key: &str) -> Result<bool, StoreError> {
        (**self).has(key)
    }

    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, content: &[u8], overwrite: bool) -> Result<usize, StoreError> {
        (**self).write(key, content, overwrite)
    }
}

impl<T: BackingStore + ?Sized> BackingStore for Arc<T> {
    fn has(&self, key: &str) -> Result<bool, StoreError> {
        (**self).has(key)
    }

    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, content: &[u8], overwrite: bool) -> Result<usize, StoreError> {
        (**self).write(key, content, overwrite)
    }
}
