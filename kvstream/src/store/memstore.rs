//! In-memory implementation of BackingStore

use super::{BackingStore, StoreError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// In-memory implementation of BackingStore
///
/// Simple hash map based storage, useful for testing and single-process use.
#[derive(Debug)]
pub struct MemStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemStore {
    /// Create a new empty MemStore
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// Put an object, replacing any previous one
    pub fn insert(&self, key: &str, content: impl Into<Vec<u8>>) {
        self.objects.lock().insert(key.to_string(), content.into());
    }

    /// Copy of the object at `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }

    /// Drop all objects
    pub fn clear(&self) {
        self.objects.lock().clear();
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BackingStore for MemStore {
    fn has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.objects.lock().contains_key(key))
    }

    fn read(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.objects
            .lock()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, content: &[u8], overwrite: bool) -> Result<usize, StoreError> {
        let mut objects = self.objects.lock();
        if !overwrite && objects.contains_key(key) {
            return Err(StoreError::AlreadyExists(key.to_string()));
        }
        objects.insert(key.to_string(), content.to_vec());
        Ok(content.len())
    }
}
