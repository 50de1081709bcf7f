use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{KeyValueStore, StorageError};

/// Process-local store; clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with raw blobs, bypassing any serialization.
    pub fn with_blob(self, key: &str, blob: &str) -> Self {
        self.blobs
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), blob.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }

    pub fn clear(&self) {
        self.blobs.lock().expect("storage mutex poisoned").clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.blobs.lock().expect("storage mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let mut guard = self.blobs.lock().expect("storage mutex poisoned");
        guard.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
