//! Key-value blob store seam for layout persistence

use std::collections::HashMap;

use crate::error::StoreError;

/// Default key the layout blob is stored under
pub const LAYOUT_KEY: &str = "rewardsLayout";

pub trait BlobStore {
    fn save(&mut self, key: &str, json: &str) -> Result<(), StoreError>;

    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.load(key)?.is_some())
    }
}

/// In-process store, lives as long as the value does
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn save(&mut self, key: &str, json: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        self.blobs.insert(key.to_string(), json.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.blobs.remove(key);
        Ok(())
    }
}

impl<S: BlobStore + ?Sized> BlobStore for Box<S> {
    fn save(&mut self, key: &str, json: &str) -> Result<(), StoreError> {
        (**self).save(key, json)
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
