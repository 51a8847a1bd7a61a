//! In-memory layout store using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::LayoutStore;
use crate::error::LayoutStoreError;

/// A layout store backed by a concurrent hash map.
///
/// Data is lost when the process exits; useful for tests and as a
/// session-scoped default.
#[derive(Debug, Default)]
pub struct InMemoryLayoutStore {
    store: DashMap<String, Vec<u8>>,
}

impl InMemoryLayoutStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored layouts.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl LayoutStore for InMemoryLayoutStore {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, LayoutStoreError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), LayoutStoreError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), LayoutStoreError> {
        self.store.remove(key);
        Ok(())
    }
}
