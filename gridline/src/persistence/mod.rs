//! Column layout persistence.
//!
//! The grid never persists on its own; hosts that want widths and hidden
//! columns remembered across sessions hand a [`LayoutPersistence`] to
//! [`GridController::save_layout`](crate::GridController::save_layout) and
//! [`GridController::load_layout`](crate::GridController::load_layout).

mod backend;
mod memory;

pub use backend::LayoutStore;
pub use memory::InMemoryLayoutStore;

use std::sync::Arc;

use crate::error::LayoutStoreError;
use crate::layout::LayoutSnapshot;

/// Typed layout storage.
///
/// Wraps a `LayoutStore` with bincode encoding of [`LayoutSnapshot`].
#[derive(Clone)]
pub struct LayoutPersistence {
    backend: Arc<dyn LayoutStore>,
}

impl LayoutPersistence {
    /// Create a persistence provider over the given backend.
    pub fn new(backend: impl LayoutStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Load the snapshot stored under `key`.
    pub async fn load(&self, key: &str) -> Result<Option<LayoutSnapshot>, LayoutStoreError> {
        match self.backend.get_bytes(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(LayoutStoreError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Store a snapshot under `key`.
    pub async fn save(&self, key: &str, snapshot: &LayoutSnapshot) -> Result<(), LayoutStoreError> {
        let bytes = bincode::serialize(snapshot).map_err(LayoutStoreError::Serialization)?;
        self.backend.set_bytes(key, bytes).await
    }

    /// Forget the snapshot stored under `key`.
    pub async fn delete(&self, key: &str) -> Result<(), LayoutStoreError> {
        self.backend.delete(key).await
    }
}

impl std::fmt::Debug for LayoutPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutPersistence").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load() {
        let store = LayoutPersistence::new(InMemoryLayoutStore::new());
        let mut snapshot = LayoutSnapshot::default();
        snapshot.widths.insert("name".into(), 240);
        snapshot.hidden.push("notes".into());

        store.save("grid.accounts", &snapshot).await.unwrap();
        assert_eq!(store.load("grid.accounts").await.unwrap(), Some(snapshot));
        assert_eq!(store.load("grid.contacts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = LayoutPersistence::new(InMemoryLayoutStore::new());
        store.save("k", &LayoutSnapshot::default()).await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.load("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_bytes() {
        let backend = InMemoryLayoutStore::new();
        backend.set_bytes("k", vec![0xff]).await.unwrap();
        let store = LayoutPersistence::new(backend);
        let err = store.load("k").await.unwrap_err();
        assert!(matches!(err, LayoutStoreError::Deserialization(_)));
    }
}
