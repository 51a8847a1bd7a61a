//! Layout storage backend trait.

use async_trait::async_trait;

use crate::error::LayoutStoreError;

/// Backend trait for layout storage.
///
/// Implementations handle raw byte storage/retrieval (local storage, a
/// settings database, a user profile service).
/// [`LayoutPersistence`](super::LayoutPersistence) wraps this with typed
/// serialization.
#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// Get raw bytes for a key.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, LayoutStoreError>;

    /// Set raw bytes for a key.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), LayoutStoreError>;

    /// Delete a key.
    async fn delete(&self, key: &str) -> Result<(), LayoutStoreError>;
}
