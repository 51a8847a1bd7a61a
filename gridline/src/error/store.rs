//! Layout persistence error types

/// Errors that can occur while saving or loading a persisted column layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutStoreError {
    /// The storage backend failed.
    #[error("layout store backend error: {0}")]
    Backend(String),

    /// The layout could not be encoded.
    #[error("layout serialization error: {0}")]
    Serialization(bincode::Error),

    /// The stored bytes could not be decoded into a layout.
    #[error("layout deserialization error: {0}")]
    Deserialization(bincode::Error),
}

impl LayoutStoreError {
    /// Creates a backend error from any displayable cause.
    pub fn backend(message: impl std::fmt::Display) -> Self {
        Self::Backend(message.to_string())
    }
}
