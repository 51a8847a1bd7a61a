//! Configuration error types

/// Errors that can occur while loading or validating a [`GridConfig`](crate::GridConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for the config schema.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Page size must be greater than zero.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// The default page size is not one of the offered options.
    #[error("page size {size} is not one of the page size options {options:?}")]
    PageSizeNotOffered {
        /// Configured default page size.
        size: usize,
        /// Configured page size options.
        options: Vec<usize>,
    },
}
