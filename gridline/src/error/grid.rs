//! Grid construction error types

use super::ConfigError;

/// Errors raised while building a [`GridController`](crate::GridController).
///
/// Intents applied to a running grid never fail; only the column/row
/// definitions and configuration handed over at mount time are validated.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Two columns share the same id.
    #[error("duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// Two rows share the same id.
    #[error("duplicate row id '{0}'")]
    DuplicateRow(String),

    /// A column's minimum width exceeds its maximum width.
    #[error("column '{column}' has min width {min} greater than max width {max}")]
    InvalidWidthBounds {
        /// Offending column id.
        column: String,
        /// Declared minimum width.
        min: u32,
        /// Declared maximum width.
        max: u32,
    },

    /// No tokio runtime is available to host the panel close timer.
    #[error("no tokio runtime available for the panel close timer")]
    NoRuntime,

    /// The grid configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl GridError {
    /// Creates a width bounds error.
    pub fn width_bounds(column: impl Into<String>, min: u32, max: u32) -> Self {
        Self::InvalidWidthBounds {
            column: column.into(),
            min,
            max,
        }
    }
}
