//! Grid configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::filter::FilterMode;
use crate::selection::SelectionScope;

/// Default delay of the detail panel's exit animation.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(300);

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for a grid instance.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gridline::GridConfig;
///
/// let config = GridConfig::default()
///     .with_page_size(20)
///     .with_close_delay(Duration::from_millis(150));
///
/// let parsed = GridConfig::from_json(r#"{"page_size": 50, "close_delay_ms": 0}"#).unwrap();
/// assert_eq!(parsed.page_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Time the panel stays in `Closing` before it is torn down.
    ///
    /// Default: 300ms. Zero closes synchronously.
    #[serde(rename = "close_delay_ms", with = "duration_ms")]
    pub close_delay: Duration,

    /// Initial rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page sizes listed by the page-size picker. Only the initial size is
    /// checked against it; any non-zero size can be set at runtime.
    ///
    /// Default: 10, 20, 50
    pub page_size_options: Vec<usize>,

    /// Rows the header checkbox acts on.
    ///
    /// Default: current page
    pub selection_scope: SelectionScope,

    /// Matching used by the global text filter.
    ///
    /// Default: fuzzy
    pub filter_mode: FilterMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            close_delay: DEFAULT_CLOSE_DELAY,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 50],
            selection_scope: SelectionScope::Page,
            filter_mode: FilterMode::Fuzzy,
        }
    }
}

impl GridConfig {
    /// Parses and validates a JSON config document.
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the page size settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size_options.contains(&0) {
            return Err(ConfigError::ZeroPageSize);
        }
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&self.page_size) {
            return Err(ConfigError::PageSizeNotOffered {
                size: self.page_size,
                options: self.page_size_options.clone(),
            });
        }
        Ok(())
    }

    /// Sets the panel close delay.
    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Sets the initial page size, adding it to the offered sizes if needed.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&page_size) {
            self.page_size_options.push(page_size);
            self.page_size_options.sort_unstable();
        }
        self
    }

    /// Sets the offered page sizes.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets the header checkbox scope.
    pub fn with_selection_scope(mut self, scope: SelectionScope) -> Self {
        self.selection_scope = scope;
        self
    }

    /// Sets the filter matching mode.
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
