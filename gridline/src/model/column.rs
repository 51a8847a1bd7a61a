//! Column definitions

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::Row;
use super::Value;

/// Default lower width bound for a column.
pub const DEFAULT_MIN_WIDTH: u32 = 32;

/// Default upper width bound for a column.
pub const DEFAULT_MAX_WIDTH: u32 = 1200;

/// Column identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ColumnId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a column reads its cell value from a row.
#[derive(Clone)]
pub enum Accessor {
    /// Read a named field; a missing field reads as [`Value::Null`].
    Field(String),
    /// Derive the value from the whole row.
    Computed(Arc<dyn Fn(&Row) -> Value + Send + Sync>),
}

impl Accessor {
    /// Creates a computed accessor.
    pub fn computed(f: impl Fn(&Row) -> Value + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Reads the cell value for `row`.
    pub fn value(&self, row: &Row) -> Value {
        match self {
            Accessor::Field(name) => row.get(name).cloned().unwrap_or_default(),
            Accessor::Computed(f) => f(row),
        }
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A column's sort comparator.
///
/// Receives two non-null cell values and orders them ascending. Null
/// placement and direction are applied by the sort engine.
#[derive(Clone)]
pub struct Comparator(Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>);

impl Comparator {
    /// Wraps a comparison function.
    pub fn new(f: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Compares two values.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        (self.0)(a, b)
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(Value::compare)
    }
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Comparator(..)")
    }
}

/// Column configuration.
///
/// Columns define how the grid reads, sorts and sizes a field. Only the
/// current width and visibility change after mount; both are owned by
/// [`ColumnLayout`](crate::layout::ColumnLayout).
///
/// # Examples
///
/// ```
/// use gridline::Column;
///
/// let columns = vec![
///     Column::new("name", "Name", 200).sortable().resizable(),
///     Column::new("revenue", "Revenue", 120).sortable().width_bounds(80, 240),
///     Column::new("actions", "", 48).always_visible(),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Column id.
    pub id: ColumnId,
    /// Header text.
    pub header: String,
    /// How cell values are read.
    pub accessor: Accessor,
    /// Comparator; `None` uses [`Value::compare`].
    pub comparator: Option<Comparator>,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Whether the resize handle is active.
    pub resizable: bool,
    /// Whether visibility toggles apply. Row-action columns set this to false.
    pub hideable: bool,
    /// Whether the global text filter looks at this column.
    pub filterable: bool,
    /// Whether the column starts visible.
    pub visible: bool,
    /// Lower width bound.
    pub min_width: u32,
    /// Upper width bound.
    pub max_width: u32,
    /// Width the column is defined with.
    pub width: u32,
}

impl Column {
    /// Create a column reading the field named `id`.
    ///
    /// # Arguments
    /// * `id` - Column id, also the field name read from rows
    /// * `header` - Header text
    /// * `width` - Initial width in pixels
    pub fn new(id: impl Into<String>, header: impl Into<String>, width: u32) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Field(id.clone()),
            id: ColumnId(id),
            header: header.into(),
            comparator: None,
            sortable: false,
            resizable: false,
            hideable: true,
            filterable: true,
            visible: true,
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            width,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column resizable.
    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    /// Set the width bounds.
    pub fn width_bounds(mut self, min_width: u32, max_width: u32) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    /// Exempt the column from visibility toggles.
    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self.visible = true;
        self
    }

    /// Start the column hidden. Ignored for always-visible columns.
    pub fn hidden(mut self) -> Self {
        if self.hideable {
            self.visible = false;
        }
        self
    }

    /// Exclude the column from the global text filter.
    pub fn unfilterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Read cell values through a custom accessor.
    pub fn accessor(mut self, accessor: Accessor) -> Self {
        self.accessor = accessor;
        self
    }

    /// Sort with a custom comparator.
    pub fn comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Reads this column's cell value from a row.
    pub fn value(&self, row: &Row) -> Value {
        self.accessor.value(row)
    }

    /// Clamps a width into this column's bounds.
    pub fn clamp_width(&self, width: i64) -> u32 {
        let clamped = width.clamp(i64::from(self.min_width), i64::from(self.max_width));
        u32::try_from(clamped).unwrap_or(self.max_width)
    }
}
