//! Row snapshots

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Opaque row identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&RowId> for RowId {
    fn from(id: &RowId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for RowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// An immutable row snapshot.
///
/// Rows are never edited through a shared reference: the owning collection
/// replaces a row wholesale (or drops it by id). The grid keeps clones of
/// rows it needs to render after they leave the collection, such as the
/// detail panel's content during its exit animation.
///
/// # Example
///
/// ```
/// use gridline::Row;
///
/// let row = Row::new("acc-1")
///     .set("name", "Contoso")
///     .set("revenue", 1_000_000i64);
///
/// assert_eq!(row.id().as_str(), "acc-1");
/// assert_eq!(row.get("name").and_then(|v| v.as_str()), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    fields: BTreeMap<String, Value>,
}

impl Row {
    /// Creates a row with no fields.
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field value, returning the updated row.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the row id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Returns a field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}
