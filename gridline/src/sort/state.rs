//! Sort state and header-click cycling

use log::{debug, trace};
use serde::Deserialize;
use serde::Serialize;

use crate::model::{Column, ColumnId};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Current sort: at most one column, or none.
///
/// `column_id` and `direction` are always both set or both unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    column_id: Option<ColumnId>,
    direction: Option<SortDirection>,
}

impl SortState {
    /// Unsorted state.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sorted by `column_id` in `direction`.
    pub fn by(column_id: impl Into<ColumnId>, direction: SortDirection) -> Self {
        Self {
            column_id: Some(column_id.into()),
            direction: Some(direction),
        }
    }

    /// Sorted column, if any.
    pub fn column_id(&self) -> Option<&ColumnId> {
        self.column_id.as_ref()
    }

    /// Sort direction, if sorted.
    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Returns `true` when no column is sorted.
    pub fn is_unsorted(&self) -> bool {
        self.column_id.is_none()
    }

    /// Direction applied to `column_id`, if it is the sorted column.
    pub fn direction_for(&self, column_id: &ColumnId) -> Option<SortDirection> {
        match &self.column_id {
            Some(id) if id == column_id => self.direction,
            _ => None,
        }
    }
}

/// Tracks the sort column and cycles it on header clicks.
///
/// Clicking the sorted column cycles `asc -> desc -> unsorted`; clicking
/// any other sortable column starts over at `asc` for that column.
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    state: SortState,
}

impl SortEngine {
    /// Creates an engine with no sort applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sort state.
    pub fn state(&self) -> &SortState {
        &self.state
    }

    /// Handle a header click on `column`.
    ///
    /// Returns the new state, or `None` if the column is not sortable.
    pub fn toggle_sort(&mut self, column: &Column) -> Option<SortState> {
        if !column.sortable {
            trace!("Ignoring sort toggle on non-sortable column '{}'", column.id);
            return None;
        }

        let next = match self.state.direction_for(&column.id) {
            None => SortState::by(column.id.clone(), SortDirection::Asc),
            Some(SortDirection::Asc) => SortState::by(column.id.clone(), SortDirection::Desc),
            Some(SortDirection::Desc) => SortState::none(),
        };

        debug!("Sort on '{}' -> {:?}", column.id, next.direction);
        self.state = next.clone();
        Some(next)
    }
}
