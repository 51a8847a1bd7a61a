//! Multi-row selection

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::RowId;

/// Aggregate selection state relative to a universe of row ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionAggregate {
    /// No row of the universe is selected (or the universe is empty).
    None,
    /// Some, but not all, rows of the universe are selected.
    Some,
    /// Every row of a non-empty universe is selected.
    All,
}

/// Which rows the header checkbox operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionScope {
    /// Rows on the current page.
    #[default]
    Page,
    /// All rows passing the filter, across pages.
    Filtered,
}

/// Tracks selected rows by id.
///
/// Selection is not scoped to a page or filter: ids stay selected while
/// their rows are off screen. Only [`toggle_all`](Self::toggle_all) and
/// [`aggregate`](Self::aggregate) take a universe, supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RowSelectionSet {
    selected: HashSet<RowId>,
}

impl RowSelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of one id. Returns `true` if the id is now selected.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Header checkbox over `universe`.
    ///
    /// If every id of `universe` is selected, deselects them; otherwise
    /// selects them all. Ids outside the universe are untouched. An empty
    /// universe is a no-op. Returns (added IDs, removed IDs).
    pub fn toggle_all(&mut self, universe: &[RowId]) -> (Vec<RowId>, Vec<RowId>) {
        match self.aggregate(universe) {
            SelectionAggregate::All => {
                let removed = universe
                    .iter()
                    .filter(|id| self.selected.remove(*id))
                    .cloned()
                    .collect();
                (vec![], removed)
            }
            SelectionAggregate::None if universe.is_empty() => (vec![], vec![]),
            _ => {
                let added = universe
                    .iter()
                    .filter(|id| self.selected.insert((*id).clone()))
                    .cloned()
                    .collect();
                (added, vec![])
            }
        }
    }

    /// Aggregate state relative to `universe`.
    pub fn aggregate(&self, universe: &[RowId]) -> SelectionAggregate {
        let selected = universe.iter().filter(|id| self.selected.contains(*id)).count();
        if selected == 0 {
            SelectionAggregate::None
        } else if selected == universe.len() {
            SelectionAggregate::All
        } else {
            SelectionAggregate::Some
        }
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Drop ids for which `exists` returns false. Returns the dropped ids.
    pub fn retain_existing(&mut self, exists: impl Fn(&RowId) -> bool) -> Vec<RowId> {
        let mut removed: Vec<RowId> = self
            .selected
            .iter()
            .filter(|id| !exists(*id))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        removed.sort();
        removed
    }

    /// Clear all selection. Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        let mut removed: Vec<RowId> = self.selected.drain().collect();
        removed.sort();
        removed
    }

    /// Selected ids in ascending order.
    pub fn selected(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
