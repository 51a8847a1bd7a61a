//! Events emitted by the grid controller.
//!
//! Every applied intent pushes zero or more events onto the controller's
//! queue; hosts drain it with
//! [`GridController::take_events`](super::GridController::take_events)
//! after each interaction. Ignored intents push nothing.

use serde::Serialize;

use crate::model::{ColumnId, RowId};
use crate::pagination::PaginationState;
use crate::panel::PanelTransition;
use crate::sort::SortState;

/// A state change applied by the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    /// The sort column or direction changed.
    SortChanged { sort: SortState },
    /// A column's width changed.
    ColumnResized { column_id: ColumnId, width: u32 },
    /// A column was shown or hidden.
    ColumnVisibilityChanged { column_id: ColumnId, visible: bool },
    /// Rows were added to or removed from the selection.
    SelectionChanged {
        added: Vec<RowId>,
        removed: Vec<RowId>,
    },
    /// The page index or page size changed.
    PageChanged { pagination: PaginationState },
    /// The global filter query changed.
    FilterChanged { query: String },
    /// Rows were removed from the collection.
    RowsDeleted { row_ids: Vec<RowId> },
    /// The whole row collection was replaced.
    RowsReplaced { count: usize },
    /// The detail panel changed state.
    PanelChanged { transition: PanelTransition },
}

impl GridEvent {
    pub(super) fn selection(added: Vec<RowId>, removed: Vec<RowId>) -> Option<Self> {
        if added.is_empty() && removed.is_empty() {
            None
        } else {
            Some(Self::SelectionChanged { added, removed })
        }
    }
}

impl From<PanelTransition> for GridEvent {
    fn from(transition: PanelTransition) -> Self {
        Self::PanelChanged { transition }
    }
}
