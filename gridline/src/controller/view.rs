//! Immutable view snapshot handed to the rendering layer.

use serde::Serialize;

use crate::model::{ColumnId, Row, RowId};
use crate::pagination::PageInfo;
use crate::panel::PanelState;
use crate::selection::SelectionAggregate;
use crate::sort::{SortDirection, SortState};

/// Everything a renderer needs for one frame of the grid.
///
/// Rebuilt from controller state on every read; holding on to an old
/// snapshot never observes later changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// Rows on the current page, filtered and sorted.
    pub visible_rows: Vec<VisibleRow>,
    /// Current sort.
    pub sort_state: SortState,
    /// Column layout in display order, hidden columns included.
    pub columns: Vec<ColumnView>,
    /// Sum of visible column widths.
    pub total_width: u64,
    /// Selection summary.
    pub selection: SelectionView,
    /// Pager summary.
    pub pagination: PageInfo,
    /// Detail panel.
    pub panel: PanelView,
    /// Global filter query.
    pub filter: String,
}

impl ViewState {
    /// Ids of the rows on the current page, in display order.
    pub fn visible_ids(&self) -> Vec<&str> {
        self.visible_rows.iter().map(|r| r.row.id().as_str()).collect()
    }

    /// Find a column by id.
    pub fn column(&self, id: &str) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.id.as_str() == id)
    }
}

/// A row on the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleRow {
    /// Row snapshot.
    pub row: Row,
    /// Whether the row checkbox is checked.
    pub selected: bool,
    /// Whether the detail panel is open on this row.
    pub focused: bool,
}

/// One column as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    /// Column id.
    pub id: ColumnId,
    /// Header text.
    pub header: String,
    /// Current width.
    pub width: u32,
    /// Whether the column is shown.
    pub visible: bool,
    /// Whether header clicks sort.
    pub sortable: bool,
    /// Whether the resize handle is active.
    pub resizable: bool,
    /// Whether the column picker may hide it.
    pub hideable: bool,
    /// Sort indicator for this column.
    pub sort: Option<SortDirection>,
}

/// Selection summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    /// All selected ids, ascending, across pages and filters.
    pub selected_ids: Vec<RowId>,
    /// Number of selected ids.
    pub count: usize,
    /// Header checkbox state over the configured scope.
    pub aggregate: SelectionAggregate,
}

/// Detail panel as rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    /// Panel state.
    pub state: PanelState,
    /// Row shown in the panel; present while open or closing.
    pub row: Option<Row>,
}
