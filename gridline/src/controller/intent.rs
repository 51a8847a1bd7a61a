//! User intents as data.

use serde::Deserialize;
use serde::Serialize;

use crate::model::{ColumnId, RowId};

/// A discrete user gesture, applied with
/// [`GridController::dispatch`](super::GridController::dispatch).
///
/// Intents deserialize from tagged JSON so a host bridge can forward
/// gestures verbatim:
///
/// ```
/// use gridline::Intent;
///
/// let intent: Intent =
///     serde_json::from_str(r#"{"type": "resize", "column_id": "name", "delta_px": -12}"#).unwrap();
/// assert_eq!(intent, Intent::Resize { column_id: "name".into(), delta_px: -12 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Header click.
    ToggleSort { column_id: ColumnId },
    /// Resize handle drag.
    Resize { column_id: ColumnId, delta_px: i32 },
    /// Column picker toggle.
    SetColumnVisibility { column_id: ColumnId, visible: bool },
    /// Double-click on a resize handle.
    ResetColumnWidth { column_id: ColumnId },
    /// Row checkbox.
    ToggleRowSelection { row_id: RowId },
    /// Header checkbox.
    ToggleAllSelection,
    /// "Clear selection" action.
    ClearSelection,
    /// Click on a row body.
    ClickRow { row_id: RowId },
    /// Panel close button.
    ExplicitClosePanel,
    /// Delete action on one or more rows.
    DeleteRows { row_ids: Vec<RowId> },
    /// Pager jump.
    SetPage { page_index: usize },
    /// Pager "next".
    NextPage,
    /// Pager "previous".
    PreviousPage,
    /// Page size picker.
    SetPageSize { page_size: usize },
    /// Search box.
    SetFilter { query: String },
}
