//! Panel state as seen by the rendering layer

use serde::Serialize;

use crate::model::RowId;

/// Detail panel state.
///
/// `Closing` is logically dismissed but still rendered so its exit
/// animation has content; it ends in `Closed` when the close delay elapses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "row_id", rename_all = "snake_case")]
pub enum PanelState {
    /// Not rendered.
    #[default]
    Closed,
    /// Showing the row's detail.
    Open(RowId),
    /// Animating out with the row's detail.
    Closing(RowId),
}

impl PanelState {
    /// Row whose detail is on screen, if any.
    pub fn row_id(&self) -> Option<&RowId> {
        match self {
            PanelState::Closed => None,
            PanelState::Open(id) | PanelState::Closing(id) => Some(id),
        }
    }

    /// Check if the panel is open.
    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Open(_))
    }

    /// Check if the panel is in its exit animation.
    pub fn is_closing(&self) -> bool {
        matches!(self, PanelState::Closing(_))
    }

    /// Check if the panel is fully closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, PanelState::Closed)
    }
}

/// One applied panel state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelTransition {
    /// State before the change.
    pub from: PanelState,
    /// State after the change.
    pub to: PanelState,
}
