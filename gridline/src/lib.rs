//! Headless data-grid controller
//!
//! Owns the interaction state of a tabular view (sorting, column widths,
//! row selection, client-side pagination, a global text filter and a
//! master/detail side panel) and turns user intents into immutable
//! [`ViewState`](controller::ViewState) snapshots for a rendering layer.

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod layout;
pub mod model;
pub mod pagination;
pub mod panel;
pub mod persistence;
pub mod selection;
pub mod sort;

pub use config::GridConfig;
pub use controller::{GridController, GridEvent, GridId, Intent, ViewState};
pub use error::{ConfigError, GridError, LayoutStoreError};
pub use model::{Accessor, Column, ColumnId, Comparator, Row, RowId, Value};

pub mod prelude {
    pub use crate::config::GridConfig;
    pub use crate::controller::{GridController, GridEvent, Intent, ViewState};
    pub use crate::filter::FilterMode;
    pub use crate::model::{Column, Row, RowId, Value};
    pub use crate::pagination::PageInfo;
    pub use crate::panel::PanelState;
    pub use crate::selection::{SelectionAggregate, SelectionScope};
    pub use crate::sort::{SortDirection, SortState};
}
