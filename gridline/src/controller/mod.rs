//! Grid controller: the composition root.
//!
//! Owns the row collection and every piece of interaction state, applies
//! intents in arrival order and assembles [`ViewState`] snapshots. Data
//! flows one way: rows → filter → sort → page window, with selection and
//! the detail panel annotating the result.

mod events;
mod intent;
mod view;

pub use events::GridEvent;
pub use intent::Intent;
pub use view::{ColumnView, PanelView, SelectionView, ViewState, VisibleRow};

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace, warn};
use tokio::runtime::Handle;

use crate::config::GridConfig;
use crate::error::{GridError, LayoutStoreError};
use crate::filter::RowFilter;
use crate::layout::ColumnLayout;
use crate::model::{Column, Row, RowId};
use crate::pagination::{PageInfo, PaginationController, PaginationState};
use crate::panel::{DetailPanelController, PanelState, PanelTransition};
use crate::persistence::LayoutPersistence;
use crate::selection::{RowSelectionSet, SelectionScope};
use crate::sort::{SortEngine, SortState, apply_sort};

/// Unique identifier for a grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for GridId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

/// Interaction state for one mounted grid.
///
/// Intents are applied synchronously; the only deferred work is the
/// detail panel's close timer, which the host drives with
/// [`next_timer`](Self::next_timer) or [`poll_timers`](Self::poll_timers).
/// Invalid intents (unknown ids, disabled affordances) are ignored.
///
/// # Example
///
/// ```
/// use gridline::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), gridline::GridError> {
/// let columns = vec![Column::new("name", "Name", 200).sortable()];
/// let rows = vec![Row::new("a").set("name", "Ada"), Row::new("b").set("name", "Bob")];
/// let mut grid = GridController::new(columns, rows, GridConfig::default())?;
///
/// let view = grid.dispatch(Intent::ClickRow { row_id: "a".into() });
/// assert_eq!(view.panel.state, PanelState::Open("a".into()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GridController {
    id: GridId,
    config: GridConfig,
    rows: Vec<Row>,
    layout: ColumnLayout,
    sort: SortEngine,
    filter: RowFilter,
    selection: RowSelectionSet,
    pagination: PaginationController,
    panel: DetailPanelController,
    events: Vec<GridEvent>,
}

impl GridController {
    /// Mount a grid on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, duplicate column or row ids, inverted
    /// width bounds, or when called outside a tokio runtime.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>, config: GridConfig) -> Result<Self, GridError> {
        let handle = Handle::try_current().map_err(|_| GridError::NoRuntime)?;
        Self::with_handle(columns, rows, config, handle)
    }

    /// Mount a grid whose close timers run on `handle`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new), minus the runtime check.
    pub fn with_handle(
        columns: Vec<Column>,
        rows: Vec<Row>,
        config: GridConfig,
        handle: Handle,
    ) -> Result<Self, GridError> {
        config.validate()?;
        validate_columns(&columns)?;
        validate_rows(&rows)?;

        let id = GridId::new();
        debug!(
            "Mounting {id}: {} columns, {} rows, page size {}",
            columns.len(),
            rows.len(),
            config.page_size
        );

        Ok(Self {
            id,
            layout: ColumnLayout::new(columns),
            rows,
            sort: SortEngine::new(),
            filter: RowFilter::new(config.filter_mode),
            selection: RowSelectionSet::new(),
            pagination: PaginationController::new(config.page_size),
            panel: DetailPanelController::new(config.close_delay, handle),
            events: Vec::new(),
            config,
        })
    }

    /// Get the unique ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    /// Active configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The owned row collection, in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column layout.
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Current sort.
    pub fn sort_state(&self) -> &SortState {
        self.sort.state()
    }

    /// Current page position.
    pub fn pagination(&self) -> PaginationState {
        self.pagination.state()
    }

    /// Current panel state.
    pub fn panel_state(&self) -> PanelState {
        self.panel.state()
    }

    /// Selection set.
    pub fn selection(&self) -> &RowSelectionSet {
        &self.selection
    }

    /// Drain events pushed since the last call.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Apply one intent and return the resulting view.
    pub fn dispatch(&mut self, intent: Intent) -> ViewState {
        trace!("{} dispatch {intent:?}", self.id);
        match intent {
            Intent::ToggleSort { column_id } => {
                self.toggle_sort(column_id.as_str());
            }
            Intent::Resize {
                column_id,
                delta_px,
            } => {
                self.resize(column_id.as_str(), delta_px);
            }
            Intent::SetColumnVisibility { column_id, visible } => {
                self.set_column_visibility(column_id.as_str(), visible);
            }
            Intent::ResetColumnWidth { column_id } => {
                self.reset_column_width(column_id.as_str());
            }
            Intent::ToggleRowSelection { row_id } => {
                self.toggle_row_selection(&row_id);
            }
            Intent::ToggleAllSelection => {
                self.toggle_all_selection();
            }
            Intent::ClearSelection => {
                self.clear_selection();
            }
            Intent::ClickRow { row_id } => {
                self.click_row(&row_id);
            }
            Intent::ExplicitClosePanel => {
                self.close_panel();
            }
            Intent::DeleteRows { row_ids } => {
                self.delete_rows(&row_ids);
            }
            Intent::SetPage { page_index } => {
                self.set_page(page_index);
            }
            Intent::NextPage => {
                self.next_page();
            }
            Intent::PreviousPage => {
                self.previous_page();
            }
            Intent::SetPageSize { page_size } => {
                self.set_page_size(page_size);
            }
            Intent::SetFilter { query } => {
                self.set_filter(query);
            }
        }
        self.view()
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Header click: cycle the sort on `column_id`.
    ///
    /// A sort change returns to the first page.
    pub fn toggle_sort(&mut self, column_id: &str) -> bool {
        let Some(column) = self.layout.column(column_id) else {
            trace!("{} ignoring sort on unknown column '{column_id}'", self.id);
            return false;
        };
        let Some(sort) = self.sort.toggle_sort(column) else {
            return false;
        };
        self.events.push(GridEvent::SortChanged { sort });
        self.reset_page();
        true
    }

    /// Resize handle drag.
    pub fn resize(&mut self, column_id: &str, delta_px: i32) -> bool {
        let before = self.layout.width(column_id);
        match self.layout.resize(column_id, delta_px) {
            Some(width) if Some(width) != before => {
                self.events.push(GridEvent::ColumnResized {
                    column_id: column_id.into(),
                    width,
                });
                true
            }
            _ => false,
        }
    }

    /// Restore a column's defined width.
    pub fn reset_column_width(&mut self, column_id: &str) -> bool {
        let before = self.layout.width(column_id);
        match self.layout.reset_width(column_id) {
            Some(width) if Some(width) != before => {
                self.events.push(GridEvent::ColumnResized {
                    column_id: column_id.into(),
                    width,
                });
                true
            }
            _ => false,
        }
    }

    /// Show or hide a column.
    ///
    /// Hidden columns drop out of the filter text, so the page is
    /// re-validated when a filter is active.
    pub fn set_column_visibility(&mut self, column_id: &str, visible: bool) -> bool {
        if !self.layout.set_visibility(column_id, visible) {
            return false;
        }
        self.events.push(GridEvent::ColumnVisibilityChanged {
            column_id: column_id.into(),
            visible,
        });
        self.clamp_page();
        true
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Row checkbox.
    pub fn toggle_row_selection(&mut self, row_id: &RowId) -> bool {
        if !self.contains_row(row_id) {
            trace!("{} ignoring selection of unknown row '{row_id}'", self.id);
            return false;
        }
        let event = if self.selection.toggle(row_id) {
            GridEvent::selection(vec![row_id.clone()], vec![])
        } else {
            GridEvent::selection(vec![], vec![row_id.clone()])
        };
        self.events.extend(event);
        true
    }

    /// Header checkbox over the configured scope.
    pub fn toggle_all_selection(&mut self) -> bool {
        let universe = self.selection_universe();
        if universe.is_empty() {
            trace!("{} ignoring toggle-all over an empty universe", self.id);
            return false;
        }
        let (added, removed) = self.selection.toggle_all(&universe);
        match GridEvent::selection(added, removed) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> bool {
        let removed = self.selection.clear();
        match GridEvent::selection(vec![], removed) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Ids the header checkbox acts on.
    pub fn selection_universe(&self) -> Vec<RowId> {
        let processed = self.processed_rows();
        let rows = match self.config.selection_scope {
            SelectionScope::Page => self.pagination.slice(&processed),
            SelectionScope::Filtered => &processed[..],
        };
        rows.iter().map(|row| row.id().clone()).collect()
    }

    // -------------------------------------------------------------------------
    // Detail panel
    // -------------------------------------------------------------------------

    /// Row body click.
    pub fn click_row(&mut self, row_id: &RowId) -> bool {
        let Some(row) = self.rows.iter().find(|row| row.id() == row_id) else {
            trace!("{} ignoring click on unknown row '{row_id}'", self.id);
            return false;
        };
        let transitions = self.panel.click_row(row);
        self.push_panel(transitions)
    }

    /// Panel close button.
    pub fn close_panel(&mut self) -> bool {
        let transitions = self.panel.close();
        self.push_panel(transitions)
    }

    /// Wait for the panel's close timer and apply it.
    ///
    /// Returns the view after `Closing -> Closed`. Stale timers are skipped;
    /// while nothing is closing this waits indefinitely, so hosts should
    /// select on it alongside their input stream.
    pub async fn next_timer(&mut self) -> Option<ViewState> {
        let transition = self.panel.next_elapsed().await?;
        self.events.push(transition.into());
        Some(self.view())
    }

    /// Apply close timers that already fired. Returns `true` if the panel
    /// changed.
    pub fn poll_timers(&mut self) -> bool {
        let transitions = self.panel.poll_elapsed();
        self.push_panel(transitions)
    }

    fn push_panel(&mut self, transitions: Vec<PanelTransition>) -> bool {
        let changed = !transitions.is_empty();
        self.events.extend(transitions.into_iter().map(GridEvent::from));
        changed
    }

    // -------------------------------------------------------------------------
    // Row collection
    // -------------------------------------------------------------------------

    /// Delete rows by id.
    ///
    /// Unknown ids are skipped. The selection, page index and panel are
    /// corrected in the same call, so no view observes a deleted row.
    pub fn delete_rows(&mut self, row_ids: &[RowId]) -> bool {
        let targets: HashSet<&RowId> = row_ids.iter().collect();
        let mut deleted = Vec::new();
        self.rows.retain(|row| {
            if targets.contains(row.id()) {
                deleted.push(row.id().clone());
                false
            } else {
                true
            }
        });

        if deleted.is_empty() {
            trace!("{} delete matched no rows", self.id);
            return false;
        }

        debug!("{} deleted {} rows", self.id, deleted.len());
        self.events.push(GridEvent::RowsDeleted { row_ids: deleted });
        self.revalidate();
        true
    }

    /// Replace the whole row collection.
    ///
    /// Runs the same corrections as [`delete_rows`](Self::delete_rows). An
    /// open panel whose row survives picks up the new row; a closing panel
    /// keeps animating its old snapshot.
    ///
    /// # Errors
    ///
    /// Fails on duplicate row ids, leaving the grid unchanged.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> Result<(), GridError> {
        validate_rows(&rows)?;
        debug!("{} replacing {} rows with {}", self.id, self.rows.len(), rows.len());
        self.rows = rows;
        self.events.push(GridEvent::RowsReplaced {
            count: self.rows.len(),
        });
        self.revalidate();
        if let Some(row) = self
            .panel
            .focused_id()
            .and_then(|id| self.rows.iter().find(|row| row.id() == id))
            .cloned()
        {
            self.panel.refresh(&row);
        }
        Ok(())
    }

    fn contains_row(&self, row_id: &RowId) -> bool {
        self.rows.iter().any(|row| row.id() == row_id)
    }

    /// Bring selection, page and panel back in line with the row collection.
    fn revalidate(&mut self) {
        let live: HashSet<RowId> = self.rows.iter().map(|row| row.id().clone()).collect();

        let pruned = self.selection.retain_existing(|id| live.contains(id));
        self.events.extend(GridEvent::selection(vec![], pruned));

        self.clamp_page();

        if let Some(focused) = self.panel.focused_id()
            && !live.contains(focused)
        {
            warn!("{} panel row '{focused}' vanished, closing panel", self.id);
            let transitions = self.panel.force_close();
            self.push_panel(transitions);
        }
    }

    // -------------------------------------------------------------------------
    // Pagination and filter
    // -------------------------------------------------------------------------

    /// Jump to a page, clamped to the valid range.
    pub fn set_page(&mut self, page_index: usize) -> bool {
        let total = self.processed_count();
        let changed = self.pagination.set_page(page_index, total);
        self.push_page_if(changed)
    }

    /// Pager "next".
    pub fn next_page(&mut self) -> bool {
        let total = self.processed_count();
        let changed = self.pagination.next_page(total);
        self.push_page_if(changed)
    }

    /// Pager "previous".
    pub fn previous_page(&mut self) -> bool {
        let changed = self.pagination.previous_page();
        self.push_page_if(changed)
    }

    /// Page size picker. Any non-zero size is accepted and returns to the
    /// first page.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let changed = self.pagination.set_page_size(page_size);
        self.push_page_if(changed)
    }

    /// Search box. A query change returns to the first page.
    pub fn set_filter(&mut self, query: impl Into<String>) -> bool {
        if !self.filter.set_query(query) {
            return false;
        }
        debug!("{} filter = {:?}", self.id, self.filter.query());
        self.events.push(GridEvent::FilterChanged {
            query: self.filter.query().to_string(),
        });
        self.reset_page();
        true
    }

    fn reset_page(&mut self) {
        let changed = self.pagination.reset();
        self.push_page_if(changed);
    }

    fn clamp_page(&mut self) {
        let total = self.processed_count();
        if let Some(previous) = self.pagination.clamp(total) {
            warn!(
                "{} page {previous} out of range for {total} rows, now {}",
                self.id,
                self.pagination.state().page_index
            );
            self.push_page_if(true);
        }
    }

    fn push_page_if(&mut self, changed: bool) -> bool {
        if changed {
            self.events.push(GridEvent::PageChanged {
                pagination: self.pagination.state(),
            });
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Derived state
    // -------------------------------------------------------------------------

    /// Rows after filtering and sorting, before pagination.
    pub fn processed_rows(&self) -> Vec<&Row> {
        let all: Vec<&Row> = self.rows.iter().collect();
        let filtered = self.filter.apply(&all, &self.layout);
        apply_sort(&filtered, self.sort.state(), self.layout.columns())
    }

    fn processed_count(&self) -> usize {
        if self.filter.is_empty() {
            self.rows.len()
        } else {
            self.processed_rows().len()
        }
    }

    /// Pager summary.
    pub fn page_info(&self) -> PageInfo {
        self.pagination.info(self.processed_count())
    }

    /// Assemble the current view.
    pub fn view(&self) -> ViewState {
        let processed = self.processed_rows();
        let page = self.pagination.slice(&processed);
        let panel_state = self.panel.state();
        let open_id = match &panel_state {
            PanelState::Open(id) => Some(id),
            _ => None,
        };

        let visible_rows = page
            .iter()
            .map(|row| VisibleRow {
                row: (*row).clone(),
                selected: self.selection.is_selected(row.id()),
                focused: open_id == Some(row.id()),
            })
            .collect();

        let universe: Vec<RowId> = match self.config.selection_scope {
            SelectionScope::Page => page.iter().map(|row| row.id().clone()).collect(),
            SelectionScope::Filtered => processed.iter().map(|row| row.id().clone()).collect(),
        };

        let sort_state = self.sort.state().clone();
        let columns = self
            .layout
            .iter()
            .map(|(column, width, visible)| ColumnView {
                id: column.id.clone(),
                header: column.header.clone(),
                width,
                visible,
                sortable: column.sortable,
                resizable: column.resizable,
                hideable: column.hideable,
                sort: sort_state.direction_for(&column.id),
            })
            .collect();

        ViewState {
            visible_rows,
            columns,
            total_width: self.layout.total_width(),
            selection: SelectionView {
                selected_ids: self.selection.selected(),
                count: self.selection.len(),
                aggregate: self.selection.aggregate(&universe),
            },
            pagination: self.pagination.info(processed.len()),
            panel: PanelView {
                row: self.panel.row().cloned(),
                state: panel_state,
            },
            filter: self.filter.query().to_string(),
            sort_state,
        }
    }

    // -------------------------------------------------------------------------
    // Layout persistence
    // -------------------------------------------------------------------------

    /// Store column widths and visibility under `key`.
    ///
    /// # Errors
    ///
    /// Propagates backend and encoding failures.
    pub async fn save_layout(
        &self,
        store: &LayoutPersistence,
        key: &str,
    ) -> Result<(), LayoutStoreError> {
        store.save(key, &self.layout.snapshot()).await
    }

    /// Restore column widths and visibility stored under `key`.
    ///
    /// Returns `false` when nothing was stored.
    ///
    /// # Errors
    ///
    /// Propagates backend and decoding failures; the layout is untouched.
    pub async fn load_layout(
        &mut self,
        store: &LayoutPersistence,
        key: &str,
    ) -> Result<bool, LayoutStoreError> {
        let Some(snapshot) = store.load(key).await? else {
            return Ok(false);
        };
        debug!("{} restoring layout '{key}'", self.id);
        self.layout.restore(&snapshot);
        self.clamp_page();
        Ok(true)
    }
}

fn validate_columns(columns: &[Column]) -> Result<(), GridError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(GridError::DuplicateColumn(column.id.to_string()));
        }
        if column.min_width > column.max_width {
            return Err(GridError::width_bounds(
                column.id.as_str(),
                column.min_width,
                column.max_width,
            ));
        }
    }
    Ok(())
}

fn validate_rows(rows: &[Row]) -> Result<(), GridError> {
    let mut seen = HashSet::new();
    for row in rows {
        if !seen.insert(row.id()) {
            return Err(GridError::DuplicateRow(row.id().to_string()));
        }
    }
    Ok(())
}
