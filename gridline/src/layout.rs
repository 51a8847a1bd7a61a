//! Column widths and visibility

use std::collections::BTreeMap;

use log::{debug, trace};
use serde::Deserialize;
use serde::Serialize;

use crate::model::Column;

/// Persistable subset of a [`ColumnLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Current width per column.
    pub widths: BTreeMap<String, u32>,
    /// Ids of hidden columns.
    pub hidden: Vec<String>,
}

/// Column definitions plus their mutable width and visibility.
///
/// Independent of row data. Widths always stay within each column's
/// `[min_width, max_width]`.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: Vec<Column>,
    widths: Vec<u32>,
    visible: Vec<bool>,
}

impl ColumnLayout {
    /// Create a layout, clamping each initial width into its bounds.
    pub fn new(columns: Vec<Column>) -> Self {
        let widths = columns
            .iter()
            .map(|c| c.clamp_width(i64::from(c.width)))
            .collect();
        let visible = columns.iter().map(|c| c.visible || !c.hideable).collect();
        Self {
            columns,
            widths,
            visible,
        }
    }

    /// Column definitions in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column by id.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.index_of(id).map(|i| &self.columns[i])
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id.as_str() == id)
    }

    /// Current width of a column.
    pub fn width(&self, id: &str) -> Option<u32> {
        self.index_of(id).map(|i| self.widths[i])
    }

    /// Whether a column is currently visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.index_of(id).is_some_and(|i| self.visible[i])
    }

    /// Visible columns with their widths, in display order.
    pub fn visible_columns(&self) -> impl Iterator<Item = (&Column, u32)> {
        self.columns
            .iter()
            .zip(&self.widths)
            .zip(&self.visible)
            .filter(|(_, visible)| **visible)
            .map(|((column, width), _)| (column, *width))
    }

    /// All columns with width and visibility, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&Column, u32, bool)> {
        self.columns
            .iter()
            .zip(&self.widths)
            .zip(&self.visible)
            .map(|((column, width), visible)| (column, *width, *visible))
    }

    /// Sum of visible column widths.
    pub fn total_width(&self) -> u64 {
        self.visible_columns().map(|(_, w)| u64::from(w)).sum()
    }

    /// Resize a column by `delta_px`, clamped to its bounds.
    ///
    /// Returns the new width, or `None` if the column is unknown or not
    /// resizable. A delta that leaves the clamped width unchanged still
    /// returns `Some`.
    pub fn resize(&mut self, id: &str, delta_px: i32) -> Option<u32> {
        let Some(index) = self.index_of(id) else {
            trace!("Ignoring resize of unknown column '{id}'");
            return None;
        };
        let column = &self.columns[index];
        if !column.resizable {
            trace!("Ignoring resize of fixed-width column '{id}'");
            return None;
        }

        let width = column.clamp_width(i64::from(self.widths[index]) + i64::from(delta_px));
        debug!("Column '{id}' width {} -> {width}", self.widths[index]);
        self.widths[index] = width;
        Some(width)
    }

    /// Restore a column's defined width.
    pub fn reset_width(&mut self, id: &str) -> Option<u32> {
        let index = self.index_of(id)?;
        let column = &self.columns[index];
        let width = column.clamp_width(i64::from(column.width));
        self.widths[index] = width;
        Some(width)
    }

    /// Show or hide a column.
    ///
    /// Returns `true` if visibility changed. Always-visible columns never
    /// change.
    pub fn set_visibility(&mut self, id: &str, visible: bool) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if !self.columns[index].hideable {
            trace!("Ignoring visibility toggle on always-visible column '{id}'");
            return false;
        }
        if self.visible[index] == visible {
            return false;
        }
        self.visible[index] = visible;
        debug!("Column '{id}' visible = {visible}");
        true
    }

    /// Capture widths and hidden columns.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            widths: self
                .iter()
                .map(|(column, width, _)| (column.id.to_string(), width))
                .collect(),
            hidden: self
                .iter()
                .filter(|(_, _, visible)| !visible)
                .map(|(column, _, _)| column.id.to_string())
                .collect(),
        }
    }

    /// Apply a snapshot.
    ///
    /// Unknown column ids are ignored, widths are re-clamped, and
    /// always-visible columns stay visible. Columns missing from `hidden`
    /// become visible.
    pub fn restore(&mut self, snapshot: &LayoutSnapshot) {
        for (index, column) in self.columns.iter().enumerate() {
            if let Some(width) = snapshot.widths.get(column.id.as_str()) {
                self.widths[index] = column.clamp_width(i64::from(*width));
            }
            if column.hideable {
                self.visible[index] = !snapshot.hidden.iter().any(|h| h == column.id.as_str());
            }
        }
    }
}
