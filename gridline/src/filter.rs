//! Global text filter using nucleo-matcher.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::Deserialize;
use serde::Serialize;

use crate::layout::ColumnLayout;
use crate::model::Row;

/// How the filter query is matched against cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Characters must appear in order, not necessarily adjacent.
    #[default]
    Fuzzy,
    /// The query must appear verbatim (ignoring case).
    Substring,
}

impl FilterMode {
    fn atom_kind(self) -> AtomKind {
        match self {
            FilterMode::Fuzzy => AtomKind::Fuzzy,
            FilterMode::Substring => AtomKind::Substring,
        }
    }
}

/// Grid-wide text filter.
///
/// A row passes when the joined text of its visible, filterable columns
/// matches the query. Matching never reorders rows; sorting runs after
/// filtering. An empty query passes every row.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    query: String,
    mode: FilterMode,
}

impl RowFilter {
    /// Create an empty filter.
    pub fn new(mode: FilterMode) -> Self {
        Self {
            query: String::new(),
            mode,
        }
    }

    /// Current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query. Returns `true` if it changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query.trim() == self.query.trim() {
            return false;
        }
        self.query = query;
        true
    }

    /// Check if the filter passes everything.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Rows passing the filter, in input order.
    pub fn apply<'a>(&self, rows: &[&'a Row], layout: &ColumnLayout) -> Vec<&'a Row> {
        if self.is_empty() {
            return rows.to_vec();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::new(
            self.query.trim(),
            CaseMatching::Ignore,
            Normalization::Smart,
            self.mode.atom_kind(),
        );

        let mut buf = Vec::new();
        rows.iter()
            .copied()
            .filter(|row| {
                let text = haystack(row, layout);
                let haystack = Utf32Str::new(&text, &mut buf);
                pattern.score(haystack, &mut matcher).is_some()
            })
            .collect()
    }
}

fn haystack(row: &Row, layout: &ColumnLayout) -> String {
    layout
        .visible_columns()
        .filter(|(column, _)| column.filterable)
        .map(|(column, _)| column.value(row).display())
        .collect::<Vec<_>>()
        .join(" | ")
}
