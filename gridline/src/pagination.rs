//! Client-side pagination

use log::{debug, trace};
use serde::Deserialize;
use serde::Serialize;

/// Page position and size.
///
/// Whenever there are rows, `page_index * page_size < total_rows` holds
/// after every controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, always greater than zero.
    pub page_size: usize,
}

/// Page summary for pager controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of pages; 1 when there are no rows.
    pub page_count: usize,
    /// Rows across all pages.
    pub total_rows: usize,
    /// 1-based number of the first row on the page, 0 when empty.
    pub first_row: usize,
    /// 1-based number of the last row on the page, 0 when empty.
    pub last_row: usize,
    /// Whether a previous page exists.
    pub can_previous: bool,
    /// Whether a next page exists.
    pub can_next: bool,
}

/// Derives the visible page window from a row list.
#[derive(Debug, Clone)]
pub struct PaginationController {
    state: PaginationState,
}

impl PaginationController {
    /// Create a controller on the first page.
    ///
    /// A zero `page_size` is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            state: PaginationState {
                page_index: 0,
                page_size: page_size.max(1),
            },
        }
    }

    /// Current state.
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Number of pages for `total_rows`; at least 1.
    pub fn page_count(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.state.page_size).max(1)
    }

    fn last_page(&self, total_rows: usize) -> usize {
        self.page_count(total_rows) - 1
    }

    /// Rows on the current page.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self
            .state
            .page_index
            .saturating_mul(self.state.page_size)
            .min(rows.len());
        let end = start.saturating_add(self.state.page_size).min(rows.len());
        &rows[start..end]
    }

    /// Change page size and return to the first page.
    ///
    /// Re-picking the current size still returns to the first page. Returns
    /// `true` if the state changed; a zero size is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            trace!("Ignoring zero page size");
            return false;
        }
        if page_size == self.state.page_size {
            return self.reset();
        }
        debug!("Page size {} -> {page_size}", self.state.page_size);
        self.state = PaginationState {
            page_index: 0,
            page_size,
        };
        true
    }

    /// Jump to a page, clamped into the valid range. Returns `true` if the
    /// page changed.
    pub fn set_page(&mut self, page_index: usize, total_rows: usize) -> bool {
        let target = page_index.min(self.last_page(total_rows));
        if target == self.state.page_index {
            return false;
        }
        self.state.page_index = target;
        true
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self, total_rows: usize) -> bool {
        if self.state.page_index >= self.last_page(total_rows) {
            return false;
        }
        self.state.page_index += 1;
        true
    }

    /// Go back one page; no-op on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.state.page_index == 0 {
            return false;
        }
        self.state.page_index -= 1;
        true
    }

    /// Return to the first page. Returns `true` if the page changed.
    pub fn reset(&mut self) -> bool {
        std::mem::replace(&mut self.state.page_index, 0) != 0
    }

    /// Pull the page index back into range after the row count changed.
    ///
    /// Returns the previous index if it had to move.
    pub fn clamp(&mut self, total_rows: usize) -> Option<usize> {
        let last = self.last_page(total_rows);
        if self.state.page_index > last {
            let previous = self.state.page_index;
            self.state.page_index = last;
            return Some(previous);
        }
        None
    }

    /// Summary of the current page for `total_rows`.
    pub fn info(&self, total_rows: usize) -> PageInfo {
        let PaginationState {
            page_index,
            page_size,
        } = self.state;
        let page_count = self.page_count(total_rows);
        let (first_row, last_row) = if total_rows == 0 {
            (0, 0)
        } else {
            let first = page_index * page_size + 1;
            (first.min(total_rows), (first + page_size - 1).min(total_rows))
        };
        PageInfo {
            page_index,
            page_size,
            page_count,
            total_rows,
            first_row,
            last_row,
            can_previous: page_index > 0,
            can_next: page_index + 1 < page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_pages() {
        let rows = ["a", "b", "c"];
        let mut pages = PaginationController::new(2);
        assert_eq!(pages.slice(&rows), &["a", "b"]);
        assert!(pages.next_page(rows.len()));
        assert_eq!(pages.slice(&rows), &["c"]);
    }

    #[test]
    fn test_next_and_previous_clamp() {
        let mut pages = PaginationController::new(10);
        assert!(!pages.previous_page());
        assert!(pages.next_page(23));
        assert!(pages.next_page(23));
        assert!(!pages.next_page(23));
        assert_eq!(pages.state().page_index, 2);
    }

    #[test]
    fn test_set_page_size_resets_index() {
        let mut pages = PaginationController::new(10);
        pages.set_page(4, 100);
        assert!(pages.set_page_size(25));
        assert_eq!(pages.state(), PaginationState { page_index: 0, page_size: 25 });
        assert!(!pages.set_page_size(0));
        assert_eq!(pages.state().page_size, 25);
    }

    #[test]
    fn test_same_page_size_still_resets_index() {
        let mut pages = PaginationController::new(10);
        pages.set_page(3, 100);
        assert!(pages.set_page_size(10));
        assert_eq!(pages.state(), PaginationState { page_index: 0, page_size: 10 });
        assert!(!pages.set_page_size(10));
    }

    #[test]
    fn test_set_page_clamps() {
        let mut pages = PaginationController::new(10);
        assert!(pages.set_page(99, 23));
        assert_eq!(pages.state().page_index, 2);
        assert!(!pages.set_page(5, 23));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut pages = PaginationController::new(10);
        pages.set_page(2, 23);
        assert_eq!(pages.clamp(3), Some(2));
        assert_eq!(pages.state().page_index, 0);
        assert_eq!(pages.clamp(3), None);
    }

    #[test]
    fn test_clamp_to_empty() {
        let mut pages = PaginationController::new(5);
        pages.set_page(3, 20);
        pages.clamp(0);
        assert_eq!(pages.state().page_index, 0);
        let empty: [u8; 0] = [];
        assert!(pages.slice(&empty).is_empty());
    }

    #[test]
    fn test_info() {
        let mut pages = PaginationController::new(10);
        pages.set_page(2, 23);
        let info = pages.info(23);
        assert_eq!(info.page_count, 3);
        assert_eq!((info.first_row, info.last_row), (21, 23));
        assert!(info.can_previous);
        assert!(!info.can_next);

        let empty = PaginationController::new(10).info(0);
        assert_eq!(empty.page_count, 1);
        assert_eq!((empty.first_row, empty.last_row), (0, 0));
        assert!(!empty.can_next);
    }
}
