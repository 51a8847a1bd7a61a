//! Stable row ordering

use std::cmp::Ordering;

use crate::model::{Column, Comparator, Row, Value};

use super::{SortDirection, SortState};

/// Orders rows according to `state`.
///
/// The sort is stable: rows whose cells compare equal keep their input
/// order in both directions. Null cells go last in both directions. When
/// `state` is unsorted, or names a column not in `columns`, the input order
/// is returned unchanged.
pub fn apply_sort<'a>(rows: &[&'a Row], state: &SortState, columns: &[Column]) -> Vec<&'a Row> {
    let (Some(column_id), Some(direction)) = (state.column_id(), state.direction()) else {
        return rows.to_vec();
    };
    let Some(column) = columns.iter().find(|c| &c.id == column_id) else {
        return rows.to_vec();
    };

    let default_comparator = Comparator::default();
    let comparator = column.comparator.as_ref().unwrap_or(&default_comparator);

    let mut keyed: Vec<(Value, &'a Row)> =
        rows.iter().map(|row| (column.value(row), *row)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_cells(a, b, comparator, direction));
    keyed.into_iter().map(|(_, row)| row).collect()
}

fn compare_cells(a: &Value, b: &Value, comparator: &Comparator, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = comparator.compare(a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}
