//! End-to-end tests for the grid controller.

mod common;

use common::{columns, grid, init_logging, numbered_rows};
use gridline::prelude::*;
use gridline::{ConfigError, GridError};

fn ids(raw: &[&str]) -> Vec<RowId> {
    raw.iter().map(|s| RowId::from(*s)).collect()
}

fn people() -> Vec<Row> {
    vec![
        Row::new("1").set("name", "carol").set("score", 7),
        Row::new("2").set("name", "Alice").set("score", 3),
        Row::new("3").set("name", "bob"),
        Row::new("4").set("name", "alice").set("score", 3),
    ]
}

#[tokio::test]
async fn test_header_checkbox_scenario() {
    let rows = vec![Row::new("a"), Row::new("b"), Row::new("c")];
    let mut grid = grid(rows, 2);

    assert_eq!(grid.view().visible_ids(), vec!["a", "b"]);

    let view = grid.dispatch(Intent::ToggleAllSelection);
    assert_eq!(view.selection.selected_ids, ids(&["a", "b"]));
    assert_eq!(view.selection.aggregate, SelectionAggregate::All);

    // "c" lives on page 1; selecting it directly is independent of the header.
    assert!(grid.toggle_row_selection(&"c".into()));

    let view = grid.dispatch(Intent::ToggleAllSelection);
    assert_eq!(view.selection.selected_ids, ids(&["c"]));
    assert_eq!(view.selection.aggregate, SelectionAggregate::None);
}

#[tokio::test]
async fn test_toggle_all_on_partial_page_selects_rest() {
    let mut grid = grid(numbered_rows(5), 10);
    grid.toggle_row_selection(&"r1".into());
    assert_eq!(grid.view().selection.aggregate, SelectionAggregate::Some);

    grid.take_events();
    grid.toggle_all_selection();
    let events = grid.take_events();
    assert_eq!(
        events,
        vec![GridEvent::SelectionChanged {
            added: ids(&["r0", "r2", "r3", "r4"]),
            removed: vec![],
        }]
    );
    assert_eq!(grid.view().selection.aggregate, SelectionAggregate::All);
}

#[tokio::test]
async fn test_filtered_selection_scope() {
    init_logging();
    let config = GridConfig::default()
        .with_page_size(2)
        .with_selection_scope(SelectionScope::Filtered);
    let mut grid = GridController::new(columns(), numbered_rows(5), config).expect("valid grid");

    let view = grid.dispatch(Intent::ToggleAllSelection);
    assert_eq!(view.selection.count, 5);
    assert_eq!(view.visible_rows.len(), 2);
    assert!(view.visible_rows.iter().all(|r| r.selected));
}

#[tokio::test]
async fn test_toggle_all_with_empty_universe_is_noop() {
    let mut grid = grid(vec![], 10);
    assert!(!grid.toggle_all_selection());
    assert!(grid.take_events().is_empty());
    assert_eq!(grid.view().selection.aggregate, SelectionAggregate::None);
}

#[tokio::test]
async fn test_unknown_row_selection_is_ignored() {
    let mut grid = grid(numbered_rows(3), 10);
    assert!(!grid.toggle_row_selection(&"nope".into()));
    assert!(grid.selection().is_empty());
}

#[tokio::test]
async fn test_sort_tri_state_through_controller() {
    let mut grid = grid(people(), 10);

    let view = grid.dispatch(Intent::ToggleSort {
        column_id: "name".into(),
    });
    assert_eq!(view.sort_state, SortState::by("name", SortDirection::Asc));
    assert_eq!(view.visible_ids(), vec!["2", "4", "3", "1"]);
    assert_eq!(view.column("name").and_then(|c| c.sort), Some(SortDirection::Asc));

    let view = grid.dispatch(Intent::ToggleSort {
        column_id: "name".into(),
    });
    assert_eq!(view.visible_ids(), vec!["1", "3", "4", "2"]);

    let view = grid.dispatch(Intent::ToggleSort {
        column_id: "name".into(),
    });
    assert!(view.sort_state.is_unsorted());
    assert_eq!(view.visible_ids(), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_sort_switching_column_starts_ascending() {
    let mut grid = grid(people(), 10);
    grid.toggle_sort("name");
    grid.toggle_sort("name");

    let view = grid.dispatch(Intent::ToggleSort {
        column_id: "score".into(),
    });
    assert_eq!(view.sort_state, SortState::by("score", SortDirection::Asc));
    // Equal scores keep source order; missing scores go last.
    assert_eq!(view.visible_ids(), vec!["2", "4", "1", "3"]);
    assert_eq!(view.column("name").and_then(|c| c.sort), None);
}

#[tokio::test]
async fn test_sort_on_unsortable_column_is_ignored() {
    let mut grid = grid(people(), 10);
    assert!(!grid.toggle_sort("actions"));
    assert!(!grid.toggle_sort("missing"));
    assert!(grid.sort_state().is_unsorted());
    assert!(grid.take_events().is_empty());
}

#[tokio::test]
async fn test_sort_returns_to_first_page() {
    let mut grid = grid(numbered_rows(30), 10);
    grid.set_page(2);
    assert!(grid.toggle_sort("score"));
    assert_eq!(grid.pagination().page_index, 0);
}

#[tokio::test]
async fn test_resize_bounds() {
    let mut grid = grid(numbered_rows(1), 10);

    let view = grid.dispatch(Intent::Resize {
        column_id: "name".into(),
        delta_px: -10_000,
    });
    assert_eq!(view.column("name").map(|c| c.width), Some(80));

    let view = grid.dispatch(Intent::Resize {
        column_id: "name".into(),
        delta_px: 10_000,
    });
    assert_eq!(view.column("name").map(|c| c.width), Some(400));

    // Already at the bound: no change, no event.
    grid.take_events();
    assert!(!grid.resize("name", 50));
    assert!(grid.take_events().is_empty());
}

#[tokio::test]
async fn test_resize_fixed_column_is_ignored() {
    let mut grid = grid(numbered_rows(1), 10);
    assert!(!grid.resize("city", 40));
    assert_eq!(grid.layout().width("city"), Some(150));
}

#[tokio::test]
async fn test_column_visibility_and_total_width() {
    let mut grid = grid(numbered_rows(1), 10);
    assert_eq!(grid.view().total_width, 200 + 150 + 90 + 48);

    let view = grid.dispatch(Intent::SetColumnVisibility {
        column_id: "city".into(),
        visible: false,
    });
    assert_eq!(view.total_width, 200 + 90 + 48);
    assert_eq!(view.column("city").map(|c| c.visible), Some(false));

    assert!(!grid.set_column_visibility("actions", false));

    grid.resize("name", 30);
    let view = grid.dispatch(Intent::ResetColumnWidth {
        column_id: "name".into(),
    });
    assert_eq!(view.column("name").map(|c| c.width), Some(200));
}

#[tokio::test]
async fn test_delete_clamps_page() {
    let mut grid = grid(numbered_rows(23), 10);
    grid.set_page(2);
    assert_eq!(grid.view().visible_ids(), vec!["r20", "r21", "r22"]);

    let doomed: Vec<RowId> = (0..20).map(|i| RowId::from(format!("r{i}"))).collect();
    let view = grid.dispatch(Intent::DeleteRows { row_ids: doomed });

    assert_eq!(view.pagination.page_index, 0);
    assert_eq!(view.pagination.total_rows, 3);
    assert_eq!(view.visible_ids(), vec!["r20", "r21", "r22"]);
}

#[tokio::test]
async fn test_delete_prunes_selection() {
    let mut grid = grid(numbered_rows(5), 10);
    grid.toggle_row_selection(&"r1".into());
    grid.toggle_row_selection(&"r2".into());
    grid.take_events();

    grid.delete_rows(&ids(&["r1", "missing"]));

    assert_eq!(grid.view().selection.selected_ids, ids(&["r2"]));
    assert_eq!(
        grid.take_events(),
        vec![
            GridEvent::RowsDeleted {
                row_ids: ids(&["r1"]),
            },
            GridEvent::SelectionChanged {
                added: vec![],
                removed: ids(&["r1"]),
            },
        ]
    );
}

#[tokio::test]
async fn test_delete_unknown_ids_is_noop() {
    let mut grid = grid(numbered_rows(3), 10);
    assert!(!grid.delete_rows(&ids(&["x", "y"])));
    assert_eq!(grid.rows().len(), 3);
    assert!(grid.take_events().is_empty());
}

#[tokio::test]
async fn test_delete_focused_row_closes_panel() {
    let mut grid = grid(numbered_rows(3), 10);
    grid.click_row(&"r1".into());
    grid.take_events();

    let view = grid.dispatch(Intent::DeleteRows {
        row_ids: ids(&["r1"]),
    });

    assert_eq!(view.panel.state, PanelState::Closed);
    assert_eq!(view.panel.row, None);
    let panel_events: Vec<_> = grid
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            GridEvent::PanelChanged { transition } => Some((transition.from, transition.to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        panel_events,
        vec![
            (PanelState::Open("r1".into()), PanelState::Closing("r1".into())),
            (PanelState::Closing("r1".into()), PanelState::Closed),
        ]
    );
}

#[tokio::test]
async fn test_page_navigation_is_clamped() {
    let mut grid = grid(numbered_rows(25), 10);
    assert!(!grid.previous_page());
    assert!(grid.next_page());
    assert!(grid.next_page());
    assert!(!grid.next_page());

    let info = grid.page_info();
    assert_eq!(info.page_index, 2);
    assert_eq!((info.first_row, info.last_row), (21, 25));
    assert!(!info.can_next);

    grid.set_page(99);
    assert_eq!(grid.pagination().page_index, 2);
}

#[tokio::test]
async fn test_page_size_resets_index() {
    let mut grid = grid(numbered_rows(60), 10);
    grid.set_page(4);

    // Sizes outside the picker's list are still valid.
    let view = grid.dispatch(Intent::SetPageSize { page_size: 25 });
    assert_eq!(view.pagination.page_index, 0);
    assert_eq!(view.pagination.page_size, 25);
    assert_eq!(view.visible_rows.len(), 25);

    grid.set_page(2);
    assert!(grid.set_page_size(25));
    assert_eq!(grid.pagination().page_index, 0);

    assert!(!grid.set_page_size(0));
    assert_eq!(grid.pagination().page_size, 25);
}

#[tokio::test]
async fn test_filter_narrows_rows_and_resets_page() {
    init_logging();
    let rows: Vec<Row> = (0..12)
        .map(|i| {
            let city = if i % 3 == 0 { "Oslo" } else { "Lima" };
            Row::new(format!("r{i}")).set("name", format!("Person {i}")).set("city", city)
        })
        .collect();
    let config = GridConfig::default()
        .with_page_size(5)
        .with_filter_mode(FilterMode::Substring);
    let mut grid = GridController::new(columns(), rows, config).expect("valid grid");
    grid.set_page(2);

    let view = grid.dispatch(Intent::SetFilter {
        query: "oslo".into(),
    });
    assert_eq!(view.filter, "oslo");
    assert_eq!(view.pagination.page_index, 0);
    assert_eq!(view.visible_ids(), vec!["r0", "r3", "r6", "r9"]);

    // Hiding the only matching column empties the result.
    let view = grid.dispatch(Intent::SetColumnVisibility {
        column_id: "city".into(),
        visible: false,
    });
    assert!(view.visible_rows.is_empty());
    assert_eq!(view.pagination.page_count, 1);

    let view = grid.dispatch(Intent::SetFilter {
        query: String::new(),
    });
    assert_eq!(view.pagination.total_rows, 12);
}

#[tokio::test]
async fn test_intents_from_json() {
    let mut grid = grid(numbered_rows(15), 10);
    let script = r#"[
        {"type": "next_page"},
        {"type": "toggle_row_selection", "row_id": "r12"},
        {"type": "click_row", "row_id": "r11"},
        {"type": "resize", "column_id": "score", "delta_px": 10}
    ]"#;
    let intents: Vec<Intent> = serde_json::from_str(script).expect("valid json");

    let mut view = grid.view();
    for intent in intents {
        view = grid.dispatch(intent);
    }

    assert_eq!(view.pagination.page_index, 1);
    assert_eq!(view.panel.state, PanelState::Open("r11".into()));
    let focused: Vec<_> = view
        .visible_rows
        .iter()
        .filter(|r| r.focused)
        .map(|r| r.row.id().as_str())
        .collect();
    assert_eq!(focused, vec!["r11"]);
    assert_eq!(view.selection.selected_ids, ids(&["r12"]));
    assert_eq!(view.column("score").map(|c| c.width), Some(100));
}

#[tokio::test]
async fn test_set_rows_revalidates() {
    let mut grid = grid(numbered_rows(25), 10);
    grid.set_page(2);
    grid.toggle_row_selection(&"r3".into());
    grid.toggle_row_selection(&"r21".into());
    grid.click_row(&"r3".into());

    let replacement: Vec<Row> = numbered_rows(5)
        .into_iter()
        .map(|row| {
            let id = row.id().clone();
            row.set("city", format!("city of {id}"))
        })
        .collect();
    assert!(grid.set_rows(replacement).is_ok());

    let view = grid.view();
    assert_eq!(view.pagination.page_index, 0);
    assert_eq!(view.selection.selected_ids, ids(&["r3"]));
    assert_eq!(view.panel.state, PanelState::Open("r3".into()));
    let panel_city = view.panel.row.as_ref().and_then(|r| r.get("city").cloned());
    assert_eq!(panel_city, Some(Value::from("city of r3")));
}

#[tokio::test]
async fn test_set_rows_rejects_duplicates() {
    let mut grid = grid(numbered_rows(2), 10);
    let result = grid.set_rows(vec![Row::new("x"), Row::new("x")]);
    assert!(matches!(result, Err(GridError::DuplicateRow(id)) if id == "x"));
    assert_eq!(grid.rows().len(), 2);
}

#[tokio::test]
async fn test_construction_errors() {
    init_logging();

    let dup_columns = vec![Column::new("a", "A", 10), Column::new("a", "A again", 10)];
    let result = GridController::new(dup_columns, vec![], GridConfig::default());
    assert!(matches!(result, Err(GridError::DuplicateColumn(id)) if id == "a"));

    let inverted = vec![Column::new("a", "A", 10).width_bounds(50, 20)];
    let result = GridController::new(inverted, vec![], GridConfig::default());
    assert!(matches!(
        result,
        Err(GridError::InvalidWidthBounds { min: 50, max: 20, .. })
    ));

    let result = GridController::new(
        columns(),
        vec![Row::new("r"), Row::new("r")],
        GridConfig::default(),
    );
    assert!(matches!(result, Err(GridError::DuplicateRow(_))));

    let config = GridConfig::default().with_page_size_options(vec![25, 50]);
    let result = GridController::new(columns(), vec![], config);
    assert!(matches!(
        result,
        Err(GridError::Config(ConfigError::PageSizeNotOffered { size: 10, .. }))
    ));
}

#[test]
fn test_new_outside_runtime_fails() {
    init_logging();
    let result = GridController::new(columns(), vec![], GridConfig::default());
    assert!(matches!(result, Err(GridError::NoRuntime)));
}

#[tokio::test]
async fn test_grid_ids_are_unique() {
    let a = grid(vec![], 10);
    let b = grid(vec![], 10);
    assert_ne!(a.id(), b.id());
    assert!(a.id().to_string().starts_with("__grid_"));
}

#[tokio::test]
async fn test_view_serializes_for_bridge() {
    let mut grid = grid(numbered_rows(2), 10);
    grid.click_row(&"r0".into());
    let json = serde_json::to_value(grid.view()).expect("valid json");
    assert_eq!(json["panel"]["state"]["state"], "open");
    assert_eq!(json["panel"]["state"]["row_id"], "r0");
    assert_eq!(json["visible_rows"][0]["focused"], true);
    assert_eq!(json["pagination"]["page_count"], 1);
}
