//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use gridline::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

static INIT: Once = Once::new();

/// Route library logs through the test harness's captured output.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Trace, Config::default());
    });
}

/// Columns used across the controller tests.
pub fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name", 200)
            .sortable()
            .resizable()
            .width_bounds(80, 400),
        Column::new("city", "City", 150).sortable(),
        Column::new("score", "Score", 90).sortable().resizable(),
        Column::new("actions", "", 48).always_visible().unfilterable(),
    ]
}

/// `count` rows with ids `r0..r{count-1}`.
pub fn numbered_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new(format!("r{i}"))
                .set("name", format!("Person {i:02}"))
                .set("score", i as i64)
        })
        .collect()
}

/// Grid over `rows` with the given page size.
pub fn grid(rows: Vec<Row>, page_size: usize) -> GridController {
    init_logging();
    let config = GridConfig::default().with_page_size(page_size);
    GridController::new(columns(), rows, config).expect("valid grid")
}
