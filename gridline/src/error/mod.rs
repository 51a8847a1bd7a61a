//! Error types

mod config;
mod grid;
mod store;

pub use config::*;
pub use grid::*;
pub use store::*;
