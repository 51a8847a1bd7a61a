//! Tri-state column sorting

mod apply;
mod state;

pub use apply::*;
pub use state::*;
