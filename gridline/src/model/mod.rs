//! Row and column definitions consumed by the grid

mod column;
mod row;
mod value;

pub use column::*;
pub use row::*;
pub use value::*;
