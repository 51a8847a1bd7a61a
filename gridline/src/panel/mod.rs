//! Master/detail side panel

mod controller;
mod state;
mod timer;

pub use controller::*;
pub use state::*;
pub use timer::TimerToken;
