//! Value types for memory statistics

mod counters;
mod reading;

pub use counters::*;
pub use reading::*;
