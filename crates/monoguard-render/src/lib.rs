//! Rendering utilities for run statistics (aligned plain-text tables).

#![forbid(unsafe_code)]

mod duration;
mod model;
mod table;

pub use duration::format_duration;
pub use model::{Aggregate, Cell, Column, StatsTable};
pub use table::render_table;
