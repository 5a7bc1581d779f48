//! Use case orchestration for monoguard.
//!
//! This crate wires settings, discovery, built-in rules, the engine and rendering together.
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod report;
mod rules;
mod stats;

pub use check::{
    CONFIG_FILE_NAME, CheckInput, CheckOutput, exit_code, locate_config, parse_config,
    partial_reports, run_check,
};
pub use report::{format_failures, format_summary};
pub use rules::list_rules;
pub use stats::{render_stats, stats_tables};
