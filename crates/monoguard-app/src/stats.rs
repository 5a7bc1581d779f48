//! Conversion of run statistics into rendered tables.

use monoguard_engine::{RuleTypeStats, RunStats};
use monoguard_render::{Cell, Column, StatsTable, render_table};

/// Rule timing, glob cost and run tables, in print order.
pub fn stats_tables(stats: &RunStats) -> Vec<StatsTable> {
    let mut rules = StatsTable::new(
        "Rule timing",
        vec![
            Column::new("rule"),
            Column::sum("total time"),
            Column::sum("executions"),
            Column::average("avg time"),
            Column::sum("skipped"),
            Column::sum("skip time"),
        ],
    );
    for timing in stats.rules_by_total_time() {
        rules.push_row(vec![
            Cell::text(timing.name.as_str()),
            Cell::Duration(timing.total_time),
            Cell::Count(timing.executions),
            Cell::Duration(timing.average_time()),
            Cell::Count(timing.skipped),
            Cell::Duration(timing.skip_time),
        ]);
    }

    let mut globs = StatsTable::new(
        "Glob matching",
        vec![
            Column::new("globs"),
            Column::sum("evaluations"),
            Column::sum("total time"),
        ],
    );
    for (label, timing) in [
        ("include-packages", stats.globs.includes),
        ("exclude-packages", stats.globs.excludes),
    ] {
        globs.push_row(vec![
            Cell::text(label),
            Cell::Count(timing.evaluations),
            Cell::Duration(timing.total_time),
        ]);
    }

    let mut run = StatsTable::new("Run", vec![Column::new("metric"), Column::new("value")]);
    run.push_row(vec![
        Cell::text("scopes checked"),
        Cell::Count(stats.scopes_checked),
    ]);
    run.push_row(vec![
        Cell::text("config validation"),
        Cell::Duration(stats.config_validation),
    ]);
    run.push_row(vec![
        Cell::text("validation if run per scope"),
        Cell::Duration(stats.per_scope_validation_estimate()),
    ]);
    run.push_row(vec![
        Cell::text("total time"),
        Cell::Duration(stats.total_time),
    ]);

    vec![rules, globs, run]
}

/// All stats tables separated by blank lines, then each rule type's report.
pub fn render_stats(stats: &RunStats, rule_type_stats: &[RuleTypeStats]) -> String {
    let mut out = stats_tables(stats)
        .iter()
        .map(render_table)
        .collect::<Vec<_>>()
        .join("\n");
    if !rule_type_stats.is_empty() {
        out.push('\n');
        for entry in rule_type_stats {
            out.push_str(&entry.report);
            out.push('\n');
        }
    }
    out
}
