use crate::{Aggregate, Cell, StatsTable, format_duration};
use std::time::Duration;

const GAP: &str = "  ";

pub fn render_table(table: &StatsTable) -> String {
    let header: Vec<String> = table.columns.iter().map(|c| c.header.clone()).collect();
    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(render_cell).collect())
        .collect();
    let footer = table.has_footer().then(|| footer_row(table));

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in body.iter().chain(footer.iter()) {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join(GAP);

    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');
    push_line(&mut out, &header, &widths);
    out.push_str(&separator);
    out.push('\n');
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    if let Some(footer) = &footer {
        out.push_str(&separator);
        out.push('\n');
        push_line(&mut out, footer, &widths);
    }
    out
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Duration(d) => format_duration(*d),
        Cell::Text(s) => s.clone(),
        Cell::Count(n) => n.to_string(),
    }
}

// First column is left-aligned, the rest right-aligned.
fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i == 0 {
                format!("{cell:<w$}")
            } else {
                format!("{cell:>w$}")
            }
        })
        .collect::<Vec<_>>()
        .join(GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

fn footer_row(table: &StatsTable) -> Vec<String> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| match col.aggregate {
            Aggregate::None if i == 0 => "total".to_string(),
            Aggregate::None => String::new(),
            Aggregate::Sum => aggregate(table, i, false),
            Aggregate::Average => aggregate(table, i, true),
        })
        .collect()
}

// Durations and counts are aggregated separately; text cells are ignored.
fn aggregate(table: &StatsTable, column: usize, average: bool) -> String {
    let mut total_time = Duration::ZERO;
    let mut durations = 0u32;
    let mut total_count = 0u64;
    let mut counts = 0u64;

    for row in &table.rows {
        match row.get(column) {
            Some(Cell::Duration(d)) => {
                total_time = total_time.saturating_add(*d);
                durations = durations.saturating_add(1);
            }
            Some(Cell::Count(n)) => {
                total_count = total_count.saturating_add(*n);
                counts += 1;
            }
            _ => {}
        }
    }

    if durations > 0 {
        let value = if average {
            total_time / durations
        } else {
            total_time
        };
        format_duration(value)
    } else if counts > 0 {
        if average {
            format!("{:.2}", total_count as f64 / counts as f64)
        } else {
            total_count.to_string()
        }
    } else {
        String::new()
    }
}
