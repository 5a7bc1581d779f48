use std::time::Duration;

/// Footer aggregation for a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Aggregate {
    #[default]
    None,
    Sum,
    Average,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub aggregate: Aggregate,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            aggregate: Aggregate::None,
        }
    }

    pub fn sum(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            aggregate: Aggregate::Sum,
        }
    }

    pub fn average(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            aggregate: Aggregate::Average,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Duration(Duration),
    Text(String),
    Count(u64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsTable {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl StatsTable {
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn has_footer(&self) -> bool {
        !self.rows.is_empty() && self.columns.iter().any(|c| c.aggregate != Aggregate::None)
    }
}
