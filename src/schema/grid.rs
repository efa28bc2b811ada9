// src/schema/grid.rs
//
// Untyped tables as they come off a page, and the normalized shape
// handed to the rest of the pipeline.

use serde::Serialize;

/// Column identity of a raw table: either the page supplied header cells,
/// or the columns are only known by position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Columns {
    Positional,
    Named(Vec<String>),
}

/// One `<table>` worth of cells. Rows are padded to a common width.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawTable {
    pub columns: Columns,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn positional(rows: Vec<Vec<String>>) -> Self {
        Self { columns: Columns::Positional, rows }.padded()
    }

    pub fn named(names: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns: Columns::Named(names), rows }.padded()
    }

    /// Widest of the header and every row.
    pub fn width(&self) -> usize {
        let header = match &self.columns {
            Columns::Named(names) => names.len(),
            Columns::Positional => 0,
        };
        self.rows.iter().map(Vec::len).fold(header, usize::max)
    }

    pub fn is_positional(&self) -> bool {
        matches!(self.columns, Columns::Positional)
    }

    /// Column identifiers as they stand: header text, or "0", "1", … for
    /// positional tables (and for header slots the page left out).
    pub fn identifiers(&self) -> Vec<String> {
        let width = self.width();
        let named: &[String] = match &self.columns {
            Columns::Named(names) => names,
            Columns::Positional => &[],
        };
        (0..width)
            .map(|i| named.get(i).cloned().unwrap_or_else(|| i.to_string()))
            .collect()
    }

    fn padded(mut self) -> Self {
        let width = self.width();
        for row in &mut self.rows {
            row.resize(width, s!());
        }
        self
    }
}

/// A table after schema recovery: every column has a name, canonical
/// where the heuristics could tell, original otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalGrid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CanonicalGrid {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell under `column` in row `row`, if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let ix = self.column_index(column)?;
        self.rows.get(row)?.get(ix).map(String::as_str)
    }

    /// True when every canonical admissions column is present.
    pub fn has_canonical_schema(&self) -> bool {
        crate::config::consts::CANONICAL_COLUMNS
            .iter()
            .all(|c| self.column_index(c).is_some())
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}
