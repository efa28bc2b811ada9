// src/schema/mod.rs
//! Schema recovery for untyped, possibly header-less tables.
//!
//! Two steps, each swappable:
//! 1. A [`TableSelector`] picks the data table out of everything the page
//!    contained. The default, [`FirstWideTable`], takes the first table with
//!    more than five columns; layout tables are narrower.
//! 2. [`normalize_table`] names the columns. The admissions source renders
//!    exactly seven columns in a fixed order, so a seven-column table gets
//!    the canonical names either positionally, from an embedded header row,
//!    or by matching its own header text. Anything else passes through with
//!    its original identifiers.

mod grid;

pub use grid::{CanonicalGrid, Columns, RawTable};

use std::collections::HashSet;

use crate::config::consts::{
    CANONICAL_COLUMNS, CANONICAL_WIDTH, HEADER_MIN_MATCHES, MIN_TABLE_COLUMNS_EXCLUSIVE,
};
use crate::error::{Result, SourceError};

/// Policy for choosing the data table among all tables on a page.
pub trait TableSelector {
    fn select<'a>(&self, candidates: &'a [RawTable]) -> Result<&'a RawTable>;
}

impl<S: TableSelector + ?Sized> TableSelector for &S {
    fn select<'a>(&self, candidates: &'a [RawTable]) -> Result<&'a RawTable> {
        (**self).select(candidates)
    }
}

/// First table wider than `min_columns_exclusive`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirstWideTable {
    pub min_columns_exclusive: usize,
}

impl Default for FirstWideTable {
    fn default() -> Self {
        Self { min_columns_exclusive: MIN_TABLE_COLUMNS_EXCLUSIVE }
    }
}

impl TableSelector for FirstWideTable {
    fn select<'a>(&self, candidates: &'a [RawTable]) -> Result<&'a RawTable> {
        candidates
            .iter()
            .find(|t| t.width() > self.min_columns_exclusive)
            .ok_or(SourceError::NoTableFound)
    }
}

/// Stricter variant: exactly one table may qualify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniqueWideTable {
    pub min_columns_exclusive: usize,
}

impl Default for UniqueWideTable {
    fn default() -> Self {
        Self { min_columns_exclusive: MIN_TABLE_COLUMNS_EXCLUSIVE }
    }
}

impl TableSelector for UniqueWideTable {
    fn select<'a>(&self, candidates: &'a [RawTable]) -> Result<&'a RawTable> {
        let wide: Vec<&RawTable> = candidates
            .iter()
            .filter(|t| t.width() > self.min_columns_exclusive)
            .collect();
        match wide.as_slice() {
            [] => Err(SourceError::NoTableFound),
            [only] => Ok(only),
            many => Err(SourceError::AmbiguousTable { candidates: many.len() }),
        }
    }
}

/// Selector + column naming, as one step.
#[derive(Clone, Debug, Default)]
pub struct TableSchemaNormalizer<S = FirstWideTable> {
    selector: S,
}

impl<S: TableSelector> TableSchemaNormalizer<S> {
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    pub fn normalize(&self, tables: &[RawTable]) -> Result<CanonicalGrid> {
        let table = self.selector.select(tables)?;
        logd!("selected table {}x{} out of {}", table.rows.len(), table.width(), tables.len());
        Ok(normalize_table(table))
    }
}

struct ColumnRule {
    canonical: &'static str,
    matches: fn(&str) -> bool,
}

// Evaluated in order against lower-cased header text; first match wins.
static COLUMN_RULES: [ColumnRule; CANONICAL_WIDTH] = [
    ColumnRule { canonical: CANONICAL_COLUMNS[0], matches: |s| s.contains("institute") },
    ColumnRule { canonical: CANONICAL_COLUMNS[1], matches: |s| s.contains("program") },
    ColumnRule { canonical: CANONICAL_COLUMNS[2], matches: |s| s.contains("quota") },
    ColumnRule {
        canonical: CANONICAL_COLUMNS[3],
        matches: |s| s.contains("seat type") || s.contains("category"),
    },
    ColumnRule { canonical: CANONICAL_COLUMNS[4], matches: |s| s.contains("gender") },
    ColumnRule {
        canonical: CANONICAL_COLUMNS[5],
        matches: |s| s.contains("opening") && s.contains("rank"),
    },
    ColumnRule {
        canonical: CANONICAL_COLUMNS[6],
        matches: |s| s.contains("closing") && s.contains("rank"),
    },
];

/// Canonical name for a header text, if any rule matches.
pub fn canonical_name(header: &str) -> Option<&'static str> {
    let lc = header.to_lowercase();
    COLUMN_RULES.iter().find(|r| (r.matches)(&lc)).map(|r| r.canonical)
}

/// A row is a header when its cells name enough distinct canonical columns.
/// One hit is not enough: data cells like "Indian Institute of Technology"
/// or "Gender-Neutral" match a rule on their own.
pub fn is_header_row(row: &[String]) -> bool {
    let hits: HashSet<&str> = row.iter().filter_map(|c| canonical_name(c)).collect();
    hits.len() >= HEADER_MIN_MATCHES
}

fn rename(name: &str) -> String {
    canonical_name(name).map_or_else(|| s!(name), str::to_owned)
}

/// Name the columns of one selected table.
pub fn normalize_table(table: &RawTable) -> CanonicalGrid {
    let width = table.width();
    let mut rows = table.rows.clone();

    if width != CANONICAL_WIDTH {
        logd!("table has {width} columns, keeping original identifiers");
        return CanonicalGrid { columns: table.identifiers(), rows };
    }

    if rows.first().is_some_and(|r| is_header_row(r)) {
        logd!("promoting first row to header");
        let header = rows.remove(0);
        let columns = header.iter().map(|h| rename(h)).collect();
        return CanonicalGrid { columns, rows };
    }

    let columns = match &table.columns {
        Columns::Positional => CANONICAL_COLUMNS.iter().map(|c| s!(*c)).collect(),
        Columns::Named(_) => table.identifiers().iter().map(|h| rename(h)).collect(),
    };
    CanonicalGrid { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| s!(*c)).collect()
    }

    fn canonical() -> Vec<String> {
        row(&CANONICAL_COLUMNS)
    }

    fn data_row() -> Vec<String> {
        row(&[
            "Indian Institute of Technology Bombay",
            "Computer Science and Engineering (4 Years, Bachelor of Technology)",
            "AI",
            "OPEN",
            "Gender-Neutral",
            "1",
            "68",
        ])
    }

    #[test]
    fn headerless_seven_columns_get_fixed_names() {
        let t = RawTable::positional(vec![data_row(), data_row()]);
        let g = normalize_table(&t);
        assert_eq!(g.columns, canonical());
        assert_eq!(g.rows.len(), 2);
    }

    #[test]
    fn embedded_header_row_is_promoted_and_renamed() {
        let header = row(&[
            "Institute Name",
            "Academic Program",
            "Quota",
            "Seat Category",
            "Gender",
            "Opening Rank",
            "Closing Rank",
        ]);
        for t in [
            RawTable::positional(vec![header.clone(), data_row()]),
            RawTable::named(row(&["a", "b", "c", "d", "e", "f", "g"]), vec![header.clone(), data_row()]),
        ] {
            let g = normalize_table(&t);
            assert_eq!(g.columns, canonical());
            assert_eq!(g.rows, vec![data_row()]);
        }
    }

    #[test]
    fn named_columns_are_renamed_first_match_wins() {
        let names = row(&[
            "Institute",
            "Academic Program Name",
            "Quota",
            "Seat Type",
            "Gender",
            "Opening Rank",
            "Closing Rank",
        ]);
        let g = normalize_table(&RawTable::named(names, vec![data_row()]));
        assert_eq!(g.columns, canonical());
        assert_eq!(g.rows.len(), 1);
    }

    #[test]
    fn unmatched_names_survive() {
        let names = row(&["Institute", "Branch", "Quota", "Seat Type", "Gender", "Open", "Close"]);
        let g = normalize_table(&RawTable::named(names, vec![data_row()]));
        assert_eq!(
            g.columns,
            row(&["Institute", "Branch", "Quota", "Category", "Gender", "Open", "Close"])
        );
    }

    #[test]
    fn data_row_is_not_mistaken_for_header() {
        assert!(!is_header_row(&data_row()));
        assert!(is_header_row(&row(&["Institute", "Program", "Quota", "Gender"])));
    }

    #[test]
    fn other_widths_pass_through() {
        let t = RawTable::positional(vec![row(&["1", "2", "3", "4", "5", "6", "7", "8"])]);
        let g = normalize_table(&t);
        assert_eq!(g.columns, row(&["0", "1", "2", "3", "4", "5", "6", "7"]));

        let t = RawTable::named(row(&["Institute", "Rank"]), vec![row(&["x", "1"])]);
        assert_eq!(normalize_table(&t).columns, row(&["Institute", "Rank"]));
    }

    #[test]
    fn first_wide_table_skips_layout_tables() {
        let layout = RawTable::positional(vec![row(&["menu", "home"])]);
        let wide = RawTable::positional(vec![data_row()]);
        let tables = vec![layout.clone(), wide.clone(), wide.clone()];
        assert_eq!(FirstWideTable::default().select(&tables).unwrap(), &tables[1]);

        let none = vec![layout.clone()];
        assert!(matches!(FirstWideTable::default().select(&none), Err(SourceError::NoTableFound)));
        assert!(matches!(FirstWideTable::default().select(&[]), Err(SourceError::NoTableFound)));
    }

    #[test]
    fn unique_wide_table_refuses_two_candidates() {
        let wide = RawTable::positional(vec![data_row()]);
        let tables = vec![wide.clone(), wide];
        let err = UniqueWideTable::default().select(&tables).unwrap_err();
        assert!(matches!(err, SourceError::AmbiguousTable { candidates: 2 }));
    }

    #[test]
    fn six_columns_qualify_five_do_not() {
        let six = RawTable::positional(vec![row(&["1", "2", "3", "4", "5", "6"])]);
        let five = RawTable::positional(vec![row(&["1", "2", "3", "4", "5"])]);
        assert!(FirstWideTable::default().select(std::slice::from_ref(&six)).is_ok());
        assert!(FirstWideTable::default().select(std::slice::from_ref(&five)).is_err());
    }

    #[test]
    fn normalizer_combines_both_steps() {
        let n = TableSchemaNormalizer::<FirstWideTable>::default();
        let g = n.normalize(&[RawTable::positional(vec![data_row()])]).unwrap();
        assert!(g.has_canonical_schema());
    }
}
