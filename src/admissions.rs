// src/admissions.rs
//
// Typed view over a normalized cutoff grid.
//
// Ranks are parsed per cell; one bad cell yields a `None` rank, never a
// dropped table. Opening <= closing is NOT guaranteed by the source and
// nothing here assumes it.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::consts::CANONICAL_COLUMNS;
use crate::rank::parse_rank;
use crate::schema::CanonicalGrid;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CanonicalRecord {
    pub institute: String,
    pub program: String,
    pub quota: String,
    pub category: String,
    pub gender: String,
    pub opening_rank: Option<f64>,
    pub closing_rank: Option<f64>,
}

impl CanonicalRecord {
    pub fn has_ranks(&self) -> bool {
        self.opening_rank.is_some() && self.closing_rank.is_some()
    }
}

/// Text columns a caller can ask for distinct values of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextColumn {
    Institute,
    Program,
    Quota,
    Category,
    Gender,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AdmissionsTable {
    pub records: Vec<CanonicalRecord>,
}

impl AdmissionsTable {
    /// Build records from a grid. Columns are looked up by canonical name,
    /// so partial schemas degrade to empty text / `None` ranks instead of
    /// failing.
    pub fn from_grid(grid: &CanonicalGrid) -> Self {
        let [institute, program, quota, category, gender, opening, closing] =
            CANONICAL_COLUMNS.map(|name| grid.column_index(name));

        if !grid.has_canonical_schema() {
            logw!("grid lacks canonical columns: {:?}", grid.columns);
        }

        let text = |row: &[String], ix: Option<usize>| -> String {
            ix.and_then(|i| row.get(i)).cloned().unwrap_or_default()
        };
        let rank = |row: &[String], ix: Option<usize>| -> Option<f64> {
            parse_rank(ix.and_then(|i| row.get(i)).map(String::as_str))
        };

        let records = grid
            .rows
            .iter()
            .map(|row| CanonicalRecord {
                institute: text(row, institute),
                program: text(row, program),
                quota: text(row, quota),
                category: text(row, category),
                gender: text(row, gender),
                opening_rank: rank(row, opening),
                closing_rank: rank(row, closing),
            })
            .collect();

        Self { records }
    }

    /// Only records with both ranks present.
    pub fn with_complete_ranks(&self) -> Self {
        Self { records: self.records.iter().filter(|r| r.has_ranks()).cloned().collect() }
    }

    /// Sorted distinct non-empty values of one text column.
    pub fn distinct(&self, column: TextColumn) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| match column {
                TextColumn::Institute => r.institute.as_str(),
                TextColumn::Program => r.program.as_str(),
                TextColumn::Quota => r.quota.as_str(),
                TextColumn::Category => r.category.as_str(),
                TextColumn::Gender => r.gender.as_str(),
            })
            .filter(|v| !v.is_empty())
            .collect();
        set.into_iter().map(str::to_owned).collect()
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
