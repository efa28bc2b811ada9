// src/core/html.rs
//! Table and form-state extraction from raw HTML.
//!
//! The admissions page is server-rendered ASP.NET markup: a handful of
//! layout tables around one wide GridView. We do not try to pick the right
//! table here; every `<table>` is returned in document order as a
//! [`RawTable`] and selection happens in `schema`.
//!
//! Conventions:
//! - A table owns only its *direct* rows (`table > tr`, `table > thead|tbody|tfoot > tr`),
//!   so nested layout tables do not bleed into their parents.
//! - Leading rows in `<thead>` or made only of `<th>` cells are header rows;
//!   the last of them names the columns.
//! - `colspan` repeats the cell value across the span. `rowspan` is ignored.
//! - Cell text is whitespace-normalized; entities are decoded by the parser.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;
use crate::schema::RawTable;

// Upper bound on a single colspan
const MAX_COLSPAN: usize = 64;

/// Every table in the document, outermost first.
pub fn extract_tables(doc: &str) -> Vec<RawTable> {
    let html = Html::parse_document(doc);
    let Ok(table_sel) = Selector::parse("table") else {
        return Vec::new();
    };
    html.select(&table_sel).map(read_table).collect()
}

/// `name -> value` for every `<input>` carrying both attributes.
/// Values are returned untouched.
pub fn input_values(doc: &str) -> HashMap<String, String> {
    let html = Html::parse_document(doc);
    let Ok(input_sel) = Selector::parse("input") else {
        return HashMap::new();
    };
    html.select(&input_sel)
        .filter_map(|input| {
            let el = input.value();
            Some((s!(el.attr("name")?), s!(el.attr("value")?)))
        })
        .collect()
}

fn read_table(table: ElementRef<'_>) -> RawTable {
    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (tr, in_thead) in direct_rows(table) {
        let (cells, all_th) = read_cells(tr);
        if cells.is_empty() {
            continue;
        }
        // Header rows only count before the first data row
        if rows.is_empty() && (in_thead || all_th) {
            header = Some(cells);
        } else {
            rows.push(cells);
        }
    }

    match header {
        Some(names) => RawTable::named(names, rows),
        None => RawTable::positional(rows),
    }
}

/// `<tr>` elements that belong to this table and not to a nested one,
/// flagged when they sit inside `<thead>`.
fn direct_rows(table: ElementRef<'_>) -> Vec<(ElementRef<'_>, bool)> {
    let mut out = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => out.push((child, false)),
            section @ ("thead" | "tbody" | "tfoot") => {
                let in_thead = section == "thead";
                out.extend(
                    child
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|el| el.value().name() == "tr")
                        .map(|tr| (tr, in_thead)),
                );
            }
            _ => {}
        }
    }
    out
}

/// Cell texts of one row (colspans expanded), and whether every cell was `<th>`.
fn read_cells(tr: ElementRef<'_>) -> (Vec<String>, bool) {
    let mut cells = Vec::new();
    let mut all_th = true;
    for cell in tr.children().filter_map(ElementRef::wrap) {
        let name = cell.value().name();
        if name != "td" && name != "th" {
            continue;
        }
        all_th &= name == "th";

        let text = normalize_ws(&cell.text().collect::<String>());
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);
        cells.extend(std::iter::repeat_n(text, span));
    }
    (cells, all_th)
}
