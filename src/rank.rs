// src/rank.rs
//
// Rank cells from the cutoff table. Most are plain integers; some carry a
// qualifier: a trailing "P" (preparatory/PwD overflow rank) or a literal
// " (PwD)" suffix. The qualifier is dropped and the magnitude kept.

use crate::core::sanitize::parse_number;

pub const PWD_SUFFIX: &str = " (PwD)";
pub const OVERFLOW_MARK: char = 'P';

/// Parse one rank cell. Total: anything unparseable is `None`.
pub fn parse_rank(cell: Option<&str>) -> Option<f64> {
    let raw = cell?.trim();
    if raw.is_empty() {
        return None;
    }
    let s = raw.strip_suffix(PWD_SUFFIX).unwrap_or(raw);
    let s = s.strip_suffix(OVERFLOW_MARK).unwrap_or(s);
    parse_number(s)
}
