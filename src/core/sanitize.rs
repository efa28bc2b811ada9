// src/core/sanitize.rs

use serde_json::Value;

/// Collapse runs of whitespace (including NBSP) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Strict numeric parse: surrounding whitespace allowed, nothing else.
/// Non-finite results (`"nan"`, `"inf"`) count as failures.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_number`], but tolerates thousands separators ("1,25,000").
pub fn parse_number_loose(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|&c| c != ',').collect();
    parse_number(&cleaned)
}

/// Coerce a JSON scalar to a finite number. Numeric strings are accepted.
pub fn json_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_number_loose(s),
        _ => None,
    }
}
