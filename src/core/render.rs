//! Value rendering: host values to gnuplot literal text.
//!
//! Pure and total: every `Value` has a rendering, and `Other` falls back to
//! generic stringification instead of failing.

use super::types::Value;

/// Render a value as gnuplot source text.
///
/// A sequence of exactly one item renders bracketed (`[x]`); two or more
/// items render comma-joined with no brackets (`x,y`). The asymmetry is fixed.
pub fn render(value: &Value) -> String {
    match value {
        Value::Literal(s) => s.clone(),
        Value::Text(s) => quote(s),
        Value::Bareword(s) => s.clone(),
        Value::FlagWord(s) => strip_flag(s).to_string(),
        Value::Sequence(items) => match items.as_slice() {
            [only] => format!("[{}]", render(only)),
            many => many.iter().map(render).collect::<Vec<_>>().join(","),
        },
        Value::Other(v) => stringify(v),
    }
}

/// Render each value and join with single spaces.
pub fn render_all(values: &[Value]) -> String {
    values.iter().map(render).collect::<Vec<_>>().join(" ")
}

/// The underlying text of a value, without string quoting.
/// Used where the raw string matters (output paths, comment text).
pub fn plain(value: &Value) -> String {
    match value {
        Value::Literal(s) | Value::Text(s) | Value::Bareword(s) => s.clone(),
        Value::FlagWord(s) => strip_flag(s).to_string(),
        Value::Other(serde_json::Value::String(s)) => s.clone(),
        other => render(other),
    }
}

/// Encode `s` as a double-quoted gnuplot string constant.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn strip_flag(s: &str) -> &str {
    s.strip_prefix(':').unwrap_or(s)
}

/// Generic stringification for values outside the modelled variants.
fn stringify(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => quote(s),
        other => other.to_string(),
    }
}
