//! Comments and raw passthrough.

use crate::core::render::plain;
use crate::core::types::Value;

/// `# ` followed by the parts' text concatenated without separators.
pub fn comment_fragment(parts: &[Value]) -> String {
    let text: String = parts.iter().map(plain).collect();
    format!("# {}", text)
}

/// Raw text is never escaped.
pub fn raw_fragment(text: &str) -> String {
    text.to_string()
}
