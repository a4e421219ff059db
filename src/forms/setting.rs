//! `set`, `unset` and `reset` statements.

use crate::core::render::{plain, render_all};
use crate::core::types::Value;

/// The setting whose first value names the interpreter's output file.
pub const OUTPUT_SETTING: &str = "output";

/// `set <name> <values...>`
pub fn set_fragment(name: &str, values: &[Value]) -> String {
    format!("set {} {}", name, render_all(values))
}

/// `unset <name>`, using the form's own setting name.
pub fn unset_fragment(name: &str) -> String {
    format!("unset {}", name)
}

pub fn reset_fragment() -> String {
    "reset".to_string()
}

/// Output path declared by a `set` form, if it is `set output`.
///
/// `Some(None)` means `set output` with no value: the interpreter falls back
/// to stdout and any earlier path no longer applies.
pub fn declared_output(name: &str, values: &[Value]) -> Option<Option<String>> {
    if name != OUTPUT_SETTING {
        return None;
    }
    Some(values.first().map(plain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_set_joins_values() {
        let vs = vec![Value::word("pngcairo"), Value::word("size"), Value::literal("800,600")];
        assert_eq!(set_fragment("terminal", &vs), "set terminal pngcairo size 800,600");
    }

    #[test]
    fn test_setting_set_quotes_text() {
        let vs = vec![Value::text("out.png")];
        assert_eq!(set_fragment("output", &vs), "set output \"out.png\"");
    }

    #[test]
    fn test_setting_set_without_values() {
        assert_eq!(set_fragment("grid", &[]), "set grid ");
    }

    #[test]
    fn test_setting_unset_uses_own_name() {
        assert_eq!(unset_fragment("key"), "unset key");
        assert_eq!(unset_fragment("output"), "unset output");
    }

    #[test]
    fn test_setting_reset() {
        assert_eq!(reset_fragment(), "reset");
    }

    #[test]
    fn test_setting_declared_output() {
        assert_eq!(
            declared_output("output", &[Value::text("file.png")]),
            Some(Some("file.png".to_string()))
        );
        assert_eq!(declared_output("output", &[]), Some(None));
        assert_eq!(declared_output("terminal", &[Value::word("png")]), None);
    }

    #[test]
    fn test_setting_declared_output_bareword_and_literal() {
        assert_eq!(
            declared_output("output", &[Value::word("a.svg")]),
            Some(Some("a.svg".to_string()))
        );
        assert_eq!(
            declared_output("output", &[Value::literal("'b.svg'")]),
            Some(Some("'b.svg'".to_string()))
        );
    }
}
