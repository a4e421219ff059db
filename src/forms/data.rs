//! Inline data blocks (`$name << EOD ... EOD`).

use crate::core::render::render;
use crate::core::types::{Value, VariableRef};

/// Heredoc terminator for data blocks.
pub const EOD: &str = "EOD";

/// `$name << EOD\n<lines>\nEOD`
pub fn data_fragment(name: &VariableRef, lines: &[String]) -> String {
    format!("{} << {}\n{}\n{}", name, EOD, lines.join("\n"), EOD)
}

/// A table is a data block with one line per row, cells separated by a space.
pub fn table_fragment(name: &VariableRef, rows: &[Vec<Value>]) -> String {
    let body = rows
        .iter()
        .map(|row| row.iter().map(render).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    data_fragment(name, &[body])
}
