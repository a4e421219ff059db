//! Core builder logic: types, rendering, fragment generation, assembly, parsing, execution.

pub mod assembler;
pub mod codegen;
pub mod executor;
pub mod parser;
pub mod render;
pub mod types;
