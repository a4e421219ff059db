//! Form handlers: one fragment rule per statement kind.
//!
//! Each handler turns the typed arguments of one form into a single fragment
//! of gnuplot source. `core::codegen` picks the handler for a `Form`.

pub mod data;
pub mod define;
pub mod plot;
pub mod setting;
pub mod text;
