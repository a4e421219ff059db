//! `plot` statements and their curves.

use crate::core::render::{render, render_all};
use crate::core::types::{Curve, CurveSource};

/// Separator between curves: a comma, then a newline indented under `plot `.
pub const CURVE_SEPARATOR: &str = ",\n     ";

/// `plot <curve>,\n     <curve>...`
pub fn plot_fragment(curves: &[Curve]) -> String {
    let parts: Vec<String> = curves.iter().map(curve_fragment).collect();
    format!("plot {}", parts.join(CURVE_SEPARATOR))
}

/// `<source> <options...>`. A data block reference is emitted by name.
pub fn curve_fragment(curve: &Curve) -> String {
    let source = match &curve.source {
        CurveSource::Ref(r) => r.name().to_string(),
        CurveSource::Value(v) => render(v),
    };
    format!("{} {}", source, render_all(&curve.options))
}
