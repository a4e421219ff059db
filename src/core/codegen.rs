//! Fragment generation: dispatch each form to its handler.
//!
//! Every `Form` variant maps to exactly one handler in `crate::forms`, so
//! dispatch cannot fail once a form has been constructed.

use super::types::Form;
use crate::forms;

/// Render one form to its gnuplot fragment.
pub fn fragment(form: &Form) -> String {
    match form {
        Form::Set { name, values } => forms::setting::set_fragment(name, values),
        Form::Unset { name } => forms::setting::unset_fragment(name),
        Form::Plot(curves) => forms::plot::plot_fragment(curves),
        Form::Curve(curve) => forms::plot::curve_fragment(curve),
        Form::Table { name, rows } => forms::data::table_fragment(name, rows),
        Form::Data { name, lines } => forms::data::data_fragment(name, lines),
        Form::FunctionDef { name, params, body } => {
            forms::define::function_fragment(name, params, body)
        }
        Form::ConstDef { name, body } => forms::define::const_fragment(name, body),
        Form::Comment(parts) => forms::text::comment_fragment(parts),
        Form::Raw(text) => forms::text::raw_fragment(text),
        Form::Reset => forms::setting::reset_fragment(),
    }
}

/// Output path change declared by a form, if any (see `forms::setting::declared_output`).
pub fn output_declaration(form: &Form) -> Option<Option<String>> {
    match form {
        Form::Set { name, values } => forms::setting::declared_output(name, values),
        _ => None,
    }
}
