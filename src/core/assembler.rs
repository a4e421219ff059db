//! Script assembly: fragments in caller order, plus the declared output path.

use super::codegen;
use super::types::Form;

/// An assembled gnuplot script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    /// Fragments in form order
    pub fragments: Vec<String>,
    /// Fragments joined with newlines
    pub text: String,
    /// Path from the last `set output` form, if any
    pub output_path: Option<String>,
}

/// Assemble forms with the standard fragment rules.
pub fn assemble(forms: &[Form]) -> Script {
    assemble_with(forms, codegen::fragment)
}

/// Assemble forms using `render_fn` to produce each fragment.
///
/// The output path is tracked independently of `render_fn`; the last
/// `set output` form wins.
pub fn assemble_with<F>(forms: &[Form], render_fn: F) -> Script
where
    F: Fn(&Form) -> String,
{
    let mut fragments = Vec::with_capacity(forms.len());
    let mut output_path = None;

    for form in forms {
        fragments.push(render_fn(form));
        if let Some(declared) = codegen::output_declaration(form) {
            output_path = declared;
        }
    }

    let text = fragments.join("\n");
    log::debug!(
        "assembled {} fragment(s), {} bytes, output path {:?}",
        fragments.len(),
        text.len(),
        output_path
    );

    Script {
        fragments,
        text,
        output_path,
    }
}
