//! Execution: run an assembled script through the interpreter, or skip it on dry run.
//!
//! forms → assemble → (dry run: script text) | (transport → exit status → result)

use super::assembler::{self, Script};
use super::parser;
use super::types::*;
use crate::transport::Transport;

/// Run an assembled script and classify the outcome.
///
/// Dry run returns the script text without touching `transport`. Otherwise the
/// interpreter's exit status decides: zero gives the declared output path (or the
/// captured output when none was declared), nonzero gives `Failed` with the
/// captured output. An interpreter that cannot be started is an error.
pub fn run(
    script: &Script,
    options: &RunOptions,
    transport: &dyn Transport,
) -> Result<ExecutionResult, PlotError> {
    if options.dry_run {
        log::info!("dry run: skipping {}", transport.binary());
        return Ok(ExecutionResult::ScriptText(script.text.clone()));
    }

    log::info!(
        "running {} ({} fragment(s))",
        transport.binary(),
        script.fragments.len()
    );
    let out = transport.exec(&script.text)?;
    let captured = out.combined();

    if !out.success() {
        log::warn!("{} exited with status {}", transport.binary(), out.exit_code);
        return Ok(ExecutionResult::Failed(captured));
    }

    Ok(match &script.output_path {
        Some(path) => ExecutionResult::OutputPath(path.clone()),
        None => ExecutionResult::CapturedText(captured),
    })
}

/// Assemble `forms` and run them, keeping the full `ExecutionResult`.
pub fn execute_forms(
    forms: &[Form],
    options: &RunOptions,
    transport: &dyn Transport,
) -> Result<ExecutionResult, PlotError> {
    let script = assembler::assemble(forms);
    run(&script, options, transport)
}

/// The builder entry point: forms and options in, plain value out.
///
/// Returns the script text (dry run), the declared output path, or the captured
/// interpreter output. A nonzero exit becomes `PlotError::Failed`.
pub fn execute(
    forms: &[Form],
    options: &RunOptions,
    transport: &dyn Transport,
) -> Result<String, PlotError> {
    execute_forms(forms, options, transport)?.into_value()
}

/// Parse a plot document and run it. Parse errors, including unknown forms,
/// are raised before the interpreter is started.
pub fn execute_document(yaml: &str, transport: &dyn Transport) -> Result<String, PlotError> {
    let doc = parser::parse_document(yaml)?;
    execute(&doc.forms, &doc.options, transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ExecOutput, LocalTransport};
    use std::cell::RefCell;

    /// Records every script it is asked to run and answers with a canned output.
    struct SpyTransport {
        reply: ExecOutput,
        calls: RefCell<Vec<String>>,
    }

    impl SpyTransport {
        fn replying(exit_code: i32, stdout: &str, stderr: &str) -> Self {
            Self {
                reply: ExecOutput {
                    exit_code,
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for SpyTransport {
        fn binary(&self) -> &str {
            "spy"
        }

        fn exec(&self, script: &str) -> Result<ExecOutput, PlotError> {
            self.calls.borrow_mut().push(script.to_string());
            Ok(self.reply.clone())
        }
    }

    fn set(name: &str, values: Vec<Value>) -> Form {
        Form::Set {
            name: name.to_string(),
            values,
        }
    }

    fn triangle_forms() -> Vec<Form> {
        let data = VariableRef::new("$data").unwrap();
        vec![
            set("terminal", vec![Value::word("pngcairo")]),
            set("output", vec![Value::text("out.png")]),
            Form::Table {
                name: data.clone(),
                rows: vec![
                    vec![Value::from(0_i64), Value::from(0_i64)],
                    vec![Value::from(1_i64), Value::from(1_i64)],
                    vec![Value::from(2_i64), Value::from(0_i64)],
                ],
            },
            Form::Plot(vec![Curve::of_ref(
                data,
                vec![
                    Value::flag("with"),
                    Value::word("linespoints"),
                    Value::flag("title"),
                    Value::text("Triangle"),
                ],
            )]),
        ]
    }

    const TRIANGLE_SCRIPT: &str = "set terminal pngcairo\n\
set output \"out.png\"\n\
$data << EOD\n\
0 0\n\
1 1\n\
2 0\n\
EOD\n\
plot $data with linespoints title \"Triangle\"";

    fn dry() -> RunOptions {
        RunOptions { dry_run: true }
    }

    #[test]
    fn test_executor_dry_run_end_to_end() {
        let spy = SpyTransport::replying(0, "", "");
        let result = execute(&triangle_forms(), &dry(), &spy).unwrap();
        assert_eq!(result, TRIANGLE_SCRIPT);
        assert!(spy.calls().is_empty());
    }

    #[test]
    fn test_executor_dry_run_is_fragment_join() {
        let spy = SpyTransport::replying(1, "", "never used");
        let forms = vec![
            Form::Comment(vec![Value::text("t")]),
            Form::Reset,
            Form::Raw("plot x".into()),
        ];
        let result = execute_forms(&forms, &dry(), &spy).unwrap();
        assert_eq!(result, ExecutionResult::ScriptText("# t\nreset\nplot x".into()));
        assert!(spy.calls().is_empty());
    }

    #[test]
    fn test_executor_output_path_on_success() {
        let spy = SpyTransport::replying(0, "ignored", "");
        let forms = vec![
            set("output", vec![Value::text("file.png")]),
            Form::Raw("plot x".into()),
        ];
        let result = execute_forms(&forms, &RunOptions::default(), &spy).unwrap();
        assert_eq!(result, ExecutionResult::OutputPath("file.png".into()));
        assert_eq!(spy.calls(), vec!["set output \"file.png\"\nplot x".to_string()]);
    }

    #[test]
    fn test_executor_captured_text_without_output() {
        let spy = SpyTransport::replying(0, "ascii plot\n", "warning: x\n");
        let forms = vec![Form::Raw("plot x".into())];
        let result = execute_forms(&forms, &RunOptions::default(), &spy).unwrap();
        assert_eq!(
            result,
            ExecutionResult::CapturedText("ascii plot\nwarning: x\n".into())
        );
    }

    #[test]
    fn test_executor_nonzero_exit_fails_with_output() {
        for forms in [
            vec![Form::Raw("plot y".into())],
            vec![set("output", vec![Value::text("o.png")]), Form::Raw("plot y".into())],
        ] {
            let spy = SpyTransport::replying(1, "", "undefined variable: y\n");
            let result = execute_forms(&forms, &RunOptions::default(), &spy).unwrap();
            assert_eq!(result, ExecutionResult::Failed("undefined variable: y\n".into()));
        }
    }

    #[test]
    fn test_executor_failed_is_raised_by_entry_point() {
        let spy = SpyTransport::replying(2, "partial\n", "boom\n");
        let err = execute(&[Form::Reset], &RunOptions::default(), &spy).unwrap_err();
        assert_eq!(
            err,
            PlotError::Failed {
                output: "partial\nboom\n".into()
            }
        );
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_executor_missing_binary_propagates() {
        let t = LocalTransport::new("/nonexistent/gnuplot");
        let err = execute(&[Form::Reset], &RunOptions::default(), &t).unwrap_err();
        assert!(matches!(err, PlotError::MissingBinary { .. }));
    }

    #[test]
    fn test_executor_missing_binary_skipped_on_dry_run() {
        let t = LocalTransport::new("/nonexistent/gnuplot");
        assert_eq!(execute(&[Form::Reset], &dry(), &t).unwrap(), "reset");
    }

    #[test]
    fn test_executor_document_end_to_end() {
        let spy = SpyTransport::replying(0, "", "");
        let yaml = r#"
options:
  dry_run: true
forms:
  - set: [terminal, pngcairo]
  - set: [output, !text out.png]
  - table: [$data, [[0, 0], [1, 1], [2, 0]]]
  - plot:
      - [$data, !flag with, linespoints, !flag title, !text Triangle]
"#;
        assert_eq!(execute_document(yaml, &spy).unwrap(), TRIANGLE_SCRIPT);
        assert!(spy.calls().is_empty());
    }

    #[test]
    fn test_executor_unknown_form_before_exec() {
        let spy = SpyTransport::replying(0, "", "");
        let yaml = "forms:\n  - set: [terminal, dumb]\n  - histogram: [x]\n";
        let err = execute_document(yaml, &spy).unwrap_err();
        assert_eq!(err, PlotError::UnknownForm("histogram".into()));
        assert!(spy.calls().is_empty());
    }

    #[test]
    fn test_executor_local_interpreter_output() {
        // `cat` stands in for the interpreter and echoes the script back
        let t = LocalTransport::new("cat");
        let forms = vec![Form::Raw("print 1".into())];
        assert_eq!(
            execute(&forms, &RunOptions::default(), &t).unwrap(),
            "print 1"
        );
    }
}
