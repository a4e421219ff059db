//! CLI subcommands: init, validate, render, run, completions.

use crate::core::types::{FormKind, PlotError};
use crate::core::{assembler, executor, parser};
use crate::transport::{LocalTransport, DEFAULT_BINARY};
use clap::{Command, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a starter plot document
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Parse a plot document and report its forms
    Validate {
        /// Path to the plot document
        #[arg(short, long, default_value = "plot.yaml")]
        file: PathBuf,
    },

    /// Print the assembled gnuplot script without running it
    Render {
        /// Path to the plot document
        #[arg(short, long, default_value = "plot.yaml")]
        file: PathBuf,
    },

    /// Run the script through gnuplot
    Run {
        /// Path to the plot document
        #[arg(short, long, default_value = "plot.yaml")]
        file: PathBuf,

        /// Print the script instead of running gnuplot (overrides the document)
        #[arg(long)]
        dry_run: bool,

        /// Interpreter binary
        #[arg(long, env = "PLOTSCRIPT_GNUPLOT", default_value = DEFAULT_BINARY)]
        gnuplot: String,

        /// Print the full execution result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), PlotError> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Render { file } => cmd_render(&file),
        Commands::Run {
            file,
            dry_run,
            gnuplot,
            json,
        } => cmd_run(&file, dry_run, &gnuplot, json),
        Commands::Completions { shell } => {
            let mut cmd = Commands::augment_subcommands(Command::new("plotscript"));
            clap_complete::generate(shell, &mut cmd, "plotscript", &mut std::io::stdout());
            Ok(())
        }
    }
}

const TEMPLATE: &str = r#"# plotscript document
options:
  dry_run: false

forms:
  - comment: [!text "generated by plotscript"]
  - set: [terminal, pngcairo, size, !raw "800,600"]
  - set: [output, !text plot.png]
  - set: [title, !text "Triangle"]
  - table: [$data, [[0, 0], [1, 1], [2, 0]]]
  - plot:
      - [$data, !flag with, linespoints, !flag title, !text "points"]
      - [!raw "sin(x)", !flag notitle]
"#;

fn cmd_init(path: &Path) -> Result<(), PlotError> {
    let doc_path = path.join("plot.yaml");
    if doc_path.exists() {
        return Err(PlotError::Io(format!("{} already exists", doc_path.display())));
    }
    std::fs::create_dir_all(path)
        .map_err(|e| PlotError::Io(format!("cannot create {}: {}", path.display(), e)))?;
    std::fs::write(&doc_path, TEMPLATE)
        .map_err(|e| PlotError::Io(format!("cannot write {}: {}", doc_path.display(), e)))?;

    println!("Created {}", doc_path.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), PlotError> {
    emit(&validate_report(file)?);
    Ok(())
}

/// Summary of a plot document: form counts per kind and the declared output.
fn validate_report(file: &Path) -> Result<String, PlotError> {
    let doc = parser::parse_document_file(file)?;
    let script = assembler::assemble(&doc.forms);

    let mut counts: BTreeMap<FormKind, usize> = BTreeMap::new();
    for form in &doc.forms {
        *counts.entry(form.kind()).or_default() += 1;
    }

    let mut lines = vec![format!(
        "OK: {} ({} forms, dry_run: {})",
        file.display(),
        doc.forms.len(),
        doc.options.dry_run
    )];
    for (kind, n) in &counts {
        lines.push(format!("  {}: {}", kind, n));
    }
    if let Some(path) = &script.output_path {
        lines.push(format!("  output: {}", path));
    }
    Ok(lines.join("\n"))
}

fn cmd_render(file: &Path) -> Result<(), PlotError> {
    emit(&render_script(file)?);
    Ok(())
}

fn render_script(file: &Path) -> Result<String, PlotError> {
    let doc = parser::parse_document_file(file)?;
    Ok(assembler::assemble(&doc.forms).text)
}

fn cmd_run(file: &Path, dry_run: bool, gnuplot: &str, json: bool) -> Result<(), PlotError> {
    let report = run_report(file, dry_run, gnuplot, json)?;
    emit(&report.text);
    report.status
}

/// What a run prints, and whether the run counts as a success.
/// With `--json` a failed run still prints its result before reporting the error.
struct RunReport {
    text: String,
    status: Result<(), PlotError>,
}

fn run_report(file: &Path, dry_run: bool, gnuplot: &str, json: bool) -> Result<RunReport, PlotError> {
    let doc = parser::parse_document_file(file)?;
    let mut options = doc.options;
    options.dry_run |= dry_run;

    let transport = LocalTransport::new(gnuplot);
    let result = executor::execute_forms(&doc.forms, &options, &transport)?;

    if json {
        let text = serde_json::to_string_pretty(&result)
            .map_err(|e| PlotError::Io(format!("cannot encode result: {}", e)))?;
        return Ok(RunReport {
            text,
            status: result.into_value().map(|_| ()),
        });
    }

    Ok(RunReport {
        text: result.into_value()?,
        status: Ok(()),
    })
}

/// Print `text`, ending with exactly one newline.
fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
