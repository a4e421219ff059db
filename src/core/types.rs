//! Plot vocabulary types: values, data block references, forms, run options,
//! execution results, and the error taxonomy.
//!
//! Everything here is constructed fresh for one builder invocation and dropped
//! once the result is produced.

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

// ============================================================================
// Values
// ============================================================================

/// A form argument, rendered to gnuplot literal syntax by `core::render`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Pre-rendered text, emitted verbatim and never escaped.
    Literal(String),
    /// A string constant, emitted as a double-quoted gnuplot string.
    Text(String),
    /// An unquoted identifier (`pngcairo`, `linespoints`, `sin(x)`).
    Bareword(String),
    /// A keyword-style marker (`:with`, `:title`); the leading `:` is dropped on render.
    FlagWord(String),
    /// Ordered values. One item renders bracketed, two or more render comma-joined.
    Sequence(Vec<Value>),
    /// Anything else (numbers, booleans, maps); rendered by generic stringification.
    Other(serde_json::Value),
}

impl Value {
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn word(s: impl Into<String>) -> Self {
        Self::Bareword(s.into())
    }

    pub fn flag(s: impl Into<String>) -> Self {
        Self::FlagWord(s.into())
    }

    pub fn other(v: impl Into<serde_json::Value>) -> Self {
        Self::Other(v.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Other(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Other(n.into())
    }
}

// ============================================================================
// Data block references
// ============================================================================

/// Sigil that marks a gnuplot data block name.
pub const DATA_BLOCK_SIGIL: char = '$';

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\$[A-Za-z_][A-Za-z0-9_]*$").expect("data block pattern is valid")
    })
}

/// Name of a previously declared data block, e.g. `$data`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableRef(String);

impl VariableRef {
    /// Validate `name` as `$` followed by an identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, PlotError> {
        let name = name.into();
        if reference_pattern().is_match(&name) {
            Ok(Self(name))
        } else {
            Err(PlotError::InvalidReference(name))
        }
    }

    /// True when `s` carries the data block sigil and should be read as a reference.
    pub fn is_reference(s: &str) -> bool {
        s.starts_with(DATA_BLOCK_SIGIL)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Forms
// ============================================================================

/// What a curve draws: a declared data block, or an inline value
/// (a function expression, a quoted file name, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSource {
    Ref(VariableRef),
    Value(Value),
}

/// One curve of a `plot` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub source: CurveSource,
    pub options: Vec<Value>,
}

impl Curve {
    pub fn new(source: CurveSource, options: Vec<Value>) -> Self {
        Self { source, options }
    }

    pub fn of_ref(r: VariableRef, options: Vec<Value>) -> Self {
        Self::new(CurveSource::Ref(r), options)
    }

    pub fn of_value(v: Value, options: Vec<Value>) -> Self {
        Self::new(CurveSource::Value(v), options)
    }
}

/// One statement of the builder vocabulary. Each renders to exactly one fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    Set { name: String, values: Vec<Value> },
    Unset { name: String },
    Plot(Vec<Curve>),
    Curve(Curve),
    Table { name: VariableRef, rows: Vec<Vec<Value>> },
    Data { name: VariableRef, lines: Vec<String> },
    FunctionDef { name: String, params: Vec<String>, body: String },
    ConstDef { name: String, body: String },
    Comment(Vec<Value>),
    Raw(String),
    Reset,
}

impl Form {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Set { .. } => FormKind::Set,
            Self::Unset { .. } => FormKind::Unset,
            Self::Plot(_) => FormKind::Plot,
            Self::Curve(_) => FormKind::Curve,
            Self::Table { .. } => FormKind::Table,
            Self::Data { .. } => FormKind::Data,
            Self::FunctionDef { .. } => FormKind::FunctionDef,
            Self::ConstDef { .. } => FormKind::ConstDef,
            Self::Comment(_) => FormKind::Comment,
            Self::Raw(_) => FormKind::Raw,
            Self::Reset => FormKind::Reset,
        }
    }
}

/// The fixed vocabulary of form heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormKind {
    Set,
    Unset,
    Plot,
    Curve,
    Table,
    Data,
    FunctionDef,
    ConstDef,
    Comment,
    Raw,
    Reset,
}

impl FormKind {
    pub const ALL: [FormKind; 11] = [
        Self::Set,
        Self::Unset,
        Self::Plot,
        Self::Curve,
        Self::Table,
        Self::Data,
        Self::FunctionDef,
        Self::ConstDef,
        Self::Comment,
        Self::Raw,
        Self::Reset,
    ];

    /// Head keyword used in plot documents.
    pub fn head(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Unset => "unset",
            Self::Plot => "plot",
            Self::Curve => "curve",
            Self::Table => "table",
            Self::Data => "data",
            Self::FunctionDef => "function",
            Self::ConstDef => "const",
            Self::Comment => "comment",
            Self::Raw => "raw",
            Self::Reset => "reset",
        }
    }

    /// Look up a head keyword; anything outside the vocabulary is `UnknownForm`.
    pub fn from_head(head: &str) -> Result<Self, PlotError> {
        Self::ALL
            .into_iter()
            .find(|k| k.head() == head)
            .ok_or_else(|| PlotError::UnknownForm(head.to_string()))
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.head())
    }
}

// ============================================================================
// Options, documents, results
// ============================================================================

/// Options recognised by the builder entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Return the script instead of running the interpreter
    pub dry_run: bool,
}

impl RunOptions {
    /// Parse leading `name: value` option pairs, rejecting unknown names.
    pub fn from_pairs(pairs: &IndexMap<String, serde_yaml_ng::Value>) -> Result<Self, PlotError> {
        let mut options = Self::default();
        for (name, value) in pairs {
            match name.as_str() {
                "dry_run" => {
                    options.dry_run = value.as_bool().ok_or_else(|| {
                        PlotError::InvalidOptions(format!(
                            "option 'dry_run' must be a boolean, got {:?}",
                            value
                        ))
                    })?;
                }
                other => {
                    return Err(PlotError::InvalidOptions(format!(
                        "unknown option '{}'",
                        other
                    )))
                }
            }
        }
        Ok(options)
    }
}

/// A parsed plot document: run options plus forms in caller order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotDocument {
    pub options: RunOptions,
    pub forms: Vec<Form>,
}

/// Outcome of one execution, before collapsing to the builder's return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Zero exit with a declared `set output` path
    OutputPath(String),
    /// Zero exit, no output path declared
    CapturedText(String),
    /// Dry run; the interpreter was not invoked
    ScriptText(String),
    /// Nonzero exit, with everything the interpreter wrote
    Failed(String),
}

impl ExecutionResult {
    /// Collapse to the builder's plain return value; `Failed` becomes an error.
    pub fn into_value(self) -> Result<String, PlotError> {
        match self {
            Self::OutputPath(s) | Self::CapturedText(s) | Self::ScriptText(s) => Ok(s),
            Self::Failed(output) => Err(PlotError::Failed { output }),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Every failure the builder surfaces. None are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error("unknown form '{0}'")]
    UnknownForm(String),

    #[error("malformed '{head}' form: {message}")]
    MalformedForm { head: String, message: String },

    #[error("invalid data block reference '{0}' (expected '$' followed by an identifier)")]
    InvalidReference(String),

    #[error("invalid run options: {0}")]
    InvalidOptions(String),

    #[error("plot document parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Io(String),

    #[error("cannot start interpreter '{binary}': {message}")]
    MissingBinary { binary: String, message: String },

    #[error("interpreter exited with an error:\n{output}")]
    Failed { output: String },
}
