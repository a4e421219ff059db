//! Interpreter transport: feed a script on stdin, observe output and exit status.

pub mod local;

use crate::core::types::PlotError;

/// Binary used when no interpreter is configured.
pub const DEFAULT_BINARY: &str = "gnuplot";

/// Output from running a script through the interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr, as one text.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len());
        text.push_str(&self.stdout);
        text.push_str(&self.stderr);
        text
    }
}

/// Something that can run a complete script and report what happened.
///
/// Implementations block until the interpreter exits and its output is drained.
/// Failing to start the interpreter is `PlotError::MissingBinary`.
pub trait Transport {
    /// Name of the interpreter, for diagnostics.
    fn binary(&self) -> &str;

    fn exec(&self, script: &str) -> Result<ExecOutput, PlotError>;
}

/// Runs the interpreter as a local child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTransport {
    binary: String,
}

impl LocalTransport {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl Transport for LocalTransport {
    fn binary(&self) -> &str {
        &self.binary
    }

    fn exec(&self, script: &str) -> Result<ExecOutput, PlotError> {
        local::exec_local(&self.binary, script)
    }
}
