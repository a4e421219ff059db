//! Local interpreter process.

use super::ExecOutput;
use crate::core::types::PlotError;
use std::io::{self, ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

/// Run `binary` with `script` as its complete stdin and wait for it to exit.
///
/// The script is written from a helper thread while stdout and stderr are
/// drained, so large scripts cannot stall on a full pipe. An interpreter that
/// exits before reading all of its input is not an error; its exit status
/// decides the outcome.
pub fn exec_local(binary: &str, script: &str) -> Result<ExecOutput, PlotError> {
    let mut child = Command::new(binary)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PlotError::MissingBinary {
            binary: binary.to_string(),
            message: e.to_string(),
        })?;

    let writer = child.stdin.take().map(|mut stdin| {
        let script = script.to_owned();
        thread::spawn(move || match stdin.write_all(script.as_bytes()) {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            result => result,
        })
    });

    let waited = child.wait_with_output();
    // join the writer before either error is returned
    let written = join_writer(writer);
    let output = waited.map_err(|e| PlotError::Io(format!("wait error: {}", e)))?;
    written?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

fn join_writer(writer: Option<JoinHandle<io::Result<()>>>) -> Result<(), PlotError> {
    match writer {
        Some(handle) => handle
            .join()
            .map_err(|_| PlotError::Io("stdin writer panicked".to_string()))?
            .map_err(|e| PlotError::Io(format!("stdin write error: {}", e))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_script_on_stdin() {
        let out = exec_local("cat", "set terminal dumb\nplot x").unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "set terminal dumb\nplot x");
    }

    #[test]
    fn test_local_failure_exit_code() {
        let out = exec_local("sh", "exit 42").unwrap();
        assert!(!out.success());
        assert_eq!(out.exit_code, 42);
    }

    #[test]
    fn test_local_captures_both_streams() {
        let out = exec_local("sh", "echo out\necho err >&2\nexit 3").unwrap();
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert_eq!(out.combined(), "out\nerr\n");
    }

    #[test]
    fn test_local_missing_binary() {
        let err = exec_local("/nonexistent/bin/gnuplot", "plot x").unwrap_err();
        assert!(matches!(
            err,
            PlotError::MissingBinary { ref binary, .. } if binary == "/nonexistent/bin/gnuplot"
        ));
    }

    #[test]
    fn test_local_large_script_does_not_stall() {
        let script = "0 0\n".repeat(256 * 1024);
        let out = exec_local("cat", &script).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.len(), script.len());
    }

    #[test]
    fn test_local_interpreter_ignores_input() {
        // `true` exits without reading; the broken pipe is tolerated
        let script = "x\n".repeat(512 * 1024);
        let out = exec_local("true", &script).unwrap();
        assert!(out.success());
        assert!(out.stdout.is_empty());
    }

    #[test]
    fn test_local_join_writer_reports_write_error() {
        let handle = thread::spawn(|| -> io::Result<()> {
            Err(io::Error::new(ErrorKind::Other, "disk on fire"))
        });
        let err = join_writer(Some(handle)).unwrap_err();
        assert_eq!(err, PlotError::Io("stdin write error: disk on fire".to_string()));
    }

    #[test]
    fn test_local_join_writer_waits_for_thread() {
        let done = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = done.clone();
        let handle = thread::spawn(move || {
            thread::sleep(std::time::Duration::from_millis(20));
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        });
        join_writer(Some(handle)).unwrap();
        assert!(done.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(join_writer(None), Ok(()));
    }

    #[test]
    fn test_local_signal_killed() {
        let out = exec_local("sh", "kill -9 $$").unwrap();
        assert_eq!(out.exit_code, -1);
        assert!(!out.success());
    }
}
