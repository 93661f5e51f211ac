//! External process execution.
//!
//! Runs the converter binary as a child process, capturing standard output
//! and standard error line by line together with the exit status.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, error};

use crate::error::{PandocError, PandocResult};

/// Captured result of one process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output split into lines, without terminators.
    pub stdout_lines: Vec<String>,
    /// Standard error split into lines, without terminators.
    pub stderr_lines: Vec<String>,
    /// Exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Wall-clock duration of the invocation.
    pub duration_ms: u64,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Standard output lines joined with `\n`.
    pub fn stdout_text(&self) -> String {
        self.stdout_lines.join("\n")
    }

    /// Standard error lines joined with `\n`.
    pub fn stderr_text(&self) -> String {
        self.stderr_lines.join("\n")
    }
}

/// Runs external commands with an optional timeout.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    timeout: Option<Duration>,
}

impl CommandExecutor {
    /// Create an executor. `None` waits for the child indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run `program` with `args` and capture its output.
    ///
    /// A non-zero exit status is not an error here; callers decide how
    /// strict to be. The child is killed if the timeout elapses.
    pub async fn execute(&self, program: &Path, args: &[String]) -> PandocResult<CommandOutput> {
        let start = Instant::now();

        debug!(
            program = %program.display(),
            args = ?args,
            "Spawning external command"
        );

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    error!(
                        program = %program.display(),
                        timeout_seconds = limit.as_secs(),
                        "External command timed out"
                    );
                    return Err(PandocError::Timeout {
                        timeout_seconds: limit.as_secs(),
                    });
                }
            },
            None => cmd.output().await,
        };

        let output = output.map_err(|e| {
            error!(program = %program.display(), error = %e, "Failed to execute command");
            PandocError::Io(e)
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let result = CommandOutput {
            stdout_lines: split_lines(&output.stdout),
            stderr_lines: split_lines(&output.stderr),
            exit_code: output.status.code(),
            duration_ms,
        };

        debug!(
            program = %program.display(),
            exit_code = ?result.exit_code,
            duration_ms,
            stdout_lines = result.stdout_lines.len(),
            "External command finished"
        );

        Ok(result)
    }
}

fn split_lines(raw: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(raw)
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines(b"a\nb\r\nc\n"), vec!["a", "b", "c"]);
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![""]);
    }

    #[test]
    fn test_command_output_helpers() {
        let out = CommandOutput {
            stdout_lines: vec!["<p>a</p>".to_string(), "<p>b</p>".to_string()],
            stderr_lines: vec!["warning".to_string()],
            exit_code: Some(0),
            duration_ms: 1,
        };
        assert!(out.success());
        assert_eq!(out.stdout_text(), "<p>a</p>\n<p>b</p>");
        assert_eq!(out.stderr_text(), "warning");

        let killed = CommandOutput {
            exit_code: None,
            ..out
        };
        assert!(!killed.success());
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let executor = CommandExecutor::default();
        let err = executor
            .execute(Path::new("/nonexistent/pandoc-binary"), &[])
            .await
            .expect_err("should fail to spawn");
        assert!(matches!(err, PandocError::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_streams_and_exit_code() {
        let executor = CommandExecutor::new(Some(Duration::from_secs(10)));
        let args = vec![
            "-c".to_string(),
            "echo one; echo two; echo oops >&2; exit 4".to_string(),
        ];
        let out = executor
            .execute(Path::new("/bin/sh"), &args)
            .await
            .expect("sh should run");
        assert_eq!(out.stdout_lines, vec!["one", "two"]);
        assert_eq!(out.stderr_lines, vec!["oops"]);
        assert_eq!(out.exit_code, Some(4));
        assert!(!out.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let executor = CommandExecutor::new(Some(Duration::from_millis(200)));
        let args = vec!["-c".to_string(), "sleep 5".to_string()];
        let err = executor
            .execute(Path::new("/bin/sh"), &args)
            .await
            .expect_err("should time out");
        assert!(matches!(err, PandocError::Timeout { .. }));
    }
}
