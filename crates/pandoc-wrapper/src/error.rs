//! Unified error type for the pandoc wrapper.
//!
//! Discovery, validation, process execution and configuration failures are
//! consolidated into a single `PandocError` enum.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all pandoc wrapper operations.
#[derive(Debug, Error)]
pub enum PandocError {
    // --- Discovery errors ---
    /// No executable was located on the search path.
    #[error("Unable to locate {program} on PATH")]
    NotFound {
        /// Program name that was searched for.
        program: String,
    },

    /// The given or resolved path is not an executable file.
    #[error("Pandoc executable is not executable: {path}")]
    NotExecutable {
        /// The offending path.
        path: PathBuf,
    },

    // --- Validation errors ---
    /// `from` is not a known input format.
    #[error("{0} is not a valid input format for pandoc")]
    InvalidInputFormat(String),

    /// `to` is not a known output format.
    #[error("{0} is not a valid output format for pandoc")]
    InvalidOutputFormat(String),

    /// A required option is missing or was given without a value.
    #[error("Required option '{0}' is missing or has no value")]
    MissingOption(String),

    // --- Process execution errors ---
    /// Pandoc did not finish within the configured timeout.
    #[error("Pandoc process timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    /// Pandoc exited with a non-zero status (strict mode only).
    #[error("Pandoc exited with code {code}: {stderr}")]
    ProcessFailed {
        /// The exit code.
        code: i32,
        /// Captured stderr output.
        stderr: String,
    },

    /// Pandoc was terminated by a signal (strict mode only).
    #[error("Pandoc process was killed (signal termination)")]
    Killed,

    /// `--version` produced no output line.
    #[error("Pandoc produced no version output")]
    VersionUnavailable,

    // --- Generic errors ---
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PandocError {
    /// Whether the error was raised by option validation, before any process
    /// was spawned.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputFormat(_) | Self::InvalidOutputFormat(_) | Self::MissingOption(_)
        )
    }
}

/// A specialized `Result` type for pandoc wrapper operations.
pub type PandocResult<T> = Result<T, PandocError>;
