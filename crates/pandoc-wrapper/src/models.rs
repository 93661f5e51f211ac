//! Conversion results.

use std::fmt;

/// What a conversion produced: text captured from standard output, or the
/// bytes of the file written for a binary format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutput {
    /// Standard output lines joined with `\n`.
    Text(String),
    /// Contents of the `-o` target.
    Binary(Vec<u8>),
}

impl ConversionOutput {
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    /// The text, if this is a text result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    /// Raw bytes of either variant.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(s) => s.into_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl fmt::Display for ConversionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Binary(b) => write!(f, "<{} bytes of binary output>", b.len()),
        }
    }
}

/// Everything observed during one conversion.
///
/// `output` is what the lenient API returns. The remaining fields let
/// callers apply their own success criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// The conversion result.
    pub output: ConversionOutput,
    /// Process exit code; `None` if killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output lines.
    pub stdout_lines: Vec<String>,
    /// Captured standard error lines.
    pub stderr_lines: Vec<String>,
    /// Wall-clock duration of the pandoc process.
    pub duration_ms: u64,
}

impl ConversionReport {
    /// Whether pandoc exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
