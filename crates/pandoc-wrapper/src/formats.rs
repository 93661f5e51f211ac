//! Format allow-lists: what pandoc reads, and what it writes as text or as
//! a binary file.

use std::collections::HashSet;
use std::sync::LazyLock;

macro_rules! define_formats {
    ($(#[$meta:meta])* $list:ident, $set:ident => [$($fmt:literal),* $(,)?]) => {
        $(#[$meta])*
        pub const $list: &[&str] = &[$($fmt,)*];

        static $set: LazyLock<HashSet<&'static str>> =
            LazyLock::new(|| HashSet::from([$($fmt,)*]));
    };
}

define_formats! {
    /// Formats pandoc can parse.
    INPUT_FORMATS, INPUT_SET => [
        "docbook",
        "html",
        "json",
        "latex",
        "markdown",
        "markdown_github",
        "markdown_mmd",
        "markdown_phpextra",
        "markdown_strict",
        "mediawiki",
        "native",
        "rst",
        "textile",
    ]
}

define_formats! {
    /// Output formats pandoc writes to standard output.
    STRING_OUTPUT_FORMATS, STRING_OUTPUT_SET => [
        "asciidoc",
        "beamer",
        "context",
        "docbook",
        "dzslides",
        "fb2",
        "html",
        "html5",
        "json",
        "latex",
        "man",
        "markdown",
        "markdown_github",
        "markdown_mmd",
        "markdown_phpextra",
        "markdown_strict",
        "mediawiki",
        "native",
        "opendocument",
        "org",
        "plain",
        "rst",
        "rtf",
        "s5",
        "slideous",
        "slidy",
        "texinfo",
        "textile",
    ]
}

define_formats! {
    /// Output formats pandoc can only write to a file (`-o`).
    BINARY_OUTPUT_FORMATS, BINARY_OUTPUT_SET => [
        "docx",
        "epub",
        "epub3",
        "odt",
        "pdf",
    ]
}

/// Returns `true` if pandoc accepts `format` as an input format.
pub fn is_input_format(format: &str) -> bool {
    INPUT_SET.contains(format)
}

/// Returns `true` if `format` is emitted on standard output.
pub fn is_string_output_format(format: &str) -> bool {
    STRING_OUTPUT_SET.contains(format)
}

/// Returns `true` if `format` must be read back from the output file.
pub fn is_binary_output_format(format: &str) -> bool {
    BINARY_OUTPUT_SET.contains(format)
}

/// Returns `true` for any accepted output format, text or binary.
pub fn is_output_format(format: &str) -> bool {
    is_string_output_format(format) || is_binary_output_format(format)
}

/// All accepted output formats, text formats first.
pub fn output_formats() -> impl Iterator<Item = &'static str> {
    STRING_OUTPUT_FORMATS
        .iter()
        .chain(BINARY_OUTPUT_FORMATS.iter())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_formats() {
        assert!(is_input_format("markdown"));
        assert!(is_input_format("textile"));
        assert!(!is_input_format("docx"));
        assert!(!is_input_format("pdf"));
        assert!(!is_input_format("Markdown"));
        assert_eq!(INPUT_FORMATS.len(), 13);
    }

    #[test]
    fn test_binary_and_string_sets_are_disjoint() {
        for fmt in BINARY_OUTPUT_FORMATS {
            assert!(!is_string_output_format(fmt), "{fmt} in both sets");
        }
    }

    #[test]
    fn test_output_is_union() {
        assert_eq!(
            output_formats().count(),
            STRING_OUTPUT_FORMATS.len() + BINARY_OUTPUT_FORMATS.len()
        );
        for fmt in output_formats() {
            assert!(is_output_format(fmt));
        }
        assert!(is_output_format("pdf"));
        assert!(is_output_format("html5"));
        assert!(!is_output_format("xlsx"));
        assert!(!is_output_format(""));
    }

    #[test]
    fn test_binary_membership() {
        for fmt in ["docx", "epub", "epub3", "odt", "pdf"] {
            assert!(is_binary_output_format(fmt));
        }
        assert!(!is_binary_output_format("html"));
    }
}
