//! List the formats the wrapper accepts.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pandoc_wrapper::formats;

/// One row of the format listing
#[derive(Debug, Serialize, Tabled)]
pub struct FormatRow {
    /// Format name as passed to pandoc
    pub name: &'static str,
    /// `input` or `output`
    pub direction: &'static str,
    /// How the result is collected
    pub delivery: &'static str,
}

/// Build the full listing: inputs, text outputs, then binary outputs.
pub fn rows() -> Vec<FormatRow> {
    let inputs = formats::INPUT_FORMATS.iter().map(|&name| FormatRow {
        name,
        direction: "input",
        delivery: "-",
    });
    let outputs = formats::output_formats().map(|name| FormatRow {
        name,
        direction: "output",
        delivery: if formats::is_binary_output_format(name) {
            "file"
        } else {
            "stdout"
        },
    });

    inputs.chain(outputs).collect()
}

/// Execute the formats command
pub fn execute(format: OutputFormat) {
    output::print_list(&rows(), format);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_all_lists() {
        let rows = rows();
        let expected = formats::INPUT_FORMATS.len()
            + formats::STRING_OUTPUT_FORMATS.len()
            + formats::BINARY_OUTPUT_FORMATS.len();
        assert_eq!(rows.len(), expected);

        let pdf = rows
            .iter()
            .find(|r| r.name == "pdf")
            .expect("pdf listed");
        assert_eq!(pdf.direction, "output");
        assert_eq!(pdf.delivery, "file");

        let markdown_in = rows
            .iter()
            .find(|r| r.name == "markdown" && r.direction == "input")
            .expect("markdown input listed");
        assert_eq!(markdown_in.delivery, "-");
    }
}
