//! Show the pandoc version.

use serde::Serialize;

use crate::output::{self, OutputFormat};
use pandoc_wrapper::{Converter, ConverterConfig};

#[derive(Debug, Serialize)]
struct VersionInfo {
    executable: String,
    version: String,
}

/// Execute the version command
pub async fn execute(config: ConverterConfig, format: OutputFormat) -> anyhow::Result<()> {
    let converter = Converter::with_config(config)?;
    let version = converter.get_version().await?;

    output::print_item(
        &VersionInfo {
            executable: converter.executable().display().to_string(),
            version,
        },
        format,
    );

    Ok(())
}
