//! CLI command definitions and dispatch.

pub mod convert;
pub mod formats;
pub mod version;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use pandoc_wrapper::{AppConfig, ConverterConfig};

/// pandoc-wrap — run pandoc conversions through a validating wrapper
#[derive(Debug, Parser)]
#[command(name = "pandoc-wrap", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the pandoc executable (default: search PATH)
    #[arg(short, long, global = true)]
    pub executable: Option<PathBuf>,

    /// Output format for listings
    #[arg(long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a document
    Convert(convert::ConvertArgs),
    /// Show the pandoc version
    Version,
    /// List supported input and output formats
    Formats,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> anyhow::Result<()> {
        let converter_config = self.converter_config(config.converter);

        match &self.command {
            Commands::Convert(args) => convert::execute(args, converter_config).await,
            Commands::Version => version::execute(converter_config, self.format).await,
            Commands::Formats => {
                formats::execute(self.format);
                Ok(())
            }
        }
    }

    /// Apply command-line overrides on top of the loaded configuration.
    fn converter_config(&self, mut config: ConverterConfig) -> ConverterConfig {
        if let Some(ref executable) = self.executable {
            config.executable = Some(executable.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pandoc-wrap",
            "convert",
            "-f",
            "markdown",
            "-t",
            "html",
            "--config",
            "wrap.toml",
        ])
        .expect("global --config");
        assert_eq!(cli.config, Some(PathBuf::from("wrap.toml")));
        assert!(matches!(cli.command, Commands::Convert(_)));
    }

    #[test]
    fn test_config_accepted_before_subcommand() {
        let cli = Cli::try_parse_from(["pandoc-wrap", "--config", "wrap.toml", "formats"])
            .expect("--config before subcommand");
        assert_eq!(cli.config, Some(PathBuf::from("wrap.toml")));
    }
}
