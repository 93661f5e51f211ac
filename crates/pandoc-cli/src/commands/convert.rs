//! Convert a document with pandoc.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use pandoc_wrapper::{ConversionOptions, ConversionOutput, Converter, ConverterConfig};

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input format (e.g. markdown, rst, html)
    #[arg(short, long)]
    pub from: String,

    /// Output format (e.g. html, latex, pdf)
    #[arg(short, long)]
    pub to: String,

    /// Input file (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra pandoc option as KEY or KEY=VALUE, without leading dashes
    #[arg(short = 'O', long = "option", value_parser = parse_option)]
    pub options: Vec<(String, Option<String>)>,

    /// Kill pandoc after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Fail if pandoc exits with a non-zero status
    #[arg(long)]
    pub strict: bool,
}

impl ConvertArgs {
    /// Build the ordered option set: `from`, `to`, then extras as given.
    pub fn conversion_options(&self) -> ConversionOptions {
        let mut options = ConversionOptions::conversion(&self.from, &self.to);
        for (key, value) in &self.options {
            options.insert(key.clone(), value.clone());
        }
        options
    }
}

/// Parse `KEY` or `KEY=VALUE`, tolerating leading dashes on the key.
pub fn parse_option(raw: &str) -> Result<(String, Option<String>), String> {
    let (key, value) = match raw.split_once('=') {
        Some((k, v)) => (k, Some(v.to_string())),
        None => (raw, None),
    };

    let key = key.trim_start_matches('-').trim();
    if key.is_empty() {
        return Err(format!("option '{raw}' has an empty name"));
    }

    Ok((key.to_string(), value))
}

/// Execute the convert command
pub async fn execute(args: &ConvertArgs, mut config: ConverterConfig) -> anyhow::Result<()> {
    if args.timeout.is_some() {
        config.timeout_seconds = args.timeout;
    }
    if args.strict {
        config.strict_exit_status = true;
    }

    let content = match &args.input {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read input '{}'", path.display()))?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let mut converter = Converter::with_config(config)?;
    let options = args.conversion_options();

    tracing::info!(from = %args.from, to = %args.to, extra = args.options.len(), "Converting");
    let output = converter.run_with(content, &options).await?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, output.as_bytes())
                .await
                .with_context(|| format!("Failed to write output '{}'", path.display()))?;
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(output.as_bytes()).await?;
            if let ConversionOutput::Text(_) = output {
                stdout.write_all(b"\n").await?;
            }
            stdout.flush().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_flag() {
        assert_eq!(parse_option("standalone"), Ok(("standalone".to_string(), None)));
        assert_eq!(parse_option("--toc"), Ok(("toc".to_string(), None)));
    }

    #[test]
    fn test_parse_option_value() {
        assert_eq!(
            parse_option("toc-depth=2"),
            Ok(("toc-depth".to_string(), Some("2".to_string())))
        );
        assert_eq!(
            parse_option("metadata=title=Hello"),
            Ok(("metadata".to_string(), Some("title=Hello".to_string())))
        );
        assert_eq!(
            parse_option("css="),
            Ok(("css".to_string(), Some(String::new())))
        );
    }

    #[test]
    fn test_parse_option_empty_name() {
        assert!(parse_option("").is_err());
        assert!(parse_option("--=x").is_err());
    }

    #[test]
    fn test_conversion_options_order() {
        let args = ConvertArgs {
            from: "markdown".to_string(),
            to: "html".to_string(),
            input: None,
            output: None,
            options: vec![
                ("standalone".to_string(), None),
                ("template".to_string(), Some("page.html".to_string())),
            ],
            timeout: None,
            strict: false,
        };
        let opts = args.conversion_options();
        let keys: Vec<_> = opts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["from", "to", "standalone", "template"]);
        assert_eq!(opts.value("template"), Some("page.html"));
    }
}
