//! Configuration for the converter and its host application.
//!
//! All structs deserialize from TOML via the `config` crate, with
//! `PANDOC_WRAP__`-prefixed environment variables layered on top
//! (e.g. `PANDOC_WRAP__CONVERTER__TIMEOUT_SECONDS=30`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{PandocError, PandocResult};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PANDOC_WRAP";

/// Converter settings.
///
/// The defaults reproduce the lenient behaviour of the classic wrapper:
/// no timeout, exit status ignored, one temp file used for both input and
/// binary output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Path to the pandoc executable. Empty or unset means search `PATH`.
    pub executable: Option<PathBuf>,

    /// Directory for the per-converter temp file. Defaults to the system
    /// temp directory.
    pub temp_dir: Option<PathBuf>,

    /// Kill pandoc if it runs longer than this many seconds.
    #[validate(range(min = 1, max = 86400))]
    pub timeout_seconds: Option<u64>,

    /// Fail conversions whose process exits non-zero or is killed.
    pub strict_exit_status: bool,

    /// Write binary output to a second temp path instead of overwriting
    /// the input file.
    pub separate_output_file: bool,
}

impl ConverterConfig {
    /// Validate field ranges.
    pub fn check(&self) -> PandocResult<()> {
        self.validate()
            .map_err(|e| PandocError::Configuration(format!("Invalid converter config: {e}")))
    }

    /// Resolve the effective temp directory.
    pub fn effective_temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// The process timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

/// Root configuration for applications embedding the converter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Converter settings.
    #[serde(default)]
    pub converter: ConverterConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file plus environment
    /// variables, then validate it.
    pub fn load(path: Option<&Path>) -> PandocResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| PandocError::Configuration(format!("Failed to build config: {e}")))?;

        let config: AppConfig = settings.try_deserialize().map_err(|e| {
            PandocError::Configuration(format!("Failed to deserialize config: {e}"))
        })?;

        config.converter.check()?;
        Ok(config)
    }
}
