//! # pandoc-wrapper
//!
//! A thin wrapper around the external `pandoc` executable. Content is
//! written to a per-converter temp file, pandoc is invoked with options
//! rendered as long flags, and the result is read from standard output or,
//! for binary formats (`docx`, `epub`, `epub3`, `odt`, `pdf`), from the
//! file pandoc wrote with `-o`.
//!
//! ## Executable discovery
//!
//! With no explicit path, `pandoc` is searched for on `PATH`. Any
//! executable file is accepted; nothing checks that it really is pandoc.
//!
//! ## Exit status
//!
//! By default the exit status is not checked: whatever pandoc printed or
//! wrote is returned. Use [`Converter::run_with_report`] to inspect exit
//! code and stderr, or set `strict_exit_status` in [`ConverterConfig`].

pub mod config;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod formats;
pub mod models;
pub mod options;

pub use config::{AppConfig, ConverterConfig, LoggingConfig};
pub use converter::{Converter, validate_conversion};
pub use error::{PandocError, PandocResult};
pub use executor::{CommandExecutor, CommandOutput};
pub use models::{ConversionOutput, ConversionReport};
pub use options::ConversionOptions;
