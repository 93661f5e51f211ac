//! The converter: validates options, stages content in a temp file, runs
//! pandoc and collects the result.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::ConverterConfig;
use crate::discovery;
use crate::error::{PandocError, PandocResult};
use crate::executor::CommandExecutor;
use crate::formats;
use crate::models::{ConversionOutput, ConversionReport};
use crate::options::{ConversionOptions, FROM, TO};

/// Prefix of the per-converter temp file name.
const TEMP_FILE_PREFIX: &str = "pandoc";

/// Suffix of the separate binary output file, when enabled.
const OUTPUT_FILE_SUFFIX: &str = ".out";

/// Check that `from` and `to` are present and name known formats.
///
/// Pure; nothing is written or spawned.
pub fn validate_conversion(options: &ConversionOptions) -> PandocResult<()> {
    let from = required(options, FROM)?;
    let to = required(options, TO)?;

    if !formats::is_input_format(from) {
        return Err(PandocError::InvalidInputFormat(from.to_string()));
    }

    if !formats::is_output_format(to) {
        return Err(PandocError::InvalidOutputFormat(to.to_string()));
    }

    Ok(())
}

fn required<'a>(options: &'a ConversionOptions, key: &str) -> PandocResult<&'a str> {
    options
        .value(key)
        .ok_or_else(|| PandocError::MissingOption(key.to_string()))
}

/// Wrapper around one pandoc executable and one temp file.
///
/// The temp file path is fixed when the converter is built and the file is
/// removed when the converter is dropped. Conversions take `&mut self`:
/// one instance runs one conversion at a time.
#[derive(Debug)]
pub struct Converter {
    /// Validated executable path.
    executable: PathBuf,
    /// Input payload location, and `-o` target unless a separate output
    /// file is configured.
    temp_file: PathBuf,
    /// Separate `-o` target for binary formats.
    output_file: Option<PathBuf>,
    /// Process runner.
    executor: CommandExecutor,
    /// Fail on non-zero exit instead of returning whatever was produced.
    strict_exit_status: bool,
}

impl Converter {
    /// Build a converter for `executable`, or for the `pandoc` found on
    /// `PATH` when `None`.
    pub fn new(executable: Option<PathBuf>) -> PandocResult<Self> {
        Self::with_config(ConverterConfig {
            executable,
            ..Default::default()
        })
    }

    /// Build a converter from a configuration.
    pub fn with_config(config: ConverterConfig) -> PandocResult<Self> {
        config.check()?;

        let executable = discovery::resolve_executable(config.executable.as_deref())?;

        let temp_file = config.effective_temp_dir().join(format!(
            "{}{}",
            TEMP_FILE_PREFIX,
            Uuid::now_v7().simple()
        ));

        let output_file = config.separate_output_file.then(|| {
            let mut name = temp_file.clone().into_os_string();
            name.push(OUTPUT_FILE_SUFFIX);
            PathBuf::from(name)
        });

        info!(
            executable = %executable.display(),
            temp_file = %temp_file.display(),
            timeout_seconds = ?config.timeout_seconds,
            strict = config.strict_exit_status,
            "Pandoc converter ready"
        );

        Ok(Self {
            executable,
            temp_file,
            output_file,
            executor: CommandExecutor::new(config.timeout()),
            strict_exit_status: config.strict_exit_status,
        })
    }

    /// The executable this converter runs.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// The temp file holding the input payload.
    pub fn temp_file(&self) -> &Path {
        &self.temp_file
    }

    /// Where binary output is written.
    pub fn output_target(&self) -> &Path {
        self.output_file.as_deref().unwrap_or(&self.temp_file)
    }

    /// Convert `content` from one format to another.
    pub async fn convert(
        &mut self,
        content: impl AsRef<[u8]>,
        from: &str,
        to: &str,
    ) -> PandocResult<ConversionOutput> {
        let options = ConversionOptions::conversion(from, to);
        validate_conversion(&options)?;
        self.run_with(content, &options).await
    }

    /// Run pandoc with arbitrary options. `from` and `to` are required.
    pub async fn run_with(
        &mut self,
        content: impl AsRef<[u8]>,
        options: &ConversionOptions,
    ) -> PandocResult<ConversionOutput> {
        self.run_with_report(content, options)
            .await
            .map(|report| report.output)
    }

    /// Like [`run_with`](Self::run_with), but also returns exit status and
    /// captured streams.
    #[instrument(
        skip(self, content, options),
        fields(from = tracing::field::Empty, to = tracing::field::Empty)
    )]
    pub async fn run_with_report(
        &mut self,
        content: impl AsRef<[u8]>,
        options: &ConversionOptions,
    ) -> PandocResult<ConversionReport> {
        validate_conversion(options)?;
        let to = required(options, TO)?;
        let span = tracing::Span::current();
        span.record("from", options.from_format().unwrap_or_default());
        span.record("to", to);

        let binary = formats::is_binary_output_format(to);
        let output_target = self.output_target().to_path_buf();

        let mut args = options.command_arguments(&output_target);
        args.push(self.temp_file.to_string_lossy().to_string());

        if binary && output_target != self.temp_file {
            remove_if_exists(&output_target).await?;
        }

        tokio::fs::write(&self.temp_file, content.as_ref()).await?;

        let run = self.executor.execute(&self.executable, &args).await?;

        if !run.success() {
            if self.strict_exit_status {
                return Err(match run.exit_code {
                    Some(code) => PandocError::ProcessFailed {
                        code,
                        stderr: run.stderr_text(),
                    },
                    None => PandocError::Killed,
                });
            }

            warn!(
                exit_code = ?run.exit_code,
                stderr = %run.stderr_text(),
                "Pandoc exited unsuccessfully; returning its output anyway"
            );
        }

        let output = if binary {
            ConversionOutput::Binary(read_binary_output(&output_target, run.success()).await?)
        } else {
            ConversionOutput::Text(run.stdout_text())
        };

        info!(
            binary,
            output_bytes = output.len(),
            duration_ms = run.duration_ms,
            "Conversion finished"
        );

        Ok(ConversionReport {
            output,
            exit_code: run.exit_code,
            stdout_lines: run.stdout_lines,
            stderr_lines: run.stderr_lines,
            duration_ms: run.duration_ms,
        })
    }

    /// The pandoc version reported by `--version`, without the leading
    /// program name.
    pub async fn get_version(&self) -> PandocResult<String> {
        let run = self
            .executor
            .execute(&self.executable, &["--version".to_string()])
            .await?;

        let first = run
            .stdout_lines
            .first()
            .ok_or(PandocError::VersionUnavailable)?;

        Ok(parse_version_line(first))
    }
}

impl Drop for Converter {
    fn drop(&mut self) {
        for path in std::iter::once(&self.temp_file).chain(self.output_file.as_ref()) {
            if path.exists() {
                let _ = std::fs::remove_file(path);
            }
        }
    }
}

/// Strip the leading program name from a `--version` line.
fn parse_version_line(line: &str) -> String {
    let line = line.trim();
    line.strip_prefix(discovery::DEFAULT_PROGRAM)
        .unwrap_or(line)
        .trim()
        .to_string()
}

/// Read the `-o` target. A failed run that never wrote it yields no bytes,
/// so the report still carries its exit code and stderr.
async fn read_binary_output(path: &Path, succeeded: bool) -> PandocResult<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if !succeeded && e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Pandoc failed without writing its output file");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &Path) -> PandocResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
