//! The external-command formatter.
//!
//! The configured program receives the source on stdin and the options as flags:
//!
//! ```text
//! <command> <args...> --indent-with-tabs=<bool> --indent-size=<n> --brace-style=<style>
//! ```
//!
//! and must print the formatted text on stdout.

use crate::config::FormatterConfig;
use beautify_core::{FormatOptions, Formatter, PassthroughFormatter};
use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::string::FromUtf8Error;
use thiserror::Error;

/// Failure reported by [`ExternalFormatter`].
#[derive(Debug, Error)]
pub enum FormatterError {
    /// The program could not be started.
    #[error("failed to start formatter '{program}': {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Piping source or collecting output failed.
    #[error("formatter '{program}' I/O failed: {source}")]
    Io {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The program exited unsuccessfully.
    #[error("formatter '{program}' failed ({status}): {stderr}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
        /// First line of stderr, if any.
        stderr: String,
    },
    /// The program printed something that is not UTF-8.
    #[error("formatter '{program}' produced invalid UTF-8: {source}")]
    InvalidUtf8 {
        /// Program name.
        program: String,
        /// Underlying conversion error.
        source: FromUtf8Error,
    },
}

/// Runs a program as the pretty-printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFormatter {
    program: String,
    args: Vec<String>,
}

impl ExternalFormatter {
    /// Create a formatter that runs `program` with `args` before the option flags.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The full argument list for one run.
    pub fn arguments(&self, options: &FormatOptions) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(format!("--indent-with-tabs={}", options.indent_with_tabs));
        args.push(format!("--indent-size={}", options.indent_size));
        args.push(format!("--brace-style={}", options.brace_style));
        args
    }
}

impl Formatter for ExternalFormatter {
    type Error = FormatterError;

    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, Self::Error> {
        let io_err = |source| FormatterError::Io {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(self.arguments(options))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FormatterError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        // Stdin is fed from a second thread while stdout and stderr drain.
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(source.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output.map_err(io_err)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatterError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: stderr.lines().next().unwrap_or_default().trim().to_string(),
            });
        }
        // A child that exits without reading all of stdin is fine once it succeeded.
        if let Err(err) = written
            && err.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(io_err(err));
        }

        String::from_utf8(output.stdout).map_err(|source| FormatterError::InvalidUtf8 {
            program: self.program.clone(),
            source,
        })
    }
}

/// The formatter the shell uses: the configured program, or passthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatBackend {
    /// An external program.
    External(ExternalFormatter),
    /// No program configured.
    Passthrough,
}

impl FormatBackend {
    /// Pick the backend described by `[formatter]`.
    pub fn from_config(config: &FormatterConfig) -> Self {
        match config.command.as_deref().map(str::trim) {
            Some(command) if !command.is_empty() => {
                Self::External(ExternalFormatter::new(command, config.args.clone()))
            }
            _ => Self::Passthrough,
        }
    }

    /// Format `source`, logging the outcome.
    pub fn run(&self, source: &str, options: &FormatOptions) -> Result<String, FormatterError> {
        match self {
            Self::External(formatter) => {
                log::info!(
                    "running formatter {} ({} chars)",
                    formatter.program(),
                    source.chars().count()
                );
                formatter.format(source, options).inspect_err(|err| {
                    log::warn!("{err}");
                })
            }
            Self::Passthrough => match PassthroughFormatter.format(source, options) {
                Ok(text) => Ok(text),
                Err(never) => match never {},
            },
        }
    }

    /// Whether a real formatter is configured.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beautify_core::BraceStyle;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_become_flags() {
        let formatter = ExternalFormatter::new("gml-fmt", vec!["--stdin".into()]);
        let options = FormatOptions {
            indent_with_tabs: false,
            indent_size: 4,
            brace_style: BraceStyle::EndExpand,
        };
        assert_eq!(
            formatter.arguments(&options),
            vec![
                "--stdin",
                "--indent-with-tabs=false",
                "--indent-size=4",
                "--brace-style=end-expand",
            ]
        );
    }

    #[test]
    fn backend_selection() {
        let mut config = FormatterConfig::default();
        assert!(FormatBackend::from_config(&config).is_passthrough());

        config.command = Some("   ".into());
        assert!(FormatBackend::from_config(&config).is_passthrough());

        config.command = Some("gml-fmt".into());
        assert_eq!(
            FormatBackend::from_config(&config),
            FormatBackend::External(ExternalFormatter::new("gml-fmt", Vec::new()))
        );
    }

    #[test]
    fn passthrough_returns_source() {
        let out = FormatBackend::Passthrough
            .run("if(a){b}", &FormatOptions::default())
            .unwrap();
        assert_eq!(out, "if(a){b}");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let formatter = ExternalFormatter::new("gml-beautify-no-such-program", Vec::new());
        let err = formatter.format("x", &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatterError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn program_output_replaces_source() {
        // The option flags land in `$@` and are ignored by the script.
        let formatter =
            ExternalFormatter::new("sh", vec!["-c".into(), "tr a-z A-Z".into(), "sh".into()]);
        let out = formatter
            .format("var x = 1;\n", &FormatOptions::default())
            .unwrap();
        assert_eq!(out, "VAR X = 1;\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let formatter = ExternalFormatter::new(
            "sh",
            vec!["-c".into(), "echo 'bad input' >&2; exit 3".into(), "sh".into()],
        );
        let err = formatter.format("x", &FormatOptions::default()).unwrap_err();
        match err {
            FormatterError::Failed { stderr, status, .. } => {
                assert_eq!(stderr, "bad input");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
