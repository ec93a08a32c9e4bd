//! Formatter collaborator interface.
//!
//! The pretty-printer is an external component. This module only fixes its calling convention:
//! source text plus a [`FormatOptions`] record in, formatted text out.

use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;

/// Brace placement requested from the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStyle {
    /// Opening brace on the same line.
    Collapse,
    /// Opening brace on its own line.
    #[default]
    Expand,
    /// Like `Collapse`, but `else`/`catch` start a new line.
    EndExpand,
    /// Leave brace placement untouched.
    None,
}

impl BraceStyle {
    /// The option spelling understood by beautifier tools.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collapse => "collapse",
            Self::Expand => "expand",
            Self::EndExpand => "end-expand",
            Self::None => "none",
        }
    }
}

impl fmt::Display for BraceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed to the formatter on every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Indent with tab characters instead of spaces.
    pub indent_with_tabs: bool,
    /// Indent width (in tabs or spaces).
    pub indent_size: usize,
    /// Brace placement.
    pub brace_style: BraceStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_with_tabs: true,
            indent_size: 1,
            brace_style: BraceStyle::Expand,
        }
    }
}

/// A source pretty-printer.
pub trait Formatter {
    /// Failure reported by the formatter.
    type Error;

    /// Reformat `source` according to `options`.
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, Self::Error>;
}

/// Returns the source unchanged. Used when no formatter is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    type Error = Infallible;

    fn format(&self, source: &str, _options: &FormatOptions) -> Result<String, Infallible> {
        Ok(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gml_profile() {
        let options = FormatOptions::default();
        assert!(options.indent_with_tabs);
        assert_eq!(options.indent_size, 1);
        assert_eq!(options.brace_style.to_string(), "expand");
    }

    #[test]
    fn passthrough_keeps_text() {
        let out = PassthroughFormatter.format("if(a){b}", &FormatOptions::default());
        assert_eq!(out, Ok("if(a){b}".to_string()));
    }
}
