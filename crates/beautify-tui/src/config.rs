//! `gml-beautify.toml` loading.
//!
//! Every section and key is optional; a missing file yields [`Config::default`].
//!
//! ```toml
//! [formatter]
//! command = "gml-fmt"
//! args = ["--stdin"]
//! indent_with_tabs = false
//! indent_size = 4
//! brace_style = "end-expand"
//!
//! [window]
//! min_width = 40
//! initial_width = 120
//!
//! [language]
//! keywords = ["var", "if", "else"]
//! line_comment = "//"
//!
//! [theme]
//! keyword = "lightblue"
//! comment = "#808080"
//! ```

use beautify_chrome::ChromeConfig;
use beautify_core::FormatOptions;
use beautify_lang::{CommentConfig, GML_KEYWORDS, LanguageConfig};
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gml-beautify.toml";

/// Failure while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read, or an explicit path is missing.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// A `[theme]` entry is not a color.
    #[error("invalid color for theme.{key}: '{value}'")]
    Color {
        /// Theme key.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External formatter and its options.
    pub formatter: FormatterConfig,
    /// Window chrome sizing (terminal cells).
    pub window: WindowConfig,
    /// Highlighted language.
    pub language: LanguageSection,
    /// Colors.
    pub theme: ThemeConfig,
}

/// `[formatter]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Program to run; `None` passes source through unchanged.
    pub command: Option<String>,
    /// Extra arguments placed before the option flags.
    pub args: Vec<String>,
    /// Options forwarded to the formatter.
    #[serde(flatten)]
    pub options: FormatOptions,
}

/// `[window]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Smallest width a resize may produce.
    pub min_width: i32,
    /// Smallest height a resize may produce.
    pub min_height: i32,
    /// Thickness of the right/bottom resize handles.
    pub resize_border: i32,
    /// Width when the shell starts (clamped to the terminal).
    pub initial_width: i32,
    /// Height when the shell starts (clamped to the terminal).
    pub initial_height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            min_width: 40,
            min_height: 10,
            resize_border: 1,
            initial_width: 120,
            initial_height: 36,
        }
    }
}

impl WindowConfig {
    /// Chrome rules for a terminal host: one-row title bar, three-cell buttons.
    pub fn chrome_config(&self) -> ChromeConfig {
        ChromeConfig {
            min_width: self.min_width.max(1),
            min_height: self.min_height.max(1),
            resize_border: self.resize_border.max(1),
            title_bar_height: 1,
            button_width: 3,
        }
    }
}

/// `[language]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LanguageSection {
    /// Keyword list.
    pub keywords: Vec<String>,
    /// Line comment token; empty disables comments.
    pub line_comment: String,
}

impl Default for LanguageSection {
    fn default() -> Self {
        Self {
            keywords: GML_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
            line_comment: "//".to_string(),
        }
    }
}

impl LanguageSection {
    /// Build the scanner's language description.
    pub fn language_config(&self) -> LanguageConfig {
        LanguageConfig::new(
            "GML",
            self.keywords.iter().cloned(),
            CommentConfig::line(self.line_comment.clone()),
        )
    }
}

/// `[theme]`: color names (`"green"`, `"light-blue"`) or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Keyword color.
    pub keyword: String,
    /// String literal color.
    pub string: String,
    /// Number color.
    pub number: String,
    /// Comment color.
    pub comment: String,
    /// Line number color.
    pub gutter: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            keyword: "lightblue".to_string(),
            string: "green".to_string(),
            number: "yellow".to_string(),
            comment: "darkgray".to_string(),
            gutter: "gray".to_string(),
        }
    }
}

/// Resolved theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Keyword color.
    pub keyword: Color,
    /// String literal color.
    pub string: Color,
    /// Number color.
    pub number: Color,
    /// Comment color.
    pub comment: Color,
    /// Line number color.
    pub gutter: Color,
}

impl ThemeConfig {
    /// Parse every entry into a [`Palette`].
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        fn parse(key: &'static str, value: &str) -> Result<Color, ConfigError> {
            Color::from_str(value.trim()).map_err(|_| ConfigError::Color {
                key,
                value: value.to_string(),
            })
        }

        Ok(Palette {
            keyword: parse("keyword", &self.keyword)?,
            string: parse("string", &self.string)?,
            number: parse("number", &self.number)?,
            comment: parse("comment", &self.comment)?,
            gutter: parse("gutter", &self.gutter)?,
        })
    }
}

impl Config {
    /// Parse a configuration from TOML text. `path` is only used in errors.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.theme.palette()?;
        Ok(config)
    }

    /// Load from `explicit` (which must exist) or from [`DEFAULT_CONFIG_FILE`] if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        match fs::read_to_string(&path) {
            Ok(text) => {
                log::info!("loading config from {}", path.display());
                Self::from_toml(&text, &path)
            }
            Err(err) if !required && err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no {} found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}
