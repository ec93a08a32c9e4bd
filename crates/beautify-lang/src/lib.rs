#![warn(missing_docs)]
//! `beautify-lang` - data-driven language configuration for the beautifier shell.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing or
//! highlighting machinery. It describes *what* a language looks like lexically (keywords,
//! comment tokens) so that scanners can stay language-agnostic.

use std::collections::BTreeSet;

/// The GML keyword set recognised by the default configuration.
pub const GML_KEYWORDS: &[&str] = &[
    "var", "if", "else", "while", "for", "switch", "case", "break", "return", "function", "enum",
    "struct", "repeat", "with", "do", "until", "continue", "exit",
];

/// Comment tokens for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
        }
    }

    /// Returns the line comment token if one is configured and non-empty.
    pub fn line_token(&self) -> Option<&str> {
        self.line.as_deref().filter(|s| !s.is_empty())
    }
}

/// Lexical description of a highlighted language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Human readable name (shown in the status line).
    pub name: String,
    keywords: BTreeSet<String>,
    /// Comment tokens.
    pub comments: CommentConfig,
}

impl LanguageConfig {
    /// Create a language from a name, a keyword list, and comment tokens.
    ///
    /// Empty keywords are dropped; duplicates collapse.
    pub fn new<I, S>(name: impl Into<String>, keywords: I, comments: CommentConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(Into::into)
                .filter(|kw: &String| !kw.is_empty())
                .collect(),
            comments,
        }
    }

    /// GameMaker Language: [`GML_KEYWORDS`] plus `//` line comments.
    pub fn gml() -> Self {
        Self::new("GML", GML_KEYWORDS.iter().copied(), CommentConfig::line("//"))
    }

    /// Returns `true` if `word` is a keyword of this language (exact, case-sensitive).
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Iterate keywords in sorted order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Number of distinct keywords.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self::gml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gml_has_all_keywords() {
        let lang = LanguageConfig::gml();
        assert_eq!(lang.keyword_count(), GML_KEYWORDS.len());
        assert!(lang.is_keyword("var"));
        assert!(lang.is_keyword("until"));
        assert!(!lang.is_keyword("variable"));
        assert!(!lang.is_keyword("Var"));
        assert_eq!(lang.comments.line_token(), Some("//"));
    }

    #[test]
    fn empty_keywords_and_tokens_are_ignored() {
        let lang = LanguageConfig::new("x", ["", "a", "a"], CommentConfig::line(""));
        assert_eq!(lang.keywords().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(lang.comments.line_token(), None);
    }
}
