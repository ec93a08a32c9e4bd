//! Single-pass lexical scanner.
//!
//! [`TokenScanner`] walks the text once, left to right, and yields [`Span`]s lazily. It never
//! searches backwards or restarts from an earlier position, and every step moves the cursor
//! forward by at least one char.
//!
//! Spans of different kinds may overlap. Keywords and numbers inside strings or comments are
//! reported, and a comment token inside a string literal still opens a comment that runs to the
//! end of the line. Display code resolves overlaps by kind precedence.

use beautify_lang::LanguageConfig;
use std::collections::VecDeque;
use std::ops::Range;

/// Lexical class of a span. Variants are listed in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanKind {
    /// A word from the language's keyword set.
    Keyword,
    /// A double-quoted literal on a single line, quotes included.
    String,
    /// A word made only of ASCII digits.
    Number,
    /// A line comment, from its token to the end of the line.
    Comment,
}

impl SpanKind {
    /// All kinds, in the order tags are applied (later ones win on overlap).
    pub const APPLICATION_ORDER: [SpanKind; 4] = [
        SpanKind::Keyword,
        SpanKind::String,
        SpanKind::Number,
        SpanKind::Comment,
    ];

    /// Lowercase name, as used for theme keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Number => "number",
            Self::Comment => "comment",
        }
    }
}

/// A classified char range `[start, end)` of one text snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Lexical class.
    pub kind: SpanKind,
    /// Start char offset.
    pub start: usize,
    /// End char offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span.
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Char range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for zero-length spans (never produced by the scanner).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lazy iterator of spans over one text snapshot.
///
/// Spans come out in ascending start order. The iterator is consumed as it runs; scan again to
/// get a fresh sequence.
pub struct TokenScanner<'a> {
    text: &'a str,
    language: &'a LanguageConfig,
    /// Cursor (byte offset into `text`).
    byte: usize,
    /// Cursor (char offset), kept in step with `byte`.
    char_pos: usize,
    /// A comment already started on the current line.
    line_commented: bool,
    /// Quotes before this byte belong to an already emitted string.
    string_end: usize,
    pending: VecDeque<Span>,
}

impl<'a> TokenScanner<'a> {
    /// Start scanning `text` with the lexical rules of `language`.
    pub fn new(text: &'a str, language: &'a LanguageConfig) -> Self {
        Self {
            text,
            language,
            byte: 0,
            char_pos: 0,
            line_commented: false,
            string_end: 0,
            pending: VecDeque::new(),
        }
    }

    fn line_end(&self) -> usize {
        self.text[self.byte..]
            .find('\n')
            .map_or(self.text.len(), |rel| self.byte + rel)
    }

    fn advance(&mut self, bytes: usize, chars: usize) {
        self.byte += bytes;
        self.char_pos += chars;
    }

    /// Classify whatever starts at the cursor and move past it.
    fn step(&mut self) {
        let before = self.byte;
        let text = self.text;
        let rest = &text[self.byte..];
        let Some(c) = rest.chars().next() else {
            return;
        };

        if c == '\n' {
            self.line_commented = false;
            self.advance(1, 1);
            return;
        }

        if !self.line_commented
            && let Some(token) = self.language.comments.line_token()
            && rest.starts_with(token)
        {
            let line_end = self.line_end();
            let len = text[self.byte..line_end].chars().count();
            self.pending
                .push_back(Span::new(SpanKind::Comment, self.char_pos, self.char_pos + len));
            self.line_commented = true;
        }

        if c == '"' && self.byte >= self.string_end {
            let line_end = self.line_end();
            let body_start = self.byte + 1;
            // Unterminated literals produce nothing; scanning simply continues.
            if let Some(rel) = text[body_start..line_end].find('"') {
                let close = body_start + rel;
                let len = text[self.byte..=close].chars().count();
                self.pending
                    .push_back(Span::new(SpanKind::String, self.char_pos, self.char_pos + len));
                self.string_end = close + 1;
            }
        }

        if is_word_char(c) {
            let word_len = rest.find(|ch: char| !is_word_char(ch)).unwrap_or(rest.len());
            let word = &rest[..word_len];
            let chars = word.chars().count();
            let kind = if self.language.is_keyword(word) {
                Some(SpanKind::Keyword)
            } else if word.bytes().all(|b| b.is_ascii_digit()) {
                Some(SpanKind::Number)
            } else {
                None
            };
            if let Some(kind) = kind {
                self.pending
                    .push_back(Span::new(kind, self.char_pos, self.char_pos + chars));
            }
            self.advance(word_len, chars);
        } else {
            self.advance(c.len_utf8(), 1);
        }

        debug_assert!(self.byte > before, "scanner cursor must advance");
    }
}

impl Iterator for TokenScanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            if let Some(span) = self.pending.pop_front() {
                return Some(span);
            }
            if self.byte >= self.text.len() {
                return None;
            }
            self.step();
        }
    }
}

impl std::iter::FusedIterator for TokenScanner<'_> {}

/// Scan `text` with `language`'s rules.
pub fn scan<'a>(text: &'a str, language: &'a LanguageConfig) -> TokenScanner<'a> {
    TokenScanner::new(text, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beautify_lang::CommentConfig;
    use pretty_assertions::assert_eq;

    fn spans(text: &str) -> Vec<Span> {
        scan(text, &LanguageConfig::gml()).collect()
    }

    #[test]
    fn keywords_need_word_boundaries() {
        assert_eq!(
            spans("var variable _var var_ var"),
            vec![
                Span::new(SpanKind::Keyword, 0, 3),
                Span::new(SpanKind::Keyword, 23, 26),
            ]
        );
    }

    #[test]
    fn numbers_are_whole_digit_words() {
        assert_eq!(
            spans("x5 5x 42 3.14"),
            vec![
                Span::new(SpanKind::Number, 6, 8),
                Span::new(SpanKind::Number, 9, 10),
                Span::new(SpanKind::Number, 11, 13),
            ]
        );
    }

    #[test]
    fn strings_are_single_line_and_non_greedy() {
        assert_eq!(
            spans("a = \"x\" + \"y\";\n\"open\nb\""),
            vec![
                Span::new(SpanKind::String, 4, 7),
                Span::new(SpanKind::String, 10, 13),
            ]
        );
    }

    #[test]
    fn keywords_inside_strings_are_still_reported() {
        assert_eq!(
            spans("\"if 1\""),
            vec![
                Span::new(SpanKind::String, 0, 6),
                Span::new(SpanKind::Keyword, 1, 3),
                Span::new(SpanKind::Number, 4, 5),
            ]
        );
    }

    #[test]
    fn one_comment_per_line() {
        assert_eq!(
            spans("a // b // c\n//"),
            vec![
                Span::new(SpanKind::Comment, 2, 11),
                Span::new(SpanKind::Comment, 12, 14),
            ]
        );
    }

    #[test]
    fn offsets_are_in_chars() {
        assert_eq!(
            spans("é \"ü\" 7"),
            vec![
                Span::new(SpanKind::String, 2, 5),
                Span::new(SpanKind::Number, 6, 7),
            ]
        );
    }

    #[test]
    fn custom_comment_token() {
        let lang = LanguageConfig::new("ini", ["if"], CommentConfig::line("#"));
        let found: Vec<_> = scan("if # if", &lang).collect();
        assert_eq!(
            found,
            vec![
                Span::new(SpanKind::Keyword, 0, 2),
                Span::new(SpanKind::Comment, 3, 7),
                Span::new(SpanKind::Keyword, 5, 7),
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(spans("").is_empty());
        assert!(spans("\n\n").is_empty());
    }
}
