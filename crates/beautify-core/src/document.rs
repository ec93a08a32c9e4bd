//! Pane document storage.
//!
//! A [`Document`] is the raw text of one editor pane, stored in a [`Rope`]. Offsets are char
//! offsets. The line count is always derived from the rope: `N` newlines give `N + 1` lines, so
//! the empty document has exactly one line. Only `'\n'` is a line break.

use crate::error::DocumentError;
use crate::line_ending::LineEnding;
use ropey::Rope;
use std::fs;
use std::ops::Range;
use std::path::Path;

/// The text of a single pane.
#[derive(Debug, Clone, Default)]
pub struct Document {
    rope: Rope,
    line_ending: LineEnding,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from text, normalizing CRLF to LF and remembering the line ending.
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect_in_text(text);
        Self {
            rope: Rope::from_str(&LineEnding::normalize(text)),
            line_ending,
        }
    }

    /// Read a whole file as UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| DocumentError::InvalidUtf8 {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self::from_text(&text))
    }

    /// Write the whole document to `path`, using the remembered line ending.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let content = self.text_for_saving();
        fs::write(path, &content).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Full text (LF newlines).
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Full text converted to the document's line ending.
    pub fn text_for_saving(&self) -> String {
        self.line_ending.apply_to_text(&self.text())
    }

    /// The line ending used when saving.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Change the line ending used when saving.
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Number of chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns `true` if the document holds no text.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of newline-delimited lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of `line` without its trailing newline.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// Char count of `line`, excluding the newline.
    pub fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Char offset of the start of `line` (clamped to the last line).
    pub fn line_to_char(&self, line: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    /// Convert a char offset to `(line, column)` (clamped to the end of the document).
    pub fn char_to_position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }

    /// Convert `(line, column)` to a char offset, clamping both coordinates.
    pub fn position_to_char(&self, line: usize, column: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line) + column.min(self.line_len_chars(line))
    }

    /// Insert `text` at a char offset (clamped). CRLF in `text` is normalized.
    ///
    /// Returns the affected char range of the inserted text.
    pub fn insert(&mut self, offset: usize, text: &str) -> Range<usize> {
        let offset = offset.min(self.rope.len_chars());
        let text = LineEnding::normalize(text);
        self.rope.insert(offset, &text);
        offset..offset + text.chars().count()
    }

    /// Delete a char range (clamped). Returns the removed text.
    pub fn delete(&mut self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        removed
    }

    /// Replace the whole content, keeping the current line ending preference.
    pub fn replace_all(&mut self, text: &str) {
        self.rope = Rope::from_str(&LineEnding::normalize(text));
    }
}
