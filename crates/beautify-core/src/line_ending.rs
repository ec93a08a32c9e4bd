//! Line ending helpers.
//!
//! Documents store text using LF (`'\n'`) newlines. Files that use CRLF (`"\r\n"`) are
//! normalized on load and the original line ending is remembered for saving.

/// The newline sequence used when saving a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Detect the dominant line ending of a source text.
    ///
    /// Any CRLF in the input selects [`LineEnding::Crlf`], otherwise [`LineEnding::Lf`].
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Convert CRLF sequences to LF. Lone `\r` characters are kept as content.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n")
    }

    /// Convert an LF-normalized text to this line ending for saving.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_round_trip() {
        let raw = "a\r\nb\r\n";
        let ending = LineEnding::detect_in_text(raw);
        assert_eq!(ending, LineEnding::Crlf);

        let normalized = LineEnding::normalize(raw);
        assert_eq!(normalized, "a\nb\n");
        assert_eq!(ending.apply_to_text(&normalized), raw);
    }

    #[test]
    fn lone_carriage_return_is_content() {
        assert_eq!(LineEnding::detect_in_text("a\rb"), LineEnding::Lf);
        assert_eq!(LineEnding::normalize("a\rb"), "a\rb");
    }
}
