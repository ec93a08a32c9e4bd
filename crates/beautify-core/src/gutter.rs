//! Line-number gutter.
//!
//! The gutter is a read-only companion surface beside a pane. Its content is a [`GutterModel`]
//! regenerated from scratch by [`GutterSync`] after every edit; nothing else can write it.

use crate::document::Document;

/// Ordered line-number labels `"1"..="N"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterModel {
    labels: Vec<String>,
}

impl GutterModel {
    /// Labels for a document with `line_count` lines. A document always has at least one line.
    pub fn from_line_count(line_count: usize) -> Self {
        Self {
            labels: (1..=line_count.max(1)).map(|n| n.to_string()).collect(),
        }
    }

    /// All labels, first line first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels (equals the document's line count).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Widest label in chars.
    pub fn width(&self) -> usize {
        self.labels.last().map_or(1, String::len)
    }
}

impl Default for GutterModel {
    fn default() -> Self {
        Self::from_line_count(1)
    }
}

/// The read-only surface that displays a [`GutterModel`].
#[derive(Debug, Clone, Default)]
pub struct GutterSurface {
    model: GutterModel,
}

impl GutterSurface {
    /// A gutter showing a single line.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current model.
    pub fn model(&self) -> &GutterModel {
        &self.model
    }

    /// Label for a zero-based line, if the gutter shows it.
    pub fn label(&self, line: usize) -> Option<&str> {
        self.model.labels.get(line).map(String::as_str)
    }

    /// Rendered content: labels joined with `'\n'`.
    pub fn text(&self) -> String {
        self.model.labels.join("\n")
    }

    /// Display width of the number column.
    pub fn width(&self) -> usize {
        self.model.width()
    }

    fn replace(&mut self, model: GutterModel) {
        self.model = model;
    }
}

/// Rebuilds a gutter from a document's line count.
#[derive(Debug, Clone, Copy, Default)]
pub struct GutterSync;

impl GutterSync {
    /// Replace the gutter's content with labels for every line of `document`.
    ///
    /// Returns `true` if the visible labels changed.
    pub fn sync(document: &Document, gutter: &mut GutterSurface) -> bool {
        let model = GutterModel::from_line_count(document.line_count());
        let changed = model != gutter.model;
        gutter.replace(model);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_match_line_count() {
        let doc = Document::from_text("a\nb\nc\n");
        let mut gutter = GutterSurface::new();
        assert!(GutterSync::sync(&doc, &mut gutter));
        assert_eq!(gutter.model().labels(), ["1", "2", "3", "4"]);
        assert_eq!(gutter.text(), "1\n2\n3\n4");
        assert_eq!(gutter.label(3), Some("4"));
        assert_eq!(gutter.label(4), None);
    }

    #[test]
    fn sync_is_idempotent() {
        let doc = Document::from_text("x\ny");
        let mut gutter = GutterSurface::new();
        GutterSync::sync(&doc, &mut gutter);
        let first = gutter.model().clone();
        assert!(!GutterSync::sync(&doc, &mut gutter));
        assert_eq!(gutter.model(), &first);
    }

    #[test]
    fn width_tracks_largest_label() {
        assert_eq!(GutterModel::from_line_count(9).width(), 1);
        assert_eq!(GutterModel::from_line_count(10).width(), 2);
        assert_eq!(GutterModel::from_line_count(0).len(), 1);
    }
}
