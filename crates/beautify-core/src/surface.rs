//! Styled text surfaces.
//!
//! A [`TextSurface`] is the styled view of one pane: its [`Document`] plus the style tags
//! currently applied to it. Tags live in layers ([`StyleLayerId`]) and overlap freely. Which tag
//! is visible where several overlap is decided by *tag priority*: style ids are registered in
//! order and a later registration wins, so painting tags in registration order and letting the
//! last one stand gives the same picture.

use crate::document::Document;
use crate::intervals::{Interval, IntervalTree, StyleId, StyleLayerId};
use crate::processing::{DocumentProcessor, ProcessingEdit};
use std::collections::BTreeMap;
use std::ops::Range;

/// A run of chars within one line that share the same effective style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Column range within the line (chars).
    pub columns: Range<usize>,
    /// The winning style, or `None` for unstyled text.
    pub style: Option<StyleId>,
}

/// A document together with the style tags applied to it.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    document: Document,
    style_layers: BTreeMap<StyleLayerId, IntervalTree>,
    tag_priority: Vec<StyleId>,
}

impl TextSurface {
    /// Wrap a document with no style tags.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            style_layers: BTreeMap::new(),
            tag_priority: Vec::new(),
        }
    }

    /// The underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Document mutation is reserved for the edit pipeline so styles and gutter follow it.
    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Register style ids in priority order. Ids already registered keep their rank.
    pub fn register_styles(&mut self, styles: &[StyleId]) {
        for &style in styles {
            if !self.tag_priority.contains(&style) {
                self.tag_priority.push(style);
            }
        }
    }

    /// Rank of a style id; higher wins. Unregistered ids rank below all registered ones.
    pub fn style_priority(&self, style: StyleId) -> Option<usize> {
        self.tag_priority.iter().position(|&s| s == style)
    }

    /// Replace all intervals in a style layer (full clear, then apply).
    pub fn replace_style_layer(&mut self, layer: StyleLayerId, intervals: Vec<Interval>) {
        if intervals.is_empty() {
            self.style_layers.remove(&layer);
            return;
        }
        let tree = self.style_layers.entry(layer).or_default();
        tree.clear();
        for interval in intervals {
            tree.insert(interval);
        }
    }

    /// Remove every tag in a style layer.
    pub fn clear_style_layer(&mut self, layer: StyleLayerId) {
        self.style_layers.remove(&layer);
    }

    /// Intervals of one layer.
    pub fn style_layer(&self, layer: StyleLayerId) -> Option<&IntervalTree> {
        self.style_layers.get(&layer)
    }

    /// Total number of applied tags across all layers.
    pub fn style_count(&self) -> usize {
        self.style_layers.values().map(IntervalTree::len).sum()
    }

    /// Every style id covering `offset`, deduplicated, lowest priority first.
    pub fn styles_at(&self, offset: usize) -> Vec<StyleId> {
        let mut styles: Vec<StyleId> = self
            .style_layers
            .values()
            .flat_map(|tree| tree.query_point(offset))
            .map(|interval| interval.style_id)
            .collect();
        styles.sort_by_key(|&s| (self.style_priority(s), s));
        styles.dedup();
        styles
    }

    /// The visible style at `offset`: the highest-priority tag covering it.
    pub fn effective_style_at(&self, offset: usize) -> Option<StyleId> {
        self.styles_at(offset).last().copied()
    }

    /// Split a line into runs of equal effective style.
    pub fn styled_runs(&self, line: usize) -> Vec<StyledRun> {
        let line_len = self.document.line_len_chars(line);
        if line_len == 0 {
            return Vec::new();
        }
        let line_start = self.document.line_to_char(line);
        let line_end = line_start + line_len;

        let mut hits: Vec<&Interval> = self
            .style_layers
            .values()
            .flat_map(|tree| tree.query_range(line_start, line_end))
            .collect();
        // Paint in priority order; later paint covers earlier paint.
        hits.sort_by_key(|interval| self.style_priority(interval.style_id));

        let mut painted: Vec<Option<StyleId>> = vec![None; line_len];
        for interval in hits {
            let from = interval.start.max(line_start) - line_start;
            let to = interval.end.min(line_end) - line_start;
            for cell in &mut painted[from..to] {
                *cell = Some(interval.style_id);
            }
        }

        let mut runs: Vec<StyledRun> = Vec::new();
        for (column, style) in painted.into_iter().enumerate() {
            match runs.last_mut() {
                Some(run) if run.style == style => run.columns.end = column + 1,
                _ => runs.push(StyledRun {
                    columns: column..column + 1,
                    style,
                }),
            }
        }
        runs
    }

    /// Apply derived-state edits produced by a processor.
    pub fn apply_processing_edits<I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = ProcessingEdit>,
    {
        for edit in edits {
            match edit {
                ProcessingEdit::RegisterStyles { styles } => self.register_styles(&styles),
                ProcessingEdit::ReplaceStyleLayer { layer, intervals } => {
                    self.replace_style_layer(layer, intervals);
                }
                ProcessingEdit::ClearStyleLayer { layer } => self.clear_style_layer(layer),
            }
        }
    }

    /// Run a [`DocumentProcessor`] against this surface and apply its edits.
    pub fn apply_processor<P>(&mut self, processor: &mut P) -> Result<(), P::Error>
    where
        P: DocumentProcessor,
    {
        let edits = processor.process(self)?;
        self.apply_processing_edits(edits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOW: StyleId = 10;
    const HIGH: StyleId = 20;

    #[test]
    fn later_registered_style_wins_overlap() {
        let mut surface = TextSurface::new(Document::from_text("abcdef\nxy"));
        surface.register_styles(&[LOW, HIGH]);
        surface.replace_style_layer(
            StyleLayerId::SYNTAX,
            vec![Interval::new(3, 6, HIGH), Interval::new(0, 5, LOW)],
        );

        assert_eq!(surface.effective_style_at(1), Some(LOW));
        assert_eq!(surface.effective_style_at(4), Some(HIGH));
        assert_eq!(surface.styles_at(4), vec![LOW, HIGH]);
        assert_eq!(surface.effective_style_at(7), None);

        assert_eq!(
            surface.styled_runs(0),
            vec![
                StyledRun {
                    columns: 0..3,
                    style: Some(LOW)
                },
                StyledRun {
                    columns: 3..6,
                    style: Some(HIGH)
                },
            ]
        );
        assert_eq!(
            surface.styled_runs(1),
            vec![StyledRun {
                columns: 0..2,
                style: None
            }]
        );
    }

    #[test]
    fn replacing_a_layer_drops_old_tags() {
        let mut surface = TextSurface::new(Document::from_text("hello"));
        surface.replace_style_layer(StyleLayerId::SYNTAX, vec![Interval::new(0, 5, LOW)]);
        surface.replace_style_layer(StyleLayerId::SYNTAX, vec![Interval::new(1, 2, HIGH)]);
        assert_eq!(surface.style_count(), 1);
        assert_eq!(surface.effective_style_at(0), None);

        surface.replace_style_layer(StyleLayerId::SYNTAX, Vec::new());
        assert_eq!(surface.style_count(), 0);
        assert!(surface.style_layer(StyleLayerId::SYNTAX).is_none());
    }

    #[test]
    fn registration_is_idempotent() {
        let mut surface = TextSurface::default();
        surface.register_styles(&[LOW, HIGH]);
        surface.register_styles(&[HIGH, LOW]);
        assert_eq!(surface.style_priority(LOW), Some(0));
        assert_eq!(surface.style_priority(HIGH), Some(1));
        assert_eq!(surface.style_priority(99), None);
    }
}
