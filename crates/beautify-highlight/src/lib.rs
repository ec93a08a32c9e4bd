//! `beautify-highlight` - lexical highlighting for `beautify-core` panes.
//!
//! [`scan`] turns text into [`Span`]s; [`HighlightEngine`] turns spans into style tags and plugs
//! into `beautify-core`'s processing interface, so an
//! [`EditPipeline`](beautify_core::EditPipeline) re-highlights the whole pane on every edit.

mod scanner;

pub use scanner::{Span, SpanKind, TokenScanner, scan};

use beautify_core::intervals::{Interval, StyleId, StyleLayerId};
use beautify_core::processing::{DocumentProcessor, ProcessingEdit};
use beautify_core::surface::TextSurface;
use beautify_lang::LanguageConfig;
use std::convert::Infallible;

/// Default `StyleId` constants for the four span kinds.
///
/// These are only identifiers. The UI maps them to actual colors.
pub const STYLE_KEYWORD: StyleId = 0x0100_0001;
pub const STYLE_STRING: StyleId = 0x0100_0002;
pub const STYLE_NUMBER: StyleId = 0x0100_0003;
pub const STYLE_COMMENT: StyleId = 0x0100_0004;

/// Style ids used for each span kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyles {
    pub keyword: StyleId,
    pub string: StyleId,
    pub number: StyleId,
    pub comment: StyleId,
}

impl HighlightStyles {
    pub fn style_for(&self, kind: SpanKind) -> StyleId {
        match kind {
            SpanKind::Keyword => self.keyword,
            SpanKind::String => self.string,
            SpanKind::Number => self.number,
            SpanKind::Comment => self.comment,
        }
    }

    /// Reverse lookup, for renderers.
    pub fn kind_for(&self, style: StyleId) -> Option<SpanKind> {
        SpanKind::APPLICATION_ORDER
            .into_iter()
            .find(|&kind| self.style_for(kind) == style)
    }

    /// Style ids in application order.
    pub fn in_application_order(&self) -> Vec<StyleId> {
        SpanKind::APPLICATION_ORDER
            .into_iter()
            .map(|kind| self.style_for(kind))
            .collect()
    }
}

impl Default for HighlightStyles {
    fn default() -> Self {
        Self {
            keyword: STYLE_KEYWORD,
            string: STYLE_STRING,
            number: STYLE_NUMBER,
            comment: STYLE_COMMENT,
        }
    }
}

/// Full-range highlighter for one pane.
///
/// Every run clears the whole syntax layer and re-applies a tag per span, keyword tags first and
/// comment tags last. Overlapping tags are resolved by the surface's tag priority, which this
/// engine registers in the same order, so a comment covering a keyword shows as a comment.
#[derive(Debug, Clone)]
pub struct HighlightEngine {
    layer: StyleLayerId,
    language: LanguageConfig,
    styles: HighlightStyles,
}

impl HighlightEngine {
    pub fn new(language: LanguageConfig) -> Self {
        Self {
            layer: StyleLayerId::SYNTAX,
            language,
            styles: HighlightStyles::default(),
        }
    }

    /// The GML language with default styles.
    pub fn gml() -> Self {
        Self::new(LanguageConfig::gml())
    }

    pub fn with_styles(mut self, styles: HighlightStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_layer(mut self, layer: StyleLayerId) -> Self {
        self.layer = layer;
        self
    }

    pub fn layer(&self) -> StyleLayerId {
        self.layer
    }

    pub fn language(&self) -> &LanguageConfig {
        &self.language
    }

    pub fn styles(&self) -> &HighlightStyles {
        &self.styles
    }

    /// Scan `text` and return its tags in application order.
    pub fn highlight(&self, text: &str) -> Vec<Interval> {
        let mut spans: Vec<Span> = scan(text, &self.language).collect();
        // Stable: spans of one kind keep document order.
        spans.sort_by_key(|span| span.kind);
        spans
            .into_iter()
            .map(|span| Interval::new(span.start, span.end, self.styles.style_for(span.kind)))
            .collect()
    }
}

impl DocumentProcessor for HighlightEngine {
    type Error = Infallible;

    fn process(&mut self, surface: &TextSurface) -> Result<Vec<ProcessingEdit>, Self::Error> {
        let intervals = self.highlight(&surface.document().text());
        log::trace!("{} tags for {} chars", intervals.len(), surface.document().len_chars());
        Ok(vec![
            ProcessingEdit::RegisterStyles {
                styles: self.styles.in_application_order(),
            },
            ProcessingEdit::ReplaceStyleLayer {
                layer: self.layer,
                intervals,
            },
        ])
    }
}
