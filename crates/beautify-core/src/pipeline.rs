//! Per-pane edit pipeline.
//!
//! [`EditPipeline`] owns one pane: its [`TextSurface`], the paired [`GutterSurface`], and the
//! highlighting processor, all injected at construction. Every content change runs the same
//! fixed sequence, synchronously and in full:
//!
//! 1. mutate the document (`DocumentModified`)
//! 2. [`GutterSync`] rebuilds the gutter (`GutterChanged`)
//! 3. the processor re-tags the whole surface (`StyleChanged`)
//!
//! Each step bumps the pane version and notifies subscribers, so observers always see the three
//! notifications of one edit before any notification of the next.
//!
//! # Example
//!
//! ```rust
//! use beautify_core::{
//!     Document, DocumentProcessor, EditPipeline, GutterSurface, ProcessingEdit, TextSurface,
//! };
//! use std::convert::Infallible;
//!
//! struct NoStyles;
//!
//! impl DocumentProcessor for NoStyles {
//!     type Error = Infallible;
//!     fn process(&mut self, _: &TextSurface) -> Result<Vec<ProcessingEdit>, Infallible> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let surface = TextSurface::new(Document::from_text("a"));
//! let mut pane = EditPipeline::new(surface, GutterSurface::new(), NoStyles).unwrap();
//! pane.insert(1, "\nb\nc").unwrap();
//! assert_eq!(pane.gutter().model().len(), 3);
//! ```

use crate::document::Document;
use crate::gutter::{GutterSurface, GutterSync};
use crate::processing::DocumentProcessor;
use crate::surface::TextSurface;
use std::ops::Range;

/// What changed in a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeType {
    /// Document content modified
    DocumentModified,
    /// Gutter rebuilt
    GutterChanged,
    /// Style tags re-applied
    StyleChanged,
}

/// State change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// Affected region (char offsets in the new text), for document changes.
    pub affected_region: Option<Range<usize>>,
}

impl StateChange {
    /// Create a change record without an affected region.
    pub fn new(change_type: StateChangeType, old_version: u64, new_version: u64) -> Self {
        Self {
            change_type,
            old_version,
            new_version,
            affected_region: None,
        }
    }

    /// Attach the affected char range.
    pub fn with_region(mut self, region: Range<usize>) -> Self {
        self.affected_region = Some(region);
        self
    }
}

/// State change callback function type
pub type StateChangeCallback = Box<dyn FnMut(&StateChange)>;

/// One pane: text surface + gutter + highlighter, kept consistent after every edit.
pub struct EditPipeline<P> {
    surface: TextSurface,
    gutter: GutterSurface,
    processor: P,
    version: u64,
    is_modified: bool,
    callbacks: Vec<StateChangeCallback>,
}

impl<P: DocumentProcessor> EditPipeline<P> {
    /// Take ownership of a pane's surfaces and bring gutter and styles in line with the content.
    pub fn new(surface: TextSurface, gutter: GutterSurface, processor: P) -> Result<Self, P::Error> {
        let mut pipeline = Self {
            surface,
            gutter,
            processor,
            version: 0,
            is_modified: false,
            callbacks: Vec::new(),
        };
        pipeline.refresh()?;
        Ok(pipeline)
    }

    /// The styled text surface.
    pub fn surface(&self) -> &TextSurface {
        &self.surface
    }

    /// The pane's document.
    pub fn document(&self) -> &Document {
        self.surface.document()
    }

    /// The line-number gutter.
    pub fn gutter(&self) -> &GutterSurface {
        &self.gutter
    }

    /// The highlighting processor.
    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Mutable access to the processor. Call [`refresh`](Self::refresh) afterwards to re-tag.
    pub fn processor_mut(&mut self) -> &mut P {
        &mut self.processor
    }

    /// Current pane version (incremented on each change notification).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the document changed since construction or the last [`mark_saved`](Self::mark_saved).
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Clear the modified flag.
    pub fn mark_saved(&mut self) {
        self.is_modified = false;
    }

    /// Subscribe to change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&StateChange) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Insert text at a char offset, then run gutter sync and highlighting.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), P::Error> {
        if text.is_empty() {
            return Ok(());
        }
        let region = self.surface.document_mut().insert(offset, text);
        self.content_changed(region)
    }

    /// Delete a char range, then run gutter sync and highlighting.
    ///
    /// Returns the removed text.
    pub fn delete(&mut self, range: Range<usize>) -> Result<String, P::Error> {
        let start = range.start;
        let removed = self.surface.document_mut().delete(range);
        if removed.is_empty() {
            return Ok(removed);
        }
        let start = start.min(self.surface.document().len_chars());
        self.content_changed(start..start)?;
        Ok(removed)
    }

    /// Replace the whole content (formatter output, pasted buffers).
    pub fn replace_all(&mut self, text: &str) -> Result<(), P::Error> {
        self.surface.document_mut().replace_all(text);
        let len = self.surface.document().len_chars();
        self.content_changed(0..len)
    }

    /// Swap in a freshly loaded document (keeps its line ending).
    pub fn replace_document(&mut self, document: Document) -> Result<(), P::Error> {
        *self.surface.document_mut() = document;
        let len = self.surface.document().len_chars();
        self.content_changed(0..len)?;
        self.is_modified = false;
        Ok(())
    }

    /// Re-run gutter sync and highlighting without a content change.
    pub fn refresh(&mut self) -> Result<(), P::Error> {
        self.sync_gutter();
        self.highlight()
    }

    /// Content-change notification: record the change, then gutter, then highlight.
    fn content_changed(&mut self, region: Range<usize>) -> Result<(), P::Error> {
        self.is_modified = true;
        let change = self
            .next_change(StateChangeType::DocumentModified)
            .with_region(region);
        self.notify(&change);
        self.refresh()
    }

    fn sync_gutter(&mut self) {
        GutterSync::sync(self.surface.document(), &mut self.gutter);
        let change = self.next_change(StateChangeType::GutterChanged);
        self.notify(&change);
    }

    fn highlight(&mut self) -> Result<(), P::Error> {
        self.surface.apply_processor(&mut self.processor)?;
        log::debug!(
            "pane v{}: {} lines, {} style tags",
            self.version,
            self.gutter.model().len(),
            self.surface.style_count()
        );
        let change = self.next_change(StateChangeType::StyleChanged);
        self.notify(&change);
        Ok(())
    }

    fn next_change(&mut self, change_type: StateChangeType) -> StateChange {
        let old_version = self.version;
        self.version += 1;
        StateChange::new(change_type, old_version, self.version)
    }

    fn notify(&mut self, change: &StateChange) {
        for callback in &mut self.callbacks {
            callback(change);
        }
    }
}
