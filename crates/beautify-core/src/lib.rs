#![warn(missing_docs)]
//! Beautify Core - headless pane model for the GML beautifier shell
//!
//! # Overview
//!
//! `beautify-core` holds everything a pane needs that does not depend on a UI toolkit: the text
//! itself, the style tags painted over it, the read-only line-number gutter beside it, and the
//! pipeline that keeps all three consistent after each keystroke.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditPipeline (per-keystroke orchestration) │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  GutterSync          │  DocumentProcessor   │  ← Derived state
//! ├──────────────────────┴──────────────────────┤
//! │  TextSurface (style layers + tag priority)  │  ← Styled view
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope, LF-only line breaks)       │  ← Text storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Highlighting is full-range: every edit clears the syntax layer and re-applies all tags.
//! There is no incremental diffing.
//!
//! # Module Description
//!
//! - [`document`] - rope-backed pane text and whole-file I/O
//! - [`intervals`] - style intervals and layers
//! - [`surface`] - styled view with overlap resolution
//! - [`gutter`] - line-number model and sync
//! - [`processing`] - processor interface for derived state
//! - [`pipeline`] - the per-edit pipeline and change notifications
//! - [`format`] - formatter collaborator interface

pub mod document;
mod error;
pub mod format;
pub mod gutter;
pub mod intervals;
pub mod line_ending;
pub mod pipeline;
pub mod processing;
pub mod surface;

pub use document::Document;
pub use error::DocumentError;
pub use format::{BraceStyle, FormatOptions, Formatter, PassthroughFormatter};
pub use gutter::{GutterModel, GutterSurface, GutterSync};
pub use intervals::{Interval, IntervalTree, StyleId, StyleLayerId};
pub use line_ending::LineEnding;
pub use pipeline::{EditPipeline, StateChange, StateChangeCallback, StateChangeType};
pub use processing::{DocumentProcessor, ProcessingEdit};
pub use surface::{StyledRun, TextSurface};
