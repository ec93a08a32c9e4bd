//! Generic document processing interfaces.
//!
//! A processor inspects a [`TextSurface`] and returns [`ProcessingEdit`]s describing derived
//! state (style tags) to apply. Processors never mutate the surface themselves; the caller
//! applies their output, typically through
//! [`TextSurface::apply_processor`](crate::TextSurface::apply_processor).

use crate::intervals::{Interval, StyleId, StyleLayerId};
use crate::surface::TextSurface;

/// A change to derived surface state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingEdit {
    /// Register style ids in priority order (later wins on overlap).
    RegisterStyles {
        /// Style ids, lowest priority first.
        styles: Vec<StyleId>,
    },
    /// Replace an entire style layer with the given intervals (char offsets).
    ReplaceStyleLayer {
        /// The style layer being replaced.
        layer: StyleLayerId,
        /// The full set of style intervals for the layer (char offsets, half-open).
        intervals: Vec<Interval>,
    },
    /// Clear a style layer.
    ClearStyleLayer {
        /// The style layer being cleared.
        layer: StyleLayerId,
    },
}

/// A processor that produces [`ProcessingEdit`]s for a text surface.
pub trait DocumentProcessor {
    /// The error type returned by [`DocumentProcessor::process`].
    type Error;

    /// Compute derived state updates for `surface`.
    fn process(&mut self, surface: &TextSurface) -> Result<Vec<ProcessingEdit>, Self::Error>;
}
