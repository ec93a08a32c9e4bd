//! Terminal implementation of the chrome's window host.
//!
//! The terminal is the screen; the shell's window is a frame drawn inside it. Minimizing hides
//! the frame and leaves a one-line dock entry on the bottom row.

use beautify_chrome::{MAXIMIZE_GLYPH, Point, WindowGeometry, WindowHost};

/// Label shown in the dock while minimized.
pub const DOCK_LABEL: &str = "[ GML Beautify ]";

/// What the renderer needs to know about the window, as last pushed by the chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalHost {
    screen: WindowGeometry,
    frame: WindowGeometry,
    handles_visible: bool,
    maximize_glyph: &'static str,
    iconified: bool,
    closed: bool,
}

impl TerminalHost {
    /// A host for a terminal of `width` x `height` cells.
    pub fn new(width: u16, height: u16) -> Self {
        let screen = WindowGeometry::sized(i32::from(width), i32::from(height));
        Self {
            screen,
            frame: screen,
            handles_visible: true,
            maximize_glyph: MAXIMIZE_GLYPH,
            iconified: false,
            closed: false,
        }
    }

    /// Record a terminal resize.
    pub fn set_screen_size(&mut self, width: u16, height: u16) {
        self.screen = WindowGeometry::sized(i32::from(width), i32::from(height));
    }

    /// Terminal bounds.
    pub fn screen(&self) -> WindowGeometry {
        self.screen
    }

    /// Where the window frame is drawn.
    pub fn frame(&self) -> WindowGeometry {
        self.frame
    }

    /// Whether resize handles are drawn.
    pub fn handles_visible(&self) -> bool {
        self.handles_visible
    }

    /// Current maximize button glyph.
    pub fn maximize_glyph(&self) -> &'static str {
        self.maximize_glyph
    }

    /// Whether the frame is hidden in the dock.
    pub fn is_iconified(&self) -> bool {
        self.iconified
    }

    /// Whether the window was torn down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The dock entry, bottom-left of the screen.
    pub fn dock(&self) -> WindowGeometry {
        let width = (DOCK_LABEL.chars().count() as i32).min(self.screen.width);
        WindowGeometry::new(0, self.screen.bottom() - 1, width, 1)
    }

    /// Whether `pointer` is on the dock entry while iconified.
    pub fn dock_contains(&self, pointer: Point) -> bool {
        self.iconified && self.dock().contains(pointer)
    }
}

impl WindowHost for TerminalHost {
    fn screen_bounds(&self) -> WindowGeometry {
        self.screen
    }

    fn place(&mut self, geometry: WindowGeometry) {
        self.frame = geometry;
    }

    fn set_resize_handles_visible(&mut self, visible: bool) {
        self.handles_visible = visible;
    }

    fn set_maximize_glyph(&mut self, glyph: &'static str) {
        self.maximize_glyph = glyph;
    }

    fn iconify(&mut self) {
        log::debug!("window iconified to dock");
        self.iconified = true;
    }

    fn reassert_borderless(&mut self) {
        // A terminal frame never gains host decorations; leaving the dock is all there is.
        self.iconified = false;
    }

    fn close(&mut self) {
        log::info!("window closed");
        self.closed = true;
    }
}
