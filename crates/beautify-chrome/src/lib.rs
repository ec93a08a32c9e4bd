#![warn(missing_docs)]
//! `beautify-chrome` - window chrome for borderless windows.
//!
//! When the host's title bar and frame are suppressed, the application has to provide move,
//! resize, minimize and maximize itself. This crate keeps that logic independent of any toolkit:
//!
//! - [`machine`] - the pure state machine (`Normal` / `Maximized` / `Minimized`)
//! - [`hit`] - which decoration a pointer is over
//! - [`WindowChrome`] - owns the model and pushes changes to a [`WindowHost`]
//!
//! Move and resize work only in the normal state. Resize handles are visible exactly when the
//! window is normal, and the host is told so after every event.
//!
//! ```rust
//! use beautify_chrome::{ChromeConfig, ChromeEvent, WindowChrome, WindowGeometry, WindowHost};
//!
//! #[derive(Default)]
//! struct Headless {
//!     placed: Option<WindowGeometry>,
//! }
//!
//! impl WindowHost for Headless {
//!     fn screen_bounds(&self) -> WindowGeometry { WindowGeometry::sized(1920, 1080) }
//!     fn place(&mut self, geometry: WindowGeometry) { self.placed = Some(geometry); }
//!     fn set_resize_handles_visible(&mut self, _: bool) {}
//!     fn set_maximize_glyph(&mut self, _: &'static str) {}
//!     fn iconify(&mut self) {}
//!     fn reassert_borderless(&mut self) {}
//!     fn close(&mut self) {}
//! }
//!
//! let start = WindowGeometry::new(100, 100, 1200, 700);
//! let mut chrome = WindowChrome::new(Headless::default(), start, ChromeConfig::default());
//! chrome.handle(ChromeEvent::ToggleMaximize);
//! assert_eq!(chrome.host().placed, Some(WindowGeometry::sized(1920, 1080)));
//! chrome.handle(ChromeEvent::ToggleMaximize);
//! assert_eq!(chrome.geometry(), start);
//! ```

mod chrome;
pub mod geometry;
pub mod hit;
pub mod machine;

pub use chrome::{WindowChrome, WindowHost};
pub use geometry::{GeometryParseError, Point, WindowGeometry};
pub use hit::{ButtonRects, HitZone, button_rects, hit_test};
pub use machine::{
    CLOSE_GLYPH, ChromeConfig, ChromeEvent, ChromeModel, GestureKind, GestureSession,
    HostRequest, MAXIMIZE_GLYPH, MINIMIZE_GLYPH, RESTORE_GLYPH, WindowState, transition,
};
