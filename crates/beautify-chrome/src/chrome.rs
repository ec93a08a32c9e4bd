//! The chrome object and its host seam.

use crate::geometry::{Point, WindowGeometry};
use crate::hit::{HitZone, hit_test};
use crate::machine::{
    ChromeConfig, ChromeEvent, ChromeModel, GestureSession, HostRequest, WindowState, transition,
};

/// The window system the chrome drives.
///
/// A desktop host would move a real borderless window; a terminal host repositions a frame
/// inside the screen. The chrome never reads geometry back from the host, only screen bounds.
pub trait WindowHost {
    /// Current screen bounds.
    fn screen_bounds(&self) -> WindowGeometry;
    /// Put the window at `geometry`.
    fn place(&mut self, geometry: WindowGeometry);
    /// Show or hide the resize handles.
    fn set_resize_handles_visible(&mut self, visible: bool);
    /// Update the maximize button glyph.
    fn set_maximize_glyph(&mut self, glyph: &'static str);
    /// Minimize through the host's own mechanism.
    fn iconify(&mut self);
    /// Suppress host decorations again after a restore.
    fn reassert_borderless(&mut self);
    /// Tear the window down.
    fn close(&mut self);
}

/// Borderless window chrome: owns geometry and visual state, drives a [`WindowHost`].
///
/// Each event runs the pure [`transition`] and then a single apply step that pushes the new
/// geometry (when it changed), the handle visibility and the maximize glyph to the host, and
/// forwards any [`HostRequest`].
#[derive(Debug)]
pub struct WindowChrome<H> {
    model: ChromeModel,
    config: ChromeConfig,
    host: H,
}

impl<H: WindowHost> WindowChrome<H> {
    /// A normal window at `geometry`; the host receives the initial placement immediately.
    pub fn new(host: H, geometry: WindowGeometry, config: ChromeConfig) -> Self {
        let mut chrome = Self {
            model: ChromeModel::new(geometry),
            config,
            host,
        };
        chrome.host.place(geometry);
        chrome.push_decorations();
        chrome
    }

    /// Current state.
    pub fn state(&self) -> WindowState {
        self.model.state
    }

    /// Current geometry.
    pub fn geometry(&self) -> WindowGeometry {
        self.model.geometry
    }

    /// Geometry saved by maximize, if any.
    pub fn saved_geometry(&self) -> Option<WindowGeometry> {
        self.model.saved_geometry
    }

    /// The active gesture, if any.
    pub fn session(&self) -> Option<&GestureSession> {
        self.model.session.as_ref()
    }

    /// Whether the window was closed.
    pub fn is_closed(&self) -> bool {
        self.model.closed
    }

    /// Whether resize handles are shown.
    pub fn handles_visible(&self) -> bool {
        self.model.handles_visible()
    }

    /// Glyph for the maximize button.
    pub fn maximize_glyph(&self) -> &'static str {
        self.model.maximize_glyph()
    }

    /// A snapshot of the whole model.
    pub fn model(&self) -> &ChromeModel {
        &self.model
    }

    /// Sizing rules.
    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Feed one event. Returns `true` if the model changed.
    pub fn handle(&mut self, event: ChromeEvent) -> bool {
        let screen = self.host.screen_bounds();
        let (next, request) = transition(&self.model, event, screen, &self.config);
        let changed = next != self.model;
        if changed {
            log::debug!(
                "chrome {:?}: {:?} {} -> {:?} {}",
                event,
                self.model.state,
                self.model.geometry,
                next.state,
                next.geometry
            );
        }
        let previous = std::mem::replace(&mut self.model, next);
        self.apply(&previous, request);
        changed
    }

    /// Side-effecting half of a transition.
    fn apply(&mut self, previous: &ChromeModel, request: Option<HostRequest>) {
        if previous.geometry != self.model.geometry {
            self.host.place(self.model.geometry);
        }
        self.push_decorations();
        match request {
            Some(HostRequest::Iconify) => self.host.iconify(),
            Some(HostRequest::ReassertBorderless) => self.host.reassert_borderless(),
            Some(HostRequest::Close) => self.host.close(),
            None => {}
        }
    }

    fn push_decorations(&mut self) {
        self.host
            .set_resize_handles_visible(self.model.handles_visible());
        self.host.set_maximize_glyph(self.model.maximize_glyph());
    }

    /// Which decoration is under `pointer`.
    pub fn hit_test(&self, pointer: Point) -> HitZone {
        hit_test(&self.model, pointer, &self.config)
    }

    /// Pointer press: buttons fire their command, drag areas start a gesture.
    ///
    /// Returns the zone that was hit so the caller can route content clicks.
    pub fn pointer_down(&mut self, pointer: Point) -> HitZone {
        let zone = self.hit_test(pointer);
        match zone {
            HitZone::MinimizeButton => {
                self.handle(ChromeEvent::Minimize);
            }
            HitZone::MaximizeButton => {
                self.handle(ChromeEvent::ToggleMaximize);
            }
            HitZone::CloseButton => {
                self.handle(ChromeEvent::Close);
            }
            _ => {
                if let Some(kind) = zone.gesture() {
                    self.handle(ChromeEvent::GestureStart { kind, pointer });
                }
            }
        }
        zone
    }

    /// Pointer motion while pressed.
    pub fn pointer_drag(&mut self, pointer: Point) -> bool {
        self.handle(ChromeEvent::GestureMotion { pointer })
    }

    /// Pointer release.
    pub fn pointer_up(&mut self) -> bool {
        self.handle(ChromeEvent::GestureEnd)
    }
}
