//! Pure chrome state machine.
//!
//! [`transition`] maps `(model, event)` to the next model without touching any window. What the
//! host must do about the change is described separately by the returned [`HostRequest`] and
//! by comparing the old and new models; see [`WindowChrome`](crate::WindowChrome).

use crate::geometry::{Point, WindowGeometry};

/// Glyph on the maximize button while the window is normal.
pub const MAXIMIZE_GLYPH: &str = "▢";
/// Glyph on the maximize button while the window is maximized.
pub const RESTORE_GLYPH: &str = "❐";
/// Glyph on the minimize button.
pub const MINIMIZE_GLYPH: &str = "—";
/// Glyph on the close button.
pub const CLOSE_GLYPH: &str = "✕";

/// Visual state of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    /// Freely movable and resizable.
    #[default]
    Normal,
    /// Covering the whole screen; move and resize are disabled.
    Maximized,
    /// Iconified by the host.
    Minimized,
}

/// The pointer gestures the chrome understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Drag the title bar to move the window.
    Move,
    /// Drag the right edge (width only).
    ResizeRight,
    /// Drag the bottom edge (height only).
    ResizeBottom,
    /// Drag the bottom-right corner (width and height).
    ResizeCorner,
}

impl GestureKind {
    fn resizes_width(self) -> bool {
        matches!(self, Self::ResizeRight | Self::ResizeCorner)
    }

    fn resizes_height(self) -> bool {
        matches!(self, Self::ResizeBottom | Self::ResizeCorner)
    }
}

/// An active drag: where the pointer and window were when the gesture began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSession {
    /// What the drag does.
    pub kind: GestureKind,
    /// Pointer position at gesture start.
    pub anchor_pointer: Point,
    /// Window geometry at gesture start.
    pub anchor_geometry: WindowGeometry,
}

impl GestureSession {
    /// Geometry for the pointer at `pointer`. Sizes are clamped to the configured minimum;
    /// resizing never moves the window.
    pub fn geometry_at(&self, pointer: Point, config: &ChromeConfig) -> WindowGeometry {
        let dx = pointer.x - self.anchor_pointer.x;
        let dy = pointer.y - self.anchor_pointer.y;
        let anchor = self.anchor_geometry;

        if self.kind == GestureKind::Move {
            return anchor.moved_to(anchor.x + dx, anchor.y + dy);
        }

        let width = if self.kind.resizes_width() {
            config.min_width.max(anchor.width + dx)
        } else {
            anchor.width
        };
        let height = if self.kind.resizes_height() {
            config.min_height.max(anchor.height + dy)
        } else {
            anchor.height
        };
        anchor.resized_to(width, height)
    }
}

/// Sizing rules for the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeConfig {
    /// Smallest width a resize may produce.
    pub min_width: i32,
    /// Smallest height a resize may produce.
    pub min_height: i32,
    /// Thickness of the right/bottom resize handles.
    pub resize_border: i32,
    /// Height of the title bar (drag area and buttons).
    pub title_bar_height: i32,
    /// Width of each title bar button.
    pub button_width: i32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            min_width: 400,
            min_height: 200,
            resize_border: 6,
            title_bar_height: 30,
            button_width: 30,
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEvent {
    /// Pointer pressed on a drag area.
    GestureStart {
        /// Which drag starts.
        kind: GestureKind,
        /// Pointer position.
        pointer: Point,
    },
    /// Pointer moved while pressed.
    GestureMotion {
        /// Pointer position.
        pointer: Point,
    },
    /// Pointer released.
    GestureEnd,
    /// Minimize command.
    Minimize,
    /// The host restored the window from its minimized state.
    Restored,
    /// Maximize/restore command.
    ToggleMaximize,
    /// Screen bounds changed.
    ScreenChanged,
    /// Close command.
    Close,
}

/// Side effects the host must carry out beyond placing the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Hand the window to the host's minimize mechanism.
    Iconify,
    /// Re-suppress the host's own decorations after a restore.
    ReassertBorderless,
    /// Tear the window down.
    Close,
}

/// Everything the chrome owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeModel {
    /// Current visual state.
    pub state: WindowState,
    /// Current geometry.
    pub geometry: WindowGeometry,
    /// Geometry to return to when leaving maximized.
    pub saved_geometry: Option<WindowGeometry>,
    /// The active drag, if any.
    pub session: Option<GestureSession>,
    /// Set once the window has been closed.
    pub closed: bool,
}

impl ChromeModel {
    /// A normal window at `geometry`.
    pub fn new(geometry: WindowGeometry) -> Self {
        Self {
            state: WindowState::Normal,
            geometry,
            saved_geometry: None,
            session: None,
            closed: false,
        }
    }

    /// Resize handles exist only for a live, normal window.
    pub fn handles_visible(&self) -> bool {
        !self.closed && self.state == WindowState::Normal
    }

    /// Glyph for the maximize button.
    pub fn maximize_glyph(&self) -> &'static str {
        if self.state == WindowState::Maximized {
            RESTORE_GLYPH
        } else {
            MAXIMIZE_GLYPH
        }
    }
}

/// Compute the next model. `screen` is the current screen bounds.
pub fn transition(
    model: &ChromeModel,
    event: ChromeEvent,
    screen: WindowGeometry,
    config: &ChromeConfig,
) -> (ChromeModel, Option<HostRequest>) {
    let mut next = *model;
    if model.closed {
        return (next, None);
    }

    let request = match event {
        ChromeEvent::GestureStart { kind, pointer } => {
            if model.state == WindowState::Normal && model.session.is_none() {
                next.session = Some(GestureSession {
                    kind,
                    anchor_pointer: pointer,
                    anchor_geometry: model.geometry,
                });
            }
            None
        }
        ChromeEvent::GestureMotion { pointer } => {
            if let Some(session) = model.session
                && model.state == WindowState::Normal
            {
                next.geometry = session.geometry_at(pointer, config);
            }
            None
        }
        ChromeEvent::GestureEnd => {
            next.session = None;
            None
        }
        ChromeEvent::Minimize => {
            if model.state == WindowState::Minimized {
                None
            } else {
                next.state = WindowState::Minimized;
                next.session = None;
                Some(HostRequest::Iconify)
            }
        }
        ChromeEvent::Restored => {
            if model.state == WindowState::Minimized {
                next.state = WindowState::Normal;
                if let Some(saved) = next.saved_geometry.take() {
                    next.geometry = saved;
                }
                Some(HostRequest::ReassertBorderless)
            } else {
                None
            }
        }
        ChromeEvent::ToggleMaximize => {
            match model.state {
                WindowState::Normal => {
                    next.saved_geometry = Some(model.geometry);
                    next.geometry = screen;
                    next.state = WindowState::Maximized;
                    next.session = None;
                }
                WindowState::Maximized => {
                    if let Some(saved) = next.saved_geometry.take() {
                        next.geometry = saved;
                    }
                    next.state = WindowState::Normal;
                }
                WindowState::Minimized => {}
            }
            None
        }
        ChromeEvent::ScreenChanged => {
            if model.state == WindowState::Maximized {
                next.geometry = screen;
            }
            None
        }
        ChromeEvent::Close => {
            next.closed = true;
            next.session = None;
            Some(HostRequest::Close)
        }
    };

    (next, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCREEN: WindowGeometry = WindowGeometry::sized(1920, 1080);

    fn step(model: &ChromeModel, event: ChromeEvent) -> ChromeModel {
        transition(model, event, SCREEN, &ChromeConfig::default()).0
    }

    #[test]
    fn corner_resize_clamps_both_axes() {
        let start = ChromeModel::new(WindowGeometry::new(50, 60, 800, 600));
        let model = step(
            &start,
            ChromeEvent::GestureStart {
                kind: GestureKind::ResizeCorner,
                pointer: Point::new(850, 660),
            },
        );
        let model = step(
            &model,
            ChromeEvent::GestureMotion {
                pointer: Point::new(100, 900),
            },
        );
        assert_eq!(model.geometry, WindowGeometry::new(50, 60, 400, 840));
    }

    #[test]
    fn restore_from_minimized_returns_to_pre_maximize_geometry() {
        let g = WindowGeometry::new(10, 10, 500, 300);
        let model = step(&ChromeModel::new(g), ChromeEvent::ToggleMaximize);
        let (model, request) = transition(
            &model,
            ChromeEvent::Minimize,
            SCREEN,
            &ChromeConfig::default(),
        );
        assert_eq!(request, Some(HostRequest::Iconify));
        assert_eq!(model.saved_geometry, Some(g));

        let (model, request) =
            transition(&model, ChromeEvent::Restored, SCREEN, &ChromeConfig::default());
        assert_eq!(request, Some(HostRequest::ReassertBorderless));
        assert_eq!(model.state, WindowState::Normal);
        assert_eq!(model.geometry, g);
        assert_eq!(model.saved_geometry, None);
    }

    #[test]
    fn second_gesture_is_rejected_while_one_is_active() {
        let model = step(
            &ChromeModel::new(WindowGeometry::new(0, 0, 500, 500)),
            ChromeEvent::GestureStart {
                kind: GestureKind::Move,
                pointer: Point::new(5, 5),
            },
        );
        let again = step(
            &model,
            ChromeEvent::GestureStart {
                kind: GestureKind::ResizeRight,
                pointer: Point::new(499, 10),
            },
        );
        assert_eq!(again.session.map(|s| s.kind), Some(GestureKind::Move));
    }

    #[test]
    fn glyph_follows_state() {
        let model = ChromeModel::new(WindowGeometry::sized(500, 500));
        assert_eq!(model.maximize_glyph(), MAXIMIZE_GLYPH);
        let model = step(&model, ChromeEvent::ToggleMaximize);
        assert_eq!(model.maximize_glyph(), RESTORE_GLYPH);
    }
}
