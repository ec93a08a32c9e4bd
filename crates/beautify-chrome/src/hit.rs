//! Pointer hit testing against the chrome's decorations.

use crate::geometry::{Point, WindowGeometry};
use crate::machine::{ChromeConfig, ChromeModel, GestureKind, WindowState};

/// Which part of the window a pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    /// Not on the window (or the window is minimized or closed).
    Outside,
    /// Title bar drag area.
    TitleBar,
    /// Minimize button.
    MinimizeButton,
    /// Maximize/restore button.
    MaximizeButton,
    /// Close button.
    CloseButton,
    /// Right resize handle.
    ResizeRight,
    /// Bottom resize handle.
    ResizeBottom,
    /// Bottom-right resize handle.
    ResizeCorner,
    /// Application content.
    Content,
}

impl HitZone {
    /// The drag a press in this zone starts, if any.
    pub fn gesture(self) -> Option<GestureKind> {
        match self {
            Self::TitleBar => Some(GestureKind::Move),
            Self::ResizeRight => Some(GestureKind::ResizeRight),
            Self::ResizeBottom => Some(GestureKind::ResizeBottom),
            Self::ResizeCorner => Some(GestureKind::ResizeCorner),
            _ => None,
        }
    }
}

/// Rectangles of the title bar buttons, right to left: close, maximize, minimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRects {
    /// Minimize button.
    pub minimize: WindowGeometry,
    /// Maximize/restore button.
    pub maximize: WindowGeometry,
    /// Close button.
    pub close: WindowGeometry,
}

/// Layout of the title bar buttons for a window at `geometry`.
pub fn button_rects(geometry: &WindowGeometry, config: &ChromeConfig) -> ButtonRects {
    let w = config.button_width;
    let h = config.title_bar_height.min(geometry.height);
    let right = geometry.right();
    ButtonRects {
        close: WindowGeometry::new(right - w, geometry.y, w, h),
        maximize: WindowGeometry::new(right - 2 * w, geometry.y, w, h),
        minimize: WindowGeometry::new(right - 3 * w, geometry.y, w, h),
    }
}

/// Classify `pointer` against the window described by `model`.
///
/// Resize handles take precedence over everything else, but only exist while
/// [`ChromeModel::handles_visible`] holds.
pub fn hit_test(model: &ChromeModel, pointer: Point, config: &ChromeConfig) -> HitZone {
    let g = model.geometry;
    if model.closed || model.state == WindowState::Minimized || !g.contains(pointer) {
        return HitZone::Outside;
    }

    if model.handles_visible() {
        let border = config.resize_border;
        let on_right = pointer.x >= g.right() - border;
        let on_bottom = pointer.y >= g.bottom() - border;
        match (on_right, on_bottom) {
            (true, true) => return HitZone::ResizeCorner,
            (true, false) => return HitZone::ResizeRight,
            (false, true) => return HitZone::ResizeBottom,
            (false, false) => {}
        }
    }

    if pointer.y < g.y + config.title_bar_height {
        let buttons = button_rects(&g, config);
        if buttons.close.contains(pointer) {
            return HitZone::CloseButton;
        }
        if buttons.maximize.contains(pointer) {
            return HitZone::MaximizeButton;
        }
        if buttons.minimize.contains(pointer) {
            return HitZone::MinimizeButton;
        }
        return HitZone::TitleBar;
    }

    HitZone::Content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{ChromeEvent, transition};

    fn config() -> ChromeConfig {
        ChromeConfig {
            min_width: 20,
            min_height: 5,
            resize_border: 1,
            title_bar_height: 1,
            button_width: 3,
        }
    }

    #[test]
    fn zones_of_a_normal_window() {
        let model = ChromeModel::new(WindowGeometry::new(10, 5, 40, 12));
        let cfg = config();
        let zone = |x, y| hit_test(&model, Point::new(x, y), &cfg);

        assert_eq!(zone(9, 5), HitZone::Outside);
        assert_eq!(zone(10, 5), HitZone::TitleBar);
        assert_eq!(zone(47, 5), HitZone::CloseButton);
        assert_eq!(zone(44, 5), HitZone::MaximizeButton);
        assert_eq!(zone(41, 5), HitZone::MinimizeButton);
        assert_eq!(zone(49, 5), HitZone::ResizeRight);
        assert_eq!(zone(20, 16), HitZone::ResizeBottom);
        assert_eq!(zone(49, 16), HitZone::ResizeCorner);
        assert_eq!(zone(20, 10), HitZone::Content);
    }

    #[test]
    fn no_handles_while_maximized() {
        let cfg = config();
        let screen = WindowGeometry::sized(80, 24);
        let model = ChromeModel::new(WindowGeometry::new(10, 5, 40, 12));
        let (model, _) = transition(&model, ChromeEvent::ToggleMaximize, screen, &cfg);

        assert_eq!(hit_test(&model, Point::new(79, 10), &cfg), HitZone::Content);
        assert_eq!(hit_test(&model, Point::new(40, 23), &cfg), HitZone::Content);
        assert_eq!(hit_test(&model, Point::new(79, 0), &cfg), HitZone::CloseButton);
    }
}
