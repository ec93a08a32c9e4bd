//! Screen-space geometry.
//!
//! Units are whatever the host measures the screen in (pixels for a desktop window, cells for a
//! terminal). Geometry strings use the `WIDTHxHEIGHT+X+Y` form.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A pointer position in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    /// Column / horizontal position.
    pub x: i32,
    /// Row / vertical position.
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Position and size of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WindowGeometry {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl WindowGeometry {
    /// Create a geometry.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A geometry anchored at the origin, used for screen bounds.
    pub const fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// One past the right-most column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom-most row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether `point` lies inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Same size, new position.
    pub fn moved_to(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Same position, new size.
    pub fn resized_to(self, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

/// Error returned when a geometry string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid geometry '{input}': expected WIDTHxHEIGHT[+X+Y]")]
pub struct GeometryParseError {
    input: String,
}

impl FromStr for WindowGeometry {
    type Err = GeometryParseError;

    /// Parse `WIDTHxHEIGHT`, `WIDTHxHEIGHT+X+Y` or with negative offsets (`-X`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || GeometryParseError {
            input: s.to_string(),
        };
        let trimmed = s.trim();

        let size_end = trimmed
            .get(1..)
            .and_then(|rest| rest.find(['+', '-']))
            .map_or(trimmed.len(), |i| i + 1);
        let (size, offsets) = trimmed.split_at(size_end);
        let (w, h) = size.split_once('x').ok_or_else(err)?;
        let width: i32 = w.parse().map_err(|_| err())?;
        let height: i32 = h.parse().map_err(|_| err())?;
        if width <= 0 || height <= 0 {
            return Err(err());
        }

        if offsets.is_empty() {
            return Ok(Self::new(0, 0, width, height));
        }

        let split = offsets[1..]
            .find(['+', '-'])
            .map(|i| i + 1)
            .ok_or_else(err)?;
        let (x, y) = offsets.split_at(split);
        let x: i32 = x.parse().map_err(|_| err())?;
        let y: i32 = y.parse().map_err(|_| err())?;
        Ok(Self::new(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_string_round_trip() {
        let g: WindowGeometry = "1200x700+10+20".parse().unwrap();
        assert_eq!(g, WindowGeometry::new(10, 20, 1200, 700));
        assert_eq!(g.to_string(), "1200x700+10+20");

        let g: WindowGeometry = "80x24-3+4".parse().unwrap();
        assert_eq!(g, WindowGeometry::new(-3, 4, 80, 24));
        assert_eq!(g.to_string(), "80x24-3+4");

        let g: WindowGeometry = "80x24".parse().unwrap();
        assert_eq!(g, WindowGeometry::sized(80, 24));
    }

    #[test]
    fn malformed_geometry_strings() {
        for bad in ["", "x", "80", "80x", "0x10", "80x24+1", "axb+1+2", "80x24+1+2+3"] {
            assert!(bad.parse::<WindowGeometry>().is_err(), "{bad}");
        }
    }

    #[test]
    fn contains_is_half_open() {
        let g = WindowGeometry::new(2, 3, 4, 5);
        assert!(g.contains(Point::new(2, 3)));
        assert!(g.contains(Point::new(5, 7)));
        assert!(!g.contains(Point::new(6, 7)));
        assert!(!g.contains(Point::new(5, 8)));
    }
}
