//! Basic geometric types used by the viewport.
//!
//! All coordinates are screen pixels. The viewport never converts between
//! diagram space and screen space itself; that is the job of the transform
//! applied to the mounted diagram.

use std::fmt;

/// A 2D point or offset in screen pixels.
///
/// # Examples
///
/// ```
/// # use evml_core::geometry::Point;
/// let start = Point::new(10.0, 20.0);
/// let end = Point::new(25.0, 5.0);
///
/// let delta = end.sub_point(start);
/// assert_eq!(delta.x(), 15.0);
/// assert_eq!(delta.y(), -15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point.
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
