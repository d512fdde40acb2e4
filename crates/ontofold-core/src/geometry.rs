//! Geometric primitives for diagram shapes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by its top-left corner and size
//!
//! # Coordinate System
//!
//! Diagrams use a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use ontofold_core::geometry::Point;
/// let point = Point::new(10.0, 20.0);
/// assert_eq!(point.x(), 10.0);
/// assert_eq!(point.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Width and height of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    top_left: Point,
    size: Size,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self { top_left, size }
    }

    pub fn min_x(self) -> f32 {
        self.top_left.x
    }

    pub fn min_y(self) -> f32 {
        self.top_left.y
    }

    pub fn max_x(self) -> f32 {
        self.top_left.x + self.size.width
    }

    pub fn max_y(self) -> f32 {
        self.top_left.y + self.size.height
    }

    /// Middle of the bottom edge, where relation paths attach to class boxes.
    ///
    /// ```
    /// # use ontofold_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(100.0, 40.0));
    /// assert_eq!(bounds.bottom_center(), Point::new(60.0, 50.0));
    /// ```
    pub fn bottom_center(self) -> Point {
        Point::new(self.top_left.x + self.size.width / 2.0, self.max_y())
    }

    pub fn size(self) -> Size {
        self.size
    }
}
