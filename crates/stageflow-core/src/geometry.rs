//! Geometric primitives for diagram layout and positioning.
//!
//! This module provides the geometric types used throughout Stageflow for
//! calculating node centres, leg endpoints and container dimensions.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`ContainerSize`] - The measured size of the rendering surface
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Stageflow uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the container at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::Deserialize;

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use stageflow_core::geometry::Point;
/// let center = Point::new(460.0, 280.0);
/// let nudged = center.add_point(Point::new(3.0, -22.0));
/// assert_eq!(nudged.x(), 463.0);
/// assert_eq!(nudged.y(), 258.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
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

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    ///
    /// ```
    /// # use stageflow_core::geometry::Point;
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(3.0, 4.0);
    /// assert_eq!(a.distance(b), 5.0);
    /// ```
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns half of this size, i.e. the extent from a centre to an edge
    pub fn half(self) -> Self {
        Self {
            width: self.width / 2.0,
            height: self.height / 2.0,
        }
    }
}

/// The measured size of the rendering surface a diagram lives in.
///
/// Dimensions that are negative or not finite (e.g. a host that has not
/// been measured yet) are clamped to zero, so every consumer sees a
/// well-defined, possibly degenerate, box.
///
/// # Examples
///
/// ```
/// # use stageflow_core::geometry::ContainerSize;
/// let size = ContainerSize::new(-10.0, f32::NAN);
/// assert_eq!(size.width(), 0.0);
/// assert_eq!(size.height(), 0.0);
/// assert!(size.is_degenerate());
///
/// assert_eq!(ContainerSize::default().width(), 920.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawContainerSize")]
pub struct ContainerSize {
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct RawContainerSize {
    width: f32,
    height: f32,
}

impl From<RawContainerSize> for ContainerSize {
    fn from(raw: RawContainerSize) -> Self {
        Self::new(raw.width, raw.height)
    }
}

impl ContainerSize {
    /// Size assumed before the host container has been measured.
    pub const DEFAULT_WIDTH: f32 = 920.0;
    pub const DEFAULT_HEIGHT: f32 = 560.0;

    /// Creates a container size, clamping invalid dimensions to zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    /// Returns the container width in pixels
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the container height in pixels
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true when either dimension is zero
    pub fn is_degenerate(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Returns true when the point lies inside `[0, width] x [0, height]`
    pub fn contains(self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x()) && (0.0..=self.height).contains(&point.y())
    }
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

fn clamp_dimension(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = size.half();
        Self {
            min_x: center.x - half.width,
            min_y: center.y - half.height,
            max_x: center.x + half.width,
            max_y: center.y + half.height,
        }
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(1.0, 1.0).distance(Point::new(4.0, 5.0)), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance(Point::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_size_half() {
        let half = Size::new(36.0, 36.0).half();
        assert_eq!(half.width(), 18.0);
        assert_eq!(half.height(), 18.0);
    }

    #[test]
    fn test_container_size_default() {
        let size = ContainerSize::default();
        assert_eq!(size.width(), 920.0);
        assert_eq!(size.height(), 560.0);
        assert!(!size.is_degenerate());
    }

    #[test]
    fn test_container_size_clamps_invalid_dimensions() {
        let size = ContainerSize::new(-5.0, 300.0);
        assert_eq!(size.width(), 0.0);
        assert_eq!(size.height(), 300.0);
        assert!(size.is_degenerate());

        let size = ContainerSize::new(f32::INFINITY, f32::NAN);
        assert_eq!(size.width(), 0.0);
        assert_eq!(size.height(), 0.0);
    }

    #[test]
    fn test_container_size_contains() {
        let size = ContainerSize::new(100.0, 50.0);
        assert!(size.contains(Point::new(0.0, 0.0)));
        assert!(size.contains(Point::new(100.0, 50.0)));
        assert!(!size.contains(Point::new(100.5, 10.0)));
        assert!(!size.contains(Point::new(-0.5, 10.0)));
    }

    #[test]
    fn test_bounds_from_center() {
        let bounds = Point::new(100.0, 50.0).to_bounds(Size::new(36.0, 36.0));
        assert_eq!(bounds.width(), 36.0);
        assert_eq!(bounds.height(), 36.0);
        assert_eq!(bounds.min_point(), Point::new(82.0, 32.0));
    }
}
