//! Core geometry types
//!
//! Plain `f32` geometry used on both sides of the engine boundary. The motion
//! integrator works in [`Vec2`], the tile packer hands [`Rect`]s back to the
//! UI layer.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Pixel Snapping
// ─────────────────────────────────────────────────────────────────────────────

/// Round a coordinate to the nearest whole pixel
///
/// Halves round away from zero, matching `f32::round`.
#[inline]
pub fn snap(value: f32) -> f32 {
    value.round()
}

// ─────────────────────────────────────────────────────────────────────────────
// Vec2
// ─────────────────────────────────────────────────────────────────────────────

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    /// Component-wise sign, with zero mapping to zero
    pub fn signum(&self) -> Self {
        fn sign(v: f32) -> f32 {
            if v > 0.0 {
                1.0
            } else if v < 0.0 {
                -1.0
            } else {
                0.0
            }
        }
        Self::new(sign(self.x), sign(self.y))
    }

    /// True when each component differs from `other` by less than `epsilon`
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<Point> for Vec2 {
    fn from(point: Point) -> Self {
        Vec2::new(point.x, point.y)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point / Size / Rect
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, or zero for a zero-height size
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rect from its left, top, right and bottom edges
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect::new(left, top, right - left, bottom - top)
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Round every edge to whole pixels
    ///
    /// Edges are rounded independently rather than rounding the size, so two
    /// rects that share an edge before snapping still share it afterwards.
    pub fn snapped(&self) -> Self {
        Rect::from_edges(
            snap(self.x()),
            snap(self.y()),
            snap(self.max_x()),
            snap(self.max_y()),
        )
    }

    /// Check if this rect intersects with another
    ///
    /// Rects that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.max_x()
            && self.max_x() > other.origin.x
            && self.origin.y < other.max_y()
            && self.max_y() > other.origin.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -1.0);

        assert_eq!(a + b, Vec2::new(4.0, 1.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(b / 2.0, Vec2::new(1.5, -0.5));
    }

    #[test]
    fn test_vec2_signum_keeps_zero() {
        assert_eq!(Vec2::new(-4.0, 0.0).signum(), Vec2::new(-1.0, 0.0));
        assert_eq!(Vec2::new(0.5, 7.0).signum(), Vec2::ONE);
    }

    #[test]
    fn test_vec2_approx_eq_is_per_component() {
        let a = Vec2::new(10.0, 10.0);
        assert!(a.approx_eq(&Vec2::new(10.5, 9.5), 1.0));
        assert!(!a.approx_eq(&Vec2::new(10.5, 11.0), 1.0));
    }

    #[test]
    fn test_snapped_rects_stay_adjacent() {
        let left = Rect::new(0.0, 0.0, 33.4, 20.0);
        let right = Rect::new(33.4, 0.0, 33.4, 20.0);

        let left = left.snapped();
        let right = right.snapped();

        assert_eq!(left.max_x(), right.x());
        assert!(!left.intersects(&right));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Size::new(300.0, 200.0).aspect_ratio(), 1.5);
        assert_eq!(Size::new(300.0, 0.0).aspect_ratio(), 0.0);
    }

    #[test]
    fn test_rect_serializes_as_origin_and_size() {
        let json = serde_json::to_string(&Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(
            json,
            r#"{"origin":{"x":1.0,"y":2.0},"size":{"width":3.0,"height":4.0}}"#
        );
    }
}
