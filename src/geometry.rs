//! Geometric primitives shared by the kernels.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Straight line segment between two endpoints.
///
/// Layout matches the host storage-buffer element (two `vec2<f32>`), so a
/// slice of segments can be uploaded with a single cast.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    /// Segment from `a` to `b`.
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Euclidean length of the segment.
    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }
}

/// Quadratic Bézier curve in Bernstein form over `t` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
}

impl QuadraticBezier {
    /// Curve with the given control points.
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn eval(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u) + self.p1 * (2.0 * u * t) + self.p2 * (t * t)
    }

    /// True when the quadratic term `p0 - 2*p1 + p2` vanishes.
    ///
    /// The curve then collapses to the straight segment `p0..p2`, which the
    /// closed-form distance solver cannot handle (its leading coefficient
    /// becomes zero).
    pub fn is_degenerate(&self) -> bool {
        let b = self.p0 - self.p1 * 2.0 + self.p2;
        b.length_squared() <= 1.0e-12
    }
}
