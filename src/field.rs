//! Segment distance-field fragment kernel.

use bytemuck::{Pod, Zeroable};
use glam::{vec2, Vec2};

use crate::color::Color;
use crate::distance::distance_to_segment;
use crate::geometry::LineSegment;
use crate::math::{fract, smoothstep};

/// Outer edge of the smooth threshold band; intensity is 0 at or beyond.
pub const SMOOTH_EDGE_OUTER: f32 = 0.015;
/// Inner edge of the smooth threshold band; intensity is 1 at or below.
pub const SMOOTH_EDGE_INNER: f32 = 0.01;
/// Band frequency of the periodic visualization (period 0.05 in distance).
pub const BAND_FREQUENCY: f32 = 20.0;

/// Color-mapping mode of the segment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Anti-aliased threshold at the zero-set boundary.
    SmoothEdge,
    /// Repeating contour bands, a debugging view of field continuity.
    PeriodicBands,
}

impl FieldMode {
    /// Decode the integer flag stored in the uniform block.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::SmoothEdge),
            1 => Some(Self::PeriodicBands),
            _ => None,
        }
    }

    /// Integer flag as stored in the uniform block.
    pub fn to_raw(self) -> u32 {
        match self {
            Self::SmoothEdge => 0,
            Self::PeriodicBands => 1,
        }
    }
}

/// Per-frame uniform block as the host lays it out.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GeometryUniforms {
    /// Segment currently being drawn, ahead of the stored buffer.
    pub preview: LineSegment,
    /// Declared number of active stored segments.
    pub num_lines: u32,
    /// Raw [`FieldMode`] flag.
    pub mode: u32,
    /// Width over height of the render target.
    pub aspect_ratio: f32,
    pub _padding: u32,
}

/// Typed per-draw parameters of the field kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub preview: LineSegment,
    /// Declared number of stored segments. Untrusted: the evaluator
    /// intersects it with the actual buffer length before iterating.
    pub num_lines: u32,
    pub mode: FieldMode,
    pub aspect_ratio: f32,
}

impl FieldParams {
    /// Encode into the host uniform-block layout.
    pub fn to_uniforms(&self) -> GeometryUniforms {
        GeometryUniforms {
            preview: self.preview,
            num_lines: self.num_lines,
            mode: self.mode.to_raw(),
            aspect_ratio: self.aspect_ratio,
            _padding: 0,
        }
    }

    /// Decode from the host uniform-block layout.
    ///
    /// Returns `None` when the mode flag is outside the known variants.
    pub fn from_uniforms(uniforms: &GeometryUniforms) -> Option<Self> {
        Some(Self {
            preview: uniforms.preview,
            num_lines: uniforms.num_lines,
            mode: FieldMode::from_raw(uniforms.mode)?,
            aspect_ratio: uniforms.aspect_ratio,
        })
    }
}

fn scale_x(p: Vec2, aspect: f32) -> Vec2 {
    vec2(p.x * aspect, p.y)
}

/// Minimum distance from `coord` to the preview segment and the active
/// stored segments.
///
/// The x coordinate of the query point and of every endpoint is scaled by
/// the aspect ratio first, so distances are isotropic on non-square
/// targets. Iteration is bounded by `min(segments.len(), num_lines)`; the
/// declared count alone is never trusted.
pub fn field_distance(coord: Vec2, params: &FieldParams, segments: &[LineSegment]) -> f32 {
    let aspect = params.aspect_ratio;
    let p = scale_x(coord, aspect);

    let preview = &params.preview;
    let mut dist =
        distance_to_segment(p, scale_x(preview.a, aspect), scale_x(preview.b, aspect)).0;

    let count = segments.len().min(params.num_lines as usize);
    for segment in &segments[..count] {
        let d = distance_to_segment(p, scale_x(segment.a, aspect), scale_x(segment.b, aspect)).0;
        dist = dist.min(d);
    }
    dist
}

/// Fragment kernel of the fullscreen pass.
///
/// Maps the field distance to an intensity per [`FieldMode`] and emits a
/// black-to-blue ramp, always fully opaque.
pub fn field_fragment(coord: Vec2, params: &FieldParams, segments: &[LineSegment]) -> Color {
    let dist = field_distance(coord, params, segments);
    let intensity = match params.mode {
        FieldMode::SmoothEdge => smoothstep(SMOOTH_EDGE_OUTER, SMOOTH_EDGE_INNER, dist),
        FieldMode::PeriodicBands => fract(dist * BAND_FREQUENCY),
    };
    Color::new(0.0, 0.0, intensity, 1.0)
}
