//! Vertex stages: fullscreen quad and textured quad.

use bytemuck::{Pod, Zeroable};
use glam::{vec2, vec4, Mat4, Vec2, Vec4};

use crate::color::Color;

/// Output of the fullscreen vertex stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    /// Clip-space position.
    pub position: Vec4,
    /// Parametric coordinate in [0, 1]², y up.
    pub coord: Vec2,
}

/// Vertex stage of the fullscreen pass.
///
/// Pure index arithmetic producing a canonical triangle-strip quad covering
/// clip space; indices past 3 wrap around the same four corners.
pub fn fullscreen_quad_vertex(index: u32) -> QuadVertex {
    let x = (index & 1) as f32 * 2.0 - 1.0;
    let y = ((index >> 1) & 1) as f32 * 2.0 - 1.0;
    QuadVertex {
        position: vec4(x, y, 0.0, 1.0),
        coord: vec2(x, y) * 0.5 + Vec2::splat(0.5),
    }
}

/// Vertex-buffer element of the textured pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: Vec2,
    pub uv: Vec2,
}

/// Output of the textured vertex stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedOutput {
    /// Clip-space position.
    pub position: Vec4,
    /// Pass-through texture coordinate.
    pub uv: Vec2,
}

/// Vertex stage of the textured pass: camera transform, uv pass-through.
pub fn textured_vertex(vertex: TexturedVertex, view_proj: Mat4) -> TexturedOutput {
    TexturedOutput {
        position: view_proj * vec4(vertex.position.x, vertex.position.y, 0.0, 1.0),
        uv: vertex.uv,
    }
}

/// Fragment stage of the textured pass: plain texture lookup.
pub fn textured_fragment(sample: impl Fn(Vec2) -> Vec4, uv: Vec2) -> Color {
    let texel = sample(uv);
    Color::new(texel.x, texel.y, texel.z, texel.w)
}
