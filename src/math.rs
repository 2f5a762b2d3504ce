//! GLSL-style scalar helpers shared by the fragment kernels.

/// Clamp into [0, 1].
pub(crate) fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Hermite interpolation between `edge0` and `edge1` (GLSL `smoothstep`).
///
/// Reversed edges (`edge0 > edge1`) yield the descending ramp, matching
/// shader semantics.
pub(crate) fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend (GLSL `mix`).
pub(crate) fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fractional part (GLSL `fract`).
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}
