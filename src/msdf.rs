//! MSDF text compositing fragment kernel.

use bytemuck::{Pod, Zeroable};
use glam::{vec2, Vec2, Vec4};

use crate::color::Color;
use crate::math::{mix, saturate, smoothstep};

/// Offset scale for the supersampling taps, in uv-derivative units.
pub const SUPERSAMPLE_SCALE: f32 = 0.345;

/// Derivative floor that keeps the screen-space range finite on quads with
/// a constant texture coordinate.
const MIN_DERIVATIVE: f32 = 1.0e-6;

/// Branchless median of three channel values.
///
/// MSDF atlases encode the true signed distance as the per-texel median, so
/// the decode must pick the median regardless of which channel holds it.
pub fn median3(r: f32, g: f32, b: f32) -> f32 {
    r.min(g).max(r.max(g).min(b))
}

/// Per-draw uniform block, field order as the host lays it out.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FontUniforms {
    /// Distance-field range divided by the atlas extent, per axis.
    pub unit_range: Vec2,
    /// Bias applied to the decoded distance before scaling.
    pub in_bias: f32,
    /// Bias applied to the scaled coverage.
    pub out_bias: f32,
    /// Blend between a hard clamp (0) and a smoothstep (1) of the coverage.
    pub smoothness: f32,
    /// Blend toward the 4x supersampled coverage.
    pub super_sample: f32,
    /// Exponent applied to the final opacity.
    pub inv_gamma: f32,
    pub _padding: u32,
}

impl FontUniforms {
    /// Host defaults: crisp edges, no supersampling, unit gamma.
    pub fn new(unit_range: Vec2) -> Self {
        Self {
            unit_range,
            in_bias: 0.0,
            out_bias: 0.0,
            smoothness: 0.0,
            super_sample: 0.0,
            inv_gamma: 1.0,
            _padding: 0,
        }
    }
}

/// Screen-space partial derivatives of the texture coordinate, the CPU
/// stand-in for the hardware `dpdx`/`dpdy` instructions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvGradients {
    pub ddx: Vec2,
    pub ddy: Vec2,
}

impl UvGradients {
    /// `fwidth(uv)`: sum of absolute partial derivatives, per axis.
    fn fwidth(&self) -> Vec2 {
        vec2(
            self.ddx.x.abs() + self.ddy.x.abs(),
            self.ddx.y.abs() + self.ddy.y.abs(),
        )
    }
}

/// Width of the distance-field unit range in screen pixels.
///
/// Floored at 1.0 so the anti-aliasing band never vanishes under
/// minification.
pub fn screen_px_range(uniforms: &FontUniforms, grads: &UvGradients) -> f32 {
    let fw = grads.fwidth().max(Vec2::splat(MIN_DERIVATIVE));
    let screen_tex_size = Vec2::ONE / fw;
    (0.5 * uniforms.unit_range.dot(screen_tex_size)).max(1.0)
}

/// Coverage of a single decoded distance sample.
///
/// `e = width * (d - 0.5 + in_bias) + 0.5 + out_bias`, then a tunable blend
/// between a hard clamp and a smoothstep of `e`.
pub fn contour(distance: f32, width: f32, uniforms: &FontUniforms) -> f32 {
    let e = width * (distance - 0.5 + uniforms.in_bias) + 0.5 + uniforms.out_bias;
    mix(saturate(e), smoothstep(0.0, 1.0, e), uniforms.smoothness)
}

/// Full compositing kernel: median decode, screen-space range, 4x
/// box-filtered supersampling, gamma.
///
/// `sample` reads the pre-baked multi-channel distance texture at a
/// normalized coordinate. Emits white with the computed coverage as alpha;
/// compositing over the background is the caller's responsibility.
pub fn msdf_fragment(
    sample: impl Fn(Vec2) -> Vec4,
    uv: Vec2,
    grads: &UvGradients,
    uniforms: &FontUniforms,
) -> Color {
    let width = screen_px_range(uniforms, grads);
    let coverage = |uv: Vec2| {
        let texel = sample(uv);
        contour(median3(texel.x, texel.y, texel.z), width, uniforms)
    };

    let center = coverage(uv);

    // Four taps at the corners of a derivative-scaled box, box-filtered
    // against the center sample.
    let duv = (grads.ddx + grads.ddy) * SUPERSAMPLE_SCALE;
    let corners = coverage(uv - duv)
        + coverage(uv + duv)
        + coverage(vec2(uv.x - duv.x, uv.y + duv.y))
        + coverage(vec2(uv.x + duv.x, uv.y - duv.y));
    let supersampled = (center + 0.5 * corners) / 3.0;

    let opacity = saturate(mix(center, supersampled, uniforms.super_sample))
        .powf(uniforms.inv_gamma);
    Color::WHITE.with_alpha(opacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec4;

    fn flat_grads() -> UvGradients {
        UvGradients {
            ddx: vec2(1.0 / 64.0, 0.0),
            ddy: vec2(0.0, 1.0 / 64.0),
        }
    }

    #[test]
    fn median_is_invariant_under_channel_permutation() {
        let values = [0.2, 0.5, 0.7];
        for (r, g, b) in [
            (0, 1, 2),
            (0, 2, 1),
            (1, 0, 2),
            (1, 2, 0),
            (2, 0, 1),
            (2, 1, 0),
        ] {
            assert_eq!(median3(values[r], values[g], values[b]), 0.5);
        }
    }

    #[test]
    fn median_handles_ties() {
        assert_eq!(median3(0.5, 0.5, 0.1), 0.5);
        assert_eq!(median3(0.3, 0.3, 0.3), 0.3);
    }

    #[test]
    fn screen_px_range_is_floored_at_one() {
        // Magnified far beyond the atlas resolution: huge derivatives.
        let uniforms = FontUniforms::new(vec2(4.0 / 512.0, 4.0 / 512.0));
        let grads = UvGradients {
            ddx: vec2(0.5, 0.0),
            ddy: vec2(0.0, 0.5),
        };
        assert_eq!(screen_px_range(&uniforms, &grads), 1.0);
    }

    #[test]
    fn screen_px_range_scales_with_inverse_derivatives() {
        let uniforms = FontUniforms::new(vec2(4.0 / 512.0, 4.0 / 512.0));
        // One atlas texel per screen pixel.
        let grads = UvGradients {
            ddx: vec2(1.0 / 512.0, 0.0),
            ddy: vec2(0.0, 1.0 / 512.0),
        };
        let range = screen_px_range(&uniforms, &grads);
        assert!((range - 4.0).abs() < 1.0e-4);
    }

    #[test]
    fn contour_is_half_at_the_edge() {
        let uniforms = FontUniforms::new(vec2(0.1, 0.1));
        assert!((contour(0.5, 8.0, &uniforms) - 0.5).abs() < 1.0e-6);
        // Deep inside and outside saturate.
        assert_eq!(contour(1.0, 8.0, &uniforms), 1.0);
        assert_eq!(contour(0.0, 8.0, &uniforms), 0.0);
    }

    #[test]
    fn contour_biases_shift_the_edge() {
        let mut uniforms = FontUniforms::new(vec2(0.1, 0.1));
        uniforms.in_bias = 0.1;
        assert!((contour(0.4, 8.0, &uniforms) - 0.5).abs() < 1.0e-6);
        uniforms.in_bias = 0.0;
        uniforms.out_bias = 0.25;
        assert!((contour(0.5, 8.0, &uniforms) - 0.75).abs() < 1.0e-6);
    }

    #[test]
    fn supersampling_is_identity_on_a_constant_field() {
        let uniforms = {
            let mut u = FontUniforms::new(vec2(4.0 / 64.0, 4.0 / 64.0));
            u.super_sample = 1.0;
            u
        };
        let sample = |_uv: Vec2| vec4(0.8, 0.8, 0.8, 1.0);
        let grads = flat_grads();
        let with_ss = msdf_fragment(sample, vec2(0.5, 0.5), &grads, &uniforms);
        let without_ss = msdf_fragment(sample, vec2(0.5, 0.5), &grads, &FontUniforms::new(uniforms.unit_range));
        assert!((with_ss.a - without_ss.a).abs() < 1.0e-6);
    }

    #[test]
    fn inverse_gamma_curves_the_opacity() {
        let mut uniforms = FontUniforms::new(vec2(4.0 / 64.0, 4.0 / 64.0));
        // A sample sitting exactly on the edge decodes to coverage 0.5.
        let sample = |_uv: Vec2| vec4(0.5, 0.5, 0.5, 1.0);
        let plain = msdf_fragment(sample, vec2(0.5, 0.5), &flat_grads(), &uniforms);
        assert!((plain.a - 0.5).abs() < 1.0e-6);

        uniforms.inv_gamma = 2.0;
        let curved = msdf_fragment(sample, vec2(0.5, 0.5), &flat_grads(), &uniforms);
        assert!((curved.a - 0.25).abs() < 1.0e-6);
    }

    #[test]
    fn fragment_emits_white_with_variable_alpha() {
        let uniforms = FontUniforms::new(vec2(4.0 / 64.0, 4.0 / 64.0));
        let color = msdf_fragment(|_| vec4(1.0, 1.0, 1.0, 1.0), vec2(0.5, 0.5), &flat_grads(), &uniforms);
        assert_eq!((color.r, color.g, color.b), (1.0, 1.0, 1.0));
        assert!((color.a - 1.0).abs() < 1.0e-6);
    }

    #[test]
    fn degenerate_gradients_stay_finite() {
        let uniforms = FontUniforms::new(vec2(4.0 / 64.0, 4.0 / 64.0));
        let grads = UvGradients {
            ddx: Vec2::ZERO,
            ddy: Vec2::ZERO,
        };
        let color = msdf_fragment(|_| vec4(0.5, 0.5, 0.5, 1.0), vec2(0.5, 0.5), &grads, &uniforms);
        assert!(color.a.is_finite());
    }
}
