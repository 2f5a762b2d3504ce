//! Exact quadratic Bézier distance via a depressed cubic.

use glam::Vec2;

use crate::geometry::QuadraticBezier;

use super::segment::distance_to_segment;

/// √3 as used by the trigonometric branch; kept at shader precision.
const SQRT_3: f32 = 1.732_050_808;

fn dot2(v: Vec2) -> f32 {
    v.dot(v)
}

/// Minimum Euclidean distance from `pt` to the curve over `t` in [0, 1].
///
/// The derivative of the squared distance reduces to a depressed cubic in
/// the curve parameter. The discriminant `h = q² + 4p³` selects the branch:
/// Cardano's formula with signed cube roots when one real root exists, the
/// cosine substitution when three do. In the three-root branch only the
/// first two candidates are evaluated; the third is never the closest for
/// this curve family. Candidate parameters are clamped to [0, 1] so the
/// query stays on the curve segment, not its infinite extension.
pub fn quadratic_bezier_distance(pt: Vec2, curve: &QuadraticBezier) -> f32 {
    if curve.is_degenerate() {
        // Control point on the chord midpoint: the curve is the segment
        // p0..p2 and the cubic's leading coefficient vanishes.
        return distance_to_segment(pt, curve.p0, curve.p2).0;
    }

    let a = curve.p1 - curve.p0;
    let b = curve.p0 - curve.p1 * 2.0 + curve.p2;
    let c = a * 2.0;
    let d = curve.p0 - pt;

    let kk = 1.0 / b.dot(b);
    let kx = kk * a.dot(b);
    let ky = kk * (2.0 * a.dot(a) + d.dot(b)) / 3.0;
    let kz = kk * d.dot(a);

    let p = ky - kx * kx;
    let p3 = p * p * p;
    let q = kx * (2.0 * kx * kx - 3.0 * ky) + kz;
    let h = q * q + 4.0 * p3;

    let res = if h >= 0.0 {
        let h = h.sqrt();
        let x = (h - q) / 2.0;
        let y = (-h - q) / 2.0;
        let t = (x.cbrt() + y.cbrt() - kx).clamp(0.0, 1.0);
        dot2(d + (c + b * t) * t)
    } else {
        let z = (-p).sqrt();
        // |q / (2pz)| can drift past 1 in f32 right at the branch boundary.
        let v = (q / (p * z * 2.0)).clamp(-1.0, 1.0).acos() / 3.0;
        let m = v.cos();
        let n = v.sin() * SQRT_3;
        let t0 = ((m + m) * z - kx).clamp(0.0, 1.0);
        let t1 = ((-n - m) * z - kx).clamp(0.0, 1.0);
        dot2(d + (c + b * t0) * t0).min(dot2(d + (c + b * t1) * t1))
    };

    res.sqrt()
}
