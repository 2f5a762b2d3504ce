//! Point-to-segment distance.

use glam::Vec2;

/// Squared-length threshold below which a segment is treated as a point.
const DEGENERATE_EPSILON: f32 = 1.0e-10;

/// Distance from `pt` to the closed segment `a..b`.
///
/// Returns the distance, the closest point on the segment, and the clamped
/// projection parameter `t` in [0, 1]. Clamping keeps the result on the
/// segment rather than the infinite line. A zero-length segment degrades to
/// plain point distance without dividing.
pub fn distance_to_segment(pt: Vec2, a: Vec2, b: Vec2) -> (f32, Vec2, f32) {
    let ab = b - a;
    let denom = ab.dot(ab);
    if denom <= DEGENERATE_EPSILON {
        return ((pt - a).length(), a, 0.0);
    }
    let t = ((pt - a).dot(ab) / denom).clamp(0.0, 1.0);
    let cp = a + ab * t;
    ((pt - cp).length(), cp, t)
}
