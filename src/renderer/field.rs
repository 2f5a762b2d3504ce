//! Fullscreen segment-field pass on the CPU.

use glam::vec2;
use tracing::debug;

use crate::field::{field_fragment, FieldParams};
use crate::geometry::LineSegment;

use super::types::Image;

/// Rasterize the segment distance field into a new image.
///
/// Walks the fullscreen quad's parametric space at pixel centers, y up as
/// the fullscreen vertex stage emits it, invoking the field fragment kernel
/// once per pixel. A zero-sized target yields an empty image.
pub fn render_field(
    width: u32,
    height: u32,
    params: &FieldParams,
    segments: &[LineSegment],
) -> Image {
    debug!(
        width,
        height,
        segments = segments.len(),
        "rendering segment field"
    );
    let mut image = Image {
        width,
        height,
        pixels: vec![0.0; width as usize * height as usize * 4],
    };
    for y in 0..height {
        for x in 0..width {
            let coord = vec2(
                (x as f32 + 0.5) / width as f32,
                1.0 - (y as f32 + 0.5) / height as f32,
            );
            image.put(x, y, field_fragment(coord, params, segments));
        }
    }
    image
}
