//! Textured glyph pass on the CPU.

use glam::{vec2, Vec2};
use tracing::debug;

use crate::camera::Camera;
use crate::font::TextGeometry;
use crate::msdf::{msdf_fragment, FontUniforms, UvGradients};
use crate::quad::textured_vertex;

use super::types::{Atlas, Image, RenderError};

/// Pixel extent below which a quad is skipped as degenerate.
const MIN_QUAD_EXTENT: f32 = 1.0e-6;

/// One transformed quad corner in screen space.
#[derive(Debug, Clone, Copy)]
struct ScreenCorner {
    px: Vec2,
    uv: Vec2,
}

/// Per-axis linear map from screen pixels to texture coordinates.
#[derive(Debug, Clone, Copy)]
struct AxisMap {
    px_min: f32,
    px_max: f32,
    uv_at_min: f32,
    uv_at_max: f32,
}

impl AxisMap {
    fn from_corners(values: impl Iterator<Item = (f32, f32)>) -> Self {
        let mut map = AxisMap {
            px_min: f32::INFINITY,
            px_max: f32::NEG_INFINITY,
            uv_at_min: 0.0,
            uv_at_max: 0.0,
        };
        for (px, uv) in values {
            if px < map.px_min {
                map.px_min = px;
                map.uv_at_min = uv;
            }
            if px > map.px_max {
                map.px_max = px;
                map.uv_at_max = uv;
            }
        }
        map
    }

    fn extent(&self) -> f32 {
        self.px_max - self.px_min
    }

    fn gradient(&self) -> f32 {
        (self.uv_at_max - self.uv_at_min) / self.extent()
    }

    fn uv_at(&self, px: f32) -> f32 {
        self.uv_at_min + (px - self.px_min) * self.gradient()
    }
}

/// Composite laid-out glyph quads over `target`.
///
/// Each quad (four vertices, six indices) is transformed by the camera,
/// mapped from clip space to pixels and filled with the MSDF fragment
/// kernel; coverage is composited source-over. Quads must be axis-aligned
/// in screen space, which holds for the orthographic text pipeline.
pub fn render_text(
    target: &mut Image,
    geometry: &TextGeometry,
    atlas: &Atlas,
    camera: &impl Camera,
    uniforms: &FontUniforms,
) -> Result<(), RenderError> {
    if geometry.indices.len() % 6 != 0 {
        return Err(RenderError::InvalidGeometry(
            "index count is not a multiple of 6",
        ));
    }
    let expected = target.width as usize * target.height as usize * 4;
    if target.pixels.len() != expected {
        return Err(RenderError::InvalidTarget("pixel storage size mismatch"));
    }
    if target.width == 0 || target.height == 0 {
        return Ok(());
    }

    let view_proj = camera.view_proj();
    let extent = vec2(target.width as f32, target.height as f32);
    debug!(quads = geometry.indices.len() / 6, "rendering text");

    for quad in geometry.indices.chunks_exact(6) {
        // The two triangles of a layout quad share two corners; indices
        // 0, 1, 2 and 5 cover all four.
        let mut corners = [ScreenCorner {
            px: Vec2::ZERO,
            uv: Vec2::ZERO,
        }; 4];
        for (corner, &index) in corners.iter_mut().zip([quad[0], quad[1], quad[2], quad[5]].iter())
        {
            let vertex = geometry
                .vertices
                .get(index as usize)
                .ok_or(RenderError::InvalidGeometry("index out of range"))?;
            let out = textured_vertex(*vertex, view_proj);
            if out.position.w.abs() <= f32::EPSILON {
                return Err(RenderError::InvalidGeometry("degenerate clip position"));
            }
            let ndc = vec2(out.position.x, out.position.y) / out.position.w;
            // NDC y up becomes pixel y down.
            corner.px = vec2(
                (ndc.x * 0.5 + 0.5) * extent.x,
                (0.5 - ndc.y * 0.5) * extent.y,
            );
            corner.uv = out.uv;
        }

        let x_map = AxisMap::from_corners(corners.iter().map(|c| (c.px.x, c.uv.x)));
        let y_map = AxisMap::from_corners(corners.iter().map(|c| (c.px.y, c.uv.y)));
        if x_map.extent() < MIN_QUAD_EXTENT || y_map.extent() < MIN_QUAD_EXTENT {
            continue;
        }

        let grads = UvGradients {
            ddx: vec2(x_map.gradient(), 0.0),
            ddy: vec2(0.0, y_map.gradient()),
        };

        let x_start = x_map.px_min.floor().max(0.0) as u32;
        let x_end = (x_map.px_max.ceil().max(0.0) as u32).min(target.width);
        let y_start = y_map.px_min.floor().max(0.0) as u32;
        let y_end = (y_map.px_max.ceil().max(0.0) as u32).min(target.height);

        for y in y_start..y_end {
            let cy = y as f32 + 0.5;
            if cy < y_map.px_min || cy >= y_map.px_max {
                continue;
            }
            for x in x_start..x_end {
                let cx = x as f32 + 0.5;
                if cx < x_map.px_min || cx >= x_map.px_max {
                    continue;
                }
                let uv = vec2(x_map.uv_at(cx), y_map.uv_at(cy));
                let color = msdf_fragment(|uv| atlas.sample(uv), uv, &grads, uniforms);
                target.blend(x, y, color);
            }
        }
    }

    Ok(())
}
