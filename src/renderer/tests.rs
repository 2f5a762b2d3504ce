use glam::{vec2, Vec2};

use super::*;
use crate::camera::OrthoCamera;
use crate::field::{field_fragment, FieldMode, FieldParams};
use crate::font::{tests::FIXTURE, Font};
use crate::geometry::LineSegment;
use crate::msdf::FontUniforms;

fn field_params(mode: FieldMode) -> FieldParams {
    FieldParams {
        preview: LineSegment::new(vec2(100.0, 100.0), vec2(100.0, 100.0)),
        num_lines: 16,
        mode,
        aspect_ratio: 1.0,
    }
}

fn solid_atlas(width: u32, height: u32, value: f32) -> Atlas {
    let texels = vec![value; width as usize * height as usize * 4];
    Atlas::new(width, height, texels).unwrap()
}

#[test]
fn field_pass_marks_pixels_on_the_segment() {
    let segments = [LineSegment::new(vec2(0.0, 0.5), vec2(1.0, 0.5))];
    let image = render_field(9, 9, &field_params(FieldMode::SmoothEdge), &segments);

    // Center row sits on the segment, corner is far outside the band.
    let on = image.pixel(4, 4);
    assert!((on.b - 1.0).abs() < 1.0e-6);
    assert_eq!((on.r, on.g, on.a), (0.0, 0.0, 1.0));

    let off = image.pixel(0, 0);
    assert_eq!(off.b, 0.0);
    assert_eq!(off.a, 1.0);
}

#[test]
fn field_pass_matches_the_fragment_kernel_per_pixel() {
    let segments = [
        LineSegment::new(vec2(0.1, 0.2), vec2(0.9, 0.4)),
        LineSegment::new(vec2(0.3, 0.8), vec2(0.3, 0.1)),
    ];
    let params = field_params(FieldMode::PeriodicBands);
    let image = render_field(7, 5, &params, &segments);
    for y in 0..5u32 {
        for x in 0..7u32 {
            let coord = vec2((x as f32 + 0.5) / 7.0, 1.0 - (y as f32 + 0.5) / 5.0);
            assert_eq!(image.pixel(x, y), field_fragment(coord, &params, &segments));
        }
    }
}

#[test]
fn field_pass_handles_zero_sized_targets() {
    let image = render_field(0, 0, &field_params(FieldMode::SmoothEdge), &[]);
    assert_eq!(image.width, 0);
    assert_eq!(image.height, 0);
    assert!(image.pixels.is_empty());
}

#[test]
fn atlas_rejects_inconsistent_storage() {
    assert!(matches!(
        Atlas::new(0, 4, Vec::new()),
        Err(RenderError::InvalidAtlas(_))
    ));
    assert!(matches!(
        Atlas::new(2, 2, vec![0.0; 3]),
        Err(RenderError::InvalidAtlas(_))
    ));
}

#[test]
fn atlas_sampling_is_bilinear_with_edge_clamp() {
    let atlas = Atlas::new(
        2,
        1,
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    )
    .unwrap();

    // Midpoint between the two texel centers.
    assert!((atlas.sample(vec2(0.5, 0.5)).x - 0.5).abs() < 1.0e-6);
    // Past the texel centers the edge value is held.
    assert_eq!(atlas.sample(vec2(0.0, 0.5)).x, 0.0);
    assert_eq!(atlas.sample(vec2(1.0, 0.5)).x, 1.0);
    assert_eq!(atlas.sample(vec2(-0.5, 0.5)).x, 0.0);
    assert_eq!(atlas.sample(vec2(1.5, 0.5)).x, 1.0);
}

#[test]
fn text_pass_fills_glyph_quads() {
    let font = Font::from_json(FIXTURE, '?').unwrap();
    let geometry = font.layout_text("A", Vec2::ZERO);
    // Every channel deep inside the glyph: full coverage everywhere.
    let atlas = solid_atlas(32, 32, 1.0);
    let camera = OrthoCamera::new(0.0, 32.0, 32.0, 0.0);
    let uniforms = FontUniforms::new(font.unit_range());

    let mut target = Image::solid(32, 32, crate::Color::BLACK);
    render_text(&mut target, &geometry, &atlas, &camera, &uniforms).unwrap();

    // The 'A' quad spans pixels (1, 2)..(11, 14).
    let inside = target.pixel(5, 5);
    assert!((inside.r - 1.0).abs() < 1.0e-6);
    assert!((inside.g - 1.0).abs() < 1.0e-6);
    assert!((inside.b - 1.0).abs() < 1.0e-6);

    let outside = target.pixel(20, 20);
    assert_eq!(outside, crate::Color::BLACK);
    // Pixels left of the quad's xoffset stay untouched too.
    assert_eq!(target.pixel(0, 5), crate::Color::BLACK);
}

#[test]
fn text_pass_composites_partial_coverage_over_background() {
    let font = Font::from_json(FIXTURE, '?').unwrap();
    let geometry = font.layout_text("A", Vec2::ZERO);
    // Distance exactly on the edge: coverage 0.5 at every pixel.
    let atlas = solid_atlas(32, 32, 0.5);
    let camera = OrthoCamera::new(0.0, 32.0, 32.0, 0.0);
    let uniforms = FontUniforms::new(font.unit_range());

    let mut target = Image::solid(32, 32, crate::Color::BLACK);
    render_text(&mut target, &geometry, &atlas, &camera, &uniforms).unwrap();

    let inside = target.pixel(5, 5);
    assert!((inside.r - 0.5).abs() < 1.0e-3);
    assert!((inside.a - 1.0).abs() < 1.0e-6);
}

#[test]
fn text_pass_rejects_malformed_buffers() {
    let font = Font::from_json(FIXTURE, '?').unwrap();
    let atlas = solid_atlas(4, 4, 1.0);
    let camera = OrthoCamera::new(0.0, 8.0, 8.0, 0.0);
    let uniforms = FontUniforms::new(font.unit_range());
    let mut target = Image::solid(8, 8, crate::Color::BLACK);

    let mut geometry = font.layout_text("A", Vec2::ZERO);
    geometry.indices.pop();
    assert!(matches!(
        render_text(&mut target, &geometry, &atlas, &camera, &uniforms),
        Err(RenderError::InvalidGeometry(_))
    ));

    let mut geometry = font.layout_text("A", Vec2::ZERO);
    geometry.vertices.truncate(2);
    assert!(matches!(
        render_text(&mut target, &geometry, &atlas, &camera, &uniforms),
        Err(RenderError::InvalidGeometry(_))
    ));
}

#[test]
fn text_pass_ignores_empty_geometry() {
    let font = Font::from_json(FIXTURE, '?').unwrap();
    let atlas = solid_atlas(4, 4, 1.0);
    let camera = OrthoCamera::new(0.0, 8.0, 8.0, 0.0);
    let uniforms = FontUniforms::new(font.unit_range());

    let mut target = Image::solid(8, 8, crate::Color::BLACK);
    let before = target.clone();
    render_text(
        &mut target,
        &font.layout_text(" ", Vec2::ZERO),
        &atlas,
        &camera,
        &uniforms,
    )
    .unwrap();
    assert_eq!(target, before);
}
