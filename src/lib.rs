//! CPU evaluation of the per-pixel and per-vertex kernels of a 2D line
//! drawing and MSDF text pipeline: exact segment and quadratic Bézier
//! distances, a segment distance-field fragment kernel, an MSDF text
//! compositor, the trivial vertex stages, and a per-pixel driver that
//! rasterizes them into images.

mod camera;
mod color;
mod distance;
mod field;
mod font;
mod geometry;
mod math;
mod msdf;
mod quad;
mod renderer;

pub use camera::{Camera, CameraUniform, OrthoCamera};
pub use color::Color;
pub use distance::{distance_to_segment, quadratic_bezier_distance};
pub use field::{
    field_distance, field_fragment, FieldMode, FieldParams, GeometryUniforms, BAND_FREQUENCY,
    SMOOTH_EDGE_INNER, SMOOTH_EDGE_OUTER,
};
pub use font::{
    AtlasCommon, DistanceField, Font, FontError, FontFace, FontMetadata, Glyph, TextGeometry,
};
pub use geometry::{LineSegment, QuadraticBezier};
pub use msdf::{
    contour, median3, msdf_fragment, screen_px_range, FontUniforms, UvGradients,
    SUPERSAMPLE_SCALE,
};
pub use quad::{
    fullscreen_quad_vertex, textured_fragment, textured_vertex, QuadVertex, TexturedOutput,
    TexturedVertex,
};
pub use renderer::{render_field, render_text, Atlas, Image, RenderError};
