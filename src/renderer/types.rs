//! Output image, atlas texture and renderer errors.

use glam::{vec4, Vec2, Vec4};
use thiserror::Error;

use crate::color::Color;

/// Render-time error conditions.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Vertex/index buffers are inconsistent.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),
    /// Atlas dimensions and texel storage disagree.
    #[error("invalid atlas: {0}")]
    InvalidAtlas(&'static str),
    /// Target image dimensions and pixel storage disagree.
    #[error("invalid target: {0}")]
    InvalidTarget(&'static str),
}

/// RGBA image in linear color space.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Linear RGBA pixels, row-major, length = width * height * 4.
    pub pixels: Vec<f32>,
}

impl Image {
    /// Create a solid color image.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let mut pixels = vec![0.0; width as usize * height as usize * 4];
        for chunk in pixels.chunks_mut(4) {
            chunk.copy_from_slice(&color.to_array());
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Color at pixel (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = self.index(x, y);
        Color::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Composite `src` over the existing pixel.
    pub(crate) fn blend(&mut self, x: u32, y: u32, src: Color) {
        let dst = self.pixel(x, y);
        self.put(x, y, src.over(dst));
    }
}

/// RGBA f32 texture with bilinear, clamp-to-edge sampling.
///
/// Stands in for the host's linear-filtered texture and sampler pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas {
    width: u32,
    height: u32,
    texels: Vec<f32>,
}

impl Atlas {
    /// Wrap raw RGBA texels, row-major, length = width * height * 4.
    pub fn new(width: u32, height: u32, texels: Vec<f32>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidAtlas("atlas extent is zero"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or(RenderError::InvalidAtlas("atlas size overflow"))?;
        if texels.len() != expected {
            return Err(RenderError::InvalidAtlas("texel storage size mismatch"));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: u32, y: u32) -> Vec4 {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        vec4(
            self.texels[i],
            self.texels[i + 1],
            self.texels[i + 2],
            self.texels[i + 3],
        )
    }

    /// Bilinear sample at a normalized coordinate, clamp-to-edge.
    ///
    /// Texel centers sit at `(i + 0.5) / extent`, matching the host's
    /// linear min/mag filter.
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let clamp = |v: f32, extent: u32| (v.max(0.0) as u32).min(extent - 1);
        let x0i = clamp(x0, self.width);
        let x1i = clamp(x0 + 1.0, self.width);
        let y0i = clamp(y0, self.height);
        let y1i = clamp(y0 + 1.0, self.height);

        let top = self.texel(x0i, y0i).lerp(self.texel(x1i, y0i), fx);
        let bottom = self.texel(x0i, y1i).lerp(self.texel(x1i, y1i), fx);
        top.lerp(bottom, fy)
    }
}
