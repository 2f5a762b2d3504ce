//! MSDF font metadata and glyph-quad layout.
//!
//! Parses the msdf-bmfont JSON schema and lays text out as textured glyph
//! quads for the text pipeline. Atlas bitmaps are supplied by the external
//! asset pipeline; only the metadata lives here.

use std::collections::HashMap;

use glam::{vec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::quad::TexturedVertex;

/// Field type tag of multi-channel distance atlases.
const MSDF_FIELD_TYPE: &str = "msdf";

/// Font loading failures.
#[derive(Debug, Error)]
pub enum FontError {
    /// The metadata document is not valid msdf-bmfont JSON.
    #[error("malformed font metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    /// The fallback character has no glyph in this font.
    #[error("fallback character {0:?} is not covered by the font")]
    MissingFallback(char),
    /// The atlas is not a multi-channel distance field.
    #[error("unsupported distance field type {0:?}, expected \"msdf\"")]
    UnsupportedFieldType(String),
}

/// Top-level msdf-bmfont metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontMetadata {
    pub pages: Vec<String>,
    #[serde(rename = "chars")]
    pub glyphs: Vec<Glyph>,
    pub info: FontFace,
    pub common: AtlasCommon,
    #[serde(rename = "distanceField")]
    pub distance_field: DistanceField,
}

/// One glyph's atlas placement and layout metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Glyph {
    pub id: u32,
    pub index: u32,
    pub page: u32,
    pub char: char,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
    pub xoffset: i32,
    pub yoffset: i32,
    pub xadvance: u32,
    pub chnl: u32,
}

/// Typeface description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontFace {
    pub face: String,
    pub size: u32,
    pub bold: u32,
    pub italic: u32,
    pub charset: Vec<char>,
    pub unicode: u32,
    #[serde(rename = "stretchH")]
    pub stretch_h: u32,
    pub smooth: u32,
    pub aa: u32,
    pub padding: [u32; 4],
    pub spacing: [u32; 2],
}

/// Atlas-wide metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtlasCommon {
    #[serde(rename = "lineHeight")]
    pub line_height: u32,
    pub base: u32,
    #[serde(rename = "scaleW")]
    pub scale_w: u32,
    #[serde(rename = "scaleH")]
    pub scale_h: u32,
    pub pages: u32,
    pub packed: u32,
    #[serde(rename = "alphaChnl")]
    pub alpha_channel: u32,
    #[serde(rename = "redChnl")]
    pub red_channel: u32,
    #[serde(rename = "greenChnl")]
    pub green_channel: u32,
    #[serde(rename = "blueChnl")]
    pub blue_channel: u32,
}

/// Distance-field parameters the atlas was baked with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceField {
    #[serde(rename = "fieldType")]
    pub field_type: String,
    #[serde(rename = "distanceRange")]
    pub distance_range: u32,
}

/// Vertex and index buffers for one laid-out string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGeometry {
    pub vertices: Vec<TexturedVertex>,
    pub indices: Vec<u32>,
}

/// Parsed font: metadata plus a character-to-glyph index.
#[derive(Debug, Clone)]
pub struct Font {
    fallback_char: char,
    metadata: FontMetadata,
    glyph_map: HashMap<char, usize>,
}

impl Font {
    /// Parse msdf-bmfont JSON metadata.
    ///
    /// `fallback_char` substitutes for characters the font does not cover
    /// and must itself be covered.
    pub fn from_json(json: &str, fallback_char: char) -> Result<Self, FontError> {
        let metadata: FontMetadata = serde_json::from_str(json)?;
        if metadata.distance_field.field_type != MSDF_FIELD_TYPE {
            return Err(FontError::UnsupportedFieldType(
                metadata.distance_field.field_type.clone(),
            ));
        }

        let mut glyph_map = HashMap::new();
        for (i, glyph) in metadata.glyphs.iter().enumerate() {
            glyph_map.insert(glyph.char, i);
        }
        if !glyph_map.contains_key(&fallback_char) {
            return Err(FontError::MissingFallback(fallback_char));
        }

        debug!(
            face = %metadata.info.face,
            glyphs = metadata.glyphs.len(),
            "parsed font metadata"
        );
        Ok(Self {
            fallback_char,
            metadata,
            glyph_map,
        })
    }

    pub fn metadata(&self) -> &FontMetadata {
        &self.metadata
    }

    /// Glyph for `c`, if covered.
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyph_map.get(&c).map(|&i| &self.metadata.glyphs[i])
    }

    /// Glyph substituted for uncovered characters. Coverage of the fallback
    /// character is validated at construction.
    pub fn fallback_glyph(&self) -> &Glyph {
        &self.metadata.glyphs[self.glyph_map[&self.fallback_char]]
    }

    /// Distance-field range expressed in atlas texture units, per axis.
    pub fn unit_range(&self) -> Vec2 {
        let range = self.metadata.distance_field.distance_range as f32;
        vec2(
            range / self.metadata.common.scale_w as f32,
            range / self.metadata.common.scale_h as f32,
        )
    }

    /// Lay `text` out as one textured quad per visible glyph.
    ///
    /// The pen starts at `origin` in pixel space (y down, matching the
    /// atlas metadata). Glyphs without extent advance the pen but emit no
    /// geometry; each emitted quad contributes four vertices and six
    /// indices in `[base, base+1, base+2, base, base+2, base+3]` order.
    pub fn layout_text(&self, text: &str, origin: Vec2) -> TextGeometry {
        let tex_width = self.metadata.common.scale_w as f32;
        let tex_height = self.metadata.common.scale_h as f32;

        let mut cursor = 0.0;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for c in text.chars() {
            let glyph = self.glyph(c).unwrap_or_else(|| self.fallback_glyph());

            if glyph.width == 0 || glyph.height == 0 {
                cursor += glyph.xadvance as f32;
                continue;
            }

            let uv_min = vec2(glyph.x as f32 / tex_width, glyph.y as f32 / tex_height);
            let uv_max = uv_min
                + vec2(
                    glyph.width as f32 / tex_width,
                    glyph.height as f32 / tex_height,
                );

            let min = origin + vec2(cursor + glyph.xoffset as f32, glyph.yoffset as f32);
            let max = min + vec2(glyph.width as f32, glyph.height as f32);

            let base = vertices.len() as u32;
            vertices.extend_from_slice(&[
                TexturedVertex {
                    position: min,
                    uv: uv_min,
                },
                TexturedVertex {
                    position: vec2(max.x, min.y),
                    uv: vec2(uv_max.x, uv_min.y),
                },
                TexturedVertex {
                    position: max,
                    uv: uv_max,
                },
                TexturedVertex {
                    position: vec2(min.x, max.y),
                    uv: vec2(uv_min.x, uv_max.y),
                },
            ]);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

            cursor += glyph.xadvance as f32;
        }

        TextGeometry { vertices, indices }
    }
}
