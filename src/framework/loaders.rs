//! Loaders for texture images and typeface fonts used by lessons.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use super::error::AssetError;

fn read(base: Option<&Path>, path: &Path) -> Result<Vec<u8>, AssetError> {
    let path = match base {
        Some(base) => base.join(path),
        None => path.to_path_buf(),
    };
    std::fs::read(&path).map_err(|source| AssetError::Io { path, source })
}

// Textures
// --------

/// Decoded image in tightly packed RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub width:  u32,
    pub height: u32,
    pub rgba:   Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct TextureLoader {
    base_path: Option<PathBuf>,
}

impl TextureLoader {
    /// Relative paths passed to `load` are resolved against `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { base_path: Some(path.into()) }
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<TextureData, AssetError> {
        let bytes = read(self.base_path.as_deref(), path.as_ref())?;
        self.load_from_memory(&bytes)
    }

    pub fn load_from_memory(&self, bytes: &[u8]) -> Result<TextureData, AssetError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(TextureData {
            width:  rgba.width(),
            height: rgba.height(),
            rgba:   rgba.into_raw(),
        })
    }
}

// Fonts
// -----

#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units
    #[serde(rename = "ha")]
    pub advance: f32,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
    /// Outline commands (`m`, `l`, `q`, `b` followed by coordinates)
    #[serde(rename = "o", default)]
    pub outline: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

/// Typeface in the json layout produced by facetype.js.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    pub family_name: String,
    /// Font units per em
    pub resolution: f32,
    #[serde(default)]
    pub ascender: f32,
    #[serde(default)]
    pub descender: f32,
    #[serde(default)]
    pub underline_thickness: f32,
    #[serde(default)]
    pub bounding_box: BoundingBox,
    glyphs: HashMap<String, Glyph>,
}

impl Font {
    /// Glyph for `ch`, falling back to `?` like three.js does for missing characters.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        let mut buf = [0; 4];
        self.glyphs
            .get(&*ch.encode_utf8(&mut buf))
            .or_else(|| self.glyphs.get("?"))
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Width of the widest line of `text` rendered at `size` world units per em.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scale = size / self.resolution;
        text.lines()
            .map(|line| {
                line.chars()
                    .filter_map(|ch| self.glyph(ch))
                    .map(|glyph| glyph.advance)
                    .sum::<f32>() * scale
            })
            .fold(0.0, f32::max)
    }

    /// Distance between two baselines at `size`.
    pub fn line_height(&self, size: f32) -> f32 {
        (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * size / self.resolution
    }
}

#[derive(Debug, Clone, Default)]
pub struct FontLoader {
    base_path: Option<PathBuf>,
}

impl FontLoader {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { base_path: Some(path.into()) }
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Font, AssetError> {
        let bytes = read(self.base_path.as_deref(), path.as_ref())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn parse(&self, json: &str) -> Result<Font, AssetError> {
        Ok(serde_json::from_str(json)?)
    }
}
