//! TrueType text for labels and axis decorations.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::scale::Color;

/// Fonts tried, in order, when no font path is configured.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A loaded TrueType font.
#[derive(Clone)]
pub struct LabelFont {
    font: Font<'static>,
    source: String,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont").field("source", &self.source).finish()
    }
}

impl LabelFont {
    pub fn from_bytes(bytes: Vec<u8>, source: impl Into<String>) -> Result<Self, RenderError> {
        let source = source.into();
        let font = Font::try_from_vec(bytes).ok_or_else(|| RenderError::FontLoad {
            path: source.clone(),
            message: "not a TrueType font".to_string(),
        })?;
        Ok(Self { font, source })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| RenderError::FontLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(bytes, path.display().to_string())
    }

    /// Load `explicit` if given, otherwise the first usable system font.
    ///
    /// A configured path that cannot be loaded is an error. Finding no
    /// system font is not: the caller renders without labels.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>, RenderError> {
        if let Some(path) = explicit {
            return Self::from_file(path).map(Some);
        }

        for candidate in SYSTEM_FONT_PATHS.iter().map(PathBuf::from) {
            if !candidate.is_file() {
                continue;
            }
            match Self::from_file(&candidate) {
                Ok(font) => {
                    debug!(path = %candidate.display(), "Using system font");
                    return Ok(Some(font));
                }
                Err(e) => debug!(error = %e, "Skipping unusable font"),
            }
        }

        warn!("No TrueType font found; labels will not be drawn");
        Ok(None)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Width and line height of `text` at `size` pixels.
    pub fn text_size(&self, text: &str, size: f32) -> (u32, u32) {
        let scale = Scale::uniform(size);
        let v_metrics = self.font.v_metrics(scale);
        let height = (v_metrics.ascent - v_metrics.descent).ceil().max(0.0) as u32;

        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);

        (width.ceil().max(0.0) as u32, height)
    }

    /// Draw `text` centered on `(cx, cy)`.
    pub fn draw_centered(
        &self,
        img: &mut RgbaImage,
        text: &str,
        cx: i32,
        cy: i32,
        size: f32,
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }
        let (width, height) = self.text_size(text, size);
        let x = cx - (width / 2) as i32;
        let y = cy - (height / 2) as i32;
        draw_text_mut(img, color.to_rgba(), x, y, Scale::uniform(size), &self.font, text);
    }

    /// Draw `text` with its right edge at `right` and vertically centered on `cy`.
    pub fn draw_right_aligned(
        &self,
        img: &mut RgbaImage,
        text: &str,
        right: i32,
        cy: i32,
        size: f32,
        color: Color,
    ) {
        let (width, height) = self.text_size(text, size);
        let x = right - width as i32;
        let y = cy - (height / 2) as i32;
        draw_text_mut(img, color.to_rgba(), x, y, Scale::uniform(size), &self.font, text);
    }
}
