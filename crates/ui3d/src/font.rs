//! Glyph metrics for laying out HUD text.
//!
//! The HUD never rasterizes text itself; it only needs to know how large a
//! string will be so captions and countdown digits can be centered. Loading
//! a font is the setup step the selection machine waits on.

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::path::Path;
use tracing::info;

/// Pixel size glyph outlines are measured at before scaling to world units.
const REFERENCE_PX: f32 = 64.0;

/// Bounding extent of a laid-out string, measured from its left baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextExtent {
    /// Right edge of the rightmost glyph outline
    pub max_x: f32,
    /// Top edge of the tallest glyph outline
    pub max_y: f32,
}

/// Something that can measure a string at a given size.
pub trait GlyphMeasure {
    /// Measure `text` rendered with glyphs `size` world units tall.
    fn measure(&self, text: &str, size: f32) -> TextExtent;
}

/// Glyph metrics backed by a TrueType/OpenType font.
pub struct FontMetrics {
    font: Font,
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl FontMetrics {
    /// Parse a font from raw bytes
    pub fn from_bytes(font_data: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font: {}", e))?;
        Ok(Self { font })
    }

    /// Load a font from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let font_data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let metrics = Self::from_bytes(&font_data)
            .with_context(|| format!("Invalid font file: {}", path.display()))?;
        info!(path = %path.display(), glyphs = metrics.font.glyph_count(), "loaded HUD font");
        Ok(metrics)
    }
}

impl GlyphMeasure for FontMetrics {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        let scale = size / REFERENCE_PX;
        let mut cursor_x = 0.0f32;
        let mut extent = TextExtent::default();

        for c in text.chars() {
            let metrics = self.font.metrics(c, REFERENCE_PX);
            let bounds = metrics.bounds;
            extent.max_x = extent.max_x.max(cursor_x + bounds.xmin + bounds.width);
            extent.max_y = extent.max_y.max(bounds.ymin + bounds.height);
            cursor_x += metrics.advance_width;
        }

        TextExtent {
            max_x: extent.max_x * scale,
            max_y: extent.max_y * scale,
        }
    }
}

/// Monospace stand-in used when no font file is configured.
///
/// Every glyph advances by `advance * size` and rises `ascent * size` above
/// the baseline; whitespace still advances the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
    pub ascent: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        // Roughly the proportions of a blocky arcade face.
        Self {
            advance: 0.9,
            ascent: 0.9,
        }
    }
}

impl FixedAdvance {
    pub fn new(advance: f32, ascent: f32) -> Self {
        Self { advance, ascent }
    }
}

impl GlyphMeasure for FixedAdvance {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        let glyphs = text.chars().count();
        if glyphs == 0 {
            return TextExtent::default();
        }
        TextExtent {
            max_x: glyphs as f32 * self.advance * size,
            max_y: self.ascent * size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_advance_scales_with_size_and_length() {
        let measure = FixedAdvance::new(0.5, 0.75);
        let extent = measure.measure("10", 2.0);
        assert_eq!(extent.max_x, 2.0);
        assert_eq!(extent.max_y, 1.5);
    }

    #[test]
    fn empty_text_has_no_extent() {
        assert_eq!(FixedAdvance::default().measure("", 1.3), TextExtent::default());
    }

    #[test]
    fn garbage_bytes_are_not_a_font() {
        assert!(FontMetrics::from_bytes(b"definitely not a font").is_err());
    }

    #[test]
    fn missing_font_file_reports_path() {
        let err = FontMetrics::from_file(Path::new("fonts/missing.ttf")).unwrap_err();
        assert!(format!("{err:#}").contains("fonts/missing.ttf"));
    }
}
