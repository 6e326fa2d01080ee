use egui::Color32;

use super::CommandError;

/// Width and color of a marker stroke.
///
/// Only constructible from a positive, finite width, so every stroke built
/// from it is drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    width: f32,
    color: Color32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color32::BLACK,
        }
    }
}

impl StrokeStyle {
    pub fn new(width: f32, color: Color32) -> Result<Self, CommandError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(CommandError::InvalidWidth(width));
        }
        Ok(Self { width, color })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Same width, different color
    pub fn with_color(self, color: Color32) -> Self {
        Self { color, ..self }
    }
}

/// Glyph and size of a sticker
#[derive(Debug, Clone, PartialEq)]
pub struct StickerStyle {
    glyph: String,
    size: f32,
}

impl Default for StickerStyle {
    fn default() -> Self {
        Self {
            glyph: "🚀".to_owned(),
            size: 30.0,
        }
    }
}

impl StickerStyle {
    pub fn new(glyph: impl Into<String>, size: f32) -> Result<Self, CommandError> {
        let glyph = glyph.into();
        if glyph.trim().is_empty() {
            return Err(CommandError::EmptyGlyph);
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(CommandError::InvalidStickerSize(size));
        }
        Ok(Self { glyph, size })
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}
