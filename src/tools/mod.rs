use egui::Color32;

use crate::command::{CommandError, StickerStyle, StrokeStyle};
use crate::config::PadConfig;

/// What a pointer press on the canvas does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Marker,
    Sticker,
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            ToolMode::Marker => "Marker",
            ToolMode::Sticker => "Sticker",
        }
    }
}

/// Current tool settings, read whenever a new command is created.
///
/// Owned by the application layer and passed to the input session
/// explicitly; changing it never affects commands already drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolState {
    mode: ToolMode,
    stroke: StrokeStyle,
    sticker: StickerStyle,
}

impl ToolState {
    pub fn new(mode: ToolMode, stroke: StrokeStyle, sticker: StickerStyle) -> Self {
        Self {
            mode,
            stroke,
            sticker,
        }
    }

    /// Marker tool with the thin preset and the first usable configured sticker
    pub fn from_config(config: &PadConfig) -> Result<Self, CommandError> {
        let stroke = StrokeStyle::new(config.marker_widths.thin, config.default_color())?;
        let glyph = config
            .stickers
            .iter()
            .find(|glyph| !glyph.trim().is_empty())
            .map(String::as_str)
            .unwrap_or_default();
        let sticker = StickerStyle::new(glyph, config.sticker_size)?;
        Ok(Self::new(ToolMode::Marker, stroke, sticker))
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn stroke(&self) -> &StrokeStyle {
        &self.stroke
    }

    pub fn sticker(&self) -> &StickerStyle {
        &self.sticker
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    /// Switch to the marker with a new width, keeping the color
    pub fn select_marker(&mut self, width: f32) -> Result<(), CommandError> {
        self.stroke = StrokeStyle::new(width, self.stroke.color())?;
        self.mode = ToolMode::Marker;
        Ok(())
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.stroke = self.stroke.with_color(color);
    }

    /// Switch to the sticker tool with a new glyph, keeping the size
    pub fn select_sticker(&mut self, glyph: &str) -> Result<(), CommandError> {
        self.sticker = StickerStyle::new(glyph, self.sticker.size())?;
        self.mode = ToolMode::Sticker;
        Ok(())
    }
}
