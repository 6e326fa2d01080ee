use egui::{Align2, Color32, Pos2};

use super::{CommandId, StickerStyle};
use crate::geometry::scale_point;
use crate::surface::Surface;

/// Color used to fill sticker glyphs; emoji faces are monochrome
pub const STICKER_INK: Color32 = Color32::BLACK;

/// Emoji or text placed at a single point
#[derive(Debug, Clone, PartialEq)]
pub struct StickerCommand {
    id: CommandId,
    anchor: Pos2,
    style: StickerStyle,
}

impl StickerCommand {
    pub fn new(anchor: Pos2, style: StickerStyle) -> Self {
        Self {
            id: CommandId::new(),
            anchor,
            style,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn style(&self) -> &StickerStyle {
        &self.style
    }

    /// Draw the glyph centered on the anchor, scaling anchor and font size by `scale`
    pub fn render(&self, surface: &mut dyn Surface, scale: f32) {
        surface.set_font_size(self.style.size() * scale);
        surface.set_text_align(Align2::CENTER_CENTER);
        surface.set_fill_color(STICKER_INK);
        surface.fill_text(self.style.glyph(), scale_point(self.anchor, scale));
    }
}
