mod history;
mod sticker;
mod stroke;
mod style;

use egui::Pos2;
use thiserror::Error;
use uuid::Uuid;

use crate::surface::Surface;

pub use history::{ActiveStroke, CommandHistory};
pub use sticker::{STICKER_INK, StickerCommand};
pub use stroke::StrokeCommand;
pub use style::{StickerStyle, StrokeStyle};

/// Errors raised when building command styles from invalid values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("stroke width must be a positive finite number, got {0}")]
    InvalidWidth(f32),

    #[error("sticker size must be a positive finite number, got {0}")]
    InvalidStickerSize(f32),

    #[error("sticker glyph must not be empty")]
    EmptyGlyph,
}

/// Unique identity of a draw command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(Uuid);

impl CommandId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single unit of drawing stored in the history
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke(StrokeCommand),
    Sticker(StickerCommand),
}

impl From<StrokeCommand> for DrawCommand {
    fn from(stroke: StrokeCommand) -> Self {
        DrawCommand::Stroke(stroke)
    }
}

impl From<StickerCommand> for DrawCommand {
    fn from(sticker: StickerCommand) -> Self {
        DrawCommand::Sticker(sticker)
    }
}

impl DrawCommand {
    pub fn id(&self) -> CommandId {
        match self {
            DrawCommand::Stroke(stroke) => stroke.id(),
            DrawCommand::Sticker(sticker) => sticker.id(),
        }
    }

    /// Short label shown in the history panel
    pub fn kind_name(&self) -> &'static str {
        match self {
            DrawCommand::Stroke(_) => "Stroke",
            DrawCommand::Sticker(_) => "Sticker",
        }
    }

    /// Draw the command onto `surface` with every coordinate and size multiplied by `scale`.
    ///
    /// Rendering never changes the command, so repeated calls paint the same thing.
    pub fn render(&self, surface: &mut dyn Surface, scale: f32) {
        match self {
            DrawCommand::Stroke(stroke) => stroke.render(surface, scale),
            DrawCommand::Sticker(sticker) => sticker.render(surface, scale),
        }
    }

    /// Feed another input point. Stickers are placed atomically and ignore it.
    pub(crate) fn extend(&mut self, point: Pos2) -> bool {
        match self {
            DrawCommand::Stroke(stroke) => {
                stroke.extend(point);
                true
            }
            DrawCommand::Sticker(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_extend_is_noop_for_stickers() {
        let style = StickerStyle::new("⭐", 20.0).unwrap();
        let mut command = DrawCommand::from(StickerCommand::new(Pos2::new(1.0, 1.0), style));
        let before = command.clone();
        assert!(!command.extend(Pos2::new(9.0, 9.0)));
        assert_eq!(command, before);
    }

    #[test]
    fn test_extend_appends_to_strokes() {
        let style = StrokeStyle::new(2.0, Color32::BLACK).unwrap();
        let mut command = DrawCommand::from(StrokeCommand::new(Pos2::new(1.0, 1.0), style));
        assert!(command.extend(Pos2::new(2.0, 2.0)));
        let DrawCommand::Stroke(stroke) = &command else {
            panic!("expected a stroke");
        };
        assert_eq!(stroke.points(), &[Pos2::new(1.0, 1.0), Pos2::new(2.0, 2.0)]);
    }

    #[test]
    fn test_ids_are_unique() {
        let style = StrokeStyle::new(2.0, Color32::BLACK).unwrap();
        let a = StrokeCommand::new(Pos2::ZERO, style);
        let b = StrokeCommand::new(Pos2::ZERO, style);
        assert_ne!(a.id(), b.id());
    }
}
