use egui::Pos2;

use super::{CommandId, StrokeStyle};
use crate::geometry::scale_point;
use crate::surface::Surface;

/// Freehand marker stroke
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCommand {
    id: CommandId,
    points: Vec<Pos2>,
    style: StrokeStyle,
}

impl StrokeCommand {
    /// Start a stroke at `start`. More points are added with [`StrokeCommand::extend`]
    /// until the stroke is committed.
    pub fn new(start: Pos2, style: StrokeStyle) -> Self {
        Self {
            id: CommandId::new(),
            points: vec![start],
            style,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Append a point. Once the stroke is owned by the history this is only
    /// reachable through the active-stroke token.
    pub fn extend(&mut self, point: Pos2) {
        self.points.push(point);
    }

    /// Draw the stroke with every coordinate and the width multiplied by `scale`
    pub fn render(&self, surface: &mut dyn Surface, scale: f32) {
        // A single point has no visible extent
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        surface.set_line_width(self.style.width() * scale);
        surface.set_stroke_color(self.style.color());
        surface.begin_path();
        surface.move_to(scale_point(*first, scale));
        for point in rest {
            surface.line_to(scale_point(*point, scale));
        }
        surface.stroke();
    }
}
