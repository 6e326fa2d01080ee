use egui::{Align2, Color32, Pos2, Rect, Vec2};

use super::{DrawContext, SubPath, Surface};

/// A single drawing call captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rect),
    Stroke {
        subpaths: Vec<SubPath>,
        width: f32,
        color: Color32,
    },
    Text {
        text: String,
        at: Pos2,
        font_size: f32,
        align: Align2,
        color: Color32,
    },
}

/// Surface that keeps a display list of everything drawn on it.
///
/// Clearing the full surface drops earlier ops, matching what a pixel
/// surface would show afterwards.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<DrawOp>,
    context: DrawContext,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
            context: DrawContext::default(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Only the stroke ops, in drawing order
    pub fn strokes(&self) -> impl Iterator<Item = (&[SubPath], f32, Color32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke {
                subpaths,
                width,
                color,
            } => Some((subpaths.as_slice(), *width, *color)),
            _ => None,
        })
    }

    /// Only the text ops, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Text { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        if rect.contains_rect(self.bounds()) {
            self.ops.clear();
        }
        self.ops.push(DrawOp::Clear(rect));
    }

    fn stroke(&mut self) {
        let subpaths: Vec<SubPath> = self.context.path.strokable().cloned().collect();
        if subpaths.is_empty() {
            return;
        }
        let state = self.context.state;
        self.ops.push(DrawOp::Stroke {
            subpaths,
            width: state.line_width,
            color: state.effective_stroke_color(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Pos2) {
        let state = self.context.state;
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            at,
            font_size: state.font_size,
            align: state.text_align,
            color: state.effective_fill_color(),
        });
    }

    fn context(&self) -> &DrawContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut DrawContext {
        &mut self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_clear_drops_history() {
        let mut surface = RecordingSurface::new(Vec2::splat(50.0));
        surface.begin_path();
        surface.move_to(Pos2::new(0.0, 0.0));
        surface.line_to(Pos2::new(10.0, 10.0));
        surface.stroke();
        assert_eq!(surface.strokes().count(), 1);

        let bounds = surface.bounds();
        surface.clear_rect(bounds);
        assert_eq!(surface.ops(), &[DrawOp::Clear(bounds)]);
    }

    #[test]
    fn test_empty_path_records_nothing() {
        let mut surface = RecordingSurface::new(Vec2::splat(50.0));
        surface.begin_path();
        surface.move_to(Pos2::new(3.0, 3.0));
        surface.stroke();
        assert!(surface.ops().is_empty());
    }
}
