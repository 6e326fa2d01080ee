use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use super::{DrawContext, Surface};

/// Surface backed by an egui [`Painter`], used for the on-screen canvas.
///
/// Surface coordinates start at the top left corner of `canvas_rect`;
/// everything is clipped to that rectangle.
pub struct PainterSurface {
    painter: Painter,
    canvas_rect: Rect,
    background: Color32,
    context: DrawContext,
}

impl PainterSurface {
    pub fn new(painter: &Painter, canvas_rect: Rect, background: Color32) -> Self {
        Self {
            painter: painter.with_clip_rect(canvas_rect),
            canvas_rect,
            background,
            context: DrawContext::default(),
        }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        self.canvas_rect.min + point.to_vec2()
    }
}

impl Surface for PainterSurface {
    fn size(&self) -> Vec2 {
        self.canvas_rect.size()
    }

    fn clear_rect(&mut self, rect: Rect) {
        let screen_rect = Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max));
        self.painter.rect_filled(screen_rect, 0.0, self.background);
    }

    fn stroke(&mut self) {
        let state = self.context.state;
        let stroke = Stroke::new(state.line_width, state.effective_stroke_color());

        let shapes: Vec<Shape> = self
            .context
            .path
            .strokable()
            .map(|sub| {
                let points: Vec<Pos2> = sub.points.iter().map(|p| self.to_screen(*p)).collect();
                if sub.closed {
                    Shape::closed_line(points, stroke)
                } else {
                    Shape::line(points, stroke)
                }
            })
            .collect();

        self.painter.extend(shapes);
    }

    fn fill_text(&mut self, text: &str, at: Pos2) {
        let state = self.context.state;
        self.painter.text(
            self.to_screen(at),
            state.text_align,
            text,
            FontId::proportional(state.font_size),
            state.effective_fill_color(),
        );
    }

    fn context(&self) -> &DrawContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut DrawContext {
        &mut self.context
    }
}
