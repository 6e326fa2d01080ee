//! 2D drawing surfaces that draw commands and the renderer paint onto.
//!
//! The [`Surface`] trait mirrors a small immediate-mode canvas API: set some
//! paint state, build a path, then stroke it or fill some text. Backends
//! only have to implement the four operations that actually touch pixels;
//! paint state, the current path and the save stack live in a shared
//! [`DrawContext`].

use egui::{Align2, Color32, Pos2, Rect, Vec2};

mod painter;
mod raster;
mod recording;

pub use painter::PainterSurface;
pub use raster::{GlyphFonts, RasterSurface};
pub use recording::{DrawOp, RecordingSurface};

/// Number of segments used to approximate a full circle.
const ARC_SEGMENTS: usize = 48;

/// Paint settings that apply to the next stroke or text call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintState {
    pub line_width: f32,
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub font_size: f32,
    pub text_align: Align2,
    pub global_alpha: f32,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            stroke_color: Color32::BLACK,
            fill_color: Color32::BLACK,
            font_size: 10.0,
            text_align: Align2::LEFT_BOTTOM,
            global_alpha: 1.0,
        }
    }
}

impl PaintState {
    /// Stroke color with the global alpha applied
    pub fn effective_stroke_color(&self) -> Color32 {
        apply_alpha(self.stroke_color, self.global_alpha)
    }

    /// Fill color with the global alpha applied
    pub fn effective_fill_color(&self) -> Color32 {
        apply_alpha(self.fill_color, self.global_alpha)
    }
}

fn apply_alpha(color: Color32, alpha: f32) -> Color32 {
    if alpha >= 1.0 {
        color
    } else {
        color.gamma_multiply(alpha.max(0.0))
    }
}

/// One connected run of points in a path
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub points: Vec<Pos2>,
    pub closed: bool,
}

/// The path under construction between `begin_path` and `stroke`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    /// Subpaths that produce visible output when stroked
    pub fn strokable(&self) -> impl Iterator<Item = &SubPath> {
        self.subpaths.iter().filter(|sub| sub.points.len() >= 2)
    }

    fn clear(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, point: Pos2) {
        self.subpaths.push(SubPath {
            points: vec![point],
            closed: false,
        });
    }

    fn line_to(&mut self, point: Pos2) {
        match self.subpaths.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(point),
            _ => self.move_to(point),
        }
    }

    fn circle(&mut self, center: Pos2, radius: f32) {
        let points = (0..ARC_SEGMENTS)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / ARC_SEGMENTS as f32;
                center + Vec2::angled(angle) * radius
            })
            .collect();
        self.subpaths.push(SubPath {
            points,
            closed: true,
        });
    }
}

/// State shared by every surface backend
#[derive(Debug, Clone, Default)]
pub struct DrawContext {
    pub state: PaintState,
    pub path: Path,
    stack: Vec<PaintState>,
}

/// A 2D drawing target.
///
/// Surfaces own their pixels (or shapes, or records); callers only issue
/// drawing calls. Coordinates are surface-local and never clamped, anything
/// outside [`Surface::size`] is clipped by the backend.
pub trait Surface {
    /// Size of the drawable area in surface units
    fn size(&self) -> Vec2;

    /// Reset every pixel inside `rect` to the surface background
    fn clear_rect(&mut self, rect: Rect);

    /// Stroke the current path with the current line width and stroke color
    fn stroke(&mut self);

    /// Draw `text` anchored at `at` using the current font size, alignment and fill color
    fn fill_text(&mut self, text: &str, at: Pos2);

    fn context(&self) -> &DrawContext;

    fn context_mut(&mut self) -> &mut DrawContext;

    fn set_line_width(&mut self, width: f32) {
        self.context_mut().state.line_width = width;
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.context_mut().state.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.context_mut().state.fill_color = color;
    }

    fn set_font_size(&mut self, size: f32) {
        self.context_mut().state.font_size = size;
    }

    fn set_text_align(&mut self, align: Align2) {
        self.context_mut().state.text_align = align;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.context_mut().state.global_alpha = alpha.clamp(0.0, 1.0);
    }

    /// Push the current paint state
    fn save(&mut self) {
        let ctx = self.context_mut();
        let state = ctx.state;
        ctx.stack.push(state);
    }

    /// Pop the last saved paint state. Does nothing if nothing was saved.
    fn restore(&mut self) {
        let ctx = self.context_mut();
        if let Some(state) = ctx.stack.pop() {
            ctx.state = state;
        }
    }

    fn begin_path(&mut self) {
        self.context_mut().path.clear();
    }

    fn move_to(&mut self, point: Pos2) {
        self.context_mut().path.move_to(point);
    }

    fn line_to(&mut self, point: Pos2) {
        self.context_mut().path.line_to(point);
    }

    /// Add a closed circle to the current path
    fn arc(&mut self, center: Pos2, radius: f32) {
        self.context_mut().path.circle(center, radius);
    }

    /// Rectangle covering the whole surface
    fn bounds(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_to_without_move_starts_subpath() {
        let mut path = Path::default();
        path.line_to(Pos2::new(1.0, 1.0));
        path.line_to(Pos2::new(2.0, 2.0));
        assert_eq!(path.subpaths().len(), 1);
        assert_eq!(path.subpaths()[0].points.len(), 2);
    }

    #[test]
    fn test_single_point_subpath_is_not_strokable() {
        let mut path = Path::default();
        path.move_to(Pos2::new(5.0, 5.0));
        assert_eq!(path.strokable().count(), 0);

        path.circle(Pos2::new(5.0, 5.0), 3.0);
        assert_eq!(path.strokable().count(), 1);
        assert!(path.subpaths()[1].closed);
    }

    #[test]
    fn test_circle_points_lie_on_radius() {
        let mut path = Path::default();
        path.circle(Pos2::new(10.0, 10.0), 4.0);
        for point in &path.subpaths()[0].points {
            let distance = (*point - Pos2::new(10.0, 10.0)).length();
            assert!((distance - 4.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut surface = RecordingSurface::new(Vec2::splat(10.0));
        surface.save();
        surface.set_global_alpha(0.25);
        surface.set_line_width(9.0);
        surface.restore();
        assert_eq!(surface.context().state, PaintState::default());

        // Unbalanced restore keeps the current state
        surface.set_line_width(3.0);
        surface.restore();
        assert_eq!(surface.context().state.line_width, 3.0);
    }

    #[test]
    fn test_global_alpha_scales_color() {
        let state = PaintState {
            global_alpha: 0.5,
            stroke_color: Color32::from_rgb(200, 0, 0),
            ..Default::default()
        };
        assert!(state.effective_stroke_color().a() < 255);
        assert_eq!(PaintState::default().effective_fill_color(), Color32::BLACK);
    }
}
