// src/renderer.rs
use egui::{Align2, Color32};
use image::RgbaImage;

use crate::command::{DrawCommand, STICKER_INK};
use crate::config::{MAX_EXPORT_SIZE, PadConfig};
use crate::export::ExportError;
use crate::input::PreviewState;
use crate::surface::{GlyphFonts, RasterSurface, Surface};
use crate::tools::{ToolMode, ToolState};

/// Line width of the marker preview ring, in surface units
const PREVIEW_RING_WIDTH: f32 = 1.0;

/// Describes the offscreen image produced by an export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSpec {
    /// Side length of the on-screen canvas the commands were recorded on
    pub display_size: f32,
    /// Side length of the exported image in pixels
    pub export_size: u32,
    pub background: Color32,
}

impl ExportSpec {
    pub fn from_config(config: &PadConfig) -> Self {
        Self {
            display_size: config.display_size,
            export_size: config.export_size,
            background: config.background_color(),
        }
    }

    pub fn scale(&self) -> f32 {
        self.export_size as f32 / self.display_size
    }
}

/// Paints the command log and the tool preview onto surfaces
#[derive(Debug, Clone)]
pub struct Renderer {
    preview_alpha: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { preview_alpha: 0.5 }
    }
}

impl Renderer {
    pub fn new(preview_alpha: f32) -> Self {
        Self {
            preview_alpha: preview_alpha.clamp(0.0, 1.0),
        }
    }

    /// Clear `surface` and draw every command in log order.
    ///
    /// The output depends only on the surface size, the commands and the
    /// scale; nothing carries over from earlier calls.
    pub fn redraw(&self, surface: &mut dyn Surface, commands: &[DrawCommand], scale: f32) {
        let bounds = surface.bounds();
        surface.clear_rect(bounds);

        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("Skipping redraw at invalid scale {}", scale);
            return;
        }

        for command in commands {
            surface.save();
            command.render(surface, scale);
            surface.restore();
        }
    }

    /// Draw the ghost of the current tool under the cursor.
    ///
    /// Only paints when the pointer hovers the canvas and no stroke is in
    /// progress. The overlay is transient: the next redraw wipes it.
    pub fn render_preview(
        &self,
        surface: &mut dyn Surface,
        tools: &ToolState,
        preview: &PreviewState,
    ) {
        if !preview.is_visible() {
            return;
        }
        let Some(position) = preview.position else {
            return;
        };

        surface.save();
        surface.set_global_alpha(self.preview_alpha);
        match tools.mode() {
            ToolMode::Marker => {
                surface.set_line_width(PREVIEW_RING_WIDTH);
                surface.set_stroke_color(tools.stroke().color());
                surface.begin_path();
                surface.arc(position, tools.stroke().width() / 2.0);
                surface.stroke();
            }
            ToolMode::Sticker => {
                let sticker = tools.sticker();
                surface.set_font_size(sticker.size());
                surface.set_text_align(Align2::CENTER_CENTER);
                surface.set_fill_color(STICKER_INK);
                surface.fill_text(sticker.glyph(), position);
            }
        }
        surface.restore();
    }

    /// Render the commands into a fresh image at the export resolution
    pub fn export(
        &self,
        commands: &[DrawCommand],
        spec: &ExportSpec,
        fonts: GlyphFonts,
    ) -> Result<RgbaImage, ExportError> {
        let size_ok = (1..=MAX_EXPORT_SIZE).contains(&spec.export_size);
        if !size_ok || !(spec.display_size.is_finite() && spec.display_size > 0.0) {
            return Err(ExportError::InvalidSize {
                display_size: spec.display_size,
                export_size: spec.export_size,
            });
        }

        let mut surface =
            RasterSurface::new(spec.export_size, spec.export_size, spec.background, fonts);
        self.redraw(&mut surface, commands, spec.scale());
        log::info!(
            "Rendered {} commands at {}x{} (scale {})",
            commands.len(),
            spec.export_size,
            spec.export_size,
            spec.scale()
        );
        Ok(surface.into_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{StrokeCommand, StrokeStyle};
    use crate::surface::{DrawOp, RecordingSurface};
    use egui::{Pos2, Vec2};

    fn stroke() -> DrawCommand {
        let mut stroke = StrokeCommand::new(
            Pos2::new(10.0, 10.0),
            StrokeStyle::new(3.0, Color32::BLACK).unwrap(),
        );
        stroke.extend(Pos2::new(20.0, 20.0));
        stroke.into()
    }

    #[test]
    fn test_redraw_starts_with_full_clear() {
        let renderer = Renderer::default();
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));
        renderer.redraw(&mut surface, &[stroke()], 1.0);
        assert_eq!(surface.ops()[0], DrawOp::Clear(surface.bounds()));
        assert_eq!(surface.ops().len(), 2);
    }

    #[test]
    fn test_invalid_scale_only_clears() {
        let renderer = Renderer::default();
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));
        renderer.redraw(&mut surface, &[stroke()], 0.0);
        assert_eq!(surface.ops().len(), 1);
    }

    fn hovering_at(x: f32, y: f32) -> PreviewState {
        PreviewState {
            position: Some(Pos2::new(x, y)),
            hovering: true,
            drawing: false,
        }
    }

    #[test]
    fn test_marker_preview_is_translucent_ring() {
        let renderer = Renderer::default();
        let tools = ToolState::from_config(&PadConfig::default()).unwrap();
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));

        renderer.render_preview(&mut surface, &tools, &hovering_at(40.0, 40.0));

        let strokes: Vec<_> = surface.strokes().collect();
        assert_eq!(strokes.len(), 1);
        let (subpaths, width, color) = strokes[0];
        assert!(subpaths[0].closed);
        assert_eq!(width, PREVIEW_RING_WIDTH);
        assert_eq!(color, Color32::BLACK.gamma_multiply(0.5));
        assert_eq!(surface.context().state.global_alpha, 1.0);
    }

    #[test]
    fn test_sticker_preview_draws_glyph() {
        let renderer = Renderer::default();
        let mut tools = ToolState::from_config(&PadConfig::default()).unwrap();
        tools.select_sticker("⭐").unwrap();
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));

        renderer.render_preview(&mut surface, &tools, &hovering_at(10.0, 20.0));

        let texts: Vec<_> = surface.texts().collect();
        let DrawOp::Text {
            text, at, align, ..
        } = texts[0]
        else {
            panic!("expected text");
        };
        assert_eq!(text, "⭐");
        assert_eq!(*at, Pos2::new(10.0, 20.0));
        assert_eq!(*align, Align2::CENTER_CENTER);
    }

    #[test]
    fn test_no_preview_while_drawing_or_away() {
        let renderer = Renderer::default();
        let tools = ToolState::from_config(&PadConfig::default()).unwrap();
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));

        let drawing = PreviewState {
            drawing: true,
            ..hovering_at(40.0, 40.0)
        };
        let away = PreviewState {
            hovering: false,
            ..hovering_at(40.0, 40.0)
        };
        renderer.render_preview(&mut surface, &tools, &drawing);
        renderer.render_preview(&mut surface, &tools, &away);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_export_rejects_zero_size() {
        let renderer = Renderer::default();
        let spec = ExportSpec {
            display_size: 500.0,
            export_size: 0,
            background: Color32::WHITE,
        };
        let fonts = GlyphFonts::from_egui_defaults().unwrap();
        assert!(matches!(
            renderer.export(&[], &spec, fonts),
            Err(ExportError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_export_rejects_oversized_image() {
        let renderer = Renderer::default();
        let fonts = GlyphFonts::from_egui_defaults().unwrap();
        for export_size in [MAX_EXPORT_SIZE + 1, u32::MAX] {
            let spec = ExportSpec {
                display_size: 500.0,
                export_size,
                background: Color32::WHITE,
            };
            assert!(matches!(
                renderer.export(&[stroke()], &spec, fonts.clone()),
                Err(ExportError::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn test_export_spec_scale() {
        let spec = ExportSpec::from_config(&PadConfig::default());
        assert_eq!(spec.scale(), 2.0);
    }
}
