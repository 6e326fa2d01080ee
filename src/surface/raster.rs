use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use egui::{Align, Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use super::{DrawContext, Surface};
use crate::export::ExportError;
use crate::geometry::{calculate_bounds, distance_to_line_segment};

/// egui's bundled faces, in the order glyphs are looked up
const FALLBACK_FACES: [&str; 3] = ["Ubuntu-Light", "NotoEmoji-Regular", "emoji-icon-font"];

/// Font faces used to rasterize text offscreen.
///
/// Loaded from egui's default font definitions so exported stickers use
/// the same glyphs as the on-screen canvas.
#[derive(Clone)]
pub struct GlyphFonts {
    faces: Vec<FontArc>,
}

impl std::fmt::Debug for GlyphFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFonts")
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl GlyphFonts {
    pub fn from_egui_defaults() -> Result<Self, ExportError> {
        let definitions = egui::FontDefinitions::default();
        let mut faces = Vec::with_capacity(FALLBACK_FACES.len());

        for name in FALLBACK_FACES {
            let Some(data) = definitions.font_data.get(name) else {
                log::warn!("Default font '{}' is not available for export", name);
                continue;
            };
            let face = FontArc::try_from_vec(data.font.to_vec())
                .map_err(|err| ExportError::Font(format!("{name}: {err}")))?;
            faces.push(face);
        }

        if faces.is_empty() {
            return Err(ExportError::Font("no usable font faces".to_owned()));
        }
        Ok(Self { faces })
    }

    fn face_for(&self, c: char) -> Option<&FontArc> {
        self.faces.iter().find(|face| face.glyph_id(c).0 != 0)
    }
}

/// Pixel scale at which a face renders with an em size of `font_size` pixels
fn em_scale(face: &FontArc, font_size: f32) -> PxScale {
    let units_per_em = face.units_per_em().unwrap_or(1000.0);
    PxScale::from(font_size * face.height_unscaled() / units_per_em)
}

/// Offscreen surface rendering into an RGBA image
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    background: Color32,
    fonts: GlyphFonts,
    context: DrawContext,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Color32, fonts: GlyphFonts) -> Self {
        let image = RgbaImage::from_pixel(width, height, Rgba(background.to_srgba_unmultiplied()));
        Self {
            image,
            background,
            fonts,
            context: DrawContext::default(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Clamp a rectangle to whole pixel indices inside the image, as inclusive ranges
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 || !rect.is_positive() {
            return None;
        }
        let x0 = rect.min.x.floor().max(0.0);
        let y0 = rect.min.y.floor().max(0.0);
        let x1 = rect.max.x.ceil().min(width as f32) - 1.0;
        let y1 = rect.max.y.ceil().min(height as f32) - 1.0;
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Composite `color` over the pixel at (x, y) with the given coverage
fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: [u8; 4], coverage: f32) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let src_a = color[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }

    let dst = image.get_pixel_mut(x as u32, y as u32);
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for channel in 0..3 {
        let src = color[channel] as f32 * src_a;
        let below = dst.0[channel] as f32 * dst_a * (1.0 - src_a);
        dst.0[channel] = ((src + below) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        let (width, height) = self.image.dimensions();
        Vec2::new(width as f32, height as f32)
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect) else {
            return;
        };
        let background = Rgba(self.background.to_srgba_unmultiplied());
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.image.put_pixel(x, y, background);
            }
        }
    }

    fn stroke(&mut self) {
        let state = self.context.state;
        let half_width = state.line_width / 2.0;
        if !(half_width > 0.0) {
            return;
        }

        let mut segments = Vec::new();
        for sub in self.context.path.strokable() {
            segments.extend(sub.points.windows(2).map(|pair| (pair[0], pair[1])));
            if sub.closed {
                if let (Some(first), Some(last)) = (sub.points.first(), sub.points.last()) {
                    segments.push((*last, *first));
                }
            }
        }
        if segments.is_empty() {
            return;
        }

        // Per-pixel coverage is the max over all segments of the path
        let reach = half_width + 1.0;
        let path_bounds = calculate_bounds(segments.iter().flat_map(|(a, b)| [a, b]), reach);
        let Some((x0, y0, x1, y1)) = self.pixel_span(path_bounds) else {
            return;
        };
        let mask_width = (x1 - x0 + 1) as usize;
        let mut mask = vec![0.0f32; mask_width * (y1 - y0 + 1) as usize];

        for (start, end) in &segments {
            let Some((sx0, sy0, sx1, sy1)) = self.pixel_span(calculate_bounds([start, end], reach))
            else {
                continue;
            };
            for y in sy0..=sy1 {
                for x in sx0..=sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let distance = distance_to_line_segment(center, *start, *end);
                    let coverage = (half_width + 0.5 - distance).clamp(0.0, 1.0);
                    let idx = (y - y0) as usize * mask_width + (x - x0) as usize;
                    if coverage > mask[idx] {
                        mask[idx] = coverage;
                    }
                }
            }
        }

        let color = state.effective_stroke_color().to_srgba_unmultiplied();
        for (idx, coverage) in mask.into_iter().enumerate() {
            if coverage > 0.0 {
                let x = x0 as i64 + (idx % mask_width) as i64;
                let y = y0 as i64 + (idx / mask_width) as i64;
                blend_pixel(&mut self.image, x, y, color, coverage);
            }
        }
    }

    fn fill_text(&mut self, text: &str, at: Pos2) {
        let state = self.context.state;
        if !(state.font_size > 0.0) {
            return;
        }

        let mut run: Vec<(&FontArc, GlyphId, PxScale, f32)> = Vec::new();
        let mut width = 0.0;
        let mut ascent = 0.0f32;
        let mut descent = 0.0f32;
        for c in text.chars() {
            let Some(face) = self.fonts.face_for(c) else {
                log::trace!("No glyph for {:?}, skipping", c);
                continue;
            };
            let scale = em_scale(face, state.font_size);
            let scaled = face.as_scaled(scale);
            let id = face.glyph_id(c);
            let advance = scaled.h_advance(id);
            ascent = ascent.max(scaled.ascent());
            descent = descent.min(scaled.descent());
            width += advance;
            run.push((face, id, scale, advance));
        }

        let mut x = match state.text_align.x() {
            Align::Min => at.x,
            Align::Center => at.x - width / 2.0,
            Align::Max => at.x - width,
        };
        let baseline = match state.text_align.y() {
            Align::Min => at.y + ascent,
            Align::Center => at.y + (ascent + descent) / 2.0,
            Align::Max => at.y + descent,
        };

        let color = state.effective_fill_color().to_srgba_unmultiplied();
        let image = &mut self.image;
        for (face, id, scale, advance) in run {
            let glyph = id.with_scale_and_position(scale, point(x, baseline));
            if let Some(outlined) = face.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i64 + gx as i64;
                    let py = bounds.min.y as i64 + gy as i64;
                    blend_pixel(image, px, py, color, coverage);
                });
            }
            x += advance;
        }
    }

    fn context(&self) -> &DrawContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut DrawContext {
        &mut self.context
    }
}
