use egui::{Color32, Pos2, Vec2};
use image::Rgba;
use sketch_pad::command::{StickerStyle, StrokeStyle};
use sketch_pad::surface::{DrawOp, GlyphFonts, RasterSurface};
use sketch_pad::{
    DrawCommand, ExportSpec, PadConfig, RecordingSurface, Renderer, StickerCommand, StrokeCommand,
};

fn stroke(width: f32, points: &[(f32, f32)]) -> DrawCommand {
    let style = StrokeStyle::new(width, Color32::BLACK).unwrap();
    let mut stroke = StrokeCommand::new(Pos2::new(points[0].0, points[0].1), style);
    for &(x, y) in &points[1..] {
        stroke.extend(Pos2::new(x, y));
    }
    stroke.into()
}

fn sticker(x: f32, y: f32, glyph: &str) -> DrawCommand {
    StickerCommand::new(Pos2::new(x, y), StickerStyle::new(glyph, 30.0).unwrap()).into()
}

fn mixed_log() -> Vec<DrawCommand> {
    vec![
        stroke(2.0, &[(10.0, 12.0), (33.0, 47.5), (80.25, 19.0)]),
        sticker(60.0, 70.0, "⭐"),
        stroke(5.5, &[(90.0, 90.0), (91.0, 140.0)]),
        sticker(120.5, 15.0, "🚀"),
    ]
}

fn record(commands: &[DrawCommand], scale: f32) -> RecordingSurface {
    let mut surface = RecordingSurface::new(Vec2::splat(1000.0));
    Renderer::default().redraw(&mut surface, commands, scale);
    surface
}

#[test]
fn test_export_scale_doubles_coordinates_and_width() {
    let spec = ExportSpec::from_config(&PadConfig::default());
    let surface = record(&[stroke(3.0, &[(10.0, 10.0), (20.0, 20.0)])], spec.scale());

    let strokes: Vec<_> = surface.strokes().collect();
    assert_eq!(strokes.len(), 1);
    let (subpaths, width, _) = strokes[0];
    assert_eq!(width, 6.0);
    assert_eq!(subpaths[0].points, vec![Pos2::new(20.0, 20.0), Pos2::new(40.0, 40.0)]);
}

#[test]
fn test_sticker_font_size_scales() {
    let surface = record(&[sticker(100.0, 50.0, "🚀")], 2.0);

    let texts: Vec<_> = surface.texts().collect();
    let DrawOp::Text {
        text, at, font_size, ..
    } = texts[0]
    else {
        panic!("expected text");
    };
    assert_eq!(text, "🚀");
    assert_eq!(*at, Pos2::new(200.0, 100.0));
    assert_eq!(*font_size, 60.0);
}

#[test]
fn test_redraw_is_repeatable() {
    let commands = [
        stroke(2.0, &[(0.0, 0.0), (5.0, 5.0), (9.0, 1.0)]),
        stroke(4.0, &[(30.0, 30.0), (60.0, 30.0)]),
    ];
    let mut surface = RecordingSurface::new(Vec2::splat(100.0));
    let renderer = Renderer::default();

    renderer.redraw(&mut surface, &commands, 1.0);
    let first = surface.ops().to_vec();
    renderer.redraw(&mut surface, &commands, 1.0);
    assert_eq!(surface.ops(), first.as_slice());
}

#[test]
fn test_single_point_stroke_draws_nothing() {
    let surface = record(&[stroke(5.0, &[(10.0, 10.0)])], 1.0);
    assert_eq!(surface.strokes().count(), 0);
    assert_eq!(surface.ops().len(), 1);
}

#[test]
fn test_exported_image_has_strokes_at_doubled_positions() {
    let config = PadConfig::default();
    let spec = ExportSpec::from_config(&config);
    let commands = [stroke(3.0, &[(20.0, 20.0), (40.0, 40.0)])];

    let fonts = GlyphFonts::from_egui_defaults().unwrap();
    let image = Renderer::default().export(&commands, &spec, fonts).unwrap();

    assert_eq!(image.dimensions(), (config.export_size, config.export_size));
    let white = Rgba([255, 255, 255, 255]);
    assert_eq!(*image.get_pixel(60, 60), Rgba([0, 0, 0, 255]));
    assert_eq!(*image.get_pixel(10, 10), white);
    assert_eq!(*image.get_pixel(300, 300), white);
}

#[test]
fn test_render_is_linear_in_scale() {
    let commands = mixed_log();
    let base = record(&commands, 1.0);

    for k in [0.5, 1.5, 3.7] {
        let scaled = record(&commands, k);
        assert_eq!(scaled.ops().len(), base.ops().len());

        for (one, at_k) in base.ops().iter().zip(scaled.ops()).skip(1) {
            match (one, at_k) {
                (
                    DrawOp::Stroke {
                        subpaths: one_paths,
                        width: one_width,
                        color: one_color,
                    },
                    DrawOp::Stroke {
                        subpaths: k_paths,
                        width: k_width,
                        color: k_color,
                    },
                ) => {
                    assert_eq!(*k_width, one_width * k);
                    assert_eq!(k_color, one_color);
                    let expected: Vec<Pos2> = one_paths[0]
                        .points
                        .iter()
                        .map(|p| Pos2::new(p.x * k, p.y * k))
                        .collect();
                    assert_eq!(k_paths[0].points, expected);
                }
                (
                    DrawOp::Text {
                        text: one_text,
                        at: one_at,
                        font_size: one_size,
                        ..
                    },
                    DrawOp::Text {
                        text: k_text,
                        at: k_at,
                        font_size: k_size,
                        ..
                    },
                ) => {
                    assert_eq!(k_text, one_text);
                    assert_eq!(*k_size, one_size * k);
                    assert_eq!(*k_at, Pos2::new(one_at.x * k, one_at.y * k));
                }
                other => panic!("ops differ in kind at scale {k}: {other:?}"),
            }
        }
    }
}

#[test]
fn test_raster_redraw_is_pixel_identical() {
    let commands = mixed_log();
    let renderer = Renderer::default();
    let fonts = GlyphFonts::from_egui_defaults().unwrap();

    let mut fresh = RasterSurface::new(300, 300, Color32::WHITE, fonts.clone());
    renderer.redraw(&mut fresh, &commands, 1.5);

    // Same surface size, but something else was drawn there first
    let mut reused = RasterSurface::new(300, 300, Color32::WHITE, fonts);
    renderer.redraw(&mut reused, &[stroke(20.0, &[(0.0, 0.0), (200.0, 200.0)])], 1.0);
    renderer.redraw(&mut reused, &commands, 1.5);

    assert!(fresh.image() == reused.image());
}

#[test]
fn test_export_twice_gives_same_image() {
    let spec = ExportSpec {
        display_size: 200.0,
        export_size: 300,
        background: Color32::WHITE,
    };
    let renderer = Renderer::default();
    let commands = mixed_log();

    let first = renderer
        .export(&commands, &spec, GlyphFonts::from_egui_defaults().unwrap())
        .unwrap();
    let second = renderer
        .export(&commands, &spec, GlyphFonts::from_egui_defaults().unwrap())
        .unwrap();
    assert!(first == second);
}
