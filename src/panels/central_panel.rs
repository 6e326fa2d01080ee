use egui::{Sense, Vec2};

use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = Vec2::splat(app.config().display_size);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        if app.handle_canvas_input(ctx, &response) {
            ctx.request_repaint();
        }

        app.paint_canvas(&painter, response.rect);
    });
}
