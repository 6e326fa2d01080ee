use egui::{Button, Color32, RichText};

use crate::SketchApp;
use crate::command::DrawCommand;
use crate::tools::ToolMode;

const MAX_MARKER_WIDTH: f32 = 40.0;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading(format!("Tool: {}", app.tools().mode().name()));
            ui.separator();

            ui.strong("Marker");
            marker_controls(app, ui);
            ui.separator();

            ui.strong("Stickers");
            sticker_controls(app, ui);
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.command_history().can_undo();
                let can_redo = app.command_history().can_redo();

                if ui.add_enabled(can_undo, Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, Button::new("Redo")).clicked() {
                    app.redo();
                }
                if ui
                    .add_enabled(can_undo || can_redo, Button::new("Clear"))
                    .clicked()
                {
                    log::info!("Clearing the canvas");
                    app.clear();
                }
            });
            ui.separator();

            history_grid(app, ui);
            ui.separator();

            if ui.button("Export PNG").clicked() {
                app.export();
            }
            if let Some(status) = app.status() {
                ui.label(RichText::new(status).small());
            }
        });
}

fn marker_controls(app: &mut SketchApp, ui: &mut egui::Ui) {
    let widths = app.config().marker_widths;
    let marker_active = app.tools().mode() == ToolMode::Marker;
    let current_width = app.tools().stroke().width();

    ui.horizontal(|ui| {
        for (label, width) in [("Thin", widths.thin), ("Thick", widths.thick)] {
            let selected = marker_active && current_width == width;
            if ui.selectable_label(selected, label).clicked() {
                select_marker(app, width);
            }
        }
    });

    let mut width = current_width;
    let slider = egui::Slider::new(&mut width, 1.0..=MAX_MARKER_WIDTH).text("Width");
    if ui.add(slider).changed() {
        select_marker(app, width);
    }

    let mut color: Color32 = app.tools().stroke().color();
    ui.horizontal(|ui| {
        ui.label("Color");
        if ui.color_edit_button_srgba(&mut color).changed() {
            app.tools_mut().set_stroke_color(color);
        }
    });
}

fn select_marker(app: &mut SketchApp, width: f32) {
    if let Err(err) = app.tools_mut().select_marker(width) {
        log::warn!("Rejected marker width: {}", err);
        app.set_status(err.to_string());
    }
}

fn sticker_controls(app: &mut SketchApp, ui: &mut egui::Ui) {
    let sticker_active = app.tools().mode() == ToolMode::Sticker;
    let current = app.tools().sticker().glyph().to_owned();
    let palette = app.stickers().to_vec();

    ui.horizontal_wrapped(|ui| {
        for glyph in &palette {
            let selected = sticker_active && *glyph == current;
            let label = RichText::new(glyph.as_str()).size(20.0);
            if ui.selectable_label(selected, label).clicked() {
                log::info!("Sticker selected from UI: {}", glyph);
                if let Err(err) = app.tools_mut().select_sticker(glyph) {
                    app.set_status(err.to_string());
                }
            }
        }
    });

    ui.horizontal(|ui| {
        let field = ui.add(
            egui::TextEdit::singleline(app.custom_sticker_mut())
                .hint_text("Custom")
                .desired_width(80.0),
        );
        let submitted = field.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
        if ui.button("Add").clicked() || submitted {
            app.add_custom_sticker();
        }
    });
}

fn history_grid(app: &SketchApp, ui: &mut egui::Ui) {
    let history = app.command_history();
    ui.horizontal(|ui| {
        ui.label(format!("Undo stack size: {}", history.len()));
        ui.label(format!("Redo stack size: {}", history.redo_stack().len()));
    });

    egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
        egui::Grid::new("command_history_grid")
            .num_columns(2)
            .spacing([40.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Undo Stack");
                ui.strong("Redo Stack");
                ui.end_row();

                let undo_stack = history.commands();
                let redo_stack = history.redo_stack();
                for i in 0..undo_stack.len().max(redo_stack.len()) {
                    ui.label(undo_stack.get(i).map(DrawCommand::kind_name).unwrap_or_default());
                    ui.label(redo_stack.get(i).map(DrawCommand::kind_name).unwrap_or_default());
                    ui.end_row();
                }
            });
    });
}
