use egui::{Key, KeyboardShortcut, Modifiers, Painter, Rect, Response};

use crate::command::CommandHistory;
use crate::config::PadConfig;
use crate::export::{self, ExportError, ExportTarget};
use crate::input::{CanvasInput, InputSession};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::{ExportSpec, Renderer};
use crate::surface::{GlyphFonts, PainterSurface};
use crate::tools::ToolState;

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// The sketch pad application: tool panel on the left, canvas in the middle
pub struct SketchApp {
    config: PadConfig,
    history: CommandHistory,
    session: InputSession,
    tools: ToolState,
    renderer: Renderer,
    canvas_input: CanvasInput,
    /// Palette shown in the tools panel, starting with the configured stickers
    stickers: Vec<String>,
    /// Text field for adding a custom sticker
    custom_sticker: String,
    /// Result of the last export or tool change, shown to the user
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(PadConfig::load())
    }

    pub fn with_config(config: PadConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{}; using default configuration", err);
                PadConfig::default()
            }
        };
        let tools = ToolState::from_config(&config).unwrap_or_else(|err| {
            log::warn!("Invalid tool defaults ({}); using built-in tools", err);
            ToolState::default()
        });

        Self {
            renderer: Renderer::new(config.preview_alpha),
            canvas_input: CanvasInput::new(Rect::NOTHING),
            stickers: config
                .stickers
                .iter()
                .filter(|glyph| !glyph.trim().is_empty())
                .cloned()
                .collect(),
            history: CommandHistory::new(),
            session: InputSession::new(),
            custom_sticker: String::new(),
            status: None,
            tools,
            config,
        }
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn command_history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn stickers(&self) -> &[String] {
        &self.stickers
    }

    pub fn custom_sticker_mut(&mut self) -> &mut String {
        &mut self.custom_sticker
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn clear(&mut self) -> bool {
        self.history.clear()
    }

    /// Add the custom sticker text to the palette and select it
    pub fn add_custom_sticker(&mut self) {
        let glyph = self.custom_sticker.trim().to_owned();
        match self.tools.select_sticker(&glyph) {
            Ok(()) => {
                log::info!("Added custom sticker {}", glyph);
                if !self.stickers.contains(&glyph) {
                    self.stickers.push(glyph);
                }
                self.custom_sticker.clear();
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    /// Render the drawing at export resolution and hand it to the export sink
    pub fn export(&mut self) {
        match self.export_png() {
            Ok(location) => self.set_status(format!("Exported to {location}")),
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.set_status(format!("Export failed: {err}"));
            }
        }
    }

    fn export_png(&self) -> Result<String, ExportError> {
        let fonts = GlyphFonts::from_egui_defaults()?;
        let image = self.renderer.export(
            self.history.commands(),
            &ExportSpec::from_config(&self.config),
            fonts,
        )?;
        let bytes = export::encode_png(&image)?;
        export::save_png(&bytes, &ExportTarget::from_config(&self.config))
    }

    /// Feed this frame's pointer input on the canvas widget into the session.
    /// Returns whether anything changed.
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas: &Response) -> bool {
        let mut changed = false;
        for event in self.canvas_input.process_input(ctx, canvas) {
            log::trace!("Canvas input: {:?}", event);
            changed |= self.session.handle_event(&event, &self.tools, &mut self.history);
        }
        changed
    }

    /// Paint the drawing and the tool preview into the canvas area
    pub fn paint_canvas(&self, painter: &Painter, canvas_rect: Rect) {
        let mut surface = PainterSurface::new(painter, canvas_rect, self.config.background_color());
        self.renderer.redraw(&mut surface, self.history.commands(), 1.0);
        self.renderer
            .render_preview(&mut surface, &self.tools, self.session.preview());
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Text fields keep their own undo
        if ctx.wants_keyboard_input() {
            return;
        }
        // Redo first: the undo shortcut would also match with shift held
        let redo = ctx.input_mut(|input| {
            input.consume_shortcut(&REDO_SHORTCUT) || input.consume_shortcut(&REDO_ALT_SHORTCUT)
        });
        if redo {
            self.redo();
        } else if ctx.input_mut(|input| input.consume_shortcut(&UNDO_SHORTCUT)) {
            self.undo();
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
