//! Pointer state machine that turns canvas events into history changes.
//!
//! ```text
//!            pointer down (marker)
//!   ┌──────┐ ─────────────────────► ┌─────────┐
//!   │ Idle │                        │ Drawing │ ◄── pointer move extends the stroke
//!   └──────┘ ◄───────────────────── └─────────┘
//!      ▲  │        pointer up
//!      └──┘
//!   pointer down (sticker): placed and committed immediately
//! ```
//!
//! Every operation returns whether something visible may have changed so
//! the caller can decide when to repaint.

use egui::Pos2;

use super::InputEvent;
use crate::command::{ActiveStroke, CommandHistory, StickerCommand, StrokeCommand};
use crate::tools::{ToolMode, ToolState};

/// Where the tool preview should be drawn, if anywhere
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PreviewState {
    /// Last known pointer position over the canvas
    pub position: Option<Pos2>,
    /// Pointer is over the canvas
    pub hovering: bool,
    /// A stroke is in progress
    pub drawing: bool,
}

impl PreviewState {
    /// The preview is only shown while hovering and not drawing
    pub fn is_visible(&self) -> bool {
        self.hovering && !self.drawing && self.position.is_some()
    }
}

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Idle,
    Drawing(ActiveStroke),
}

/// Routes pointer events into the command history
#[derive(Debug, Default)]
pub struct InputSession {
    state: SessionState,
    preview: PreviewState,
}

impl InputSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing(_))
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        tools: &ToolState,
        history: &mut CommandHistory,
    ) -> bool {
        match *event {
            InputEvent::PointerDown { position } => self.pointer_down(position, tools, history),
            InputEvent::PointerMove { position } => self.pointer_move(position, history),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::PointerEnter { position } => self.pointer_enter(position),
            InputEvent::PointerLeave => self.pointer_leave(),
        }
    }

    /// Start a stroke or place a sticker, depending on the tool mode
    pub fn pointer_down(
        &mut self,
        point: Pos2,
        tools: &ToolState,
        history: &mut CommandHistory,
    ) -> bool {
        if self.is_drawing() {
            log::trace!("Ignoring pointer down while a stroke is in progress");
            return false;
        }
        self.preview.position = Some(point);

        match tools.mode() {
            ToolMode::Marker => {
                let active = history.begin_stroke(StrokeCommand::new(point, *tools.stroke()));
                log::trace!("Started stroke {}", active.id());
                self.state = SessionState::Drawing(active);
                self.preview.drawing = true;
            }
            ToolMode::Sticker => {
                // Stickers are atomic: placed and committed in one step
                history.commit(StickerCommand::new(point, tools.sticker().clone()));
            }
        }
        true
    }

    /// Extend the active stroke, or just move the preview when idle
    pub fn pointer_move(&mut self, point: Pos2, history: &mut CommandHistory) -> bool {
        self.preview.position = Some(point);
        if let SessionState::Drawing(active) = &self.state {
            if !history.extend_active(active, point) {
                log::trace!("Stroke {} is no longer in the log", active.id());
            }
        }
        true
    }

    /// Finish the active stroke. Does nothing when idle.
    pub fn pointer_up(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SessionState::Drawing(active) => {
                log::trace!("Finished stroke {}", active.id());
                self.preview.drawing = false;
                true
            }
            SessionState::Idle => false,
        }
    }

    pub fn pointer_enter(&mut self, point: Pos2) -> bool {
        self.preview.hovering = true;
        self.preview.position = Some(point);
        true
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.preview.hovering = false;
        true
    }
}
