use egui::{Context, Pos2, Rect, Response};

mod session;
pub use session::{InputSession, PreviewState};

/// Pointer events delivered to the input session, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved, with or without the button held
    PointerMove { position: Pos2 },
    /// Primary button was released after a press on the canvas
    PointerUp,
    /// Pointer entered the canvas
    PointerEnter { position: Pos2 },
    /// Pointer left the canvas
    PointerLeave,
}

/// The slice of egui pointer state the canvas cares about for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Screen position, `None` when the pointer is outside the window
    pub hover_pos: Option<Pos2>,
    /// Pointer is over the canvas widget and not covered by another layer
    pub over_canvas: bool,
    pub primary_pressed: bool,
    pub primary_released: bool,
}

impl PointerSample {
    /// Sample the pointer against the canvas widget's `response`
    pub fn from_egui(ctx: &Context, response: &Response) -> Self {
        let over_canvas = response.contains_pointer();
        ctx.input(|input| Self {
            hover_pos: input.pointer.hover_pos(),
            over_canvas,
            primary_pressed: input.pointer.primary_pressed(),
            primary_released: input.pointer.primary_released(),
        })
    }
}

/// Handles converting raw egui input into canvas [`InputEvent`]s
#[derive(Debug)]
pub struct CanvasInput {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    inside: bool,
    pressed_on_canvas: bool,
}

impl CanvasInput {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
            inside: false,
            pressed_on_canvas: false,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Read this frame's pointer state for the canvas widget and translate it
    pub fn process_input(&mut self, ctx: &Context, response: &Response) -> Vec<InputEvent> {
        self.set_canvas_rect(response.rect);
        self.translate(PointerSample::from_egui(ctx, response))
    }

    /// Turn one frame of pointer state into events, in the order
    /// enter, move, down, up, leave.
    pub fn translate(&mut self, sample: PointerSample) -> Vec<InputEvent> {
        let mut events = Vec::new();
        // Popups and windows above the canvas hide it from the pointer
        let now_inside = sample.over_canvas
            && sample
                .hover_pos
                .is_some_and(|pos| self.canvas_rect.contains(pos));

        if let Some(pos) = sample.hover_pos {
            if now_inside && !self.inside {
                events.push(InputEvent::PointerEnter {
                    position: self.to_local(pos),
                });
            }

            // Strokes keep following the pointer outside the canvas while held
            let tracked = now_inside || self.pressed_on_canvas;
            if tracked && self.last_pointer_pos != Some(pos) {
                events.push(InputEvent::PointerMove {
                    position: self.to_local(pos),
                });
            }

            if sample.primary_pressed && now_inside {
                events.push(InputEvent::PointerDown {
                    position: self.to_local(pos),
                });
                self.pressed_on_canvas = true;
            }
        }

        if sample.primary_released && self.pressed_on_canvas {
            events.push(InputEvent::PointerUp);
            self.pressed_on_canvas = false;
        }

        if self.inside && !now_inside {
            events.push(InputEvent::PointerLeave);
        }

        self.inside = now_inside;
        self.last_pointer_pos = sample.hover_pos;
        events
    }
}
