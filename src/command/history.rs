use egui::Pos2;

use super::{CommandId, DrawCommand, StrokeCommand};

/// Proof that a stroke is currently being drawn.
///
/// Handed out by [`CommandHistory::begin_stroke`] and not
/// `Clone`: whoever holds it is the only one who can extend that stroke,
/// and dropping it freezes the stroke for good.
#[derive(Debug)]
pub struct ActiveStroke {
    id: CommandId,
}

impl ActiveStroke {
    pub fn id(&self) -> CommandId {
        self.id
    }
}

/// Manages the drawing log and the commands available for redo
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Committed commands in drawing order; also the undo stack
    undo_stack: Vec<DrawCommand>,
    /// Commands popped by undo, most recent last
    redo_stack: Vec<DrawCommand>,
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command to the log. Any pending redo history is discarded.
    pub fn commit(&mut self, command: impl Into<DrawCommand>) -> CommandId {
        let command = command.into();
        let id = command.id();
        log::debug!("Committing {} {}", command.kind_name(), id);
        self.undo_stack.push(command);
        self.redo_stack.clear();
        id
    }

    /// Commit a stroke that will keep receiving points while it is drawn
    pub fn begin_stroke(&mut self, stroke: StrokeCommand) -> ActiveStroke {
        ActiveStroke {
            id: self.commit(stroke),
        }
    }

    /// Add a point to the active stroke.
    ///
    /// Returns `false` if the stroke is no longer in the log, e.g. it was
    /// undone or cleared while the pointer was still down.
    pub fn extend_active(&mut self, active: &ActiveStroke, point: Pos2) -> bool {
        self.undo_stack
            .iter_mut()
            .rev()
            .find(|command| command.id() == active.id)
            .is_some_and(|command| command.extend(point))
    }

    /// Undo the last committed command. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("Undo {} {}", command.kind_name(), command.id());
        self.redo_stack.push(command);
        true
    }

    /// Redo the last undone command. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        log::debug!("Redo {} {}", command.kind_name(), command.id());
        self.undo_stack.push(command);
        true
    }

    /// Drop the whole drawing and its redo history
    pub fn clear(&mut self) -> bool {
        let changed = !self.undo_stack.is_empty() || !self.redo_stack.is_empty();
        self.undo_stack.clear();
        self.redo_stack.clear();
        changed
    }

    /// The current drawing, bottom-most command first
    pub fn commands(&self) -> &[DrawCommand] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[DrawCommand] {
        &self.redo_stack
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }
}
