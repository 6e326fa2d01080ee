#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod export;
mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod surface;
pub mod tools;

pub use app::SketchApp;
pub use command::{CommandHistory, CommandId, DrawCommand, StickerCommand, StrokeCommand};
pub use config::PadConfig;
pub use export::ExportError;
pub use input::{InputEvent, InputSession, PreviewState};
pub use renderer::{ExportSpec, Renderer};
pub use surface::{RecordingSurface, Surface};
pub use tools::{ToolMode, ToolState};
