//! GridFlow Core Library
//!
//! Editing core for box-drawing diagrams on an unbounded character grid:
//! layered cell storage with reversible composition, line tracing, line
//! moves that keep connectors attached, rectangular selection and dragging.

pub mod canvas;
pub mod characters;
pub mod clipboard;
pub mod config;
pub mod document;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layer;
pub mod snap;
pub mod text;
pub mod tools;
pub mod trace;
pub mod viewport;

pub use canvas::Canvas;
pub use clipboard::{Clipboard, MemoryClipboard};
#[cfg(feature = "native")]
pub use clipboard::SystemClipboard;
pub use config::EditorConfig;
pub use document::{DocumentError, LayerDocument};
pub use editor::Editor;
pub use geometry::{Direction, GridBox, Orientation, Vector};
pub use input::{Key, KeyEvent, Modifiers, PointerEvent};
pub use layer::{Cell, ColorIndex, GridView, Layer, LayerView};
pub use snap::{LineSnapper, Snapper, apply_snap, snap};
pub use text::{OutOfGrid, layer_to_text, text_to_layer, try_text_to_layer};
pub use tools::{Cursor, DrawStyle, Tool, ToolKind, ToolManager};
pub use trace::{AttachmentTrace, LineTrace, NotALine, trace_line};
pub use viewport::Viewport;
