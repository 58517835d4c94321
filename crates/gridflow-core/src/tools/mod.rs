//! Tool system for the editor.
//!
//! Each tool turns a pointer gesture (start, any number of moves, end) into
//! a scratch edit on the [`Canvas`] and commits it when the gesture ends.

mod freeform;
mod move_line;
mod select;

pub use freeform::FreeformTool;
pub use move_line::{MoveBounds, MoveTool, plan_move};
pub use select::{SelectTool, drag_region};

use crate::canvas::Canvas;
use crate::clipboard::Clipboard;
use crate::geometry::Vector;
use crate::input::{Key, Modifiers};
use crate::layer::ColorIndex;
use crate::snap::{LineSnapper, Snapper};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Move,
    Freeform,
}

/// Pointer cursor suggested for the position under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Move,
    Crosshair,
    /// Over a horizontal line that can be dragged up or down.
    RowResize,
    /// Over a vertical line that can be dragged left or right.
    ColumnResize,
}

/// Colors and glyph applied to newly drawn cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStyle {
    pub fg: Option<ColorIndex>,
    pub bg: Option<ColorIndex>,
    pub freeform_glyph: char,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self { fg: None, bg: None, freeform_glyph: '*' }
    }
}

/// A tool together with its gesture state.
#[derive(Debug, Clone)]
pub enum Tool {
    Select(SelectTool),
    Move(MoveTool),
    Freeform(FreeformTool),
}

impl Tool {
    /// A fresh tool; the select tool repairs connectivity with `snapper`.
    pub fn new(kind: ToolKind, snapper: &Arc<dyn Snapper>) -> Self {
        match kind {
            ToolKind::Select => Tool::Select(SelectTool::with_snapper(Arc::clone(snapper))),
            ToolKind::Move => Tool::Move(MoveTool::new()),
            ToolKind::Freeform => Tool::Freeform(FreeformTool::new()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Select(_) => ToolKind::Select,
            Tool::Move(_) => ToolKind::Move,
            Tool::Freeform(_) => ToolKind::Freeform,
        }
    }
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    tool: Tool,
    /// Current style to apply to new cells.
    pub current_style: DrawStyle,
    snapper: Arc<dyn Snapper>,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self::with_snapper(Arc::new(LineSnapper))
    }

    /// A manager whose tools repair connectivity with `snapper`.
    pub fn with_snapper(snapper: Arc<dyn Snapper>) -> Self {
        Self {
            tool: Tool::new(ToolKind::default(), &snapper),
            current_style: DrawStyle::default(),
            snapper,
        }
    }

    /// Swap the connectivity repair used from now on, keeping any selection.
    pub fn set_snapper(&mut self, snapper: Arc<dyn Snapper>) {
        if let Tool::Select(select) = &mut self.tool {
            select.set_snapper(Arc::clone(&snapper));
        }
        self.snapper = snapper;
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Switch tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, canvas: &mut Canvas, kind: ToolKind) {
        self.cancel(canvas);
        if let Tool::Select(select) = &mut self.tool {
            select.clear(canvas);
        }
        log::debug!("tool {:?} -> {:?}", self.tool.kind(), kind);
        self.tool = Tool::new(kind, &self.snapper);
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        match &self.tool {
            Tool::Select(t) => t.is_active(),
            Tool::Move(t) => t.is_active(),
            Tool::Freeform(t) => t.is_active(),
        }
    }

    /// Begin a gesture.
    pub fn begin(&mut self, canvas: &mut Canvas, position: Vector, modifiers: Modifiers) {
        match &mut self.tool {
            Tool::Select(t) => t.start(canvas, position, modifiers),
            Tool::Move(t) => t.start(canvas, position),
            Tool::Freeform(t) => t.start(canvas, &self.current_style, position),
        }
    }

    /// Continue the gesture in progress.
    pub fn update(&mut self, canvas: &mut Canvas, position: Vector) {
        match &mut self.tool {
            Tool::Select(t) => t.move_to(canvas, position),
            Tool::Move(t) => t.move_to(canvas, position),
            Tool::Freeform(t) => t.move_to(canvas, &self.current_style, position),
        }
    }

    /// Finish the gesture, committing its edit.
    pub fn end(&mut self, canvas: &mut Canvas) {
        match &mut self.tool {
            Tool::Select(t) => t.end(canvas),
            Tool::Move(t) => t.end(canvas),
            Tool::Freeform(t) => t.end(canvas),
        }
    }

    /// Abandon the gesture without committing.
    pub fn cancel(&mut self, canvas: &mut Canvas) {
        match &mut self.tool {
            Tool::Select(t) => t.cancel(canvas),
            Tool::Move(t) => t.cancel(canvas),
            Tool::Freeform(t) => t.cancel(canvas),
        }
    }

    pub fn handle_key(&mut self, canvas: &mut Canvas, key: Key, clipboard: &mut dyn Clipboard) {
        match &mut self.tool {
            Tool::Select(t) => t.handle_key(canvas, key, clipboard),
            Tool::Move(_) => {}
            Tool::Freeform(t) => t.handle_key(&mut self.current_style, key),
        }
    }

    pub fn cursor(&self, canvas: &Canvas, position: Vector) -> Cursor {
        match &self.tool {
            Tool::Select(t) => t.cursor(canvas, position),
            Tool::Move(_) => MoveTool::cursor(canvas, position),
            Tool::Freeform(_) => Cursor::Crosshair,
        }
    }
}
