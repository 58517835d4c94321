//! Editor controller tying the canvas, tools and viewport together.

use crate::canvas::Canvas;
use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::EditorConfig;
use crate::geometry::Vector;
use crate::input::{Key, KeyEvent, Modifiers, PointerEvent};
use crate::layer::Layer;
use crate::snap::Snapper;
use crate::tools::{Cursor, ToolKind, ToolManager};
use crate::viewport::Viewport;
use kurbo::{Point, Size};
use std::sync::Arc;

/// An editing session over one drawing.
pub struct Editor {
    pub canvas: Canvas,
    pub tools: ToolManager,
    pub viewport: Viewport,
    clipboard: Box<dyn Clipboard>,
    /// Last cell reported to the active gesture; repeated moves within a cell are dropped.
    last_cell: Option<Vector>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_canvas(Canvas::with_layer(Layer::new(), config.undo_capacity), config)
    }

    pub fn with_canvas(mut canvas: Canvas, config: &EditorConfig) -> Self {
        let mut tools = ToolManager::new();
        tools.current_style.freeform_glyph = config.freeform_glyph;
        tools.set_tool(&mut canvas, config.initial_tool);
        Self {
            canvas,
            tools,
            viewport: Viewport::with_cell_size(Size::new(config.cell_width, config.cell_height)),
            clipboard: Box::new(MemoryClipboard::new()),
            last_cell: None,
        }
    }

    /// Route copied text to `clipboard` instead of the in-memory default.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    /// Repair connectivity after drags and erasures with `snapper`.
    pub fn with_snapper(mut self, snapper: impl Snapper + 'static) -> Self {
        self.tools.set_snapper(Arc::new(snapper));
        self
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        self.last_cell = None;
        self.tools.set_tool(&mut self.canvas, kind);
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool()
    }

    /// Feed a pointer event in screen pixels.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, modifiers } => {
                self.pointer_down(self.viewport.screen_to_cell(position), modifiers)
            }
            PointerEvent::Move { position } => self.pointer_move(self.viewport.screen_to_cell(position)),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, cell: Vector, modifiers: Modifiers) {
        if self.tools.is_active() {
            log::warn!("pointer down during an active gesture, finishing it first");
            self.tools.end(&mut self.canvas);
        }
        self.last_cell = Some(cell);
        self.tools.begin(&mut self.canvas, cell, modifiers);
    }

    pub fn pointer_move(&mut self, cell: Vector) {
        if !self.tools.is_active() || self.last_cell == Some(cell) {
            return;
        }
        self.last_cell = Some(cell);
        self.tools.update(&mut self.canvas, cell);
    }

    pub fn pointer_up(&mut self) {
        self.last_cell = None;
        self.tools.end(&mut self.canvas);
    }

    /// Feed a key press. Undo and redo are handled here; other keys go to the tool.
    pub fn handle_key(&mut self, event: KeyEvent) {
        match event.normalized().key {
            Key::Undo => {
                self.undo();
            }
            Key::Redo => {
                self.redo();
            }
            key => self.tools.handle_key(&mut self.canvas, key, &mut *self.clipboard),
        }
    }

    /// Undo the newest change, abandoning any gesture in progress.
    pub fn undo(&mut self) -> bool {
        self.cancel();
        self.canvas.undo()
    }

    /// Redo the newest undone change, abandoning any gesture in progress.
    pub fn redo(&mut self) -> bool {
        self.cancel();
        self.canvas.redo()
    }

    /// Abandon the gesture in progress without committing.
    pub fn cancel(&mut self) {
        self.last_cell = None;
        self.tools.cancel(&mut self.canvas);
    }

    /// Cursor for a screen position.
    pub fn cursor_at(&self, position: Point) -> Cursor {
        self.tools.cursor(&self.canvas, self.viewport.screen_to_cell(position))
    }
}
