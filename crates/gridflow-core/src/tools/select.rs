//! Rectangular selection, dragging the selected region and editing it from the keyboard.

use crate::canvas::Canvas;
use crate::characters::is_special;
use crate::clipboard::Clipboard;
use crate::geometry::{GridBox, Vector};
use crate::input::{Key, Modifiers};
use crate::layer::{GridView, Layer};
use crate::snap::{LineSnapper, Snapper, apply_snap_with};
use crate::text::layer_to_text;
use std::sync::Arc;

use super::Cursor;
use super::move_line::MoveTool;

#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Drawing a new selection rectangle.
    Selecting,
    /// Dragging the selected region.
    Dragging { start: Vector, current: Vector },
    /// Resizing a line from a special glyph, handed off to the move tool.
    Resizing(MoveTool),
}

/// Select tool state.
#[derive(Debug, Clone)]
pub struct SelectTool {
    /// Selection in committed coordinates. During a drag the canvas shows
    /// the translated rectangle while this stays put until release.
    selection: Option<GridBox>,
    gesture: Gesture,
    /// Repairs connectivity after drags and erasures.
    snapper: Arc<dyn Snapper>,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::with_snapper(Arc::new(LineSnapper))
    }
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapper(snapper: Arc<dyn Snapper>) -> Self {
        Self { selection: None, gesture: Gesture::Idle, snapper }
    }

    pub fn set_snapper(&mut self, snapper: Arc<dyn Snapper>) {
        self.snapper = snapper;
    }

    pub fn selection(&self) -> Option<GridBox> {
        self.selection
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn start(&mut self, canvas: &mut Canvas, position: Vector, modifiers: Modifiers) {
        let inside = self.selection.is_some_and(|b| b.contains(position));
        let on_special = canvas.committed().glyph(position).is_some_and(is_special);

        if inside && !modifiers.shift {
            self.gesture = Gesture::Dragging { start: position, current: position };
        } else if on_special && !modifiers.shift {
            let mut resize = MoveTool::new();
            resize.start(canvas, position);
            self.gesture = Gesture::Resizing(resize);
        } else {
            let selection = GridBox::new(position, position);
            self.selection = Some(selection);
            canvas.set_selection(Some(selection));
            self.gesture = Gesture::Selecting;
            preview_selection(canvas, selection);
        }
    }

    pub fn move_to(&mut self, canvas: &mut Canvas, position: Vector) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Selecting => {
                if let Some(selection) = self.selection {
                    let selection = GridBox::new(selection.start, position);
                    self.selection = Some(selection);
                    canvas.set_selection(Some(selection));
                    preview_selection(canvas, selection);
                }
            }
            Gesture::Dragging { start, current } => {
                *current = position;
                let delta = position - *start;
                if let Some(selection) = self.selection {
                    canvas.set_selection(Some(selection.translate(delta)));
                    let staged = drag_region(&*self.snapper, canvas.committed(), selection, delta);
                    canvas.set_scratch(staged);
                }
            }
            Gesture::Resizing(resize) => resize.move_to(canvas, position),
        }
    }

    pub fn end(&mut self, canvas: &mut Canvas) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Selecting => canvas.clear_scratch(),
            Gesture::Dragging { start, current } => {
                canvas.commit_scratch();
                if let Some(selection) = self.selection {
                    let moved = selection.translate(current - start);
                    self.selection = Some(moved);
                    canvas.set_selection(Some(moved));
                }
            }
            Gesture::Resizing(mut resize) => resize.end(canvas),
        }
    }

    /// Abandon the gesture; the selection reverts to where it was before the drag.
    pub fn cancel(&mut self, canvas: &mut Canvas) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Resizing(mut resize) => resize.cancel(canvas),
            Gesture::Idle => {}
            Gesture::Selecting | Gesture::Dragging { .. } => {
                canvas.clear_scratch();
                canvas.set_selection(self.selection);
            }
        }
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self, canvas: &mut Canvas) {
        self.cancel(canvas);
        self.selection = None;
        canvas.set_selection(None);
    }

    /// Copy, cut and delete act on the selection; other keys are ignored.
    ///
    /// Cut, delete and escape abandon a gesture in progress before acting,
    /// so they always see the selection as it was before the gesture.
    pub fn handle_key(&mut self, canvas: &mut Canvas, key: Key, clipboard: &mut dyn Clipboard) {
        let Some(selection) = self.selection else {
            return;
        };
        if self.is_active() && matches!(key, Key::Cut | Key::Delete | Key::Backspace | Key::Escape) {
            log::debug!("{key:?} abandons the gesture in progress");
            self.cancel(canvas);
        }
        match key {
            Key::Copy => clipboard.set_text(&layer_to_text(canvas.committed(), Some(selection))),
            Key::Cut => {
                clipboard.set_text(&layer_to_text(canvas.committed(), Some(selection)));
                erase_region(&*self.snapper, canvas, selection);
            }
            Key::Delete | Key::Backspace => erase_region(&*self.snapper, canvas, selection),
            Key::Escape => self.clear(canvas),
            _ => {}
        }
    }

    pub fn cursor(&self, canvas: &Canvas, position: Vector) -> Cursor {
        if self.selection.is_some_and(|b| b.contains(position)) {
            Cursor::Pointer
        } else if canvas.committed().glyph(position).is_some_and(is_special) {
            Cursor::Move
        } else {
            Cursor::Default
        }
    }
}

/// Show the committed cells inside `selection` in the scratch layer.
fn preview_selection(canvas: &mut Canvas, selection: GridBox) {
    let highlight: Layer = canvas
        .committed()
        .iter()
        .filter(|(p, _)| selection.contains(*p))
        .collect();
    canvas.set_scratch(highlight);
}

/// Stage moving every committed cell inside `region` by `delta`.
///
/// Connectivity around both the vacated and the new area is repaired.
pub fn drag_region(snapper: &dyn Snapper, committed: &Layer, region: GridBox, delta: Vector) -> Layer {
    let contents: Vec<_> = committed.iter().filter(|(p, _)| region.contains(*p)).collect();

    let mut staged = Layer::new();
    for (position, _) in &contents {
        staged.erase(*position);
    }
    for (position, cell) in contents {
        staged.set(position + delta, cell);
    }
    apply_snap_with(snapper, &mut staged, committed);
    staged
}

/// Erase every committed cell inside `region` and commit the result.
fn erase_region(snapper: &dyn Snapper, canvas: &mut Canvas, region: GridBox) {
    let mut staged = Layer::new();
    for (position, _) in canvas.committed().iter().filter(|(p, _)| region.contains(*p)) {
        staged.erase(position);
    }
    apply_snap_with(snapper, &mut staged, canvas.committed());
    canvas.set_scratch(staged);
    canvas.commit_scratch();
}
