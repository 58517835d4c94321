//! The committed drawing, its in-progress scratch edit and undo history.

use crate::document::{self, DocumentError};
use crate::geometry::GridBox;
use crate::history::{History, MAX_UNDO};
use crate::layer::{Layer, LayerView};
use uuid::Uuid;

/// A drawing being edited.
///
/// Gestures stage their edits in the scratch layer. Nothing reaches the
/// committed layer until [`Canvas::commit_scratch`], so abandoning a gesture
/// only needs [`Canvas::clear_scratch`].
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Unique drawing identifier.
    pub id: String,
    committed: Layer,
    scratch: Layer,
    selection: Option<GridBox>,
    history: History,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty drawing.
    pub fn new() -> Self {
        Self::with_layer(Layer::new(), MAX_UNDO)
    }

    /// Create a drawing from an existing committed layer.
    pub fn with_layer(committed: Layer, undo_capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            committed,
            scratch: Layer::new(),
            selection: None,
            history: History::with_capacity(undo_capacity),
        }
    }

    pub fn committed(&self) -> &Layer {
        &self.committed
    }

    pub fn scratch(&self) -> &Layer {
        &self.scratch
    }

    /// The scratch edit previewed over the committed drawing.
    pub fn view(&self) -> LayerView<'_> {
        LayerView::new(vec![&self.committed, &self.scratch])
    }

    pub fn set_scratch(&mut self, layer: Layer) {
        self.scratch = layer;
    }

    pub fn clear_scratch(&mut self) {
        self.scratch.clear();
    }

    /// Apply the scratch layer to the committed drawing and record the change.
    ///
    /// Returns `false` when the scratch layer changed nothing; such commits
    /// are not recorded in the history.
    pub fn commit_scratch(&mut self) -> bool {
        let scratch = std::mem::take(&mut self.scratch);
        let (next, undo) = self.committed.apply(&scratch);
        if undo.is_empty() {
            return false;
        }
        log::debug!("committed {} cells ({} changed)", scratch.len(), undo.len());
        self.committed = next;
        self.history.push(scratch, undo);
        true
    }

    /// Revert the newest committed change.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.take_undo() else {
            return false;
        };
        let (previous, _) = self.committed.apply(&entry.undo);
        self.committed = previous;
        self.history.undone(entry);
        true
    }

    /// Re-apply the newest undone change.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.take_redo() else {
            return false;
        };
        let (next, _) = self.committed.apply(&entry.forward);
        self.committed = next;
        self.history.redone(entry);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The active selection rectangle, if any.
    pub fn selection(&self) -> Option<GridBox> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<GridBox>) {
        self.selection = selection;
    }

    /// Serialize the committed drawing.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        document::serialize(&self.committed)
    }

    /// Load a committed drawing from a persisted document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(Self::with_layer(document::deserialize(json)?, MAX_UNDO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector;
    use crate::layer::GridView;

    fn v(x: i32, y: i32) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn test_scratch_is_previewed_not_committed() {
        let mut canvas = Canvas::new();
        let mut scratch = Layer::new();
        scratch.set(v(1, 1), 'a');
        canvas.set_scratch(scratch);

        assert_eq!(canvas.view().glyph(v(1, 1)), Some('a'));
        assert!(canvas.committed().is_empty());

        canvas.clear_scratch();
        assert_eq!(canvas.view().glyph(v(1, 1)), None);
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_commit_undo_redo() {
        let mut canvas = Canvas::new();
        let mut scratch = Layer::new();
        scratch.set(v(0, 0), '─');
        canvas.set_scratch(scratch);

        assert!(canvas.commit_scratch());
        assert!(canvas.scratch().is_empty());
        assert_eq!(canvas.committed().glyph(v(0, 0)), Some('─'));

        assert!(canvas.undo());
        assert!(canvas.committed().is_empty());
        assert!(canvas.can_redo());

        assert!(canvas.redo());
        assert_eq!(canvas.committed().glyph(v(0, 0)), Some('─'));
        assert!(!canvas.redo());
    }

    #[test]
    fn test_noop_commit_is_not_recorded() {
        let mut canvas = Canvas::new();
        let mut scratch = Layer::new();
        scratch.erase(v(3, 3));
        canvas.set_scratch(scratch);

        assert!(!canvas.commit_scratch());
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_undo_empty_history() {
        let mut canvas = Canvas::new();
        assert!(!canvas.undo());
        assert!(!canvas.redo());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut canvas = Canvas::new();
        let mut scratch = Layer::new();
        scratch.set(v(-2, 5), '┼');
        canvas.set_scratch(scratch);
        canvas.commit_scratch();

        let loaded = Canvas::from_json(&canvas.to_json().unwrap()).unwrap();
        assert_eq!(loaded.committed(), canvas.committed());
        assert_ne!(loaded.id, canvas.id);
    }
}
