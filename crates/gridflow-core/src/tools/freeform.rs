//! Stamping a single glyph along the pointer path.

use crate::canvas::Canvas;
use crate::geometry::Vector;
use crate::input::Key;
use crate::layer::{Cell, Layer};

use super::DrawStyle;

#[derive(Debug, Clone, Default)]
pub struct FreeformTool {
    stroke: Option<Layer>,
}

impl FreeformTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn start(&mut self, canvas: &mut Canvas, style: &DrawStyle, position: Vector) {
        self.stroke = Some(Layer::new());
        self.move_to(canvas, style, position);
    }

    pub fn move_to(&mut self, canvas: &mut Canvas, style: &DrawStyle, position: Vector) {
        let Some(stroke) = &mut self.stroke else {
            return;
        };
        stroke.set(position, Cell::with_colors(style.freeform_glyph, style.fg, style.bg));
        canvas.set_scratch(stroke.clone());
    }

    pub fn end(&mut self, canvas: &mut Canvas) {
        if self.stroke.take().is_some() {
            canvas.commit_scratch();
        }
    }

    pub fn cancel(&mut self, canvas: &mut Canvas) {
        if self.stroke.take().is_some() {
            canvas.clear_scratch();
        }
    }

    /// Typing a printable character makes it the stamped glyph.
    pub fn handle_key(&mut self, style: &mut DrawStyle, key: Key) {
        match key {
            Key::Char(glyph) if !glyph.is_control() => style.freeform_glyph = glyph,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{ColorIndex, GridView};

    fn v(x: i32, y: i32) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn test_stroke_accumulates_then_commits() {
        let mut canvas = Canvas::new();
        let mut tool = FreeformTool::new();
        let style = DrawStyle { fg: ColorIndex::new(3), ..DrawStyle::default() };

        tool.start(&mut canvas, &style, v(0, 0));
        tool.move_to(&mut canvas, &style, v(1, 0));
        tool.move_to(&mut canvas, &style, v(1, 1));
        assert_eq!(canvas.scratch().len(), 3);
        assert!(canvas.committed().is_empty());

        tool.end(&mut canvas);
        assert_eq!(canvas.committed().len(), 3);
        assert_eq!(canvas.committed().get(v(1, 1)), Some(&Cell::with_colors('*', ColorIndex::new(3), None)));
        assert!(canvas.can_undo());
    }

    #[test]
    fn test_char_key_changes_glyph() {
        let mut canvas = Canvas::new();
        let mut tool = FreeformTool::new();
        let mut style = DrawStyle::default();

        tool.handle_key(&mut style, Key::Char('#'));
        tool.handle_key(&mut style, Key::Delete);
        tool.start(&mut canvas, &style, v(2, 2));
        tool.end(&mut canvas);
        assert_eq!(canvas.committed().glyph(v(2, 2)), Some('#'));
    }

    #[test]
    fn test_space_glyph_erases() {
        let mut canvas = Canvas::new();
        let mut style = DrawStyle::default();
        let mut tool = FreeformTool::new();
        tool.start(&mut canvas, &style, v(0, 0));
        tool.end(&mut canvas);

        tool.handle_key(&mut style, Key::Char(' '));
        tool.start(&mut canvas, &style, v(0, 0));
        tool.end(&mut canvas);
        assert!(canvas.committed().is_empty());
    }

    #[test]
    fn test_move_without_start_is_ignored() {
        let mut canvas = Canvas::new();
        let mut tool = FreeformTool::new();
        tool.move_to(&mut canvas, &DrawStyle::default(), v(0, 0));
        tool.end(&mut canvas);
        assert!(canvas.scratch().is_empty());
        assert!(!canvas.can_undo());
    }
}
