//! Dragging a straight line perpendicular to itself.
//!
//! The whole traced run shifts by the drag distance. Connectors leading in
//! the drag direction shrink, connectors leading away from it stretch, and the
//! drag is clamped so no connector shrinks past its far end.

use crate::canvas::Canvas;
use crate::characters::{is_special, straight_line};
use crate::geometry::{Direction, Orientation, Vector};
use crate::layer::{Cell, GridView, Layer};
use crate::trace::{LineTrace, trace_line};

use super::Cursor;

/// How far a traced line may travel along each axis.
///
/// `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveBounds {
    pub min_x: Option<i32>,
    pub max_x: Option<i32>,
    pub min_y: Option<i32>,
    pub max_y: Option<i32>,
}

impl MoveBounds {
    /// Bounds imposed by the far ends of a trace's connectors.
    pub fn of(trace: &LineTrace) -> Self {
        Self {
            min_x: attachment_ends(trace, Direction::Left).map(|end| end.x).max(),
            max_x: attachment_ends(trace, Direction::Right).map(|end| end.x).min(),
            min_y: attachment_ends(trace, Direction::Up).map(|end| end.y).max(),
            max_y: attachment_ends(trace, Direction::Down).map(|end| end.y).min(),
        }
    }

    /// Pull `position` inside the bounds.
    ///
    /// When a lower bound exceeds an upper bound the upper bound wins.
    pub fn clamp(&self, position: Vector) -> Vector {
        let clamp_axis = |value: i32, lo: Option<i32>, hi: Option<i32>| {
            let value = lo.map_or(value, |lo| value.max(lo));
            hi.map_or(value, |hi| value.min(hi))
        };
        Vector::new(
            clamp_axis(position.x, self.min_x, self.max_x),
            clamp_axis(position.y, self.min_y, self.max_y),
        )
    }
}

fn attachment_ends(trace: &LineTrace, direction: Direction) -> impl Iterator<Item = Vector> + '_ {
    trace.attachments_towards(direction).map(|a| a.end)
}

/// Stage the result of dragging `trace` towards `target`.
///
/// Returns a layer to overlay on `committed`; `committed` itself is untouched.
pub fn plan_move(committed: &Layer, trace: &LineTrace, target: Vector) -> Layer {
    let anchor = trace.anchor();
    let effective = MoveBounds::of(trace).clamp(target);

    let (direction, units) = match trace.orientation {
        Orientation::Vertical => {
            let d = if effective.x < anchor.x { Direction::Left } else { Direction::Right };
            (d, (effective.x - anchor.x).abs())
        }
        Orientation::Horizontal => {
            let d = if effective.y < anchor.y { Direction::Up } else { Direction::Down };
            (d, (effective.y - anchor.y).abs())
        }
    };

    let mut staged = Layer::new();

    // Connectors the line moves into get consumed.
    for attachment in trace.attachments_towards(direction) {
        for i in 0..units {
            staged.erase(attachment.source + direction.scale(i));
        }
    }

    for &position in &trace.positions {
        staged.erase(position);
    }
    let shift = direction.scale(units);
    for &position in &trace.positions {
        if let Some(cell) = committed.get(position) {
            staged.set(position + shift, *cell);
        }
    }

    // Connectors the line moves away from get stretched back to it.
    for attachment in trace.attachments_towards(direction.opposite()) {
        let glyph = straight_line(attachment.direction.orientation());
        let cell = committed
            .cell(attachment.source)
            .map_or(Cell::new(glyph), |source| source.with_glyph(glyph));
        for i in 1..=units {
            staged.set(attachment.source + attachment.direction.scale(-i), cell);
        }
    }

    staged
}

/// Gesture that drags a straight line.
#[derive(Debug, Clone, Default)]
pub struct MoveTool {
    trace: Option<LineTrace>,
}

impl MoveTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace the line under `position`.
    ///
    /// Starting anywhere other than a straight line leaves the tool inert
    /// until the gesture ends.
    pub fn start(&mut self, canvas: &mut Canvas, position: Vector) {
        match trace_line(canvas.committed(), position) {
            Ok(trace) => {
                log::debug!(
                    "moving {:?} line of {} cells with {} attachments",
                    trace.orientation,
                    trace.positions.len(),
                    trace.attachments.len()
                );
                self.trace = Some(trace);
                self.move_to(canvas, position);
            }
            Err(e) => {
                log::debug!("move ignored: {}", e);
                self.trace = None;
            }
        }
    }

    pub fn move_to(&mut self, canvas: &mut Canvas, position: Vector) {
        if let Some(trace) = &self.trace {
            let staged = plan_move(canvas.committed(), trace, position);
            canvas.set_scratch(staged);
        }
    }

    pub fn end(&mut self, canvas: &mut Canvas) {
        if self.trace.take().is_some() {
            canvas.commit_scratch();
        }
    }

    /// Drop the gesture without committing.
    pub fn cancel(&mut self, canvas: &mut Canvas) {
        if self.trace.take().is_some() {
            canvas.clear_scratch();
        }
    }

    pub fn is_active(&self) -> bool {
        self.trace.is_some()
    }

    /// Resize cursor over straight lines, move cursor over other connecting glyphs.
    pub fn cursor(canvas: &Canvas, position: Vector) -> Cursor {
        match canvas.committed().glyph(position) {
            Some('│') => Cursor::ColumnResize,
            Some('─') => Cursor::RowResize,
            Some(glyph) if is_special(glyph) => Cursor::Move,
            _ => Cursor::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{ColorIndex, LayerView};
    use crate::text::{layer_to_text, text_to_layer};

    fn v(x: i32, y: i32) -> Vector {
        Vector::new(x, y)
    }

    fn moved(committed: &Layer, staged: &Layer) -> String {
        layer_to_text(&LayerView::new(vec![committed, staged]), None)
    }

    /// A horizontal line with a connector hanging from its right end.
    fn hook() -> Layer {
        text_to_layer("───┐\n   │\n   │\n   │\n   │\n   │", v(0, 0))
    }

    #[test]
    fn test_bounds_from_attachments() {
        let committed = hook();
        let trace = trace_line(&committed, v(1, 0)).unwrap();
        let bounds = MoveBounds::of(&trace);
        assert_eq!(bounds.max_y, Some(5));
        assert_eq!(bounds.min_y, None);
        assert_eq!(bounds.min_x, None);
        assert_eq!(bounds.max_x, None);
    }

    #[test]
    fn test_clamp_upper_bound_wins() {
        let bounds = MoveBounds { min_x: Some(10), max_x: Some(4), ..MoveBounds::default() };
        assert_eq!(bounds.clamp(v(0, 7)), v(4, 7));
        assert_eq!(bounds.clamp(v(20, 7)), v(4, 7));
    }

    #[test]
    fn test_move_clamped_to_attachment_end() {
        let committed = hook();
        let trace = trace_line(&committed, v(1, 0)).unwrap();

        let clamped = plan_move(&committed, &trace, v(1, 10));
        let exact = plan_move(&committed, &trace, v(1, 5));
        assert_eq!(clamped, exact);

        let text = moved(&committed, &clamped);
        assert_eq!(text, "───┐");
        let view = LayerView::new(vec![&committed, &clamped]);
        assert_eq!(view.glyph(v(3, 5)), Some('┐'));
        assert_eq!(view.glyph(v(0, 5)), Some('─'));
        assert_eq!(view.glyph(v(3, 1)), None);
        assert_eq!(view.glyph(v(0, 0)), None);
    }

    #[test]
    fn test_move_shrinks_attachment() {
        let committed = hook();
        let trace = trace_line(&committed, v(0, 0)).unwrap();
        let staged = plan_move(&committed, &trace, v(0, 2));
        assert_eq!(moved(&committed, &staged), "───┐\n   │\n   │\n   │");
    }

    #[test]
    fn test_move_stretches_attachment() {
        let committed = text_to_layer("───┐\n   │\n   │", v(0, 2));
        let trace = trace_line(&committed, v(0, 2)).unwrap();
        let staged = plan_move(&committed, &trace, v(0, 0));
        assert_eq!(moved(&committed, &staged), "───┐\n   │\n   │\n   │\n   │");
    }

    #[test]
    fn test_stretched_connector_takes_source_color() {
        let line = Some(ColorIndex::new(5).unwrap());
        let connector = Some(ColorIndex::new(2).unwrap());
        let mut committed = Layer::new();
        for x in 0..3 {
            committed.set(v(x, 2), Cell::with_colors('─', line, None));
        }
        committed.set(v(3, 2), Cell::with_colors('┐', line, None));
        committed.set(v(3, 3), Cell::with_colors('│', connector, None));
        committed.set(v(3, 4), Cell::with_colors('│', connector, None));

        let trace = trace_line(&committed, v(0, 2)).unwrap();
        let staged = plan_move(&committed, &trace, v(0, 0));

        assert_eq!(staged.get(v(3, 0)), Some(&Cell::with_colors('┐', line, None)));
        assert_eq!(staged.get(v(0, 0)), Some(&Cell::with_colors('─', line, None)));
        assert_eq!(staged.get(v(3, 1)), Some(&Cell::with_colors('│', connector, None)));
        assert_eq!(staged.get(v(3, 2)), Some(&Cell::with_colors('│', connector, None)));
    }

    /// A horizontal line with an arrow head pointing up at it from a connector.
    fn arrowed() -> Layer {
        text_to_layer("─────\n  ▲\n  │\n  │", v(0, 0))
    }

    #[test]
    fn test_arrow_moves_toward_connector() {
        let committed = arrowed();
        let trace = trace_line(&committed, v(0, 0)).unwrap();
        assert_eq!(trace.attachments.len(), 2);

        for units in 1..=2 {
            let staged = plan_move(&committed, &trace, v(0, units));
            let view = LayerView::new(vec![&committed, &staged]);
            assert_eq!(view.glyph(v(0, units)), Some('─'));
            assert_eq!(view.glyph(v(2, units)), Some('─'));
            assert_eq!(view.glyph(v(2, 1 + units)), Some('▲'));
            assert_eq!(view.glyph(v(0, 0)), None);
            let connector = (2 + units..4).filter(|y| view.glyph(v(2, *y)) == Some('│')).count();
            assert_eq!(connector as i32, 2 - units);
        }

        let staged = plan_move(&committed, &trace, v(0, 1));
        assert_eq!(moved(&committed, &staged), "─────\n  ▲\n  │");
    }

    #[test]
    fn test_arrow_moves_away_from_connector() {
        let committed = arrowed();
        let trace = trace_line(&committed, v(0, 0)).unwrap();
        let staged = plan_move(&committed, &trace, v(0, -1));

        let view = LayerView::new(vec![&committed, &staged]);
        assert_eq!(view.glyph(v(0, -1)), Some('─'));
        assert_eq!(view.glyph(v(2, 0)), Some('▲'));
        assert_eq!(moved(&committed, &staged), "─────\n  ▲\n  │\n  │\n  │");
    }

    #[test]
    fn test_duplicate_arrow_attachments_match_single() {
        let committed = arrowed();
        let trace = trace_line(&committed, v(0, 0)).unwrap();
        let mut single = trace.clone();
        single.attachments.dedup();
        assert_eq!(single.attachments.len(), 1);

        for target in [v(0, 1), v(0, 2), v(0, -2)] {
            assert_eq!(plan_move(&committed, &trace, target), plan_move(&committed, &single, target));
        }
    }

    #[test]
    fn test_vertical_line_moves_sideways() {
        let committed = text_to_layer("│\n│\n│", v(2, 0));
        let trace = trace_line(&committed, v(2, 1)).unwrap();
        let staged = plan_move(&committed, &trace, v(0, 9));
        let view = LayerView::new(vec![&committed, &staged]);
        for y in 0..3 {
            assert_eq!(view.glyph(v(0, y)), Some('│'));
            assert_eq!(view.glyph(v(2, y)), None);
        }
    }

    #[test]
    fn test_tool_commits_on_end() {
        let mut canvas = Canvas::with_layer(hook(), 10);
        let mut tool = MoveTool::new();
        tool.start(&mut canvas, v(1, 0));
        assert!(tool.is_active());
        tool.move_to(&mut canvas, v(1, 2));
        assert!(canvas.committed().has(v(0, 0)));

        tool.end(&mut canvas);
        assert!(!tool.is_active());
        assert_eq!(canvas.committed().glyph(v(0, 2)), Some('─'));
        assert_eq!(canvas.committed().glyph(v(0, 0)), None);
        assert!(canvas.can_undo());
    }

    #[test]
    fn test_start_off_line_is_inert() {
        let mut canvas = Canvas::with_layer(text_to_layer("abc", v(0, 0)), 10);
        let mut tool = MoveTool::new();
        tool.start(&mut canvas, v(1, 0));
        tool.move_to(&mut canvas, v(1, 4));
        tool.end(&mut canvas);

        assert!(canvas.scratch().is_empty());
        assert!(!canvas.can_undo());
        assert_eq!(canvas.committed().glyph(v(1, 0)), Some('b'));
    }

    #[test]
    fn test_zero_move_records_nothing() {
        let mut canvas = Canvas::with_layer(hook(), 10);
        let mut tool = MoveTool::new();
        tool.start(&mut canvas, v(1, 0));
        tool.end(&mut canvas);
        assert!(!canvas.can_undo());
    }
}
