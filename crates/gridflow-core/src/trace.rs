//! Discovery of a straight line run and the connectors attached to it.

use crate::characters::{connects, is_arrow, line_orientation, straight_line};
use crate::geometry::{Direction, Orientation, Vector};
use crate::layer::GridView;
use thiserror::Error;

/// The start position of a trace does not hold a straight-line glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a straight line at {position}, found {found:?}")]
pub struct NotALine {
    pub position: Vector,
    pub found: Option<char>,
}

/// A perpendicular connector touching a traced line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentTrace {
    /// First cell of the connector next to the line.
    pub source: Vector,
    /// Furthest cell reached while the connector continues straight.
    pub end: Vector,
    /// Glyph at `source` when traced.
    pub source_value: Option<char>,
    /// Direction the connector leads away from the line.
    pub direction: Direction,
}

/// A contiguous straight run plus everything attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTrace {
    pub orientation: Orientation,
    /// Every cell that moves with the line; the start position comes first.
    pub positions: Vec<Vector>,
    pub attachments: Vec<AttachmentTrace>,
}

impl LineTrace {
    /// The position the line was traced from.
    pub fn anchor(&self) -> Vector {
        self.positions[0]
    }

    /// Attachments leading away in `direction`.
    pub fn attachments_towards(&self, direction: Direction) -> impl Iterator<Item = &AttachmentTrace> {
        self.attachments.iter().filter(move |a| a.direction == direction)
    }
}

/// Trace the straight line through `start`.
///
/// The run extends while each cell and its neighbor connect to one another,
/// so junctions inside the run are included. Perpendicular connectors are
/// collected either directly adjacent to the run or behind an arrow head
/// touching it; such an arrow joins the run's positions.
pub fn trace_line(view: &impl GridView, start: Vector) -> Result<LineTrace, NotALine> {
    let found = view.glyph(start);
    let orientation = found
        .and_then(line_orientation)
        .ok_or(NotALine { position: start, found })?;

    let mut positions = vec![start];
    for direction in orientation.directions() {
        let mut current = start;
        loop {
            let next = current.step(direction);
            if !connects(view.glyph(current), direction)
                || !connects(view.glyph(next), direction.opposite())
            {
                break;
            }
            current = next;
            positions.push(current);
        }
    }

    // Arrow heads pushed below are visited too, so a connector behind an
    // arrow may be recorded twice with the same source. Each arrow is pushed
    // at most once, which bounds the walk.
    let mut attachments = Vec::new();
    let mut index = 0;
    while index < positions.len() {
        let current = positions[index];
        index += 1;
        for direction in orientation.perpendicular() {
            let adjacent = current.step(direction);
            if connects(view.glyph(current), direction)
                && connects(view.glyph(adjacent), direction.opposite())
            {
                attachments.push(trace_attachment(view, adjacent, direction));
            }

            let beyond = current + direction.scale(2);
            if view.glyph(adjacent).is_some_and(is_arrow)
                && connects(view.glyph(beyond), direction.opposite())
            {
                if !positions.contains(&adjacent) {
                    positions.push(adjacent);
                }
                attachments.push(trace_attachment(view, beyond, direction));
            }
        }
    }

    log::debug!(
        "traced {:?} line at {start}: {} cells, {} attachments",
        orientation,
        positions.len(),
        attachments.len()
    );
    Ok(LineTrace { orientation, positions, attachments })
}

fn trace_attachment(view: &impl GridView, source: Vector, direction: Direction) -> AttachmentTrace {
    let straight = straight_line(direction.orientation());
    let mut end = source;
    while view.glyph(end.step(direction)) == Some(straight) {
        end = end.step(direction);
    }
    AttachmentTrace {
        source,
        end,
        source_value: view.glyph(source),
        direction,
    }
}
