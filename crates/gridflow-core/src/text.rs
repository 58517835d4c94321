//! Plain-text rendering of layers and parsing of text back into layers.

use crate::geometry::{GridBox, Vector};
use crate::layer::{Cell, GridView, Layer};
use thiserror::Error;

/// Text placed at an anchor would reach past the edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("text anchored at {anchor} extends past the grid edge")]
pub struct OutOfGrid {
    pub anchor: Vector,
}

/// Render the cells of `view` inside `bounds` as rows of text.
///
/// Without `bounds` the bounding box of every resolved cell is used. Empty
/// cells become spaces and trailing spaces are trimmed from each row.
pub fn layer_to_text(view: &impl GridView, bounds: Option<GridBox>) -> String {
    let Some(bounds) = bounds.or_else(|| GridBox::bounding(view.cells().into_iter().map(|(p, _)| p)))
    else {
        return String::new();
    };

    let top_left = bounds.top_left();
    let bottom_right = bounds.bottom_right();
    let height = usize::try_from(bottom_right.y.abs_diff(top_left.y))
        .map_or(usize::MAX, |h| h.saturating_add(1));
    let mut rows = Vec::with_capacity(height);
    for y in top_left.y..=bottom_right.y {
        let row: String = (top_left.x..=bottom_right.x)
            .map(|x| match view.cell(Vector::new(x, y)) {
                Some(cell) if !cell.is_erase() && !cell.glyph.is_control() => cell.glyph,
                _ => ' ',
            })
            .collect();
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n")
}

/// Parse text into a layer whose first character sits at `anchor`.
///
/// Spaces are skipped, so the result only holds drawn glyphs. Glyphs that
/// would land past the edge of the grid are dropped.
pub fn text_to_layer(text: &str, anchor: Vector) -> Layer {
    let mut layer = Layer::new();
    for (offset, glyph) in glyphs(text) {
        match offset.and_then(|offset| anchor.checked_add(offset)) {
            Some(position) => layer.set(position, glyph),
            None => log::warn!("dropping {glyph:?} past the grid edge from {anchor}"),
        }
    }
    layer
}

/// Parse text like [`text_to_layer`], failing if any glyph would land past
/// the edge of the grid.
pub fn try_text_to_layer(text: &str, anchor: Vector) -> Result<Layer, OutOfGrid> {
    let mut layer = Layer::new();
    for (offset, glyph) in glyphs(text) {
        let position = offset
            .and_then(|offset| anchor.checked_add(offset))
            .ok_or(OutOfGrid { anchor })?;
        layer.set(position, glyph);
    }
    Ok(layer)
}

/// Drawn glyphs with their offset from the first character.
fn glyphs(text: &str) -> impl Iterator<Item = (Option<Vector>, char)> + '_ {
    text.split('\n').enumerate().flat_map(|(dy, line)| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.chars()
            .enumerate()
            .filter(|(_, glyph)| *glyph != Cell::ERASE_GLYPH && !glyph.is_control())
            .map(move |(dx, glyph)| {
                let offset = i32::try_from(dx)
                    .ok()
                    .zip(i32::try_from(dy).ok())
                    .map(|(dx, dy)| Vector::new(dx, dy));
                (offset, glyph)
            })
    })
}
