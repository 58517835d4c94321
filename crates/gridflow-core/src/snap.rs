//! Connectivity repair after structural edits.
//!
//! Moving or erasing part of a drawing leaves junctions and corners that no
//! longer match their neighbors. `snap` finds those cells and proposes the
//! glyph that joins exactly the neighbors which still connect.

use crate::characters::{connects, glyph_for_directions, is_line};
use crate::geometry::{Direction, Vector};
use crate::layer::{Cell, GridView, Layer, LayerView};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// The glyph that joins every neighbor of `position` connecting back to it.
///
/// Returns `None` when fewer than two neighbors connect, leaving dangling
/// ends as they are.
pub fn resolve_glyph(view: &impl GridView, position: Vector) -> Option<char> {
    let linked = |d: Direction| connects(view.glyph(position.step(d)), d.opposite());
    glyph_for_directions(
        linked(Direction::Up),
        linked(Direction::Down),
        linked(Direction::Left),
        linked(Direction::Right),
    )
}

/// Corrected glyphs for positions touched by `proposed` once it lands on `committed`.
///
/// Only line-family glyphs are corrected; arrows and text are never rewritten.
pub fn snap(proposed: &Layer, committed: &Layer) -> HashMap<Vector, char> {
    let view = LayerView::new(vec![committed, proposed]);

    let candidates: BTreeSet<Vector> = proposed
        .iter()
        .flat_map(|(p, _)| std::iter::once(p).chain(Direction::ALL.map(|d| p.step(d))))
        .collect();

    let mut corrections = HashMap::new();
    for position in candidates {
        let Some(current) = view.glyph(position).filter(|g| is_line(*g)) else {
            continue;
        };
        match resolve_glyph(&view, position) {
            Some(resolved) if resolved != current => {
                corrections.insert(position, resolved);
            }
            _ => {}
        }
    }

    if !corrections.is_empty() {
        log::debug!("snap corrected {} cells", corrections.len());
    }
    corrections
}

/// Connectivity repair used by structural edits.
pub trait Snapper: fmt::Debug {
    /// Corrected glyphs for positions touched by `proposed` once it lands on `committed`.
    fn snap(&self, proposed: &Layer, committed: &Layer) -> HashMap<Vector, char>;
}

/// Repairs line-family glyphs from their connecting neighbors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSnapper;

impl Snapper for LineSnapper {
    fn snap(&self, proposed: &Layer, committed: &Layer) -> HashMap<Vector, char> {
        snap(proposed, committed)
    }
}

/// Run [`LineSnapper`] over a staged layer and merge its corrections back in.
pub fn apply_snap(staged: &mut Layer, committed: &Layer) {
    apply_snap_with(&LineSnapper, staged, committed);
}

/// Run `snapper` over a staged layer and merge its corrections back in.
///
/// A corrected position that is already staged keeps its colors; otherwise
/// the bare glyph is staged.
pub fn apply_snap_with(snapper: &dyn Snapper, staged: &mut Layer, committed: &Layer) {
    for (position, glyph) in snapper.snap(staged, committed) {
        match staged.get(position).copied() {
            Some(existing) if existing.glyph != glyph => staged.set(position, existing.with_glyph(glyph)),
            Some(_) => {}
            None => staged.set(position, Cell::new(glyph)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::ColorIndex;
    use crate::text::text_to_layer;

    fn v(x: i32, y: i32) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn test_erasing_branch_downgrades_junction() {
        // ─┬─
        //  │
        let committed = text_to_layer("─┬─\n │", v(0, 0));
        let mut proposed = Layer::new();
        proposed.erase(v(1, 1));

        let corrections = snap(&proposed, &committed);
        assert_eq!(corrections.get(&v(1, 0)), Some(&'─'));
        assert_eq!(corrections.len(), 1);
    }

    #[test]
    fn test_abutting_line_upgrades_to_junction() {
        // │
        // │─   (the new segment is placed right of the vertical line)
        // │
        let committed = text_to_layer("│\n│\n│", v(0, 0));
        let mut proposed = Layer::new();
        proposed.set(v(1, 1), '─');

        let corrections = snap(&proposed, &committed);
        assert_eq!(corrections.get(&v(0, 1)), Some(&'├'));
    }

    #[test]
    fn test_consistent_drawing_needs_no_corrections() {
        let committed = text_to_layer("┌─┐\n└─┘", v(0, 0));
        let mut proposed = Layer::new();
        proposed.set(v(1, 0), '─');
        assert!(snap(&proposed, &committed).is_empty());
    }

    #[test]
    fn test_dangling_end_is_left_alone() {
        let committed = text_to_layer("──", v(0, 0));
        let mut proposed = Layer::new();
        proposed.erase(v(0, 0));
        assert!(snap(&proposed, &committed).is_empty());
    }

    #[test]
    fn test_apply_snap_preserves_staged_colors() {
        let committed = text_to_layer("─┬─\n │", v(0, 0));
        let mut staged = Layer::new();
        staged.erase(v(1, 1));
        staged.set(v(1, 0), Cell::with_colors('┬', ColorIndex::new(4), None));

        apply_snap(&mut staged, &committed);
        let cell = staged.get(v(1, 0)).copied();
        assert_eq!(cell.map(|c| c.glyph), Some('─'));
        assert_eq!(cell.and_then(|c| c.fg), ColorIndex::new(4));
    }

    /// Proposes the same glyph for every touched position.
    #[derive(Debug)]
    struct Fill(char);

    impl Snapper for Fill {
        fn snap(&self, proposed: &Layer, _committed: &Layer) -> HashMap<Vector, char> {
            proposed.iter().map(|(p, _)| (p, self.0)).collect()
        }
    }

    #[test]
    fn test_apply_snap_with_custom_snapper() {
        let committed = text_to_layer("ab", v(0, 0));
        let mut staged = Layer::new();
        staged.set(v(0, 0), Cell::with_colors('x', ColorIndex::new(2), None));
        staged.set(v(1, 0), Cell::with_colors('#', None, ColorIndex::new(9)));

        apply_snap_with(&Fill('#'), &mut staged, &committed);
        assert_eq!(staged.get(v(0, 0)), Some(&Cell::with_colors('#', ColorIndex::new(2), None)));
        assert_eq!(staged.get(v(1, 0)), Some(&Cell::with_colors('#', None, ColorIndex::new(9))));
    }
}
