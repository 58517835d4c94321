//! Sparse cell layers and their reversible composition.

use crate::geometry::Vector;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of addressable terminal colors.
pub const COLOR_COUNT: u8 = 16;

/// An ANSI color index in `0..16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorIndex(u8);

impl ColorIndex {
    /// Normalize an arbitrary integer; anything outside `0..16` means "no color".
    pub fn new(index: i64) -> Option<Self> {
        (0..i64::from(COLOR_COUNT))
            .contains(&index)
            .then(|| Self(index as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// A single grid cell.
///
/// A cell whose glyph is a space is an erase marker: composing it onto
/// another layer removes the entry there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: char,
    pub fg: Option<ColorIndex>,
    pub bg: Option<ColorIndex>,
}

impl Cell {
    pub const ERASE_GLYPH: char = ' ';

    pub fn new(glyph: char) -> Self {
        Self { glyph, fg: None, bg: None }
    }

    pub fn with_colors(glyph: char, fg: Option<ColorIndex>, bg: Option<ColorIndex>) -> Self {
        Self { glyph, fg, bg }
    }

    /// The erase marker.
    pub fn erase() -> Self {
        Self::new(Self::ERASE_GLYPH)
    }

    pub fn is_erase(&self) -> bool {
        self.glyph == Self::ERASE_GLYPH || self.glyph == '\0'
    }

    pub fn has_color(&self) -> bool {
        self.fg.is_some() || self.bg.is_some()
    }

    /// Same colors, different glyph.
    pub fn with_glyph(self, glyph: char) -> Self {
        Self { glyph, ..self }
    }
}

impl From<char> for Cell {
    fn from(glyph: char) -> Self {
        Cell::new(glyph)
    }
}

/// Read access to a grid of cells.
pub trait GridView {
    /// The effective cell at a position.
    fn cell(&self, position: Vector) -> Option<Cell>;

    /// Every position that may hold a cell.
    fn positions(&self) -> Vec<Vector>;

    /// The glyph at a position.
    fn glyph(&self, position: Vector) -> Option<char> {
        self.cell(position).map(|cell| cell.glyph)
    }

    /// Every `(position, cell)` pair that resolves to a cell.
    fn cells(&self) -> Vec<(Vector, Cell)> {
        self.positions()
            .into_iter()
            .filter_map(|p| self.cell(p).map(|c| (p, c)))
            .collect()
    }
}

/// A sparse mapping of positions to cells.
///
/// The same type serves as a full drawing or as a delta to be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layer {
    cells: HashMap<Vector, Cell>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cell, erase markers included.
    pub fn set(&mut self, position: Vector, cell: impl Into<Cell>) {
        self.cells.insert(position, cell.into());
    }

    /// Stage an erase marker at `position`.
    pub fn erase(&mut self, position: Vector) {
        self.cells.insert(position, Cell::erase());
    }

    /// The raw stored cell, erase markers included.
    pub fn get(&self, position: Vector) -> Option<&Cell> {
        self.cells.get(&position)
    }

    pub fn delete(&mut self, position: Vector) -> Option<Cell> {
        self.cells.remove(&position)
    }

    pub fn has(&self, position: Vector) -> bool {
        self.cells.contains_key(&position)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = Vector> + '_ {
        self.cells.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vector, Cell)> + '_ {
        self.cells.iter().map(|(p, c)| (*p, *c))
    }

    /// Copy every resolved cell of `view` into this layer.
    pub fn set_from(&mut self, view: &impl GridView) {
        for (position, cell) in view.cells() {
            self.set(position, cell);
        }
    }

    /// Compose `other` on top of this layer.
    ///
    /// Returns the composed layer and an undo layer which, applied to the
    /// composed layer, restores this one exactly. Only positions whose cell
    /// actually changed are recorded in the undo layer.
    pub fn apply(&self, other: &Layer) -> (Layer, Layer) {
        let mut next = self.clone();
        let mut undo = Layer::new();

        for (&position, &new_cell) in &other.cells {
            let old_cell = self.cells.get(&position).copied();
            if new_cell.is_erase() {
                next.cells.remove(&position);
            } else {
                next.cells.insert(position, new_cell);
            }

            let changed = match old_cell {
                Some(old) => new_cell.is_erase() || old != new_cell,
                None => !new_cell.is_erase(),
            };
            if changed {
                undo.cells.insert(position, old_cell.unwrap_or_else(Cell::erase));
            }
        }

        (next, undo)
    }
}

impl GridView for Layer {
    fn cell(&self, position: Vector) -> Option<Cell> {
        self.cells.get(&position).copied()
    }

    fn positions(&self) -> Vec<Vector> {
        self.cells.keys().copied().collect()
    }
}

impl FromIterator<(Vector, Cell)> for Layer {
    fn from_iter<I: IntoIterator<Item = (Vector, Cell)>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

/// A read-only stack of layers where the highest layer wins.
///
/// An erase marker in an upper layer hides whatever lies beneath it.
#[derive(Debug, Clone)]
pub struct LayerView<'a> {
    layers: Vec<&'a Layer>,
}

impl<'a> LayerView<'a> {
    /// Layers are ordered bottom to top.
    pub fn new(layers: Vec<&'a Layer>) -> Self {
        Self { layers }
    }
}

impl GridView for LayerView<'_> {
    fn cell(&self, position: Vector) -> Option<Cell> {
        let cell = self.layers.iter().rev().find_map(|layer| layer.get(position))?;
        (!cell.is_erase()).then_some(*cell)
    }

    fn positions(&self) -> Vec<Vector> {
        let mut seen = HashSet::new();
        self.layers
            .iter()
            .flat_map(|layer| layer.cells.keys().copied())
            .filter(|p| seen.insert(*p))
            .collect()
    }
}
