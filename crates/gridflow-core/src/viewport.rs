//! Mapping between screen pixels and grid cells.

use crate::geometry::{GridBox, Vector};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Width of one character cell in unzoomed pixels.
pub const CHAR_PIXELS_H: f64 = 9.0;
/// Height of one character cell in unzoomed pixels.
pub const CHAR_PIXELS_V: f64 = 16.0;

/// Pan/zoom state of the view onto the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Size of one cell at zoom 1.
    pub cell_size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.25,
            max_zoom: 4.0,
            cell_size: Size::new(CHAR_PIXELS_H, CHAR_PIXELS_V),
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell_size(cell_size: Size) -> Self {
        Self { cell_size, ..Self::default() }
    }

    /// Grid pixel space to screen space.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen space to grid pixel space.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// The cell under a screen point.
    pub fn screen_to_cell(&self, screen_point: Point) -> Vector {
        let world = self.inverse_transform() * screen_point;
        Vector::new(
            (world.x / self.cell_size.width).floor() as i32,
            (world.y / self.cell_size.height).floor() as i32,
        )
    }

    /// Screen-space rectangle covered by a cell.
    pub fn cell_rect(&self, cell: Vector) -> Rect {
        let origin = Point::new(
            f64::from(cell.x) * self.cell_size.width,
            f64::from(cell.y) * self.cell_size.height,
        );
        let rect = Rect::from_origin_size(origin, self.cell_size);
        self.transform().transform_rect_bbox(rect)
    }

    /// Cells at least partly visible in a viewport of `size` screen pixels.
    pub fn visible_cells(&self, size: Size) -> GridBox {
        let top_left = self.screen_to_cell(Point::ZERO);
        let bottom_right = self.screen_to_cell(Point::new(size.width, size.height));
        GridBox::new(top_left, bottom_right)
    }

    /// Pan the view by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let world = self.inverse_transform() * screen_point;
        self.zoom = new_zoom;
        let moved = self.transform() * world;
        self.offset += screen_point - moved;
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_cell_default() {
        let viewport = Viewport::new();
        assert_eq!(viewport.screen_to_cell(Point::new(0.0, 0.0)), Vector::new(0, 0));
        assert_eq!(viewport.screen_to_cell(Point::new(8.9, 15.9)), Vector::new(0, 0));
        assert_eq!(viewport.screen_to_cell(Point::new(9.0, 16.0)), Vector::new(1, 1));
        assert_eq!(viewport.screen_to_cell(Point::new(-1.0, -1.0)), Vector::new(-1, -1));
    }

    #[test]
    fn test_screen_to_cell_with_pan_and_zoom() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(90.0, 32.0));
        assert_eq!(viewport.screen_to_cell(Point::new(90.0, 32.0)), Vector::new(0, 0));

        viewport.zoom = 2.0;
        assert_eq!(viewport.screen_to_cell(Point::new(90.0 + 18.0, 32.0 + 32.0)), Vector::new(1, 1));
    }

    #[test]
    fn test_cell_rect_roundtrip() {
        let mut viewport = Viewport::new();
        viewport.pan(Vec2::new(5.0, 7.0));
        let cell = Vector::new(3, -2);
        let center = viewport.cell_rect(cell).center();
        assert_eq!(viewport.screen_to_cell(center), cell);
    }

    #[test]
    fn test_zoom_keeps_point_fixed() {
        let mut viewport = Viewport::new();
        let anchor = Point::new(100.0, 100.0);
        let before = viewport.screen_to_cell(anchor);
        viewport.zoom_at(anchor, 2.0);
        assert!((viewport.zoom - 2.0).abs() < f64::EPSILON);
        assert_eq!(viewport.screen_to_cell(anchor), before);
    }
}
