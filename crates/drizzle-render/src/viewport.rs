//! Mapping between terminal cells and world coordinates.

use drizzle_config::MarkerStyle;
use drizzle_core::Point;
use ratatui::{layout::Rect, symbols::Marker};

/// Canvas marker for a configured style.
pub fn marker_for(style: MarkerStyle) -> Marker {
    match style {
        MarkerStyle::HalfBlock => Marker::HalfBlock,
        MarkerStyle::Braille => Marker::Braille,
        MarkerStyle::Block => Marker::Block,
    }
}

/// Vertical canvas dots per terminal row for a marker.
fn dots_per_row(style: MarkerStyle) -> f64 {
    match style {
        MarkerStyle::HalfBlock => 2.0,
        MarkerStyle::Braille => 4.0,
        MarkerStyle::Block => 1.0,
    }
}

/// A world of `world_width` x `world_height` units stretched over `area`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    world_width: f64,
    world_height: f64,
}

impl Viewport {
    pub fn new(area: Rect, world_width: f64, world_height: f64) -> Self {
        Self {
            area,
            world_width,
            world_height,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.world_width]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, self.world_height]
    }

    /// Canvas y (up) for a world y (down).
    pub fn flip_y(&self, y: f64) -> f64 {
        self.world_height - y
    }

    /// Scanline spacing fine enough to leave no gaps between canvas dots.
    pub fn fill_step(&self, style: MarkerStyle) -> f64 {
        let rows = f64::from(self.area.height.max(1)) * dots_per_row(style);
        (self.world_height / rows / 2.0).max(0.25)
    }

    /// World point at the centre of a cell, or `None` outside the area.
    pub fn to_world(&self, column: u16, row: u16) -> Option<Point> {
        let inside = column >= self.area.x
            && column < self.area.right()
            && row >= self.area.y
            && row < self.area.bottom();
        inside.then(|| self.to_world_clamped(column, row))
    }

    /// World point for a cell, pulling cells outside the area to its edge.
    pub fn to_world_clamped(&self, column: u16, row: u16) -> Point {
        let width = f64::from(self.area.width.max(1));
        let height = f64::from(self.area.height.max(1));
        let col = f64::from(column.saturating_sub(self.area.x)).min(width - 1.0);
        let row = f64::from(row.saturating_sub(self.area.y)).min(height - 1.0);
        Point::new(
            (col + 0.5) * self.world_width / width,
            (row + 0.5) * self.world_height / height,
        )
    }

    /// Cell containing a world point.
    pub fn to_cell(&self, point: Point) -> (u16, u16) {
        let width = f64::from(self.area.width.max(1));
        let height = f64::from(self.area.height.max(1));
        let col = (point.x * width / self.world_width).floor().clamp(0.0, width - 1.0);
        let row = (point.y * height / self.world_height).floor().clamp(0.0, height - 1.0);
        (self.area.x + col as u16, self.area.y + row as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(Rect::new(0, 1, 100, 40), 1000.0, 800.0)
    }

    #[test]
    fn test_to_world_maps_cell_centres() {
        let v = viewport();
        assert_eq!(v.to_world(0, 1), Some(Point::new(5.0, 10.0)));
        assert_eq!(v.to_world(99, 40), Some(Point::new(995.0, 790.0)));
        assert_eq!(v.to_world(50, 21), Some(Point::new(505.0, 410.0)));
    }

    #[test]
    fn test_to_world_outside_area() {
        let v = viewport();
        assert_eq!(v.to_world(100, 5), None);
        assert_eq!(v.to_world(10, 0), None);
        assert_eq!(v.to_world(10, 41), None);
    }

    #[test]
    fn test_to_world_clamped_pulls_to_edge() {
        let v = viewport();
        assert_eq!(v.to_world_clamped(150, 0), Point::new(995.0, 10.0));
    }

    #[test]
    fn test_to_cell_inverts_to_world() {
        let v = viewport();
        for (col, row) in [(0, 1), (37, 12), (99, 40)] {
            let point = v.to_world(col, row).unwrap_or_default();
            assert_eq!(v.to_cell(point), (col, row));
        }
    }

    #[test]
    fn test_flip_and_fill_step() {
        let v = viewport();
        assert_eq!(v.flip_y(0.0), 800.0);
        assert_eq!(v.flip_y(800.0), 0.0);
        assert_eq!(v.fill_step(MarkerStyle::HalfBlock), 5.0);
        assert_eq!(v.fill_step(MarkerStyle::Braille), 2.5);
    }
}
