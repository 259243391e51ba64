//! Filled canvas shapes.
//!
//! The canvas only ships outlines, so these fill by drawing horizontal
//! scanlines `step` apart. Coordinates are canvas coordinates (y up).

use ratatui::{
    style::Color,
    widgets::canvas::{Line, Painter, Shape},
};

fn scanlines(bottom: f64, top: f64, step: f64) -> impl Iterator<Item = f64> {
    let step = step.max(0.05);
    let count = ((top - bottom) / step).floor().max(0.0) as usize;
    (0..=count).map(move |i| bottom + i as f64 * step).chain(
        // Always include the top edge so thin shapes stay visible.
        std::iter::once(top).filter(move |&top| top > bottom + count as f64 * step),
    )
}

fn span(painter: &mut Painter, x1: f64, x2: f64, y: f64, color: Color) {
    Line::new(x1, y, x2, y, color).draw(painter);
}

/// Solid axis-aligned rectangle; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy)]
pub struct FilledRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub step: f64,
    pub color: Color,
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        for y in scanlines(self.y, self.y + self.height, self.step) {
            span(painter, self.x, self.x + self.width, y, self.color);
        }
    }
}

/// Solid ellipse inscribed in its bounding box; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy)]
pub struct FilledEllipse {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub step: f64,
    pub color: Color,
}

impl Shape for FilledEllipse {
    fn draw(&self, painter: &mut Painter) {
        let rx = self.width / 2.0;
        let ry = self.height / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let cx = self.x + rx;
        let cy = self.y + ry;
        for y in scanlines(self.y, self.y + self.height, self.step) {
            let dy = (y - cy) / ry;
            let half = rx * (1.0 - dy * dy).max(0.0).sqrt();
            span(painter, cx - half, cx + half, y, self.color);
        }
    }
}

/// Solid triangle with its apex at the top centre and its base along the
/// bottom edge of the box; `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy)]
pub struct FilledTriangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub step: f64,
    pub color: Color,
}

impl Shape for FilledTriangle {
    fn draw(&self, painter: &mut Painter) {
        if self.height <= 0.0 {
            return;
        }
        let cx = self.x + self.width / 2.0;
        for y in scanlines(self.y, self.y + self.height, self.step) {
            let from_apex = (self.y + self.height - y) / self.height;
            let half = self.width / 2.0 * from_apex;
            span(painter, cx - half, cx + half, y, self.color);
        }
    }
}

/// Vertical bar of the given width hanging between two heights, used for
/// raindrops, rods and crank teeth.
#[derive(Debug, Clone, Copy)]
pub struct VerticalBar {
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
    pub width: f64,
    pub step: f64,
    pub color: Color,
}

impl Shape for VerticalBar {
    fn draw(&self, painter: &mut Painter) {
        let count = (self.width / self.step.max(0.05)).ceil().max(1.0) as usize;
        for i in 0..count {
            let x = self.x + (i as f64 * self.step).min(self.width);
            Line::new(x, self.y1, x, self.y2, self.color).draw(painter);
        }
    }
}
