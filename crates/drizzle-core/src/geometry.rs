//! World-space geometry (y grows downward).

/// A point in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in world units, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Check whether a point lies inside, edges included.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Same size, new top-left corner.
    pub fn moved_to(&self, top_left: Point) -> Self {
        Self::new(top_left.x, top_left.y, self.width, self.height)
    }

    /// Shift the rectangle so that it lies fully within `outer`.
    ///
    /// A rectangle larger than `outer` is pinned to its top-left corner.
    pub fn clamped_within(&self, outer: &Bounds) -> Self {
        let max_x = (outer.right() - self.width).max(outer.left());
        let max_y = (outer.bottom() - self.height).max(outer.top());
        Self::new(
            self.x.clamp(outer.left(), max_x),
            self.y.clamp(outer.top(), max_y),
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_includes_edges() {
        let b = Bounds::new(10.0, 20.0, 100.0, 30.0);
        assert!(b.contains(Point::new(10.0, 20.0)));
        assert!(b.contains(Point::new(110.0, 50.0)));
        assert!(b.contains(Point::new(60.0, 35.0)));
        assert!(!b.contains(Point::new(9.9, 35.0)));
        assert!(!b.contains(Point::new(60.0, 50.1)));
    }

    #[test]
    fn test_clamped_within_pulls_back_inside() {
        let world = Bounds::new(0.0, 0.0, 1000.0, 800.0);

        let off_right = Bounds::new(950.0, 790.0, 100.0, 40.0).clamped_within(&world);
        assert_eq!(off_right, Bounds::new(900.0, 760.0, 100.0, 40.0));

        let off_left = Bounds::new(-30.0, -5.0, 100.0, 40.0).clamped_within(&world);
        assert_eq!(off_left, Bounds::new(0.0, 0.0, 100.0, 40.0));

        let inside = Bounds::new(300.0, 300.0, 100.0, 40.0);
        assert_eq!(inside.clamped_within(&world), inside);
    }

    #[test]
    fn test_clamped_within_oversized_pins_top_left() {
        let outer = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let big = Bounds::new(20.0, 20.0, 80.0, 80.0).clamped_within(&outer);
        assert_eq!(big.top_left(), Point::new(0.0, 0.0));
    }
}
