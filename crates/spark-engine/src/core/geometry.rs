//! Geometry primitives: points, axis-aligned rectangles and circles.
//!
//! Coordinates are y-down, matching the canvas the particles end up on:
//! `top` is the smaller y, `bottom` the larger.

use glam::DVec2;

/// 2-D point/vector in world units.
pub type Vector2 = DVec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Overwrite all four fields in place.
    pub fn set(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
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

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open containment: `left <= x < right` and `top <= y < bottom`.
    /// Adjacent rectangles never both contain a shared edge point.
    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Closed containment, edges included on all four sides.
    pub fn contains_inclusive(&self, p: Vector2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// AABB overlap, touching edges count as overlap.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(other.left() > self.right()
            || other.right() < self.left()
            || other.top() > self.bottom()
            || other.bottom() < self.top())
    }

    /// AABB/circle overlap via the closest point of the rectangle to the circle center.
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        let closest = Vector2::new(
            circle.x.clamp(self.left(), self.right()),
            circle.y.clamp(self.top(), self.bottom()),
        );
        // Same metric as `Circle::contains`, so pruning never rejects a node
        // holding a point the circle contains.
        closest.distance(circle.center()) <= circle.radius
    }

    /// Split at the midpoint into `[NW, NE, SW, SE]`.
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        let mid_x = self.x + hw;
        let mid_y = self.y + hh;
        // The far quadrants take the remainder so the split line is shared exactly.
        let rw = self.right() - mid_x;
        let bh = self.bottom() - mid_y;
        [
            Rectangle::new(self.x, self.y, hw, hh),
            Rectangle::new(mid_x, self.y, rw, hh),
            Rectangle::new(self.x, mid_y, hw, bh),
            Rectangle::new(mid_x, mid_y, rw, bh),
        ]
    }

    /// Grow by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Rectangle {
        Rectangle::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }
}

/// Circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    pub fn around(center: Vector2, radius: f64) -> Self {
        Self::new(center.x, center.y, radius)
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Inclusive: points exactly `radius` away are inside.
    pub fn contains(&self, p: Vector2) -> bool {
        p.distance(self.center()) <= self.radius
    }
}
