//! Shape/rectangle intersection tests used by marking and click routing.

use serde::{Deserialize, Serialize};

use super::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        let dx = point.x - self.cx;
        let dy = point.y - self.cy;
        dx * dx + dy * dy <= self.r * self.r
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Inclusive on all edges so pointer events on the border still land.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// Returns `true` when the circle's bounding box overlaps `rect`.
///
/// Overlap, not containment: a marker partially covered by the marking
/// rectangle counts as hit.
#[must_use]
pub fn circle_in_rect(circle: Circle, rect: Rect) -> bool {
    circle.cx + circle.r > rect.x
        && circle.cx - circle.r < rect.right()
        && circle.cy + circle.r > rect.y
        && circle.cy - circle.r < rect.bottom()
}

/// Even-odd point-in-polygon test.
#[must_use]
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Rendered shape kinds that can take part in marking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle(Circle),
    Polygon(Vec<Point>),
}

impl MarkerShape {
    /// Rectangle hit-test dispatch.
    ///
    /// Only circles are supported; every other shape kind is never selected.
    #[must_use]
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        match self {
            Self::Circle(circle) => circle_in_rect(*circle, rect),
            Self::Polygon(_) => false,
        }
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        match self {
            Self::Circle(circle) => circle.contains(point),
            Self::Polygon(vertices) => point_in_polygon(point, vertices),
        }
    }
}
