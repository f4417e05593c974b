use serde::{Deserialize, Serialize};

use super::Point;

/// Axis-aligned extent of a shape's flattened vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Point,
    max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Recomputes the box from interleaved `x, y` coordinates.
    ///
    /// Fewer than three coordinate pairs leave the box untouched.
    pub fn rebuild(&mut self, vertices: &[f32]) {
        if vertices.len() / 2 < 3 {
            return;
        }
        let points: Vec<Point> = vertices
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0] as f64, xy[1] as f64))
            .collect();
        self.rebuild_from_points(&points);
    }

    /// Recomputes the box from points, with the same three-point minimum.
    pub fn rebuild_from_points(&mut self, points: &[Point]) {
        if points.len() < 3 {
            return;
        }
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        self.min = min;
        self.max = max;
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn position(&self) -> Point {
        self.min
    }

    /// `(width, height)`
    pub fn size(&self) -> (f64, f64) {
        (self.max.x - self.min.x, self.max.y - self.min.y)
    }

    /// Inclusive on both edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn is_empty(&self) -> bool {
        let (w, h) = self.size();
        w <= 0.0 && h <= 0.0
    }
}
