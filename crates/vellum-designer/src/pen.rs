//! Pen tool: collects clicked points and turns them into a path shape.

use crate::model::{BoundingBox, Path, Point, ShapeKind};
use crate::shape::{Shape, ShapeOptions};

#[derive(Debug, Clone, Default)]
pub struct PenTool {
    points: Vec<Point>,
}

impl PenTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a world-space point. Non-finite points are ignored.
    pub fn add_point(&mut self, point: Point) {
        if !point.is_finite() {
            tracing::warn!(x = point.x, y = point.y, "Ignoring non-finite pen point");
            return;
        }
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cancel(&mut self) {
        self.points.clear();
    }

    /// Closes the collected points into a pen shape.
    ///
    /// Needs at least three points spanning a non-zero area box; otherwise the
    /// points are kept and `None` is returned. The path is stored in unit
    /// space over the points' bounding box, which becomes the transform.
    pub fn close(&mut self, options: &ShapeOptions) -> Option<Shape> {
        if self.points.len() < 3 {
            return None;
        }
        let mut bounds = BoundingBox::default();
        bounds.rebuild_from_points(&self.points);
        let origin = bounds.position();
        let (width, height) = bounds.size();
        if width < options.min_dimension || height < options.min_dimension {
            tracing::debug!(width, height, "Pen points are collinear; not closing");
            return None;
        }

        let unit: Vec<Point> = self
            .points
            .iter()
            .map(|p| Point::new((p.x - origin.x) / width, (p.y - origin.y) / height))
            .collect();

        let mut shape =
            Shape::from_path(ShapeKind::Pen, Path::from_polygon(&unit)).with_options(options.clone());
        if let Err(e) = shape.re_transform(width, height, origin) {
            tracing::warn!(error = %e, "Could not place pen shape");
            return None;
        }
        shape.rebuild_if_dirty();
        self.points.clear();
        Some(shape)
    }
}
