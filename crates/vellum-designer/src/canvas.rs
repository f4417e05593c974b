//! The document: shapes in z-order.

use vellum_core::GeometryError;
use vellum_settings::EngineSettings;

use crate::camera::{screen_to_world, Camera};
use crate::model::{Point, ShapeKind};
use crate::renderer::{RenderTarget, ShapeRenderer};
use crate::shape::{Shape, ShapeId, ShapeOptions};

/// Ordered collection of shapes. Later shapes draw on top.
#[derive(Debug, Clone)]
pub struct Canvas {
    shapes: Vec<Shape>,
    options: ShapeOptions,
    default_size: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}

impl Canvas {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            shapes: Vec::new(),
            options: ShapeOptions::from(settings),
            default_size: settings.geometry.default_shape_size,
        }
    }

    /// Options applied to shapes created through this canvas.
    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        tracing::debug!(shape = %id, kind = shape.kind().name(), "Added shape");
        self.shapes.push(shape);
        id
    }

    pub fn add_rectangle(
        &mut self,
        position: Point,
        width: f64,
        height: f64,
    ) -> Result<ShapeId, GeometryError> {
        self.place(Shape::rectangle(), position, width, height)
    }

    pub fn add_triangle(
        &mut self,
        position: Point,
        width: f64,
        height: f64,
    ) -> Result<ShapeId, GeometryError> {
        self.place(Shape::triangle(), position, width, height)
    }

    pub fn add_regular_polygon(
        &mut self,
        sides: u32,
        position: Point,
        size: f64,
    ) -> Result<ShapeId, GeometryError> {
        self.place(Shape::regular_polygon(sides)?, position, size, size)
    }

    /// Adds a toolbar primitive at `position` with the default size.
    ///
    /// Pen shapes come from a [`PenTool`](crate::PenTool) and are refused with
    /// [`GeometryError::NoDefaultGeometry`].
    pub fn add_default(&mut self, kind: ShapeKind, position: Point) -> Result<ShapeId, GeometryError> {
        let size = self.default_size;
        match kind {
            ShapeKind::Rectangle => self.add_rectangle(position, size, size),
            ShapeKind::Triangle => self.add_triangle(position, size, size),
            ShapeKind::RegularPolygon { sides } => self.add_regular_polygon(sides, position, size),
            ShapeKind::Pen => Err(GeometryError::NoDefaultGeometry { kind: kind.name() }),
        }
    }

    fn place(
        &mut self,
        shape: Shape,
        position: Point,
        width: f64,
        height: f64,
    ) -> Result<ShapeId, GeometryError> {
        let mut shape = shape.with_options(self.options.clone());
        shape.re_transform(width, height, position)?;
        Ok(self.add_shape(shape))
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Shapes bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Topmost shape under a world-space point.
    ///
    /// Uses the current bounds, so deferred edits are seen only after
    /// [`flush_rebuilds`](Self::flush_rebuilds).
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.is_point_colliding(point))
            .map(Shape::id)
    }

    /// Topmost shape under a screen-space point.
    pub fn hit_test_screen(&self, point: Point, camera: &dyn Camera) -> Option<ShapeId> {
        self.hit_test(screen_to_world(camera, point))
    }

    /// Rebuilds every dirty shape; returns how many were rebuilt.
    pub fn flush_rebuilds(&mut self) -> usize {
        let rebuilt = self
            .shapes
            .iter_mut()
            .map(Shape::rebuild_if_dirty)
            .filter(|&rebuilt| rebuilt)
            .count();
        if rebuilt > 0 {
            tracing::debug!(rebuilt, "Flushed deferred rebuilds");
        }
        rebuilt
    }

    /// Flushes pending rebuilds, then draws every shape bottom to top.
    pub fn draw<T: RenderTarget>(
        &mut self,
        camera: &dyn Camera,
        renderer: &mut ShapeRenderer<T>,
        target: &mut T,
    ) {
        self.flush_rebuilds();
        renderer.retain(|id| self.shapes.iter().any(|s| s.id() == id));
        for shape in &self.shapes {
            renderer.draw(shape, camera, target);
        }
    }
}
