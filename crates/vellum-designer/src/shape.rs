//! Shapes: a path, its placement and the meshes derived from them.
//!
//! A shape stores its geometry in world space. Transform edits go back to
//! unit space (through a cached copy, or the inverse of the stored matrix),
//! apply the new transform and rebuild the meshes.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vellum_core::GeometryError;
use vellum_settings::{DimensionPolicy, EngineSettings, HitTestMode, RebuildPolicy};

use crate::mesh::Mesh;
use crate::model::{ring_contains, AffineTransform, BoundingBox, Path, Point, ShapeKind};
use crate::ops::union_contours;
use crate::triangulate::{group_rings, RingGroup};

/// Stable identifier assigned when a shape is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-shape view of the engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOptions {
    pub flatten_tolerance: f64,
    pub min_dimension: f64,
    pub dimension_policy: DimensionPolicy,
    pub max_vertices: usize,
    pub index_alignment: usize,
    pub hit_test: HitTestMode,
    pub rebuild: RebuildPolicy,
    pub union_pen_paths: bool,
}

impl From<&EngineSettings> for ShapeOptions {
    fn from(settings: &EngineSettings) -> Self {
        Self {
            flatten_tolerance: settings.geometry.flatten_tolerance,
            min_dimension: settings.geometry.min_dimension,
            dimension_policy: settings.geometry.dimension_policy,
            max_vertices: settings.triangulation.max_vertices,
            index_alignment: settings.triangulation.index_alignment,
            hit_test: settings.interaction.hit_test,
            rebuild: settings.interaction.rebuild,
            union_pen_paths: settings.interaction.union_pen_paths,
        }
    }
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self::from(&EngineSettings::default())
    }
}

#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    /// World-space geometry
    path: Path,
    /// Unit-space geometry matching `path` under `transform`, when known
    unit_path: Option<Path>,
    transform: AffineTransform,
    meshes: Vec<Mesh>,
    /// Rings the meshes were built from, one group per mesh
    fill: Vec<RingGroup>,
    bounds: BoundingBox,
    generation: u64,
    dirty: bool,
    options: ShapeOptions,
}

impl Shape {
    /// Unit square with corners (0,0), (1,0), (1,1), (0,1).
    pub fn rectangle() -> Self {
        Self::from_path(
            ShapeKind::Rectangle,
            Path::from_polygon(&[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]),
        )
    }

    /// Isosceles triangle with its apex at (0.5, 0) and base along y = 1.
    pub fn triangle() -> Self {
        Self::from_path(
            ShapeKind::Triangle,
            Path::from_polygon(&[
                Point::new(0.5, 0.0),
                Point::new(0.0, 1.0),
                Point::new(1.0, 1.0),
            ]),
        )
    }

    /// Regular polygon inscribed in the unit square, first vertex at (0.5, 0).
    pub fn regular_polygon(sides: u32) -> Result<Self, GeometryError> {
        if sides < 3 {
            return Err(GeometryError::TooFewPoints {
                count: sides as usize,
            });
        }
        let points: Vec<Point> = (0..sides)
            .map(|k| {
                let angle = -FRAC_PI_2 + TAU * k as f64 / sides as f64;
                Point::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
            })
            .collect();
        Ok(Self::from_path(
            ShapeKind::RegularPolygon { sides },
            Path::from_polygon(&points),
        ))
    }

    /// Wraps `path` with the identity transform and default options.
    pub fn from_path(kind: ShapeKind, path: Path) -> Self {
        let mut shape = Self {
            id: ShapeId::new(),
            kind,
            unit_path: Some(path.clone()),
            path,
            transform: AffineTransform::default(),
            meshes: Vec::new(),
            fill: Vec::new(),
            bounds: BoundingBox::default(),
            generation: 0,
            dirty: true,
            options: ShapeOptions::default(),
        };
        shape.rebuild();
        shape
    }

    /// Replaces the options and rebuilds under them.
    pub fn with_options(mut self, options: ShapeOptions) -> Self {
        self.options = options;
        self.rebuild();
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    pub fn position(&self) -> Point {
        self.transform.position
    }

    pub fn width(&self) -> f64 {
        self.transform.width
    }

    pub fn height(&self) -> f64 {
        self.transform.height
    }

    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Bumped by every rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }

    pub fn set_width(&mut self, width: f64) -> Result<(), GeometryError> {
        self.re_transform(width, self.transform.height, self.transform.position)
    }

    pub fn set_height(&mut self, height: f64) -> Result<(), GeometryError> {
        self.re_transform(self.transform.width, height, self.transform.position)
    }

    pub fn set_position(&mut self, position: Point) -> Result<(), GeometryError> {
        self.re_transform(self.transform.width, self.transform.height, position)
    }

    pub fn move_by(&mut self, delta: Point) -> Result<(), GeometryError> {
        self.set_position(self.transform.position + delta)
    }

    /// Sets the rotation used by the model matrix.
    ///
    /// Rotation is applied about the world origin at draw time only. It is
    /// not baked into the path, meshes or bounds, so hit-testing ignores it.
    pub fn set_rotation(&mut self, radians: f64) -> Result<(), GeometryError> {
        if !radians.is_finite() {
            return Err(GeometryError::NonFinite { what: "rotation" });
        }
        self.transform.rotation = radians;
        Ok(())
    }

    /// Re-places the shape at `position` with the given size.
    ///
    /// On error the shape is left exactly as it was.
    pub fn re_transform(
        &mut self,
        width: f64,
        height: f64,
        position: Point,
    ) -> Result<(), GeometryError> {
        if !width.is_finite() {
            return Err(GeometryError::NonFinite { what: "width" });
        }
        if !height.is_finite() {
            return Err(GeometryError::NonFinite { what: "height" });
        }
        if !position.is_finite() {
            return Err(GeometryError::NonFinite { what: "position" });
        }
        let (width, height) = self.checked_dimensions(width, height)?;

        let unit = match &self.unit_path {
            Some(unit) => unit.clone(),
            None => match self.transform.inverse_matrix() {
                Some(inverse) => self.path.transformed(&inverse),
                None => {
                    tracing::warn!(shape = %self.id, "Cannot normalize: stored transform is singular");
                    return Err(GeometryError::SingularTransform);
                }
            },
        };

        self.transform.width = width;
        self.transform.height = height;
        self.transform.position = position;
        self.path = unit.transformed(&self.transform.matrix());
        self.unit_path = Some(unit);
        self.after_edit();
        Ok(())
    }

    /// Edits the world-space path directly.
    pub fn edit_path(&mut self, edit: impl FnOnce(&mut Path)) {
        edit(&mut self.path);
        self.unit_path = None;
        self.after_edit();
    }

    /// Adds a vertex to the last contour, in world space.
    pub fn add_point(&mut self, point: Point) {
        self.edit_path(|path| path.insert_before_close(point));
    }

    /// Re-derives meshes and bounds from the world-space path.
    pub fn rebuild(&mut self) {
        let mut rings = self.path.contours(self.options.flatten_tolerance);
        let contours = rings.len();
        if self.kind == ShapeKind::Pen && self.options.union_pen_paths {
            rings = union_contours(&rings);
        }

        self.fill = group_rings(rings);
        self.meshes = self
            .fill
            .iter()
            .map(|group| {
                Mesh::from_group(group, self.options.max_vertices, self.options.index_alignment)
            })
            .collect();

        let vertices: Vec<f32> = self
            .meshes
            .iter()
            .flat_map(|mesh| mesh.vertices().iter().copied())
            .collect();
        self.bounds.rebuild(&vertices);

        self.generation += 1;
        self.dirty = false;

        tracing::debug!(
            shape = %self.id,
            kind = self.kind.name(),
            contours,
            meshes = self.meshes.len(),
            triangles = self.meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
            generation = self.generation,
            "Rebuilt shape"
        );
    }

    /// Rebuilds only if an earlier edit was deferred.
    pub fn rebuild_if_dirty(&mut self) -> bool {
        if self.dirty {
            self.rebuild();
            true
        } else {
            false
        }
    }

    /// Whether a world-space point hits the shape.
    ///
    /// Polygon mode tests the same outer rings and holes the meshes cover, so
    /// overlapping pen contours count as filled.
    pub fn is_point_colliding(&self, point: Point) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        match self.options.hit_test {
            HitTestMode::BoundingBox => true,
            HitTestMode::Polygon => self.fill.iter().any(|group| {
                ring_contains(&group.outer, point)
                    && !group.holes.iter().any(|hole| ring_contains(hole, point))
            }),
        }
    }

    fn checked_dimensions(&self, width: f64, height: f64) -> Result<(f64, f64), GeometryError> {
        let min = self.options.min_dimension;
        if width >= min && height >= min {
            return Ok((width, height));
        }
        match self.options.dimension_policy {
            DimensionPolicy::Reject => {
                tracing::warn!(shape = %self.id, width, height, "Rejected degenerate transform");
                Err(GeometryError::DegenerateTransform { width, height })
            }
            DimensionPolicy::Clamp => Ok((width.max(min), height.max(min))),
        }
    }

    fn after_edit(&mut self) {
        match self.options.rebuild {
            RebuildPolicy::Immediate => self.rebuild(),
            RebuildPolicy::Deferred => self.dirty = true,
        }
    }
}
