//! # Vellum Designer
//!
//! The vector shape engine behind the Vellum canvas. It turns editable paths
//! into triangle meshes that a GPU can draw, and keeps those meshes in step
//! with every edit.
//!
//! ## Core Components
//!
//! - **Path**: move/line/quadratic/cubic/close commands forming one or more contours
//! - **Triangulator**: ear clipping with hole bridging and a decimating fallback
//! - **Union**: boolean union of overlapping contours before triangulation
//! - **Shape**: a path plus its placement, meshes and bounding box
//! - **Canvas**: shapes in z-order with hit-testing and drawing
//! - **Renderer**: per-shape GPU buffer cache over an abstract target
//!
//! ## Architecture
//!
//! ```text
//! edit ──> Shape (Path + AffineTransform)
//!            └── rebuild: contours ─> union ─> group ─> triangulate ─> Mesh + BoundingBox
//! Canvas ──> ShapeRenderer ──> RenderTarget
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use vellum_designer::{Canvas, FixedCamera, Point, RecordingTarget, ShapeRenderer};
//!
//! let mut canvas = Canvas::default();
//! let id = canvas.add_rectangle(Point::new(0.0, 0.0), 100.0, 100.0).unwrap();
//! assert_eq!(canvas.hit_test(Point::new(50.0, 50.0)), Some(id));
//!
//! let camera = FixedCamera::orthographic(800.0, 600.0);
//! let mut renderer = ShapeRenderer::new();
//! let mut target = RecordingTarget::new();
//! canvas.draw(&camera, &mut renderer, &mut target);
//! assert_eq!(target.triangle_count(), 2);
//! ```

pub mod camera;
pub mod canvas;
pub mod mesh;
pub mod model;
pub mod ops;
pub mod pen;
pub mod renderer;
pub mod shape;
pub mod triangulate;

pub use camera::{screen_to_world, Camera, FixedCamera};
pub use canvas::Canvas;
pub use mesh::Mesh;
pub use model::{AffineTransform, BoundingBox, Path, PathCommand, Point, Ring, ShapeKind};
pub use ops::union_contours;
pub use pen::PenTool;
pub use renderer::{RecordingTarget, RenderTarget, ShapeRenderer};
pub use shape::{Shape, ShapeId, ShapeOptions};
pub use triangulate::{group_rings, pad_indices, triangulate, triangulate_with_holes, RingGroup, Triangulation};
