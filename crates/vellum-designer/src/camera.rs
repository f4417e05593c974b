//! Camera interface consumed by drawing and screen-space hit testing.
//!
//! Pan and zoom live outside this crate; a camera is only ever seen as the
//! pair of matrices below.

use glam::{Mat4, Vec3};

use crate::model::Point;

pub trait Camera {
    /// World space to clip space.
    fn view_projection_matrix(&self) -> Mat4;

    /// Screen space to world space.
    fn inverse_view_matrix(&self) -> Mat4;
}

/// Camera backed by fixed matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCamera {
    view_projection: Mat4,
    inverse_view: Mat4,
}

impl FixedCamera {
    pub fn new(view_projection: Mat4, inverse_view: Mat4) -> Self {
        Self {
            view_projection,
            inverse_view,
        }
    }

    /// Pixel-aligned camera for a `width` x `height` surface with the origin
    /// at the top-left and y growing downwards.
    pub fn orthographic(width: f32, height: f32) -> Self {
        let view_projection = Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
        Self {
            view_projection,
            inverse_view: Mat4::IDENTITY,
        }
    }
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

impl Camera for FixedCamera {
    fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection
    }

    fn inverse_view_matrix(&self) -> Mat4 {
        self.inverse_view
    }
}

/// Maps a screen-space point into world space.
pub fn screen_to_world(camera: &dyn Camera, point: Point) -> Point {
    let world = camera
        .inverse_view_matrix()
        .transform_point3(Vec3::new(point.x as f32, point.y as f32, 0.0));
    Point::new(world.x as f64, world.y as f64)
}
