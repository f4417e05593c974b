use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use super::Point;

/// Decomposed placement of a shape: translation, non-uniform scale and a
/// rotation carried separately in the model matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation in radians about the z axis
    pub rotation: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            width: 1.0,
            height: 1.0,
            rotation: 0.0,
        }
    }
}

impl AffineTransform {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Maps unit-space geometry into world space: `T(position) * S(width, height, 1)`.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_translation(DVec3::new(self.position.x, self.position.y, 0.0))
            * DMat4::from_scale(DVec3::new(self.width, self.height, 1.0))
    }

    /// Rotation applied at draw time.
    pub fn model_matrix(&self) -> DMat4 {
        DMat4::from_rotation_z(self.rotation)
    }

    /// Inverse of [`matrix`](Self::matrix), or `None` when it is singular.
    pub fn inverse_matrix(&self) -> Option<DMat4> {
        let matrix = self.matrix();
        let det = matrix.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(matrix.inverse())
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.rotation.is_finite()
    }
}
