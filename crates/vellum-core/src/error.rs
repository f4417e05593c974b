//! Error handling for Vellum
//!
//! Provides the error types shared across the workspace:
//! - Geometry errors (transform validation, normalization failures)
//! - A unified [`Error`] wrapping every layer
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when an edit would leave a shape's transform unusable. Malformed
/// paths and triangulation failures are never reported through this type;
/// they degrade the rendered output instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Width or height is zero or negative, which would make the transform singular
    #[error("Degenerate transform: width {width} x height {height}")]
    DegenerateTransform {
        /// The requested width.
        width: f64,
        /// The requested height.
        height: f64,
    },

    /// A NaN or infinite value was supplied
    #[error("Non-finite value for {what}")]
    NonFinite {
        /// Name of the offending attribute.
        what: &'static str,
    },

    /// The stored transform cannot be inverted and no unit-space copy exists
    #[error("Stored transform is singular and no unit-space geometry is cached")]
    SingularTransform,

    /// Not enough points to describe a closed shape
    #[error("At least 3 points are required, got {count}")]
    TooFewPoints {
        /// The number of points supplied.
        count: usize,
    },

    /// The shape kind has no built-in geometry and must be drawn point by point
    #[error("{kind} shapes have no default geometry")]
    NoDefaultGeometry {
        /// Name of the shape kind.
        kind: &'static str,
    },
}

/// Main error type for Vellum
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Settings could not be loaded, saved or validated
    #[error("Settings error: {0}")]
    Settings(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
