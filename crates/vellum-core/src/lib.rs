//! # Vellum Core
//!
//! Shared error taxonomy and engine-wide constants for the Vellum shape
//! engine. Every other crate in the workspace depends on this one, so it
//! stays free of geometry and rendering dependencies.

pub mod constants;
pub mod error;

pub use error::{Error, GeometryError, Result};
