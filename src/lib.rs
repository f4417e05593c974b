//! # Vellum
//!
//! Geometry core of a 2D vector design canvas. Vellum turns editable,
//! multi-contour paths into triangle meshes, keeps them in step with
//! position/size/rotation edits, and answers hit-tests against them.
//!
//! ## Architecture
//!
//! Vellum is organized as a workspace with multiple crates:
//!
//! 1. **vellum-core** - Error types and engine constants
//! 2. **vellum-settings** - Engine configuration with JSON/TOML persistence
//! 3. **vellum-designer** - Paths, triangulation, unions, shapes, canvas and rendering interfaces
//! 4. **vellum** - This crate: re-exports, logging setup and a headless demo binary
//!
//! ## Features
//!
//! - **Paths**: move/line/quadratic/cubic/close commands, flattened with `lyon`
//! - **Triangulation**: ear clipping with hole bridging and a bounded fallback
//! - **Unions**: overlapping pen contours merged before triangulation
//! - **Transforms**: resize and move without accumulating drift
//! - **Rendering**: per-shape buffer cache over any GPU target

pub use vellum_designer as designer;
pub use vellum_settings as settings;

pub use vellum_core::{Error, GeometryError, Result};

pub use vellum_designer::{
    AffineTransform, BoundingBox, Camera, Canvas, FixedCamera, Mesh, Path, PathCommand, PenTool,
    Point, RecordingTarget, RenderTarget, Shape, ShapeId, ShapeKind, ShapeOptions, ShapeRenderer,
};

pub use vellum_settings::{
    DimensionPolicy, EngineSettings, HitTestMode, RebuildPolicy, SettingsError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
