//! Vellum Settings Crate
//!
//! Handles engine configuration: geometry tolerances, triangulation limits
//! and interaction policies, with JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    DimensionPolicy, EngineSettings, GeometrySettings, HitTestMode, InteractionSettings,
    RebuildPolicy, TriangulationSettings,
};
pub use error::{SettingsError, SettingsResult};
