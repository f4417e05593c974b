//! Engine configuration for Vellum
//!
//! Configuration is organized into logical sections:
//! - Geometry (flattening tolerance, dimension policy, default shape size)
//! - Triangulation (vertex limits, index alignment)
//! - Interaction (hit-test precision, rebuild scheduling, pen-path unions)
//!
//! Files are stored as JSON or TOML, chosen by extension.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vellum_core::constants;

use crate::error::{SettingsError, SettingsResult};

/// What to do when a transform edit asks for a zero or negative dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionPolicy {
    /// Refuse the edit and leave the shape unchanged
    #[default]
    Reject,
    /// Raise the dimension to `min_dimension`
    Clamp,
}

impl std::fmt::Display for DimensionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Clamp => write!(f, "clamp"),
        }
    }
}

/// Precision used when testing a pointer against a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTestMode {
    /// Axis-aligned bounding box containment
    #[default]
    BoundingBox,
    /// Even-odd point-in-polygon over every contour
    Polygon,
}

/// When mesh rebuilds run after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebuildPolicy {
    /// Rebuild inside every mutating call
    #[default]
    Immediate,
    /// Mark the shape dirty; rebuild on the next flush
    Deferred,
}

/// Geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Maximum deviation when flattening curves
    pub flatten_tolerance: f64,
    /// Smallest accepted width/height
    pub min_dimension: f64,
    /// Handling of zero or negative dimensions
    pub dimension_policy: DimensionPolicy,
    /// Size of shapes created from the toolbar
    pub default_shape_size: f64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            flatten_tolerance: constants::DEFAULT_FLATTEN_TOLERANCE,
            min_dimension: constants::MIN_DIMENSION,
            dimension_policy: DimensionPolicy::Reject,
            default_shape_size: constants::DEFAULT_SHAPE_SIZE,
        }
    }
}

/// Triangulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulationSettings {
    /// Rings longer than this are decimated before ear clipping
    pub max_vertices: usize,
    /// Index buffers are padded to a multiple of this value
    pub index_alignment: usize,
}

impl Default for TriangulationSettings {
    fn default() -> Self {
        Self {
            max_vertices: constants::MAX_EAR_CLIP_VERTICES,
            index_alignment: constants::INDEX_ALIGNMENT,
        }
    }
}

/// Interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub hit_test: HitTestMode,
    pub rebuild: RebuildPolicy,
    /// Union overlapping contours of pen paths before triangulation
    pub union_pen_paths: bool,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hit_test: HitTestMode::BoundingBox,
            rebuild: RebuildPolicy::Immediate,
            union_pen_paths: true,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub geometry: GeometrySettings,
    pub triangulation: TriangulationSettings,
    pub interaction: InteractionSettings,
}

impl EngineSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the settings file in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vellum").join("engine.toml"))
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let settings: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::info!(path = %path.display(), "Loaded engine settings");
        Ok(settings)
    }

    /// Load settings from file, falling back to defaults when the file is
    /// missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Using default engine settings");
                Self::default()
            }
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "Saved engine settings");
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        let geometry = &self.geometry;
        if !(geometry.flatten_tolerance.is_finite() && geometry.flatten_tolerance > 0.0) {
            return Err(SettingsError::invalid(
                "geometry.flatten_tolerance",
                "must be a positive number",
            ));
        }
        if !(geometry.min_dimension.is_finite() && geometry.min_dimension > 0.0) {
            return Err(SettingsError::invalid(
                "geometry.min_dimension",
                "must be a positive number",
            ));
        }
        if !(geometry.default_shape_size.is_finite()
            && geometry.default_shape_size >= geometry.min_dimension)
        {
            return Err(SettingsError::invalid(
                "geometry.default_shape_size",
                "must be at least min_dimension",
            ));
        }

        let triangulation = &self.triangulation;
        if triangulation.max_vertices < 3
            || triangulation.max_vertices > constants::MAX_INDEXABLE_VERTICES
        {
            return Err(SettingsError::invalid(
                "triangulation.max_vertices",
                format!("must be between 3 and {}", constants::MAX_INDEXABLE_VERTICES),
            ));
        }
        if triangulation.index_alignment == 0 {
            return Err(SettingsError::invalid(
                "triangulation.index_alignment",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
