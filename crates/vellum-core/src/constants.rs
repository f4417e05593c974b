//! Engine-wide constants.

/// Side length, in world units, of shapes created from the toolbar.
pub const DEFAULT_SHAPE_SIZE: f64 = 100.0;

/// Maximum deviation allowed when flattening Bézier curves into line segments.
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 0.1;

/// Smallest width or height a transform may carry before it is considered degenerate.
pub const MIN_DIMENSION: f64 = 1e-6;

/// Index buffers are padded with trailing zeros to a multiple of this stride.
pub const INDEX_ALIGNMENT: usize = 4;

/// Rings longer than this are decimated before ear clipping.
pub const MAX_EAR_CLIP_VERTICES: usize = 4096;

/// Hard ceiling imposed by 16-bit index buffers.
pub const MAX_INDEXABLE_VERTICES: usize = u16::MAX as usize;

/// Size in bytes of a column-major 4x4 `f32` matrix uniform.
pub const TRANSFORM_UNIFORM_SIZE: usize = 16 * std::mem::size_of::<f32>();
