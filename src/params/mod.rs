//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (lattice cells, noise-space units, seconds, pixels)
//! - Documented ranges and meanings
//! - Type safety where possible

mod fire;
mod lattice;
mod render;

// Re-export all types
pub use fire::{FbmParams, FireParams};
pub use lattice::{
    NoiseParams, VolumeParams, DEFAULT_FREQUENCY, DEFAULT_VOLUME_SIZE, MAX_VOLUME_SIZE,
};
pub use render::{RecordingConfig, RenderConfig};
