//! Noise generator and lattice bake parameters.

/// Largest accepted lattice edge length (cells per side).
/// 512³ floats is already 512 MiB of texture memory.
pub const MAX_VOLUME_SIZE: usize = 512;

/// Default lattice edge length (cells per side)
pub const DEFAULT_VOLUME_SIZE: usize = 64;

/// Default spacing between lattice samples (noise units per cell)
pub const DEFAULT_FREQUENCY: f32 = 0.08;

/// Noise generator parameters
#[derive(Debug, Clone)]
pub struct NoiseParams {
    /// Permutation table shuffle seed
    pub seed: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: crate::perlin::DEFAULT_SEED,
        }
    }
}

/// Lattice bake parameters
#[derive(Debug, Clone)]
pub struct VolumeParams {
    /// Lattice edge length (cells per side, volume holds size³ values)
    pub size: usize,

    /// Spacing between lattice samples in noise space (noise units per cell).
    /// 64 cells × 0.08 covers ~5 noise cells per side.
    pub frequency: f32,
}

impl Default for VolumeParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_VOLUME_SIZE,
            frequency: DEFAULT_FREQUENCY,
        }
    }
}
