//! Fractal Brownian motion over a baked noise volume.

use glam::Vec3;

use crate::params::FbmParams;
use crate::volume::{AddressMode, NoiseVolume};

/// Sum `params.octaves` filtered lookups, doubling frequency and halving weight
///
/// With volume values in [0, 1] the result lies in `[0, params.max_value()]`.
pub fn fbm(volume: &NoiseVolume, p: Vec3, params: &FbmParams, mode: AddressMode) -> f32 {
    let mut value = 0.0;
    let mut amplitude = params.amplitude;
    let mut p = p;
    for _ in 0..params.octaves {
        value += amplitude * volume.sample(p, mode);
        p *= params.lacunarity;
        amplitude *= params.gain;
    }
    value
}
