//! Emberfield library - Perlin noise volumes and procedural fire

pub mod cli;
pub mod error;
pub mod fbm;
pub mod fire;
pub mod params;
mod parallel;
pub mod perlin;
pub mod volume;

pub use error::{Error, Result};
pub use perlin::PerlinNoise3D;
pub use volume::{AddressMode, NoiseVolume};
