//! Error type for baking, sampling setup and export.

use thiserror::Error;

/// Errors raised outside the noise core (which is total)
#[derive(Debug, Error)]
pub enum Error {
    #[error("lattice size {size} out of range (1..={max})")]
    InvalidSize { size: usize, max: usize },

    #[error("sample spacing must be positive and finite, got {0}")]
    InvalidFrequency(f32),

    #[error("slice {z} out of range for a lattice of size {size}")]
    SliceOutOfRange { z: usize, size: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
