//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::params::{
    NoiseParams, RecordingConfig, RenderConfig, VolumeParams, DEFAULT_FREQUENCY,
    DEFAULT_VOLUME_SIZE,
};
use crate::perlin::DEFAULT_SEED;
use crate::volume::AddressMode;

/// Longest accepted `--duration` (seconds)
pub const MAX_DURATION_SECS: f32 = 3600.0;

/// Parse a time in seconds: finite and not negative
fn parse_seconds(s: &str) -> Result<f32, String> {
    let secs: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("{s} is not a non-negative number of seconds"));
    }
    Ok(secs)
}

/// Parse a sequence length in seconds, capped at `MAX_DURATION_SECS`
fn parse_duration(s: &str) -> Result<f32, String> {
    let secs = parse_seconds(s)?;
    if secs > MAX_DURATION_SECS {
        return Err(format!("duration must be at most {MAX_DURATION_SECS} seconds"));
    }
    Ok(secs)
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "emberfield")]
#[command(about = "Perlin noise volumes and procedural fire", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Noise and lattice options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct VolumeArgs {
    /// Permutation table seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u32,

    /// Lattice edge length (cells per side)
    #[arg(long, default_value_t = DEFAULT_VOLUME_SIZE)]
    pub size: usize,

    /// Noise-space spacing between lattice samples
    #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
    pub frequency: f32,
}

impl VolumeArgs {
    pub fn noise_params(&self) -> NoiseParams {
        NoiseParams { seed: self.seed }
    }

    pub fn volume_params(&self) -> VolumeParams {
        VolumeParams {
            size: self.size,
            frequency: self.frequency,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bake a noise volume to a raw little-endian f32 file (x fastest)
    Bake {
        #[command(flatten)]
        volume: VolumeArgs,

        /// Output file path
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Write one z-slice of a noise volume as a grayscale PNG
    Slice {
        #[command(flatten)]
        volume: VolumeArgs,

        /// Slice index along z
        #[arg(long, default_value_t = 0)]
        z: usize,

        /// Output file path
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Render fire/smoke frames to PNG
    Render {
        #[command(flatten)]
        volume: VolumeArgs,

        /// Frame width (pixels)
        #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Frame height (pixels)
        #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        /// Render a single frame at this time (seconds)
        #[arg(long, value_name = "SECONDS", conflicts_with = "duration", value_parser = parse_seconds)]
        time: Option<f32>,

        /// Render a sequence of this length (seconds)
        #[arg(long, value_name = "SECONDS", value_parser = parse_duration)]
        duration: Option<f32>,

        /// Sequence frame rate
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
        fps: u32,

        /// Volume addressing outside [0, 1]
        #[arg(long, value_enum, default_value_t = AddressMode::ClampToEdge)]
        wrap: AddressMode,

        /// Directory for frame_NNNNN.png files
        #[arg(long, default_value = "frames")]
        output_dir: String,
    },
}

/// Frame size and schedule for the `render` subcommand
///
/// Expects values already validated by the argument parser (`fps >= 1`,
/// finite non-negative times).
pub fn render_plan(
    width: u32,
    height: u32,
    time: Option<f32>,
    duration: Option<f32>,
    fps: u32,
    output_dir: &str,
) -> (RenderConfig, RecordingConfig) {
    let mut recording = RecordingConfig::new(duration.unwrap_or(0.0), output_dir);
    recording.fps = fps;
    if let Some(t) = time {
        recording.start_secs = t;
    }
    (RenderConfig { width, height }, recording)
}
