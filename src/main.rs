//! Emberfield - procedural fire and smoke from baked 3D Perlin noise
//!
//! Bakes seeded noise into a volume, exports it for GPU upload or
//! inspection, and renders the fire/smoke composition offline.

use std::path::Path;
use std::time::Instant;

use clap::Parser;

use emberfield::cli::{render_plan, Args, Command, VolumeArgs};
use emberfield::fire::FireShader;
use emberfield::params::{FbmParams, FireParams};
use emberfield::{AddressMode, NoiseVolume};

fn bake_volume(args: &VolumeArgs) -> emberfield::Result<NoiseVolume> {
    let start = Instant::now();
    let volume = NoiseVolume::from_params(&args.volume_params(), &args.noise_params())?;
    let (min, max, mean) = volume.stats();
    log::info!(
        "Baked {}³ volume (seed {}, spacing {}) in {:.2}ms",
        volume.size(),
        args.seed,
        volume.frequency(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    log::debug!("Volume range [{:.4}, {:.4}], mean {:.4}", min, max, mean);
    Ok(volume)
}

fn run_bake(args: &VolumeArgs, output: &Path) -> emberfield::Result<()> {
    let volume = bake_volume(args)?;
    volume.write_raw(output)?;
    println!(
        "Wrote {} ({} bytes, {}x{}x{} f32 LE)",
        output.display(),
        volume.as_bytes().len(),
        volume.size(),
        volume.size(),
        volume.size()
    );
    Ok(())
}

fn run_slice(args: &VolumeArgs, z: usize, output: &Path) -> emberfield::Result<()> {
    let volume = bake_volume(args)?;
    volume.slice_image(z)?.save(output)?;
    println!("Wrote slice z={} to {}", z, output.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_render(
    args: &VolumeArgs,
    width: u32,
    height: u32,
    time: Option<f32>,
    duration: Option<f32>,
    fps: u32,
    wrap: AddressMode,
    output_dir: &str,
) -> emberfield::Result<()> {
    let (render_config, recording) = render_plan(width, height, time, duration, fps, output_dir);
    let volume = bake_volume(args)?;
    std::fs::create_dir_all(&recording.output_dir)?;
    let shader = FireShader::new(volume, FbmParams::default(), FireParams::default(), wrap);

    let total = recording.total_frames();
    let start = Instant::now();
    for frame_num in 0..total {
        let time_s = recording.frame_time(frame_num);
        let path = recording.frame_path(frame_num);
        shader.render_frame(&render_config, time_s).save(&path)?;
        log::debug!("Frame {}/{} (t = {:.3}s) -> {}", frame_num + 1, total, time_s, path);
    }

    println!(
        "Rendered {} frame(s) at {}x{} to {} in {:.2}s",
        total,
        render_config.width,
        render_config.height,
        recording.output_dir,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Command::Bake { volume, output } => run_bake(&volume, &output)?,
        Command::Slice { volume, z, output } => run_slice(&volume, z, &output)?,
        Command::Render {
            volume,
            width,
            height,
            time,
            duration,
            fps,
            wrap,
            output_dir,
        } => run_render(
            &volume,
            width,
            height,
            time,
            duration,
            fps,
            wrap,
            &output_dir,
        )?,
    }

    Ok(())
}
