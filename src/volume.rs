//! Noise lattice baking, sampling and GPU upload.
//!
//! A `NoiseVolume` holds `size³` noise samples remapped to [0, 1], packed
//! row-major with x varying fastest. That layout matches a single-channel 3D
//! texture, so the buffer uploads without repacking.

use std::path::Path;

use glam::Vec3;
use image::{GrayImage, Luma};

use crate::error::{Error, Result};
use crate::parallel::{for_each_row, worker_count};
use crate::params::{NoiseParams, VolumeParams, MAX_VOLUME_SIZE};
use crate::perlin::PerlinNoise3D;

/// How lookups outside [0, 1] pick texels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AddressMode {
    /// Clamp to the outermost texel
    #[default]
    #[value(name = "clamp")]
    ClampToEdge,
    /// Wrap around (tile the volume)
    Repeat,
}

impl AddressMode {
    /// Map a possibly out-of-range texel index into [0, size)
    fn resolve(self, i: i64, size: usize) -> usize {
        match self {
            AddressMode::ClampToEdge => i.clamp(0, size as i64 - 1) as usize,
            AddressMode::Repeat => i.rem_euclid(size as i64) as usize,
        }
    }
}

impl From<AddressMode> for wgpu::AddressMode {
    fn from(mode: AddressMode) -> Self {
        match mode {
            AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AddressMode::Repeat => wgpu::AddressMode::Repeat,
        }
    }
}

/// Baked cube of noise values in [0, 1]
#[derive(Debug, Clone)]
pub struct NoiseVolume {
    size: usize,
    frequency: f32,
    data: Vec<f32>,
}

impl NoiseVolume {
    /// Sample `noise` on a `size³` lattice spaced `frequency` apart
    ///
    /// Each value is remapped from [-1, 1] to [0, 1]. Z-slabs are filled in
    /// parallel; all workers read the same generator.
    pub fn bake(noise: &PerlinNoise3D, size: usize, frequency: f32) -> Result<Self> {
        if size == 0 || size > MAX_VOLUME_SIZE {
            return Err(Error::InvalidSize {
                size,
                max: MAX_VOLUME_SIZE,
            });
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(Error::InvalidFrequency(frequency));
        }

        let slab_len = size * size;
        let mut data = vec![0.0f32; slab_len * size];

        log::debug!(
            "Baking {}³ lattice (spacing {}) on {} threads",
            size,
            frequency,
            worker_count(size)
        );

        for_each_row(&mut data, slab_len, |z, slab| {
            fill_slab(noise, slab, size, frequency, z);
        });

        Ok(Self {
            size,
            frequency,
            data,
        })
    }

    /// Build the generator and bake in one step
    pub fn from_params(volume: &VolumeParams, noise: &NoiseParams) -> Result<Self> {
        let perlin = PerlinNoise3D::new(noise.seed);
        Self::bake(&perlin, volume.size, volume.frequency)
    }

    /// Lattice edge length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Noise-space spacing between lattice samples
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// All values, x fastest, then y, then z
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.size * (y + self.size * z)
    }

    /// Value at a lattice point
    ///
    /// # Panics
    /// If any coordinate is not below `size`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        assert!(x < self.size && y < self.size && z < self.size);
        self.data[self.index(x, y, z)]
    }

    /// Raw bytes of the value buffer (native-endian f32), ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Smallest, largest and mean value
    pub fn stats(&self) -> (f32, f32, f32) {
        let (min, max, sum) = self.data.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + f64::from(v)),
        );
        (min, max, (sum / self.data.len() as f64) as f32)
    }

    /// Trilinearly filtered lookup at normalized coordinates
    ///
    /// Texel centres sit at `(i + 0.5) / size`, the same convention GPU
    /// linear filtering uses, so this matches what a shader sees.
    pub fn sample(&self, p: Vec3, mode: AddressMode) -> f32 {
        let s = p * self.size as f32 - Vec3::splat(0.5);
        let base = s.floor();
        let t = s - base;

        let axis = |b: f32| {
            let i = b as i64;
            [
                mode.resolve(i, self.size),
                mode.resolve(i.saturating_add(1), self.size),
            ]
        };
        let ix = axis(base.x);
        let iy = axis(base.y);
        let iz = axis(base.z);

        let texel = |i: usize, j: usize, k: usize| self.data[self.index(ix[i], iy[j], iz[k])];

        let x00 = lerp(texel(0, 0, 0), texel(1, 0, 0), t.x);
        let x10 = lerp(texel(0, 1, 0), texel(1, 1, 0), t.x);
        let x01 = lerp(texel(0, 0, 1), texel(1, 0, 1), t.x);
        let x11 = lerp(texel(0, 1, 1), texel(1, 1, 1), t.x);

        lerp(lerp(x00, x10, t.y), lerp(x01, x11, t.y), t.z)
    }

    /// One z-slice as an 8-bit grayscale image (row = y)
    pub fn slice_image(&self, z: usize) -> Result<GrayImage> {
        if z >= self.size {
            return Err(Error::SliceOutOfRange { z, size: self.size });
        }
        let size = self.size as u32;
        Ok(GrayImage::from_fn(size, size, |x, y| {
            let v = self.get(x as usize, y as usize, z);
            Luma([(v * 255.0).round().clamp(0.0, 255.0) as u8])
        }))
    }

    /// Write the values as little-endian f32, x fastest
    pub fn write_raw(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for v in &self.data {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Create a 3D `R32Float` texture holding the volume
    ///
    /// Linear filtering of `R32Float` needs the device to be created with
    /// `wgpu::Features::FLOAT32_FILTERABLE`.
    pub fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
        let size = self.size as u32;
        let extent = wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: size,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Noise Volume"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: wgpu::TextureFormat::R32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            self.as_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * size),
                rows_per_image: Some(size),
            },
            extent,
        );

        texture
    }
}

/// Linear sampler matching `NoiseVolume::sample`
pub fn sampler_descriptor(mode: AddressMode) -> wgpu::SamplerDescriptor<'static> {
    let address_mode = wgpu::AddressMode::from(mode);
    wgpu::SamplerDescriptor {
        label: Some("Noise Volume Sampler"),
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    }
}

fn fill_slab(noise: &PerlinNoise3D, slab: &mut [f32], size: usize, frequency: f32, z: usize) {
    let nz = z as f32 * frequency;
    for y in 0..size {
        let ny = y as f32 * frequency;
        for x in 0..size {
            let nx = x as f32 * frequency;
            slab[x + size * y] = 0.5 + 0.5 * noise.sample(nx, ny, nz);
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
