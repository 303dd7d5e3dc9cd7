//! Fire and smoke composition over a baked noise volume.
//!
//! Two FBM layers scroll upward through the volume: a sharpened one drives the
//! orange-to-yellow flame gradient, a slower offset one drives smoke density.
//! A vertical mask blends from flame at the bottom to smoke at the top.

use glam::{Vec2, Vec3};
use image::RgbImage;

use crate::fbm::fbm;
use crate::parallel::for_each_row;
use crate::params::{FbmParams, FireParams, RenderConfig};
use crate::volume::{AddressMode, NoiseVolume};

/// Hermite step between two edges, clamped to [0, 1]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend; `t` outside [0, 1] extrapolates
fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// CPU fire/smoke shader
pub struct FireShader {
    volume: NoiseVolume,
    fbm: FbmParams,
    params: FireParams,
    address_mode: AddressMode,
}

impl FireShader {
    pub fn new(
        volume: NoiseVolume,
        fbm: FbmParams,
        params: FireParams,
        address_mode: AddressMode,
    ) -> Self {
        Self {
            volume,
            fbm,
            params,
            address_mode,
        }
    }

    fn layer(&self, p: Vec3) -> f32 {
        fbm(&self.volume, p, &self.fbm, self.address_mode)
    }

    /// Colour of one point on screen
    ///
    /// # Arguments
    /// * `uv` - Screen position, (0, 0) bottom-left to (1, 1) top-right
    /// * `time_s` - Animation time in seconds
    ///
    /// # Returns
    /// Linear RGB; channels may leave [0, 1] where the flame gradient
    /// extrapolates
    pub fn shade(&self, uv: Vec2, time_s: f32) -> Vec3 {
        let fp = &self.params;
        let t = time_s * fp.scroll_speed;
        let p = Vec3::new(
            uv.x * fp.uv_scale_x,
            uv.y * fp.uv_scale_y + t,
            t * fp.depth_drift,
        );

        let fire = self.layer(p).powf(fp.fire_power);

        let smoke_p = p
            + Vec3::from_array(fp.smoke_offset)
            + Vec3::new(0.0, 0.0, t * fp.smoke_drift);
        let smoke = smoothstep(fp.smoke_edges.0, fp.smoke_edges.1, self.layer(smoke_p));

        let fire_color = mix(
            Vec3::from_array(fp.fire_cool),
            Vec3::from_array(fp.fire_hot),
            fire * 2.0,
        );
        let smoke_color = mix(
            Vec3::from_array(fp.smoke_light),
            Vec3::from_array(fp.smoke_dense),
            smoke,
        );

        let height_mask = smoothstep(fp.height_edges.0, fp.height_edges.1, uv.y);
        mix(fire_color, smoke_color, height_mask)
    }

    /// Render a full frame at `time_s`
    ///
    /// Pixel centres are shaded; row 0 is the top of the image. Rows are split
    /// across threads.
    pub fn render_frame(&self, config: &RenderConfig, time_s: f32) -> RgbImage {
        let (width, height) = (config.width, config.height);
        let mut img = RgbImage::new(width, height);
        if width == 0 || height == 0 {
            return img;
        }

        let row_len = width as usize * 3;
        for_each_row(&mut img, row_len, |row_idx, row| {
            let v = 1.0 - (row_idx as f32 + 0.5) / height as f32;
            for (x, pixel) in row.chunks_mut(3).enumerate() {
                let u = (x as f32 + 0.5) / width as f32;
                let color = self.shade(Vec2::new(u, v), time_s);
                for (channel, value) in pixel.iter_mut().zip(color.to_array()) {
                    *channel = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
                }
            }
        });

        img
    }
}
