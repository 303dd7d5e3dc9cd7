//! Fire and smoke shading parameters.

/// Fractal Brownian motion parameters
#[derive(Debug, Clone)]
pub struct FbmParams {
    /// Number of octaves summed
    pub octaves: u32,

    /// Weight of the first octave
    pub amplitude: f32,

    /// Frequency multiplier between octaves (dimensionless)
    pub lacunarity: f32,

    /// Amplitude multiplier between octaves (dimensionless)
    pub gain: f32,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 5,
            amplitude: 0.5,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl FbmParams {
    /// Upper bound of the FBM sum for inputs in [0, 1]
    pub fn max_value(&self) -> f32 {
        let mut total = 0.0;
        let mut a = self.amplitude;
        for _ in 0..self.octaves {
            total += a;
            a *= self.gain;
        }
        total
    }
}

/// Fire/smoke composition constants
#[derive(Debug, Clone)]
pub struct FireParams {
    /// Time multiplier for the upward scroll (noise units per second)
    pub scroll_speed: f32,

    /// Horizontal stretch of screen UV into noise space
    pub uv_scale_x: f32,

    /// Vertical stretch of screen UV into noise space
    pub uv_scale_y: f32,

    /// Depth drift rate relative to the scroll (slice animation)
    pub depth_drift: f32,

    /// Exponent sharpening the fire turbulence
    pub fire_power: f32,

    /// Offset applied to the smoke lookup (decorrelates it from fire)
    pub smoke_offset: [f32; 3],

    /// Extra depth drift for smoke relative to the scroll (slower layer)
    pub smoke_drift: f32,

    /// Smoke density smoothstep edges
    pub smoke_edges: (f32, f32),

    /// Height mask smoothstep edges (UV y, 0 = bottom)
    pub height_edges: (f32, f32),

    /// Fire colour at zero intensity (linear RGB)
    pub fire_cool: [f32; 3],

    /// Fire colour at intensity 0.5 (linear RGB)
    pub fire_hot: [f32; 3],

    /// Thin smoke colour (linear RGB)
    pub smoke_light: [f32; 3],

    /// Dense smoke colour (linear RGB)
    pub smoke_dense: [f32; 3],
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            scroll_speed: 0.2,
            uv_scale_x: 1.5,
            uv_scale_y: 2.5,
            depth_drift: 0.5,
            fire_power: 3.0,
            smoke_offset: [0.0, 1.0, 0.0],
            smoke_drift: -0.2,
            smoke_edges: (0.4, 0.9),
            height_edges: (0.2, 1.0),
            fire_cool: [1.0, 0.4, 0.0],  // Orange
            fire_hot: [1.0, 1.0, 0.2],   // Yellow-white
            smoke_light: [0.1, 0.1, 0.1],
            smoke_dense: [0.4, 0.4, 0.4],
        }
    }
}
