//! Seedable 3D gradient noise (Ken Perlin's improved noise).
//!
//! The generator owns a shuffled, duplicated permutation table and evaluates
//! noise on demand; nothing about the field is materialized. Output lies in
//! roughly [-1, 1] and repeats every 256 units along each axis.

use noise::NoiseFn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seed used when none is given
pub const DEFAULT_SEED: u32 = 237;

/// Quintic smoothstep 6t^5 - 15t^4 + 10t^3 (C2 continuous at cell edges)
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product of the corner offset with one of 16 hash-selected gradients.
///
/// The low four bits pick two of the three axes and their signs. Hashes 12
/// and 14 repeat the x axis, which slightly biases the gradient set; that
/// bias is part of the noise's look and is kept.
#[inline]
fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// 3D Perlin noise generator
///
/// Immutable after construction, so one instance can be shared by any number
/// of threads sampling concurrently.
#[derive(Clone)]
pub struct PerlinNoise3D {
    /// Shuffled 0..=255 followed by a copy of itself
    perm: [u8; 512],
}

impl PerlinNoise3D {
    /// Create a generator whose permutation table is shuffled by `seed`
    pub fn new(seed: u32) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);

        log::debug!("Perlin permutation table built (seed {})", seed);
        Self { perm }
    }

    /// The doubled permutation table
    pub fn permutation(&self) -> &[u8; 512] {
        &self.perm
    }

    #[inline]
    fn p(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    /// Sample the noise field at a point
    ///
    /// Returns a value in approximately [-1, 1]. Integer lattice points always
    /// return 0. Coordinates with a magnitude far beyond 2^16 lose fractional
    /// precision, so the field degrades to blocky output there rather than
    /// failing.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());

        // Lattice cell, wrapped into the table
        let xi = (fx as i32 & 255) as usize;
        let yi = (fy as i32 & 255) as usize;
        let zi = (fz as i32 & 255) as usize;

        // Position inside the cell, each in [0, 1)
        let x = x - fx;
        let y = y - fy;
        let z = z - fz;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        let perm = &self.perm;
        lerp(
            lerp(
                lerp(
                    grad(perm[aa], x, y, z),
                    grad(perm[ba], x - 1.0, y, z),
                    u,
                ),
                lerp(
                    grad(perm[ab], x, y - 1.0, z),
                    grad(perm[bb], x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    grad(perm[aa + 1], x, y, z - 1.0),
                    grad(perm[ba + 1], x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    grad(perm[ab + 1], x, y - 1.0, z - 1.0),
                    grad(perm[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }
}

impl Default for PerlinNoise3D {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl std::fmt::Debug for PerlinNoise3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinNoise3D")
            .field("perm", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

/// Lets the generator feed `noise` crate combinators
impl NoiseFn<f64, 3> for PerlinNoise3D {
    fn get(&self, point: [f64; 3]) -> f64 {
        f64::from(self.sample(point[0] as f32, point[1] as f32, point[2] as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_points(seed: u64, count: usize, extent: f32) -> Vec<[f32; 3]> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                [
                    rng.gen_range(-extent..extent),
                    rng.gen_range(-extent..extent),
                    rng.gen_range(-extent..extent),
                ]
            })
            .collect()
    }

    #[test]
    fn test_permutation_table_is_doubled_permutation() {
        let noise = PerlinNoise3D::default();
        let perm = noise.permutation();

        let mut seen = [false; 256];
        for &v in &perm[..256] {
            assert!(!seen[v as usize], "value {} repeated", v);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(perm[..256], perm[256..]);
    }

    #[test]
    fn test_table_is_actually_shuffled() {
        let noise = PerlinNoise3D::default();
        let identity: Vec<u8> = (0..=255).collect();
        assert_ne!(&noise.permutation()[..256], identity.as_slice());
    }

    #[test]
    fn test_origin_is_zero() {
        assert_eq!(PerlinNoise3D::new(237).sample(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_integer_lattice_points_are_zero() {
        let noise = PerlinNoise3D::default();
        for &(x, y, z) in &[(1.0, 2.0, 3.0), (-7.0, 255.0, 256.0), (100.0, -3.0, 0.0)] {
            assert_eq!(noise.sample(x, y, z), 0.0, "non-zero at ({x}, {y}, {z})");
        }
    }

    #[test]
    fn test_deterministic_across_instances() {
        let a = PerlinNoise3D::new(237);
        let b = PerlinNoise3D::new(237);
        for [x, y, z] in random_points(1, 500, 300.0) {
            assert_eq!(a.sample(x, y, z).to_bits(), b.sample(x, y, z).to_bits());
            assert_eq!(a.sample(x, y, z).to_bits(), a.sample(x, y, z).to_bits());
        }
    }

    #[test]
    fn test_output_range() {
        let noise = PerlinNoise3D::default();
        let mut max_abs: f32 = 0.0;
        for [x, y, z] in random_points(2, 50_000, 1000.0) {
            let v = noise.sample(x, y, z);
            assert!(v.is_finite());
            max_abs = max_abs.max(v.abs());
        }
        assert!(max_abs <= 1.05, "noise reached {}", max_abs);
        // The field is not degenerate
        assert!(max_abs > 0.5, "noise only reached {}", max_abs);
    }

    #[test]
    fn test_periodic_every_256_units() {
        let noise = PerlinNoise3D::new(99);
        for [x, y, z] in random_points(3, 500, 100.0) {
            let v = noise.sample(x, y, z);
            assert!((v - noise.sample(x + 256.0, y, z)).abs() < 1e-3);
            assert!((v - noise.sample(x, y + 256.0, z)).abs() < 1e-3);
            assert!((v - noise.sample(x, y, z - 256.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_continuous_across_cell_boundary() {
        let noise = PerlinNoise3D::default();
        let eps = 1e-3;
        for &(y, z) in &[(0.3, 0.7), (12.25, -4.5), (-31.9, 8.1)] {
            let mut x: f32 = 0.99;
            while x < 1.01 {
                let delta = (noise.sample(x + eps, y, z) - noise.sample(x, y, z)).abs();
                // Slope of the field stays well under 4 everywhere
                assert!(delta < 4.0 * eps, "jump of {} at x = {}", delta, x);
                x += eps;
            }
        }
    }

    #[test]
    fn test_difference_shrinks_with_step() {
        let noise = PerlinNoise3D::default();
        let mut coarse = 0.0;
        let mut fine = 0.0;
        for [_, y, z] in random_points(4, 200, 50.0) {
            let x = 0.995;
            let base = noise.sample(x, y, z);
            coarse += (noise.sample(x + 1e-2, y, z) - base).abs();
            fine += (noise.sample(x + 1e-3, y, z) - base).abs();
        }
        // Roughly linear in the step: a tenth of the step, about a tenth of the change
        assert!(fine < coarse * 0.2, "coarse {} fine {}", coarse, fine);
        assert!(fine > coarse * 0.05, "coarse {} fine {}", coarse, fine);
    }

    #[test]
    fn test_different_seeds_are_uncorrelated() {
        let a = PerlinNoise3D::new(237);
        let b = PerlinNoise3D::new(238);
        assert_ne!(a.permutation(), b.permutation());

        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for i in 0..12 {
            for j in 0..12 {
                for k in 0..12 {
                    let p = (
                        i as f32 * 0.37 + 0.11,
                        j as f32 * 0.53 + 0.29,
                        k as f32 * 0.71 + 0.07,
                    );
                    xs.push(a.sample(p.0, p.1, p.2));
                    ys.push(b.sample(p.0, p.1, p.2));
                }
            }
        }

        let n = xs.len() as f32;
        let mx = xs.iter().sum::<f32>() / n;
        let my = ys.iter().sum::<f32>() / n;
        let cov: f32 = xs.iter().zip(&ys).map(|(x, y)| (x - mx) * (y - my)).sum();
        let vx: f32 = xs.iter().map(|x| (x - mx).powi(2)).sum();
        let vy: f32 = ys.iter().map(|y| (y - my).powi(2)).sum();
        let corr = cov / (vx * vy).sqrt();
        assert!(corr.abs() < 0.3, "correlation {}", corr);
    }

    #[test]
    fn test_gradient_selection_keeps_x_repeats() {
        // 12 and 14 reuse x instead of z
        assert_eq!(grad(12, 0.25, 0.5, 0.75), 0.5 + 0.25);
        assert_eq!(grad(14, 0.25, 0.5, 0.75), 0.5 - 0.25);
        assert_eq!(grad(13, 0.25, 0.5, 0.75), -0.5 + 0.75);
        // Only the low four bits matter
        assert_eq!(grad(3, 0.25, 0.5, 0.75), grad(3 + 16 * 5, 0.25, 0.5, 0.75));
        assert_eq!(grad(0, 0.25, 0.5, 0.75), 0.75);
    }

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn test_debug_shows_table_prefix() {
        let noise = PerlinNoise3D::default();
        let text = format!("{:?}", noise);
        assert!(text.starts_with("PerlinNoise3D { perm: ["), "{}", text);
        assert!(text.contains(&noise.permutation()[0].to_string()));
        assert!(text.ends_with(".. }"), "{}", text);
    }

    #[test]
    fn test_noise_fn_matches_sample() {
        let noise = PerlinNoise3D::default();
        let direct = noise.sample(1.25, -3.5, 7.75);
        assert_eq!(noise.get([1.25, -3.5, 7.75]), f64::from(direct));
    }

    #[test]
    fn test_shared_across_threads() {
        let noise = PerlinNoise3D::default();
        let expected = noise.sample(4.2, 1.7, 9.9);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(noise.sample(4.2, 1.7, 9.9), expected));
            }
        });
    }
}
