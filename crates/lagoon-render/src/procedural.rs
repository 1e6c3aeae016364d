//! Procedural fallback textures.
//!
//! The demos can run without any files on disk: every texture slot has a
//! seeded generator producing a plausible stand-in. Generators are
//! deterministic for a given seed so screenshots are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::{AssetKind, DecodedImage};

/// Value-noise lattice with fractal octaves.
struct ValueNoise {
    lattice: Vec<f32>,
    size: usize,
}

impl ValueNoise {
    fn new(seed: u64, size: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let lattice = (0..size * size).map(|_| rng.gen::<f32>()).collect();
        Self { lattice, size }
    }

    fn at(&self, x: usize, y: usize) -> f32 {
        self.lattice[(x % self.size) + (y % self.size) * self.size]
    }

    fn sample(&self, x: f32, y: f32) -> f32 {
        let xi = x.floor() as usize;
        let yi = y.floor() as usize;
        let fx = smoothstep(x - x.floor());
        let fy = smoothstep(y - y.floor());
        let top = lerp(self.at(xi, yi), self.at(xi + 1, yi), fx);
        let bottom = lerp(self.at(xi, yi + 1), self.at(xi + 1, yi + 1), fx);
        lerp(top, bottom, fy)
    }

    fn fbm(&self, x: f32, y: f32, octaves: u32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = 1.0;
        let mut norm = 0.0;
        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            norm += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        total / norm
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn height_at(noise: &ValueNoise, x: u32, y: u32, size: u32) -> f32 {
    let u = x as f32 / size as f32 * 8.0;
    let v = y as f32 / size as f32 * 8.0;
    noise.fbm(u, v, 5)
}

/// Grayscale fractal heightmap, values spanning the full byte range.
pub fn heightmap(size: u32, seed: u64) -> DecodedImage {
    let noise = ValueNoise::new(seed, 64);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let h = (height_at(&noise, x, y, size) * 255.0) as u8;
            pixels.extend_from_slice(&[h, h, h, 255]);
        }
    }
    DecodedImage { kind: AssetKind::TerrainHeightmap, width: size, height: size, pixels }
}

/// Albedo colored by the same heightfield: sand low, grass mid, rock high.
pub fn terrain_albedo(size: u32, seed: u64) -> DecodedImage {
    let noise = ValueNoise::new(seed, 64);
    let detail = ValueNoise::new(seed.wrapping_add(1), 64);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let h = height_at(&noise, x, y, size);
            let speckle = detail.fbm(x as f32 / 8.0, y as f32 / 8.0, 3) * 0.15;
            let base = if h < 0.35 {
                [0.76, 0.70, 0.50]
            } else if h < 0.7 {
                [0.30, 0.52, 0.26]
            } else {
                [0.48, 0.46, 0.44]
            };
            for channel in base {
                pixels.push(((channel + speckle).clamp(0.0, 1.0) * 255.0) as u8);
            }
            pixels.push(255);
        }
    }
    DecodedImage { kind: AssetKind::TerrainAlbedo, width: size, height: size, pixels }
}

/// Tangent-space ripple normals from a sum of sine waves, encoded 0..255.
pub fn water_normal_map(size: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let u = x as f32 / size as f32 * std::f32::consts::TAU;
            let v = y as f32 / size as f32 * std::f32::consts::TAU;
            // Derivatives of overlapping waves give the slope directly.
            let dx = (u * 3.0 + v).cos() * 0.5 + (u * 7.0 - v * 2.0).cos() * 0.25;
            let dy = (v * 3.0 - u).cos() * 0.5 + (v * 5.0 + u * 2.0).cos() * 0.25;
            pixels.push(((dx * 0.5 + 0.5) * 255.0) as u8);
            pixels.push(255);
            pixels.push(((dy * 0.5 + 0.5) * 255.0) as u8);
            pixels.push(255);
        }
    }
    DecodedImage { kind: AssetKind::WaterNormal, width: size, height: size, pixels }
}

/// Low-frequency offset field for the water's scrolling distortion lookup.
pub fn water_distortion_map(size: u32, seed: u64) -> DecodedImage {
    let noise_u = ValueNoise::new(seed, 32);
    let noise_v = ValueNoise::new(seed.wrapping_add(7), 32);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let u = x as f32 / size as f32 * 4.0;
            let v = y as f32 / size as f32 * 4.0;
            pixels.push((noise_u.fbm(u, v, 3) * 255.0) as u8);
            pixels.push((noise_v.fbm(u, v, 3) * 255.0) as u8);
            pixels.push(0);
            pixels.push(255);
        }
    }
    DecodedImage { kind: AssetKind::WaterDistortion, width: size, height: size, pixels }
}

/// Six cubemap faces with a shared horizon gradient, +X -X +Y -Y +Z -Z.
pub fn sky_faces(size: u32) -> [DecodedImage; 6] {
    std::array::from_fn(|face| sky_face(face, size))
}

fn sky_face(face: usize, size: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let u = (x as f32 + 0.5) / size as f32 * 2.0 - 1.0;
            let v = (y as f32 + 0.5) / size as f32 * 2.0 - 1.0;
            let dir = face_direction(face, u, v);
            let elevation = (dir[1] / (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt())
                .clamp(-1.0, 1.0);
            let t = (elevation * 0.5 + 0.5).powf(0.8);
            let r = lerp(0.85, 0.25, t);
            let g = lerp(0.88, 0.45, t);
            let b = lerp(0.92, 0.85, t);
            pixels.push((r * 255.0) as u8);
            pixels.push((g * 255.0) as u8);
            pixels.push((b * 255.0) as u8);
            pixels.push(255);
        }
    }
    DecodedImage { kind: AssetKind::SkyFace(face), width: size, height: size, pixels }
}

// Standard cubemap face orientations; v grows downward in texture space.
fn face_direction(face: usize, u: f32, v: f32) -> [f32; 3] {
    match face {
        0 => [1.0, -v, -u],
        1 => [-1.0, -v, u],
        2 => [u, 1.0, v],
        3 => [u, -1.0, -v],
        4 => [u, -v, 1.0],
        _ => [-u, -v, -1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heightmap_is_deterministic_per_seed() {
        let a = heightmap(32, 42);
        let b = heightmap(32, 42);
        let c = heightmap(32, 43);
        assert_eq!(a.pixels, b.pixels);
        assert_ne!(a.pixels, c.pixels);
    }

    #[test]
    fn heightmap_is_grayscale_rgba() {
        let image = heightmap(16, 1);
        assert_eq!(image.pixels.len(), 16 * 16 * 4);
        for texel in image.pixels.chunks_exact(4) {
            assert_eq!(texel[0], texel[1]);
            assert_eq!(texel[1], texel[2]);
            assert_eq!(texel[3], 255);
        }
    }

    #[test]
    fn sky_faces_cover_all_slots() {
        let faces = sky_faces(8);
        for (i, face) in faces.iter().enumerate() {
            assert_eq!(face.kind, AssetKind::SkyFace(i));
            assert_eq!(face.pixels.len(), 8 * 8 * 4);
        }
    }

    #[test]
    fn up_face_is_brighter_blue_than_down_face() {
        let faces = sky_faces(8);
        let mean_b = |img: &DecodedImage| {
            img.pixels.chunks_exact(4).map(|t| t[2] as u32).sum::<u32>() / 64
        };
        let mean_r = |img: &DecodedImage| {
            img.pixels.chunks_exact(4).map(|t| t[0] as u32).sum::<u32>() / 64
        };
        // +Y looks up into saturated sky, -Y toward the pale horizon fill.
        assert!(mean_r(&faces[2]) < mean_r(&faces[3]));
        assert!(mean_b(&faces[2]) > mean_r(&faces[2]));
    }
}
