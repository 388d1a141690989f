//! Procedural terrain: seeded heightfield generation and continuous lookup
//!
//! The track is a 1D heightfield sampled at a fixed horizontal step. Heights
//! between samples are linearly interpolated; slope comes from a central
//! difference over the interpolated surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::lerp;
use crate::tuning::TerrainShape;

/// One height measurement of the track surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSample {
    pub x: f32,
    pub y: f32,
}

/// Height of the track surface at `x` for a given seed
///
/// Sum of three sinusoids, each phase-shifted by the seed so distinct seeds
/// give distinct tracks with the same overall character.
#[inline]
pub fn terrain_height(shape: &TerrainShape, x: f32, seed: f32) -> f32 {
    let [a1, a2, a3] = shape.amplitudes;
    let [f1, f2, f3] = shape.frequencies;
    a1 * (f1 * x + seed).sin() + a2 * (f2 * x + 2.0 * seed).sin() + a3 * (f3 * x + 0.5 * seed).cos()
}

/// Generate `length + 1` samples covering `[start_x, start_x + length * step]`
///
/// Pure: the same arguments always produce bit-identical output.
pub fn generate_terrain(
    start_x: f32,
    length: usize,
    seed: f32,
    step: f32,
    shape: &TerrainShape,
) -> Vec<TerrainSample> {
    (0..=length)
        .map(|i| {
            let x = start_x + i as f32 * step;
            TerrainSample {
                x,
                y: terrain_height(shape, x, seed),
            }
        })
        .collect()
}

/// Sample intervals needed to reach `track_length` (the last sample may overshoot)
fn intervals_for(track_length: f32, step: f32) -> usize {
    (track_length / step).ceil() as usize
}

/// Linearly interpolated height over ascending samples; `0.0` outside their range
pub fn sample_height(samples: &[TerrainSample], x: f32) -> f32 {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };
    if !(x >= first.x && x <= last.x) {
        return 0.0;
    }

    // Index of the first sample with s.x > x; the bracket is [i - 1, i]
    let upper = samples.partition_point(|s| s.x <= x);
    if upper == 0 {
        return first.y;
    }
    if upper >= samples.len() {
        return last.y;
    }
    let s0 = samples[upper - 1];
    let s1 = samples[upper];
    let t = (x - s0.x) / (s1.x - s0.x);
    lerp(s0.y, s1.y, t)
}

/// Samples whose x lies in `[min_x, max_x]`, plus one neighbour on each side
/// so a renderer can draw the surface edge to edge.
pub fn samples_between(samples: &[TerrainSample], min_x: f32, max_x: f32) -> &[TerrainSample] {
    let start = samples.partition_point(|s| s.x < min_x).saturating_sub(1);
    let end = (samples.partition_point(|s| s.x <= max_x) + 1).min(samples.len());
    &samples[start.min(end)..end]
}

/// Generated track surface with height/slope queries
#[derive(Debug, Clone)]
pub struct Terrain {
    seed: f32,
    slope_probe: f32,
    samples: Vec<TerrainSample>,
}

impl Terrain {
    /// Generate the track covering `[0, track_length]`
    pub fn generate(
        seed: f32,
        track_length: f32,
        step: f32,
        slope_probe: f32,
        shape: &TerrainShape,
    ) -> Self {
        let intervals = intervals_for(track_length, step);
        let samples = generate_terrain(0.0, intervals, seed, step, shape);
        log::info!(
            "Generated terrain: seed={:.3}, {} samples over {} units",
            seed,
            samples.len(),
            track_length
        );
        Self {
            seed,
            slope_probe,
            samples,
        }
    }

    /// Perfectly flat track (every sample at y = 0)
    pub fn flat(track_length: f32, step: f32, slope_probe: f32) -> Self {
        let intervals = intervals_for(track_length, step);
        let samples = (0..=intervals)
            .map(|i| TerrainSample {
                x: i as f32 * step,
                y: 0.0,
            })
            .collect();
        Self {
            seed: 0.0,
            slope_probe,
            samples,
        }
    }

    /// Build a terrain from pre-computed samples (must be ascending in x)
    pub fn from_samples(samples: Vec<TerrainSample>, slope_probe: f32) -> Self {
        debug_assert!(samples.windows(2).all(|w| w[0].x < w[1].x));
        Self {
            seed: 0.0,
            slope_probe,
            samples,
        }
    }

    pub fn seed(&self) -> f32 {
        self.seed
    }

    pub fn samples(&self) -> &[TerrainSample] {
        &self.samples
    }

    /// Samples whose x lies in `[min_x, max_x]`, plus one neighbour on each side
    pub fn samples_between(&self, min_x: f32, max_x: f32) -> &[TerrainSample] {
        samples_between(&self.samples, min_x, max_x)
    }

    /// Interpolated surface height at `x`; `0.0` outside the sampled range
    pub fn height_at(&self, x: f32) -> f32 {
        sample_height(&self.samples, x)
    }

    /// Surface incline at `x` in radians (positive = uphill toward +x)
    pub fn angle_at(&self, x: f32) -> f32 {
        let d = self.slope_probe;
        let dy = self.height_at(x + d) - self.height_at(x - d);
        dy.atan2(2.0 * d)
    }

    /// Point on the surface at `x`
    pub fn surface_point(&self, x: f32) -> Vec2 {
        Vec2::new(x, self.height_at(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> TerrainShape {
        TerrainShape::default()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_terrain(0.0, 500, 42.5, 20.0, &shape());
        let b = generate_terrain(0.0, 500, 42.5, 20.0, &shape());
        assert_eq!(a.len(), 501);
        for (sa, sb) in a.iter().zip(&b) {
            assert_eq!(sa.x.to_bits(), sb.x.to_bits());
            assert_eq!(sa.y.to_bits(), sb.y.to_bits());
        }
    }

    #[test]
    fn test_distinct_seeds_differ() {
        let a = generate_terrain(0.0, 100, 1.0, 20.0, &shape());
        let b = generate_terrain(0.0, 100, 2.0, 20.0, &shape());
        assert!(a.iter().zip(&b).any(|(sa, sb)| sa.y != sb.y));
    }

    #[test]
    fn test_generation_covers_range() {
        let samples = generate_terrain(100.0, 10, 0.0, 5.0, &shape());
        assert_eq!(samples.first().unwrap().x, 100.0);
        assert_eq!(samples.last().unwrap().x, 150.0);
    }

    #[test]
    fn test_heights_stay_bounded() {
        let terrain = Terrain::generate(777.0, 20_000.0, 20.0, 5.0, &shape());
        let bound = shape().max_excursion();
        assert!(terrain.samples().iter().all(|s| s.y.abs() <= bound + 1e-3));
    }

    #[test]
    fn test_height_at_sample_is_exact() {
        let terrain = Terrain::generate(3.0, 2_000.0, 20.0, 5.0, &shape());
        for s in terrain.samples() {
            assert_eq!(terrain.height_at(s.x), s.y);
        }
    }

    #[test]
    fn test_height_interpolates_midpoint() {
        let terrain = Terrain::from_samples(
            vec![
                TerrainSample { x: 0.0, y: 0.0 },
                TerrainSample { x: 10.0, y: 20.0 },
                TerrainSample { x: 20.0, y: -10.0 },
            ],
            1.0,
        );
        assert!((terrain.height_at(5.0) - 10.0).abs() < 1e-5);
        assert!((terrain.height_at(15.0) - 5.0).abs() < 1e-5);
        assert_eq!(terrain.height_at(20.0), -10.0);
    }

    #[test]
    fn test_out_of_range_is_flat() {
        let terrain = Terrain::generate(9.0, 1_000.0, 20.0, 5.0, &shape());
        assert_eq!(terrain.height_at(-0.5), 0.0);
        assert_eq!(terrain.height_at(1_000.5), 0.0);
        assert_eq!(terrain.height_at(f32::NAN), 0.0);
    }

    #[test]
    fn test_angle_on_linear_ramp() {
        // y = x / 2 everywhere
        let samples = (0..=10)
            .map(|i| TerrainSample {
                x: i as f32 * 10.0,
                y: i as f32 * 5.0,
            })
            .collect();
        let terrain = Terrain::from_samples(samples, 2.0);
        let expected = 0.5f32.atan();
        assert!((terrain.angle_at(50.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_flat_angle_is_zero() {
        let terrain = Terrain::flat(1_000.0, 20.0, 5.0);
        assert_eq!(terrain.angle_at(500.0), 0.0);
        assert_eq!(terrain.height_at(123.0), 0.0);
    }

    #[test]
    fn test_uneven_track_is_fully_covered() {
        let terrain = Terrain::flat(1_010.0, 20.0, 5.0);
        assert_eq!(terrain.samples().len(), 52);
        assert_eq!(terrain.samples().last().unwrap().x, 1_020.0);
        let generated = Terrain::generate(4.0, 20_000.0, 20.0, 5.0, &shape());
        assert_eq!(generated.samples().len(), 1_001);
    }

    #[test]
    fn test_samples_between_includes_neighbours() {
        let terrain = Terrain::flat(1_000.0, 20.0, 5.0);
        let window = terrain.samples_between(105.0, 195.0);
        assert_eq!(window.first().unwrap().x, 100.0);
        assert_eq!(window.last().unwrap().x, 200.0);
    }
}
