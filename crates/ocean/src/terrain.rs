//! Seafloor height queries.

use noise::{NoiseFn, Perlin};

/// Result of a seafloor height query.
///
/// Terrain may be backed by streamed chunks, so a sample can be in flight
/// when asked for. Callers keep a last-known-good height and fall back to it
/// for the tick; the authoritative value lands on a later query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightQuery {
    /// Height is available now.
    Ready(f32),
    /// Sample still being computed; use a fallback this tick.
    Pending,
}

impl HeightQuery {
    /// Resolve against a fallback height. A non-finite sample from a backing
    /// store is treated as missing — NaN must never reach the simulation.
    pub fn ready_or(self, fallback: f32) -> f32 {
        match self {
            HeightQuery::Ready(h) if h.is_finite() => h,
            HeightQuery::Ready(h) => {
                log::warn!("terrain returned non-finite height {h}, using fallback {fallback}");
                fallback
            }
            HeightQuery::Pending => fallback,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, HeightQuery::Ready(h) if h.is_finite())
    }
}

/// Source of seafloor heights at world (x, z) positions.
pub trait TerrainQuery {
    fn height_at(&self, x: f32, z: f32) -> HeightQuery;
}

/// Plain functions work as synchronous terrain sources; handy for tests and
/// for hosts that sample an already-resident heightmap.
impl<F> TerrainQuery for F
where
    F: Fn(f32, f32) -> f32,
{
    fn height_at(&self, x: f32, z: f32) -> HeightQuery {
        HeightQuery::Ready(self(x, z))
    }
}

/// Noise-backed seafloor: layered Perlin octaves around a base depth, with a
/// low-frequency trench channel carving deeper runs. Deterministic per seed.
pub struct Seafloor {
    base_noise: Perlin,
    detail_noise: Perlin,
    trench_noise: Perlin,
    /// Mean floor height (negative; the surface is y = 0).
    pub base_depth: f32,
    /// Amplitude of the rolling dunes/ridges.
    pub height_scale: f32,
    /// Extra depth carved where the trench channel runs.
    pub trench_depth: f32,
    /// Base noise frequency; lower = broader features.
    pub frequency: f64,
}

impl Seafloor {
    pub fn new(seed: u32) -> Self {
        Self {
            base_noise: Perlin::new(seed),
            detail_noise: Perlin::new(seed.wrapping_add(1)),
            trench_noise: Perlin::new(seed.wrapping_add(2)),
            base_depth: -220.0,
            height_scale: 55.0,
            trench_depth: 90.0,
            frequency: 0.004,
        }
    }

    /// Sample the floor height. Always below the surface.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let xf = x as f64;
        let zf = z as f64;

        // Broad rolling floor plus finer ridge detail
        let broad = self.base_noise.get([xf * self.frequency, zf * self.frequency]) as f32;
        let detail = self
            .detail_noise
            .get([xf * self.frequency * 4.0, zf * self.frequency * 4.0]) as f32;

        // Trench channel: sharp dropoff where the channel noise peaks
        let channel = self
            .trench_noise
            .get([xf * self.frequency * 0.5, zf * self.frequency * 0.5]) as f32;
        let trench = ((channel - 0.55).max(0.0) / 0.45).powi(2) * self.trench_depth;

        let height = self.base_depth + broad * self.height_scale + detail * self.height_scale * 0.2
            - trench;

        // Floor never breaches the surface
        height.min(-20.0)
    }
}

impl TerrainQuery for Seafloor {
    fn height_at(&self, x: f32, z: f32) -> HeightQuery {
        HeightQuery::Ready(self.sample(x, z))
    }
}
