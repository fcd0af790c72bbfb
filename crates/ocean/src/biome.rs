//! Ocean biome regions and hostile-density weighting.

use noise::{NoiseFn, Perlin};
use rand::prelude::*;

/// Types of seafloor biomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiomeType {
    /// Open sand flats with sparse cover.
    SandFlats,
    /// Coral reef shelf, busy and shallow.
    ReefShelf,
    /// Dense kelp forest, good ambush ground.
    KelpForest,
    /// Deep trench walls and cold dark water.
    Trench,
    /// Hydrothermal vent field, turbulent.
    VentField,
    /// Debris field of sunken wrecks.
    Wreckage,
}

/// Per-biome tuning affecting what spawns there.
#[derive(Debug, Clone, Copy)]
pub struct BiomeConfig {
    pub biome_type: BiomeType,
    /// Enemy submarine spawn multiplier for this biome.
    pub hostile_density: f32,
    /// Wildlife (shark) spawn multiplier.
    pub creature_density: f32,
}

impl BiomeConfig {
    pub fn from_type(biome_type: BiomeType) -> Self {
        match biome_type {
            BiomeType::SandFlats => Self {
                biome_type,
                hostile_density: 0.6,
                creature_density: 0.8,
            },
            BiomeType::ReefShelf => Self {
                biome_type,
                hostile_density: 0.8,
                creature_density: 1.6,
            },
            BiomeType::KelpForest => Self {
                biome_type,
                hostile_density: 1.4,
                creature_density: 1.2,
            },
            BiomeType::Trench => Self {
                biome_type,
                hostile_density: 1.8,
                creature_density: 0.4,
            },
            BiomeType::VentField => Self {
                biome_type,
                hostile_density: 1.0,
                creature_density: 0.3,
            },
            BiomeType::Wreckage => Self {
                biome_type,
                hostile_density: 1.6,
                creature_density: 0.6,
            },
        }
    }
}

/// All biome types for iteration.
pub const ALL_BIOMES: [BiomeType; 6] = [
    BiomeType::SandFlats,
    BiomeType::ReefShelf,
    BiomeType::KelpForest,
    BiomeType::Trench,
    BiomeType::VentField,
    BiomeType::Wreckage,
];

/// Source of biome blend weights at world (x, z) positions.
///
/// Weights are in [0, 1] and need not sum to 1; a position deep inside one
/// region reports a single weight near 1.
pub trait BiomeQuery {
    fn blend_at(&self, x: f32, z: f32) -> Vec<(BiomeType, f32)>;
}

/// Expected enemy spawn density at a position: sum of weight × hostile
/// density over the blended biomes.
pub fn hostile_density_at(biomes: &dyn BiomeQuery, x: f32, z: f32) -> f32 {
    biomes
        .blend_at(x, z)
        .iter()
        .map(|(ty, w)| w * BiomeConfig::from_type(*ty).hostile_density)
        .sum()
}

/// Noise-based biome sampler for an ocean region.
/// Large-scale Perlin noise assigns biome regions across the floor.
pub struct OceanBiomes {
    /// Biome types present in this region (2-4 types).
    pub biomes: Vec<BiomeType>,
    region_noise: Perlin,
    /// Scale: lower = larger biome regions.
    pub region_scale: f64,
}

impl OceanBiomes {
    /// Create a multi-biome ocean region from a seed.
    /// Picks 2-4 distinct biome types and builds noise for spatial selection.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let num_biomes = rng.gen_range(2..=4);
        let mut available = ALL_BIOMES.to_vec();
        for i in (1..available.len()).rev() {
            let j = rng.gen_range(0..=i);
            available.swap(i, j);
        }
        let biomes: Vec<BiomeType> = available.into_iter().take(num_biomes).collect();

        Self {
            biomes,
            region_noise: Perlin::new(rng.gen()),
            region_scale: 0.004 + rng.gen::<f64>() * 0.003, // 0.004..0.007
        }
    }
}

impl BiomeQuery for OceanBiomes {
    fn blend_at(&self, x: f32, z: f32) -> Vec<(BiomeType, f32)> {
        let n = self.biomes.len();
        if n == 0 {
            return vec![(BiomeType::SandFlats, 1.0)];
        }

        // Large-scale region selection noise
        let val = self
            .region_noise
            .get([x as f64 * self.region_scale, z as f64 * self.region_scale]);
        // Map noise [-1, 1] to [0, n)
        let mapped = ((val * 0.5 + 0.5) * n as f64).clamp(0.0, (n - 1) as f64);

        let idx_a = mapped.floor() as usize;
        let idx_b = (idx_a + 1).min(n - 1);
        let frac = (mapped - idx_a as f64) as f32;

        // Sharpen the blend: most water is clearly one biome, with smooth
        // transitions at boundaries.
        let t = (frac * 2.0 - 1.0).clamp(-1.0, 1.0);
        let blend = (t * t * t * 0.5 + 0.5).clamp(0.0, 1.0);

        if idx_a == idx_b || blend <= f32::EPSILON {
            vec![(self.biomes[idx_a], 1.0)]
        } else {
            vec![
                (self.biomes[idx_a], 1.0 - blend),
                (self.biomes[idx_b], blend),
            ]
        }
    }
}
