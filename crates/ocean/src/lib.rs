//! Ocean world queries for OpenDepths.
//!
//! The simulation core never generates terrain meshes; it only asks two
//! questions about the world:
//! - how deep is the seafloor at (x, z)? (`TerrainQuery`)
//! - which biomes blend at (x, z), and how hostile are they? (`BiomeQuery`)
//!
//! Default noise-backed implementations are provided for headless runs and
//! tests; a streaming chunk system can implement the same traits.

pub mod biome;
pub mod terrain;

pub use biome::*;
pub use terrain::*;
