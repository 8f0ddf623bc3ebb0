//! Terrain generation - per-column block heights
//!
//! Two generators exist and both are used:
//!
//! - [`generate_run`]: a weighted random walk. Each column repeats the previous
//!   height with probability [`REPEAT_PROBABILITY`](crate::types::REPEAT_PROBABILITY),
//!   otherwise it draws a fresh height. Used once, for the spawn run.
//! - [`generate_column`]: independent uniform heights. Every chunk fetched
//!   during play (chunk 0 included) is built from these, with no smoothing.

use crate::rng::{RandomSource, SimpleRng};

/// Immutable run of column heights, in blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    heights: Box<[u8]>,
}

impl Chunk {
    pub fn new(heights: Vec<u8>) -> Self {
        Self {
            heights: heights.into_boxed_slice(),
        }
    }

    /// Flat chunk where every column has the same height
    pub fn flat(len: usize, height: u8) -> Self {
        Self::new(vec![height; len])
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height of a column, in blocks
    pub fn height(&self, column: usize) -> Option<u8> {
        self.heights.get(column).copied()
    }

    pub fn heights(&self) -> &[u8] {
        &self.heights
    }
}

/// Height range and smoothing for the generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainParams {
    pub min_height: u8,
    pub max_height: u8,
    pub repeat_probability: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            min_height: crate::types::MIN_TERRAIN_HEIGHT,
            max_height: crate::types::MAX_TERRAIN_HEIGHT,
            repeat_probability: crate::types::REPEAT_PROBABILITY,
        }
    }
}

/// Single uniform column height in `[min_height, max_height]`.
pub fn generate_column(min_height: u8, max_height: u8, rng: &mut impl RandomSource) -> u8 {
    rng.next_inclusive(min_height, max_height)
}

/// Smoothed run of `length` heights.
///
/// The first value is uniform; every later value repeats its predecessor with
/// probability `params.repeat_probability`, otherwise it is a fresh uniform draw
/// (which may coincide with the predecessor).
pub fn generate_run(length: usize, params: &TerrainParams, rng: &mut impl RandomSource) -> Vec<u8> {
    let mut out = Vec::with_capacity(length);
    if length == 0 {
        return out;
    }

    let mut prev = generate_column(params.min_height, params.max_height, rng);
    out.push(prev);
    for _ in 1..length {
        if rng.next_f32() >= params.repeat_probability {
            prev = generate_column(params.min_height, params.max_height, rng);
        }
        out.push(prev);
    }
    out
}

/// Independent uniform heights for one chunk.
pub fn generate_independent(
    length: usize,
    params: &TerrainParams,
    rng: &mut impl RandomSource,
) -> Vec<u8> {
    (0..length)
        .map(|_| generate_column(params.min_height, params.max_height, rng))
        .collect()
}

/// Source of chunk contents for the chunk store.
pub trait TerrainSource {
    /// Build the chunk stored under `index`, `len` columns long.
    fn generate_chunk(&mut self, index: i64, len: usize) -> Chunk;
}

/// Default terrain: independent uniform columns from a seeded generator.
///
/// Each chunk draws from its own stream derived from the seed and the chunk
/// index, so a seed yields the same world whatever order chunks are visited in.
#[derive(Debug, Clone)]
pub struct RandomTerrain {
    params: TerrainParams,
    rng: SimpleRng,
}

impl RandomTerrain {
    pub fn new(seed: u32, params: TerrainParams) -> Self {
        Self {
            params,
            rng: SimpleRng::new(seed),
        }
    }
}

impl TerrainSource for RandomTerrain {
    fn generate_chunk(&mut self, index: i64, len: usize) -> Chunk {
        let mut stream = self.rng.fork(index as u64);
        Chunk::new(generate_independent(len, &self.params, &mut stream))
    }
}
