//! Chunk store - lazily generated terrain keyed by chunk index
//!
//! World X maps to a chunk with floor division and to a column with a
//! Euclidean remainder, so negative coordinates resolve exactly like positive
//! ones (`x = -1` is the last column of chunk `-1`). Chunks are generated on
//! first lookup and kept forever.

use std::collections::HashMap;

use log::debug;

use crate::terrain::{Chunk, TerrainSource};

/// Owns every generated chunk and the source that builds new ones.
pub struct ChunkStore {
    chunks: HashMap<i64, Chunk>,
    source: Box<dyn TerrainSource>,
    chunk_size: usize,
    block_size: u32,
}

impl std::fmt::Debug for ChunkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStore")
            .field("chunks", &self.chunks.len())
            .field("chunk_size", &self.chunk_size)
            .field("block_size", &self.block_size)
            .finish()
    }
}

impl ChunkStore {
    /// Create an empty store.
    ///
    /// `chunk_size` and `block_size` are clamped to at least 1.
    pub fn new(source: Box<dyn TerrainSource>, chunk_size: usize, block_size: u32) -> Self {
        Self {
            chunks: HashMap::new(),
            source,
            chunk_size: chunk_size.max(1),
            block_size: block_size.max(1),
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Width of one chunk in world pixels
    pub fn chunk_width(&self) -> f64 {
        self.chunk_size as f64 * self.block_size as f64
    }

    /// Index of the chunk covering `world_x` (floor semantics)
    pub fn chunk_index(&self, world_x: f64) -> i64 {
        (world_x / self.chunk_width()).floor() as i64
    }

    /// Column within its chunk covering `world_x`
    pub fn column_index(&self, world_x: f64) -> usize {
        let local_x = world_x.rem_euclid(self.chunk_width());
        let column = (local_x / self.block_size as f64).floor() as usize;
        // rem_euclid can round up to exactly chunk_width for tiny negative inputs.
        column.min(self.chunk_size - 1)
    }

    /// Terrain height (in blocks) under `world_x`, generating its chunk if needed.
    pub fn ground_height(&mut self, world_x: f64) -> u8 {
        let index = self.chunk_index(world_x);
        let column = self.column_index(world_x);
        let chunk = self.load(index);
        chunk.height(column).unwrap_or(0)
    }

    /// World Y of the terrain surface under `world_x` for a canvas of the given height.
    pub fn ground_y(&mut self, world_x: f64, canvas_height: f32) -> f32 {
        let blocks = self.ground_height(world_x);
        canvas_height - (blocks as u32 * self.block_size) as f32
    }

    /// Return the chunk at `index`, generating and caching it on first access.
    pub fn load(&mut self, index: i64) -> &Chunk {
        let Self {
            chunks,
            source,
            chunk_size,
            ..
        } = self;
        chunks.entry(index).or_insert_with(|| {
            let mut chunk = source.generate_chunk(index, *chunk_size);
            if chunk.len() != *chunk_size {
                // A short chunk would leave columns without ground; pad with the floor.
                let mut heights = chunk.heights().to_vec();
                heights.resize(*chunk_size, 0);
                chunk = Chunk::new(heights);
            }
            debug!("generated terrain chunk {}", index);
            chunk
        })
    }

    /// Generate every missing chunk in `first..=last`.
    pub fn ensure_range(&mut self, first: i64, last: i64) {
        for index in first..=last {
            self.load(index);
        }
    }

    /// Cached chunk at `index`, without generating it.
    pub fn get(&self, index: i64) -> Option<&Chunk> {
        self.chunks.get(&index)
    }

    pub fn contains(&self, index: i64) -> bool {
        self.chunks.contains_key(&index)
    }

    /// Number of generated chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
