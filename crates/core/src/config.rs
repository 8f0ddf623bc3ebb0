//! World configuration
//!
//! Defaults are the constants in `types`. Every value can be overridden from the
//! environment:
//!
//! - `PLATFORMER_SEED`: terrain seed (default: derived from the clock)
//! - `PLATFORMER_CHUNK_SIZE`: columns per chunk
//! - `PLATFORMER_MIN_HEIGHT` / `PLATFORMER_MAX_HEIGHT`: column heights, in blocks
//! - `PLATFORMER_GRAVITY`, `PLATFORMER_JUMP_FORCE`, `PLATFORMER_SPEED`: motion tuning

use std::env;
use std::str::FromStr;

use log::warn;

use crate::physics::MotionParams;
use crate::terrain::TerrainParams;
use crate::types::{BLOCK_SIZE, CHARACTER_HEIGHT, CHARACTER_WIDTH, CHUNK_SIZE};

/// Largest per-frame speed, gravity or jump force accepted from configuration.
pub const MAX_MOTION_PER_FRAME: f32 = 1_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub seed: u32,
    pub chunk_size: usize,
    pub block_size: u32,
    pub terrain: TerrainParams,
    pub motion: MotionParams,
    pub character_width: f32,
    pub character_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            chunk_size: CHUNK_SIZE,
            block_size: BLOCK_SIZE,
            terrain: TerrainParams::default(),
            motion: MotionParams::default(),
            character_width: CHARACTER_WIDTH,
            character_height: CHARACTER_HEIGHT,
        }
    }
}

impl WorldConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    ///
    /// Unparseable values fall back to the default; the result is normalized.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = parse_var(&lookup, "PLATFORMER_SEED").unwrap_or_else(clock_seed);
        let chunk_size = parse_var(&lookup, "PLATFORMER_CHUNK_SIZE").unwrap_or(defaults.chunk_size);
        let min_height = parse_var(&lookup, "PLATFORMER_MIN_HEIGHT")
            .unwrap_or(defaults.terrain.min_height);
        let max_height = parse_var(&lookup, "PLATFORMER_MAX_HEIGHT")
            .unwrap_or(defaults.terrain.max_height);
        let gravity = parse_var(&lookup, "PLATFORMER_GRAVITY").unwrap_or(defaults.motion.gravity);
        let jump_force =
            parse_var(&lookup, "PLATFORMER_JUMP_FORCE").unwrap_or(defaults.motion.jump_force);
        let horizontal_speed =
            parse_var(&lookup, "PLATFORMER_SPEED").unwrap_or(defaults.motion.horizontal_speed);

        Self {
            seed,
            chunk_size,
            terrain: TerrainParams {
                min_height,
                max_height,
                ..defaults.terrain
            },
            motion: MotionParams {
                horizontal_speed,
                gravity,
                jump_force,
            },
            ..defaults
        }
        .normalized()
    }

    /// Fix values that would break the world invariants.
    pub fn normalized(mut self) -> Self {
        if self.chunk_size == 0 {
            warn!("chunk size 0 is invalid, using {}", CHUNK_SIZE);
            self.chunk_size = CHUNK_SIZE;
        }
        if self.block_size == 0 {
            warn!("block size 0 is invalid, using {}", BLOCK_SIZE);
            self.block_size = BLOCK_SIZE;
        }
        if self.terrain.min_height > self.terrain.max_height {
            warn!(
                "min height {} exceeds max height {}, swapping",
                self.terrain.min_height, self.terrain.max_height
            );
            std::mem::swap(&mut self.terrain.min_height, &mut self.terrain.max_height);
        }
        let defaults = MotionParams::default();
        self.motion.gravity = bounded_motion("gravity", self.motion.gravity, defaults.gravity);
        self.motion.jump_force =
            bounded_motion("jump force", self.motion.jump_force, defaults.jump_force);
        self.motion.horizontal_speed = bounded_motion(
            "speed",
            self.motion.horizontal_speed,
            defaults.horizontal_speed,
        );
        self
    }

    /// Width of one chunk in world pixels
    pub fn chunk_width(&self) -> f64 {
        self.chunk_size as f64 * self.block_size as f64
    }
}

/// Finite motion value within `MAX_MOTION_PER_FRAME`, or a logged replacement.
fn bounded_motion(name: &str, value: f32, default: f32) -> f32 {
    if !value.is_finite() {
        warn!("{} must be finite, using {}", name, default);
        return default;
    }
    if value.abs() > MAX_MOTION_PER_FRAME {
        let clamped = value.clamp(-MAX_MOTION_PER_FRAME, MAX_MOTION_PER_FRAME);
        warn!("{} {} is out of range, using {}", name, value, clamped);
        return clamped;
    }
    value
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
