//! Core simulation module - pure, deterministic, and testable
//!
//! Terrain generation, the lazily populated chunk store and the
//! gravity/collision resolver. No terminal, input or timing code lives here,
//! so the whole simulation can be driven headless from tests.
//!
//! # Module Structure
//!
//! - [`rng`]: seeded LCG behind the [`RandomSource`] trait
//! - [`terrain`]: smoothed spawn run and independent per-chunk generators
//! - [`chunk`]: chunk store keyed by `floor(world_x / chunk_width)`
//! - [`character`]: character state and the grounded/airborne state machine
//! - [`physics`]: per-frame movement, gravity and ground collision
//! - [`config`]: world configuration with environment overrides
//! - [`world`]: simulation context tying the above together
//!
//! # Example
//!
//! ```
//! use tui_platformer_core::{World, WorldConfig};
//! use tui_platformer_types::GameAction;
//!
//! let config = WorldConfig { seed: 12345, ..WorldConfig::default() };
//! let mut world = World::new(config, 960.0);
//!
//! world.apply_action(GameAction::MoveRight);
//! world.tick();
//! assert_eq!(world.character().world_x, 5.0);
//! ```

pub mod character;
pub mod chunk;
pub mod config;
pub mod physics;
pub mod rng;
pub mod terrain;
pub mod world;

pub use tui_platformer_types as types;

pub use character::{Character, MotionState};
pub use chunk::ChunkStore;
pub use config::WorldConfig;
pub use physics::{step, HeldKeys, MotionParams, StepOutcome};
pub use rng::{RandomSource, SimpleRng};
pub use terrain::{
    generate_column, generate_independent, generate_run, Chunk, RandomTerrain, TerrainParams,
    TerrainSource,
};
pub use world::World;
