//! World - the simulation context
//!
//! Owns everything the frame loop mutates: the chunk store, the character,
//! the held horizontal keys and the canvas height. Nothing lives in globals;
//! the frame driver calls [`World::tick`] and the renderer reads the world
//! through shared references.

use log::{debug, info};

use crate::character::Character;
use crate::chunk::ChunkStore;
use crate::config::WorldConfig;
use crate::physics::{self, HeldKeys, StepOutcome};
use crate::rng::SimpleRng;
use crate::terrain::{generate_run, RandomTerrain, TerrainSource};
use crate::types::GameAction;

pub struct World {
    config: WorldConfig,
    chunks: ChunkStore,
    character: Character,
    keys: HeldKeys,
    canvas_height: f32,
    spawn_run: Vec<u8>,
    frame: u64,
}

impl World {
    /// Create a world with the default seeded terrain.
    pub fn new(config: WorldConfig, canvas_height: f32) -> Self {
        let source = RandomTerrain::new(config.seed, config.terrain);
        Self::with_source(config, Box::new(source), canvas_height)
    }

    /// Create a world whose chunks come from `source`.
    ///
    /// The character spawns on the first column of a smoothed run, which is
    /// generated once here and is independent of the chunk contents.
    pub fn with_source(
        config: WorldConfig,
        source: Box<dyn TerrainSource>,
        canvas_height: f32,
    ) -> Self {
        let config = config.normalized();
        let mut rng = SimpleRng::new(config.seed);
        let spawn_run = generate_run(config.chunk_size, &config.terrain, &mut rng);

        let mut character = Character::new(config.character_width, config.character_height);
        let spawn_blocks = spawn_run.first().copied().unwrap_or(config.terrain.min_height);
        character.place_on(canvas_height - (spawn_blocks as u32 * config.block_size) as f32);

        info!(
            "world seed {} chunk size {} heights {}..={} spawn height {}",
            config.seed,
            config.chunk_size,
            config.terrain.min_height,
            config.terrain.max_height,
            spawn_blocks
        );

        Self {
            chunks: ChunkStore::new(source, config.chunk_size, config.block_size),
            config,
            character,
            keys: HeldKeys::default(),
            canvas_height,
            spawn_run,
            frame: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    pub fn chunks_mut(&mut self) -> &mut ChunkStore {
        &mut self.chunks
    }

    /// Smoothed run the character spawned on
    pub fn spawn_run(&self) -> &[u8] {
        &self.spawn_run
    }

    pub fn keys(&self) -> HeldKeys {
        self.keys
    }

    pub fn set_keys(&mut self, keys: HeldKeys) {
        self.keys = keys;
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }

    /// Resize the canvas. Ground Y moves with it; the next tick re-settles the character.
    pub fn set_canvas_height(&mut self, canvas_height: f32) {
        self.canvas_height = canvas_height;
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply an input action.
    ///
    /// Movement actions press the corresponding key; use [`World::set_keys`]
    /// to release. Jump is edge-triggered and returns whether it took effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => {
                self.keys.left = true;
                true
            }
            GameAction::MoveRight => {
                self.keys.right = true;
                true
            }
            GameAction::Jump => self.jump(),
        }
    }

    /// Jump if grounded.
    pub fn jump(&mut self) -> bool {
        let jumped = self.character.jump(self.config.motion.jump_force);
        if jumped {
            debug!("jump at x={:.1}", self.character.world_x);
        }
        jumped
    }

    /// Advance physics by one frame.
    pub fn tick(&mut self) -> StepOutcome {
        self.frame += 1;
        let outcome = physics::step(
            &mut self.character,
            self.keys,
            &self.config.motion,
            &mut self.chunks,
            self.canvas_height,
        );
        if outcome == StepOutcome::Landed {
            debug!(
                "landed at x={:.1} y={:.1} (frame {})",
                self.character.world_x, self.character.y, self.frame
            );
        }
        outcome
    }

    /// Inclusive chunk index range intersecting a viewport of `viewport_width`
    /// pixels centered on the character.
    pub fn visible_chunks(&self, viewport_width: f32) -> (i64, i64) {
        let half = viewport_width as f64 / 2.0;
        let x = self.character.world_x as f64;
        (
            self.chunks.chunk_index(x - half),
            self.chunks.chunk_index(x + half),
        )
    }

    /// Make sure every chunk on screen, plus one on each side, exists.
    pub fn load_chunks_around(&mut self, viewport_width: f32) {
        let (first, last) = self.visible_chunks(viewport_width);
        self.chunks
            .ensure_range(first.saturating_sub(1), last.saturating_add(1));
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("character", &self.character)
            .field("chunks", &self.chunks)
            .field("canvas_height", &self.canvas_height)
            .field("frame", &self.frame)
            .finish()
    }
}
