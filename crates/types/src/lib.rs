//! Core types module - shared constants and actions
//!
//! Pure data with no external dependencies, shared by the simulation, the
//! input layer and the terminal renderer.
//!
//! # World units
//!
//! All simulation values are expressed in world "pixels". The terrain is a
//! row of columns, each `BLOCK_SIZE` pixels wide, stacked with 1..N blocks.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BLOCK_SIZE` | 40 | Edge length of one terrain block |
//! | `CHUNK_SIZE` | 500 | Columns per generated chunk |
//! | `MIN_TERRAIN_HEIGHT` | 2 | Lowest column, in blocks |
//! | `MAX_TERRAIN_HEIGHT` | 3 | Highest column, in blocks |
//! | `REPEAT_PROBABILITY` | 0.7 | Chance the spawn run repeats the previous column |
//!
//! # Motion tuning
//!
//! Per-frame values, applied once every `TICK_MS`:
//!
//! | Constant | Value |
//! |----------|-------|
//! | `HORIZONTAL_SPEED` | 5.0 |
//! | `GRAVITY` | 0.5 |
//! | `JUMP_FORCE` | 8.0 |
//!
//! # Examples
//!
//! ```
//! use tui_platformer_types::{BLOCK_SIZE, CHUNK_SIZE};
//!
//! assert_eq!(CHUNK_SIZE as u32 * BLOCK_SIZE, 20_000);
//! ```

/// Edge length of a terrain block in world pixels
pub const BLOCK_SIZE: u32 = 40;

/// Number of terrain columns per chunk
pub const CHUNK_SIZE: usize = 500;

/// Lowest terrain column, in blocks
pub const MIN_TERRAIN_HEIGHT: u8 = 2;

/// Highest terrain column, in blocks
pub const MAX_TERRAIN_HEIGHT: u8 = 3;

/// Probability that the spawn run repeats the previous column height
pub const REPEAT_PROBABILITY: f32 = 0.7;

/// Character hitbox width in world pixels
pub const CHARACTER_WIDTH: f32 = 40.0;

/// Character hitbox height in world pixels
pub const CHARACTER_HEIGHT: f32 = 68.0;

/// Horizontal movement per frame while a direction is held
pub const HORIZONTAL_SPEED: f32 = 5.0;

/// Downward acceleration added to the vertical velocity every frame
pub const GRAVITY: f32 = 0.5;

/// Upward velocity applied by a jump
pub const JUMP_FORCE: f32 = 8.0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// World pixels covered by one terminal column
pub const PX_PER_COLUMN: u32 = 20;

/// World pixels covered by one terminal row
pub const PX_PER_ROW: u32 = 40;

/// Actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Start (or keep) moving left
    MoveLeft,
    /// Start (or keep) moving right
    MoveRight,
    /// Jump if the character stands on the ground
    Jump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_terrain_is_two_to_three_blocks() {
        assert_eq!(BLOCK_SIZE, 40);
        assert_eq!(CHUNK_SIZE, 500);
        assert_eq!(MIN_TERRAIN_HEIGHT, 2);
        assert_eq!(MAX_TERRAIN_HEIGHT, 3);
        assert_eq!(REPEAT_PROBABILITY, 0.7);
    }

    #[test]
    fn default_motion_tuning() {
        assert_eq!(HORIZONTAL_SPEED, 5.0);
        assert_eq!(GRAVITY, 0.5);
        assert_eq!(JUMP_FORCE, 8.0);
        assert_eq!(CHARACTER_WIDTH, 40.0);
        assert_eq!(CHARACTER_HEIGHT, 68.0);
    }

    #[test]
    fn one_block_is_two_columns_by_one_row() {
        assert_eq!(BLOCK_SIZE / PX_PER_COLUMN, 2);
        assert_eq!(BLOCK_SIZE / PX_PER_ROW, 1);
    }
}
