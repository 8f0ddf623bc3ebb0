//! Physics/collision resolver
//!
//! One call to [`step`] advances the character by one frame:
//!
//! 1. Horizontal input (left and right are applied independently, so holding
//!    both cancels out)
//! 2. Gravity, then vertical integration
//! 3. Ground query under the hitbox center
//! 4. Single-axis collision: a bottom edge below the ground snaps onto it
//!
//! There is no horizontal collision; terrain only stops vertical motion.

use crate::character::{Character, MotionState};
use crate::chunk::ChunkStore;

/// Per-frame motion constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub horizontal_speed: f32,
    pub gravity: f32,
    pub jump_force: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            horizontal_speed: crate::types::HORIZONTAL_SPEED,
            gravity: crate::types::GRAVITY,
            jump_force: crate::types::JUMP_FORCE,
        }
    }
}

/// Held horizontal inputs for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// What the collision check decided this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Was airborne, now snapped onto the ground.
    Landed,
    /// Was grounded and stayed grounded.
    Grounded,
    /// No ground contact this frame.
    Airborne,
}

/// Advance `character` by one frame against `chunks`.
pub fn step(
    character: &mut Character,
    keys: HeldKeys,
    params: &MotionParams,
    chunks: &mut ChunkStore,
    canvas_height: f32,
) -> StepOutcome {
    if keys.right {
        character.world_x += params.horizontal_speed;
    }
    if keys.left {
        character.world_x -= params.horizontal_speed;
    }

    character.vy += params.gravity;
    character.y += character.vy;

    let ground_y = chunks.ground_y(character.center_x() as f64, canvas_height);
    let penetrated = character.bottom() > ground_y;
    let was_grounded = character.is_grounded();

    if penetrated {
        character.y = ground_y - character.height;
        character.vy = 0.0;
    }
    character.state = MotionState::resolve(penetrated);

    match (was_grounded, character.state) {
        (false, MotionState::Grounded) => StepOutcome::Landed,
        (true, MotionState::Grounded) => StepOutcome::Grounded,
        (_, MotionState::Airborne) => StepOutcome::Airborne,
    }
}
