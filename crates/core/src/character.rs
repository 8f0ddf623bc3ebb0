//! Character state and its grounded/airborne state machine.

use crate::types::{CHARACTER_HEIGHT, CHARACTER_WIDTH};

/// Vertical motion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Standing on terrain; vertical velocity is zero and jumps are allowed.
    Grounded,
    /// Rising or falling.
    Airborne,
}

impl MotionState {
    /// State after a collision check.
    ///
    /// Penetrating the ground means the character was snapped onto it.
    pub fn resolve(penetrated: bool) -> Self {
        if penetrated {
            MotionState::Grounded
        } else {
            MotionState::Airborne
        }
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self, MotionState::Grounded)
    }
}

/// The player character, in world coordinates.
///
/// `(world_x, y)` is the top-left corner of the hitbox; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub world_x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vy: f32,
    pub state: MotionState,
}

impl Character {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            world_x: 0.0,
            y: 0.0,
            width,
            height,
            vy: 0.0,
            state: MotionState::Airborne,
        }
    }

    /// Horizontal center of the hitbox, used for ground queries
    pub fn center_x(&self) -> f32 {
        self.world_x + self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    /// Stand the character on a surface at `ground_y`.
    pub fn place_on(&mut self, ground_y: f32) {
        self.y = ground_y - self.height;
        self.vy = 0.0;
        self.state = MotionState::Grounded;
    }

    /// Start a jump. Only effective while grounded; returns whether it happened.
    ///
    /// The character becomes airborne immediately, before the next collision check.
    pub fn jump(&mut self, jump_force: f32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vy = -jump_force;
        self.state = MotionState::Airborne;
        true
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new(CHARACTER_WIDTH, CHARACTER_HEIGHT)
    }
}
