//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks
//! which movement keys are held. Movement is level-triggered (held flags),
//! jump is edge-triggered (one action per press). Terminals that never send
//! key-release events are handled with an auto-release timeout.

pub mod handler;
pub mod map;

pub use tui_platformer_core as core;
pub use tui_platformer_types as types;

pub use handler::InputHandler;
pub use map::{action_for_code, handle_key_event, should_quit};
