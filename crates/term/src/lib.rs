//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the scene is drawn into a
//! framebuffer of styled cells, which is then diffed and flushed to the
//! terminal. World pixels map onto cells through a fixed [`Scale`].
//!
//! - [`fb`]: framebuffer with clipped, signed-coordinate blits
//! - [`tileset`]: sprite bundle preloaded before the first frame
//! - [`scene_view`]: terrain, character and FPS readout for one frame
//! - [`renderer`]: crossterm output with diff encoding

pub mod fb;
pub mod renderer;
pub mod scene_view;
pub mod tileset;

pub use tui_platformer_core as core;
pub use tui_platformer_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use scene_view::{Scale, SceneView, Viewport};
pub use tileset::{Sprite, SpriteCell, Tileset, REQUIRED_SPRITES};
