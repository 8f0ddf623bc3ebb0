//! Frame engine - drives the simulation once per frame.
//!
//! Each frame runs strictly in order: FPS measurement, physics, chunk
//! loading around the viewport, then presentation through a [`FrameSink`].
//! The engine owns the [`World`](crate::core::World); sinks only borrow it.

pub mod clock;
pub mod driver;

pub use tui_platformer_core as core;
pub use tui_platformer_types as types;

pub use clock::FrameClock;
pub use driver::{FrameDriver, FrameSink, FrameStats};
