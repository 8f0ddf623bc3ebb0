//! TUI Platformer (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_platformer::{core,engine,input,term,types}`
//! so the binary, integration tests and benches share one import path.

pub use tui_platformer_core as core;
pub use tui_platformer_engine as engine;
pub use tui_platformer_input as input;
pub use tui_platformer_term as term;
pub use tui_platformer_types as types;
