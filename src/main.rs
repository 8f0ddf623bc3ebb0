//! Terminal platformer runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the `term`
//! crate. Log output goes to `PLATFORMER_LOG_PATH` because the terminal is
//! in raw alternate-screen mode while the game runs.

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};
use log::{info, trace};

use tui_platformer::core::{World, WorldConfig};
use tui_platformer::engine::{FrameDriver, FrameSink, FrameStats};
use tui_platformer::input::{handle_key_event, should_quit, InputHandler};
use tui_platformer::term::{FrameBuffer, SceneView, TerminalRenderer, Tileset, Viewport};
use tui_platformer::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let config = WorldConfig::from_env();
    let tileset_path = env::var_os("PLATFORMER_TILESET").map(PathBuf::from);
    // Everything the first frame draws is loaded before the terminal is touched.
    let tiles = Tileset::preload(tileset_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    let result = term
        .enter()
        .and_then(|releases| run(&mut term, config, tiles, releases));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    match env::var_os("PLATFORMER_LOG_PATH") {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating log file {}", PathBuf::from(&path).display()))?;
            env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(Env::default().default_filter_or("off")).init();
        }
    }
    Ok(())
}

/// Renders each frame into a reused framebuffer and flushes the diff.
struct TerminalSink<'a> {
    term: &'a mut TerminalRenderer,
    view: SceneView,
    tiles: Tileset,
    fb: FrameBuffer,
    viewport: Viewport,
}

impl TerminalSink<'_> {
    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.term.invalidate();
    }
}

impl FrameSink for TerminalSink<'_> {
    fn canvas_size(&self) -> (f32, f32) {
        self.view.canvas_size(self.viewport)
    }

    fn present(&mut self, world: &World, stats: &FrameStats) -> Result<()> {
        self.view
            .render_into(world, &self.tiles, stats.fps, self.viewport, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: WorldConfig,
    tiles: Tileset,
    releases: bool,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut sink = TerminalSink {
        term,
        view: SceneView::default(),
        tiles,
        fb: FrameBuffer::new(w, h),
        viewport: Viewport::new(w, h),
    };

    let (_, canvas_h) = sink.canvas_size();
    let mut driver = FrameDriver::new(World::new(config, canvas_h));

    let mut input = InputHandler::new();
    input.set_release_events_supported(releases);

    let frame_duration = Duration::from_millis(TICK_MS as u64);
    let mut next_frame = Instant::now();
    info!("game loop started ({}x{} cells)", w, h);

    loop {
        // Input with timeout until the next frame is due.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            info!("quit after {} frames", driver.world().frame());
                            return Ok(());
                        }
                        if handle_key_event(key).is_some()
                            && input.handle_key_press(key.code, now) == Some(GameAction::Jump)
                        {
                            driver.world_mut().jump();
                        }
                    }
                    KeyEventKind::Repeat => input.handle_key_repeat(key.code, now),
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(w, h) => sink.resize(w, h),
                Event::FocusLost => input.reset(),
                _ => {}
            }
        }

        let now = Instant::now();
        if now < next_frame {
            continue;
        }
        next_frame = now + frame_duration;

        driver.world_mut().set_keys(input.update(now));
        let stats = driver.run_frame(now, &mut sink)?;
        trace!("frame {} fps {:?} {:?}", stats.frame, stats.fps, stats.outcome);
    }
}
