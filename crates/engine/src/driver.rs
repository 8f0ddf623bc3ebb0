//! Frame driver: one call per display frame.

use std::time::Instant;

use anyhow::Result;
use log::trace;

use crate::clock::FrameClock;
use crate::core::{StepOutcome, World};

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    /// Rounded frames per second, `None` until two frames have been seen.
    pub fps: Option<u32>,
    pub outcome: StepOutcome,
}

/// Destination of a frame (terminal, test recorder, ...).
pub trait FrameSink {
    /// Canvas size in world pixels as `(width, height)`.
    fn canvas_size(&self) -> (f32, f32);

    /// Draw the world after physics and chunk loading have run.
    fn present(&mut self, world: &World, stats: &FrameStats) -> Result<()>;
}

/// Owns the world and sequences each frame.
#[derive(Debug)]
pub struct FrameDriver {
    world: World,
    clock: FrameClock,
}

impl FrameDriver {
    pub fn new(world: World) -> Self {
        Self {
            world,
            clock: FrameClock::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run one frame at `now`: measure, simulate, load chunks, present.
    pub fn run_frame(&mut self, now: Instant, sink: &mut impl FrameSink) -> Result<FrameStats> {
        let fps = self.clock.tick(now);

        let (canvas_w, canvas_h) = sink.canvas_size();
        if canvas_h != self.world.canvas_height() {
            trace!("canvas height {} -> {}", self.world.canvas_height(), canvas_h);
            self.world.set_canvas_height(canvas_h);
        }

        let outcome = self.world.tick();
        self.world.load_chunks_around(canvas_w);

        let stats = FrameStats {
            frame: self.world.frame(),
            fps,
            outcome,
        };
        sink.present(&self.world, &stats)?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::bail;

    use super::*;
    use crate::core::{Chunk, TerrainSource, WorldConfig};

    struct Flat;

    impl TerrainSource for Flat {
        fn generate_chunk(&mut self, _index: i64, len: usize) -> Chunk {
            Chunk::flat(len, 2)
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(FrameStats, f32, usize)>,
        fail: bool,
    }

    impl FrameSink for Recorder {
        fn canvas_size(&self) -> (f32, f32) {
            (800.0, 580.0)
        }

        fn present(&mut self, world: &World, stats: &FrameStats) -> Result<()> {
            if self.fail {
                bail!("surface lost");
            }
            self.frames
                .push((*stats, world.character().y, world.chunks().len()));
            Ok(())
        }
    }

    fn driver() -> FrameDriver {
        let mut config = WorldConfig {
            seed: 1,
            chunk_size: 10,
            ..WorldConfig::default()
        };
        config.terrain.min_height = 2;
        config.terrain.max_height = 2;
        FrameDriver::new(World::with_source(config, Box::new(Flat), 580.0))
    }

    #[test]
    fn frame_runs_physics_and_loading_before_present() {
        let mut d = driver();
        let mut sink = Recorder::default();
        let t0 = Instant::now();

        let stats = d.run_frame(t0, &mut sink).unwrap();
        assert_eq!(stats.frame, 1);
        assert_eq!(stats.fps, None);
        assert_eq!(stats.outcome, StepOutcome::Grounded);

        // Present saw the settled character and the preloaded neighbourhood:
        // viewport [-400, 400] with chunk width 400 covers -1..=1, plus one each side.
        let (_, y, chunks) = sink.frames[0];
        assert_eq!(y, 432.0);
        assert_eq!(chunks, 5);

        let stats = d.run_frame(t0 + Duration::from_millis(20), &mut sink).unwrap();
        assert_eq!(stats.fps, Some(50));
        assert_eq!(sink.frames.len(), 2);
    }

    #[test]
    fn canvas_height_follows_sink() {
        let mut d = driver();
        d.world_mut().set_canvas_height(1000.0);
        let mut sink = Recorder::default();
        d.run_frame(Instant::now(), &mut sink).unwrap();
        assert_eq!(d.world().canvas_height(), 580.0);
    }

    #[test]
    fn present_errors_propagate() {
        let mut d = driver();
        let mut sink = Recorder {
            fail: true,
            ..Recorder::default()
        };
        assert!(d.run_frame(Instant::now(), &mut sink).is_err());
        // Physics still ran.
        assert_eq!(d.world().frame(), 1);
    }
}
