//! SceneView: maps the world into a terminal framebuffer.
//!
//! This module is pure (no I/O). The character is pinned to the horizontal
//! center of the screen; terrain scrolls underneath it. Chunks that have not
//! been generated yet are skipped rather than generated here.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::core::World;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::tileset::{Sprite, Tileset};
use crate::types::{PX_PER_COLUMN, PX_PER_ROW};

// "FPS: " plus the ten digits of u32::MAX.
const FPS_LABEL_CAP: usize = 16;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// World pixels per terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub px_per_col: u32,
    pub px_per_row: u32,
}

impl Default for Scale {
    fn default() -> Self {
        // A 40px block becomes 2x1 cells, compensating for tall terminal glyphs.
        Self {
            px_per_col: PX_PER_COLUMN,
            px_per_row: PX_PER_ROW,
        }
    }
}

/// A lightweight terminal renderer for the platformer scene.
pub struct SceneView {
    scale: Scale,
    sky: CellStyle,
    hud: CellStyle,
}

impl Default for SceneView {
    fn default() -> Self {
        Self::new(Scale::default())
    }
}

impl SceneView {
    pub fn new(scale: Scale) -> Self {
        Self {
            scale: Scale {
                px_per_col: scale.px_per_col.max(1),
                px_per_row: scale.px_per_row.max(1),
            },
            sky: CellStyle::new(Rgb::new(150, 190, 230), Rgb::new(118, 170, 222)),
            hud: CellStyle {
                bold: true,
                ..CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(118, 170, 222))
            },
        }
    }

    /// Canvas size in world pixels for a terminal viewport, as `(width, height)`.
    pub fn canvas_size(&self, viewport: Viewport) -> (f32, f32) {
        (
            (viewport.width as u32 * self.scale.px_per_col) as f32,
            (viewport.height as u32 * self.scale.px_per_row) as f32,
        )
    }

    /// Render the world into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport and cleared here.
    pub fn render_into(
        &self,
        world: &World,
        tiles: &Tileset,
        fps: Option<u32>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.sky.cell(' '));

        self.draw_terrain(world, tiles, viewport, fb);
        self.draw_character(world, &tiles.character, viewport, fb);
        self.draw_fps(fps, fb);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        world: &World,
        tiles: &Tileset,
        fps: Option<u32>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(world, tiles, fps, viewport, &mut fb);
        fb
    }

    fn draw_terrain(
        &self,
        world: &World,
        tiles: &Tileset,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let chunks = world.chunks();
        let (canvas_w, canvas_h) = self.canvas_size(viewport);
        let half_w = canvas_w as f64 / 2.0;
        let world_x = world.character().world_x as f64;
        let block = chunks.block_size() as f64;
        let chunk_w = chunks.chunk_width();
        let top_height = world.config().terrain.max_height;

        let block_cols = (chunks.block_size() / self.scale.px_per_col).max(1) as u16;
        let block_rows = (chunks.block_size() / self.scale.px_per_row).max(1) as u16;

        let (first, last) = world.visible_chunks(canvas_w);
        for index in first..=last {
            let Some(chunk) = chunks.get(index) else {
                continue;
            };

            // Screen X of the chunk's left edge.
            let chunk_left = index as f64 * chunk_w - world_x.floor() + half_w;
            let first_col = ((-chunk_left) / block).floor().max(0.0) as usize;
            let end_col = (((canvas_w as f64 - chunk_left) / block).ceil().max(0.0) as usize)
                .min(chunk.len());

            for column in first_col..end_col {
                let Some(height) = chunk.height(column) else {
                    continue;
                };
                let x_px = chunk_left + column as f64 * block;
                let cx = self.col_of(x_px);

                for level in 0..height {
                    let y_px = canvas_h as f64 - (level as f64 + 1.0) * block;
                    let sprite = if level + 1 == height {
                        cap_sprite(tiles, height, top_height)
                    } else {
                        &tiles.dirt
                    };
                    fb.blit_tiled(cx, self.row_of(y_px), block_cols, block_rows, sprite);
                }
            }
        }
    }

    fn draw_character(
        &self,
        world: &World,
        sprite: &Sprite,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        let c = world.character();
        let (canvas_w, _) = self.canvas_size(viewport);
        // Left edge at the horizontal center, as the terrain offset assumes.
        let cx = self.col_of(canvas_w as f64 / 2.0);
        // Anchor by the feet so a grounded character touches the top block.
        let bottom_row = (c.bottom() as f64 / self.scale.px_per_row as f64).ceil() as i32 - 1;
        let top_row = bottom_row - sprite.height() as i32 + 1;
        fb.blit(cx, top_row, sprite);
    }

    fn draw_fps(&self, fps: Option<u32>, fb: &mut FrameBuffer) {
        fb.put_str(1, 0, &fps_label(fps), self.hud);
    }

    fn col_of(&self, x_px: f64) -> i32 {
        (x_px / self.scale.px_per_col as f64).floor() as i32
    }

    fn row_of(&self, y_px: f64) -> i32 {
        (y_px / self.scale.px_per_row as f64).floor() as i32
    }
}

/// `FPS: <n>`, or `FPS: --` while no rate is known.
fn fps_label(fps: Option<u32>) -> ArrayString<FPS_LABEL_CAP> {
    let mut label = ArrayString::new();
    label.push_str("FPS: ");
    match fps {
        Some(fps) => {
            let written = write!(label, "{}", fps);
            debug_assert!(written.is_ok(), "u32 always fits the FPS label");
        }
        None => label.push_str("--"),
    }
    label
}

/// Cap for the top block of a column: grass on the highest plateaus,
/// the dirt/grass transition everywhere else.
fn cap_sprite(tiles: &Tileset, height: u8, top_height: u8) -> &Sprite {
    if height >= top_height {
        &tiles.grass
    } else {
        &tiles.dirt_grass
    }
}
