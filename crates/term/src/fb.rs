//! Framebuffer and style types for terminal rendering.
//!
//! Drawing calls take signed coordinates and clip against the buffer, so
//! scene code can blit sprites that hang off any edge of the screen.

use crate::tileset::Sprite;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub fn cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().cell(' ')
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are unspecified
    /// afterwards; callers clear before drawing.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x as i32, y as i32).map(|i| self.cells[i])
    }

    /// Write a cell; off-screen writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        for (dx, ch) in s.chars().enumerate() {
            self.set(x + dx as i32, y, style.cell(ch));
        }
    }

    /// Draw `sprite` with its top-left corner at `(x, y)`.
    ///
    /// Transparent sprite cells leave the buffer untouched; cells without a
    /// background keep the background already drawn underneath.
    pub fn blit(&mut self, x: i32, y: i32, sprite: &Sprite) {
        for sy in 0..sprite.height() {
            for sx in 0..sprite.width() {
                let Some(src) = sprite.get(sx, sy) else {
                    continue;
                };
                let Some(i) = self.idx(x + sx as i32, y + sy as i32) else {
                    continue;
                };
                let under = self.cells[i].style.bg;
                self.cells[i] = Cell {
                    ch: src.ch,
                    style: CellStyle {
                        fg: src.fg,
                        bg: src.bg.unwrap_or(under),
                        bold: src.bold,
                    },
                };
            }
        }
    }

    /// Cover a `w` x `h` cell rectangle by repeating `sprite`.
    pub fn blit_tiled(&mut self, x: i32, y: i32, w: u16, h: u16, sprite: &Sprite) {
        let sw = sprite.width().max(1) as i32;
        let sh = sprite.height().max(1) as i32;
        let (w, h) = (w as i32, h as i32);
        let mut ty = 0;
        while ty < h {
            let mut tx = 0;
            while tx < w {
                self.blit(x + tx, y + ty, sprite);
                tx += sw;
            }
            ty += sh;
        }
    }

    /// Text content of row `y` (handy in tests and logs).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.ch))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::SpriteCell;

    fn sprite(rows: &[&str]) -> Sprite {
        let fg = Rgb::new(1, 2, 3);
        let cells = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| {
                        (ch != ' ').then_some(SpriteCell {
                            ch,
                            fg,
                            bg: None,
                            bold: false,
                        })
                    })
                    .collect()
            })
            .collect();
        Sprite::from_rows(cells).unwrap()
    }

    #[test]
    fn set_clips_off_screen() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set(-1, 0, CellStyle::default().cell('x'));
        fb.set(3, 0, CellStyle::default().cell('x'));
        fb.set(0, 2, CellStyle::default().cell('x'));
        assert!(fb.cells().iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn put_str_clips_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(fb.row_text(0), "  ab");
        fb.put_str(-1, 0, "xyz", CellStyle::default());
        assert_eq!(fb.row_text(0), "yzab");
    }

    #[test]
    fn blit_keeps_transparent_cells_and_background() {
        let mut fb = FrameBuffer::new(4, 2);
        let sky = Rgb::new(10, 20, 30);
        fb.clear(CellStyle::new(Rgb::new(0, 0, 0), sky).cell('.'));

        fb.blit(1, 0, &sprite(&["ab", " c"]));

        assert_eq!(fb.row_text(0), ".ab.");
        assert_eq!(fb.row_text(1), "..c.");
        let c = fb.get(2, 1).unwrap();
        assert_eq!(c.style.bg, sky);
        assert_eq!(c.style.fg, Rgb::new(1, 2, 3));
    }

    #[test]
    fn blit_clips_negative_origin() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.blit(-1, 0, &sprite(&["ab"]));
        assert_eq!(fb.row_text(0), "b  ");
    }

    #[test]
    fn blit_tiled_repeats_sprite() {
        let mut fb = FrameBuffer::new(5, 2);
        fb.blit_tiled(0, 0, 4, 2, &sprite(&["ab"]));
        assert_eq!(fb.row_text(0), "abab ");
        assert_eq!(fb.row_text(1), "abab ");
    }

    #[test]
    fn resize_changes_dimensions() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(5, 3);
        assert_eq!((fb.width(), fb.height()), (5, 3));
        assert_eq!(fb.cells().len(), 15);
    }
}
