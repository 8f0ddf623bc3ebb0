//! Tileset: the four sprites the scene needs, loaded before the first frame.
//!
//! Loading is a synchronous preload step. It either returns a complete
//! [`Tileset`] or an error naming what is missing; the frame loop never
//! starts with a partial set.
//!
//! File format (see `assets/tileset.txt`):
//!
//! ```text
//! sprite <name> [fg=r,g,b] [bg=r,g,b|none] [bold]
//! |row of glyphs|
//! end
//! ```
//!
//! Spaces inside a row are transparent, `bg=none` keeps the background that
//! is already drawn, and `#` starts a comment line.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use log::info;

use crate::fb::Rgb;

const BUILTIN: &str = include_str!("../assets/tileset.txt");

/// Sprite names every tileset must define.
pub const REQUIRED_SPRITES: [&str; 4] = ["dirt", "grass", "dirtgrass", "character"];

/// One opaque sprite cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCell {
    pub ch: char,
    pub fg: Rgb,
    /// `None` keeps the background underneath.
    pub bg: Option<Rgb>,
    pub bold: bool,
}

/// Rectangular grid of cells; `None` cells are transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u16,
    height: u16,
    cells: Vec<Option<SpriteCell>>,
}

impl Sprite {
    /// Build from rows of equal, non-zero width.
    pub fn from_rows(rows: Vec<Vec<Option<SpriteCell>>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            bail!("sprite has no cells");
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            bail!(
                "sprite row {} is {} cells wide, expected {}",
                bad + 1,
                rows[bad].len(),
                width
            );
        }
        let height = rows.len();
        Ok(Self {
            width: u16::try_from(width).context("sprite too wide")?,
            height: u16::try_from(height).context("sprite too tall")?,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<SpriteCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }
}

/// Ready-to-draw sprite bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    /// Ground fill below the top block of a column.
    pub dirt: Sprite,
    /// Cap for columns at the highest terrain level.
    pub grass: Sprite,
    /// Dirt-to-grass transition cap for every other column.
    pub dirt_grass: Sprite,
    pub character: Sprite,
}

impl Tileset {
    /// The tileset compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN).context("built-in tileset")
    }

    /// Read and parse a tileset file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading tileset {}", path.display()))?;
        Self::parse(&src).with_context(|| format!("parsing tileset {}", path.display()))
    }

    /// Load every required sprite before the game loop starts.
    ///
    /// Uses `path` when given, the built-in tileset otherwise.
    pub fn preload(path: Option<&Path>) -> Result<Self> {
        let tiles = match path {
            Some(path) => Self::load(path)?,
            None => Self::builtin()?,
        };
        info!(
            "tileset ready ({} sprites, source {})",
            REQUIRED_SPRITES.len(),
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        Ok(tiles)
    }

    pub fn parse(src: &str) -> Result<Self> {
        let mut sprites = parse_sprites(src)?;
        let mut take = |name: &str| {
            sprites
                .remove(name)
                .ok_or_else(|| anyhow!("tileset is missing sprite `{}`", name))
        };
        Ok(Self {
            dirt: take("dirt")?,
            grass: take("grass")?,
            dirt_grass: take("dirtgrass")?,
            character: take("character")?,
        })
    }
}

struct Pending {
    name: String,
    line: usize,
    fg: Rgb,
    bg: Option<Rgb>,
    bold: bool,
    rows: Vec<Vec<Option<SpriteCell>>>,
}

fn parse_sprites(src: &str) -> Result<HashMap<String, Sprite>> {
    let mut out = HashMap::new();
    let mut pending: Option<Pending> = None;

    for (i, raw) in src.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line == "end" {
            let done = pending
                .take()
                .ok_or_else(|| anyhow!("line {}: `end` without a sprite", line_no))?;
            let sprite = Sprite::from_rows(done.rows)
                .with_context(|| format!("sprite `{}` (line {})", done.name, done.line))?;
            if out.insert(done.name.clone(), sprite).is_some() {
                bail!("line {}: sprite `{}` defined twice", done.line, done.name);
            }
            continue;
        }

        if let Some(sprite) = pending.as_mut() {
            let row = line
                .strip_prefix('|')
                .and_then(|r| r.strip_suffix('|'))
                .ok_or_else(|| anyhow!("line {}: expected `|row|` or `end`", line_no))?;
            let (fg, bg, bold) = (sprite.fg, sprite.bg, sprite.bold);
            sprite.rows.push(
                row.chars()
                    .map(|ch| (ch != ' ').then_some(SpriteCell { ch, fg, bg, bold }))
                    .collect(),
            );
            continue;
        }

        pending = Some(parse_header(line, line_no)?);
    }

    if let Some(open) = pending {
        bail!("line {}: sprite `{}` is missing `end`", open.line, open.name);
    }
    Ok(out)
}

fn parse_header(line: &str, line_no: usize) -> Result<Pending> {
    let mut words = line.split_whitespace();
    if words.next() != Some("sprite") {
        bail!("line {}: expected `sprite <name>`", line_no);
    }
    let name = words
        .next()
        .ok_or_else(|| anyhow!("line {}: sprite without a name", line_no))?;

    let mut pending = Pending {
        name: name.to_string(),
        line: line_no,
        fg: Rgb::new(220, 220, 220),
        bg: None,
        bold: false,
        rows: Vec::new(),
    };

    for word in words {
        match word.split_once('=') {
            Some(("fg", v)) => pending.fg = parse_rgb(v, line_no)?,
            Some(("bg", "none")) => pending.bg = None,
            Some(("bg", v)) => pending.bg = Some(parse_rgb(v, line_no)?),
            None if word == "bold" => pending.bold = true,
            _ => bail!("line {}: unknown sprite attribute `{}`", line_no, word),
        }
    }
    Ok(pending)
}

fn parse_rgb(v: &str, line_no: usize) -> Result<Rgb> {
    let parts: Vec<&str> = v.split(',').collect();
    let [r, g, b] = parts.as_slice() else {
        bail!("line {}: color `{}` must be r,g,b", line_no, v);
    };
    let channel = |s: &str| {
        s.trim()
            .parse::<u8>()
            .map_err(|_| anyhow!("line {}: bad color channel `{}`", line_no, s))
    };
    Ok(Rgb::new(channel(*r)?, channel(*g)?, channel(*b)?))
}
