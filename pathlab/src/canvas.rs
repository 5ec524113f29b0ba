//! Off-screen character buffer: [`Canvas`], [`Glyph`], [`Color`], and the
//! [`Frame`] diff sent to a driver.

/// A terminal colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's own colour.
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

/// Colour palette of the demonstrator.
pub mod palette {
    use super::Color;

    pub const EMPTY: Color = Color::Rgb(255, 255, 255);
    pub const WALL: Color = Color::Rgb(0, 0, 0);
    pub const START: Color = Color::Rgb(0, 255, 0);
    pub const END: Color = Color::Rgb(255, 0, 0);
    pub const PATH: Color = Color::Rgb(128, 0, 128);
    pub const OPEN: Color = Color::Rgb(0, 191, 255);
    pub const CLOSED: Color = Color::Rgb(0, 0, 139);
    pub const INK: Color = Color::Rgb(0, 0, 0);
    pub const GRID_LINE: Color = Color::Rgb(128, 128, 128);
    pub const ACCENT: Color = Color::Rgb(255, 215, 0);
}

/// A styled character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Default,
            bg: Color::Default,
            bold: false,
        }
    }
}

impl Glyph {
    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self {
            ch,
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A `width` by `height` buffer of glyphs, addressed by terminal column `x`
/// and line `y`. Writes outside the buffer are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            glyphs: vec![Glyph::default(); (w * h) as usize],
            width: w,
            height: h,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.width && y < self.height)
            .then(|| (y * self.width + x) as usize)
    }

    /// The glyph at `(x, y)`, or a blank glyph outside the buffer.
    pub fn at(&self, x: i32, y: i32) -> Glyph {
        self.index(x, y)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write `s` from `(x, y)` rightwards with one style, clipping at the
    /// right edge. Returns the number of characters written.
    pub fn text(&mut self, x: i32, y: i32, s: &str, fg: Color, bg: Color) -> i32 {
        let mut written = 0;
        for (i, ch) in s.chars().enumerate() {
            let cx = x + i as i32;
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Glyph::new(ch, fg, bg));
            written += 1;
        }
        written
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    pub fn clear(&mut self) {
        self.fill(Glyph::default());
    }

    /// Make every position differ from any drawable glyph, so the next diff
    /// against this canvas repaints everything.
    pub fn invalidate(&mut self) {
        self.fill(Glyph::new('\0', Color::Default, Color::Default));
    }

    /// Copy `other` into `self`, adopting its size.
    pub fn copy_from(&mut self, other: &Canvas) {
        self.glyphs.clone_from(&other.glyphs);
        self.width = other.width;
        self.height = other.height;
    }

    /// Resize to `width` by `height`, blanking the contents.
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// Row `y` as a plain string, for tests and logs.
    pub fn line(&self, y: i32) -> String {
        (0..self.width).map(|x| self.at(x, y).ch).collect()
    }
}

/// A single glyph that changed between two canvases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCell {
    pub x: i32,
    pub y: i32,
    pub glyph: Glyph,
}

/// The set of glyphs to repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Cells of `curr` that differ from `prev`. Positions missing from `prev`
/// count as changed.
pub fn compute_frame(prev: &Canvas, curr: &Canvas) -> Frame {
    let mut cells = Vec::new();
    for y in 0..curr.height {
        for x in 0..curr.width {
            let glyph = curr.at(x, y);
            if prev.index(x, y).is_none() || prev.at(x, y) != glyph {
                cells.push(FrameCell { x, y, glyph });
            }
        }
    }
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}
