//! A font that needs no font files.

use super::{Glyph, GlyphProvider};

/// 3x5 bitmaps for the hex digits, one row per entry, high bit on the left.
const HEX_DIGITS: [[u8; 5]; 16] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
    [0b010, 0b101, 0b111, 0b101, 0b101],
    [0b110, 0b101, 0b110, 0b101, 0b110],
    [0b011, 0b100, 0b100, 0b100, 0b011],
    [0b110, 0b101, 0b101, 0b101, 0b110],
    [0b111, 0b100, 0b110, 0b100, 0b111],
    [0b111, 0b100, 0b110, 0b100, 0b100],
];

/// Width of the two-digit fallback glyph: margin, digit, gap, digit, margin.
const HEX_WIDTH: i32 = 9;

/// Whether `b` gets a regular cell rather than the hex fallback.
#[must_use]
pub const fn printable(b: u8) -> bool {
    matches!(b, 0x20..=0x7e)
}

/// Fixed-cell font that draws each printable byte as a block pattern of its
/// bits and every other byte as two hex digits.
///
/// It is deterministic and self-contained, which makes it the provider of
/// choice for headless hosts and tests. Real applications plug in a
/// rasterizing provider instead.
#[derive(Clone, Debug)]
pub struct BlockFont {
    cell_width: i32,
    line_height: i32,
    letter_spacing: i32,
    glyphs: Vec<Glyph>,
}

impl BlockFont {
    /// Create a font with `cell_width` wide cells and `line_height` tall lines.
    ///
    /// Both are clamped to at least one pixel.
    #[must_use]
    pub fn new(cell_width: i32, line_height: i32) -> Self {
        let cell_width = cell_width.max(1);
        let line_height = line_height.max(1);
        let glyphs = (0..=255u8)
            .map(|b| {
                if printable(b) {
                    pattern_glyph(b, cell_width, line_height)
                } else {
                    hex_glyph(b, line_height)
                }
            })
            .collect();
        Self {
            cell_width,
            line_height,
            letter_spacing: 0,
            glyphs,
        }
    }

    /// Add `px` pixels of spacing after every glyph.
    #[must_use]
    pub const fn with_letter_spacing(mut self, px: i32) -> Self {
        self.letter_spacing = px;
        self
    }

    /// Width of a printable cell.
    #[must_use]
    pub const fn cell_width(&self) -> i32 {
        self.cell_width
    }
}

impl Default for BlockFont {
    fn default() -> Self {
        Self::new(7, 13)
    }
}

impl GlyphProvider for BlockFont {
    fn measure(&self, byte: u8) -> i32 {
        self.glyphs[byte as usize].bounds.width
    }

    fn glyph(&self, byte: u8) -> &Glyph {
        &self.glyphs[byte as usize]
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn letter_spacing(&self) -> i32 {
        self.letter_spacing
    }
}

/// Two columns by four rows of blocks, one per bit of `b`.
fn pattern_glyph(b: u8, width: i32, height: i32) -> Glyph {
    let mut glyph = Glyph::blank(width, height);
    if b == b' ' {
        return glyph;
    }
    let inner_w = (width - 2).max(2);
    let inner_h = (height - 2).max(4);
    for bit in 0..8 {
        if b & (1 << bit) == 0 {
            continue;
        }
        let col = bit % 2;
        let row = bit / 2;
        let x0 = 1 + col * inner_w / 2;
        let x1 = 1 + (col + 1) * inner_w / 2;
        let y0 = 1 + row * inner_h / 4;
        let y1 = 1 + (row + 1) * inner_h / 4;
        for y in y0..y1 {
            for x in x0..x1 {
                glyph.put(x, y, 255);
            }
        }
    }
    glyph
}

fn hex_glyph(b: u8, height: i32) -> Glyph {
    let mut glyph = Glyph::blank(HEX_WIDTH, height);
    let top = (height - 5).max(0) / 2;
    for (slot, digit) in [b >> 4, b & 0xf].into_iter().enumerate() {
        let left = 1 + slot as i32 * 4;
        for (row, bits) in HEX_DIGITS[digit as usize].iter().enumerate() {
            for col in 0..3 {
                if bits & (0b100 >> col) != 0 {
                    glyph.put(left + col, top + row as i32, 255);
                }
            }
        }
    }
    glyph
}
