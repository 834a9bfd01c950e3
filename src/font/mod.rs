//! Glyph measurement and rendering.
//!
//! The layout engine never rasterizes text itself. It asks a
//! [`GlyphProvider`] how wide each byte is and which alpha mask to paint for
//! it. Providers must be stable: the same byte always measures the same,
//! because box widths are cached across edits.
//!
//! Every byte must have a renderable glyph, including control bytes and bytes
//! above 0x7F. [`BlockFont`] shows the convention: printable ASCII gets a
//! regular cell, everything else a wider two-hex-digit glyph.

mod block;

pub use block::BlockFont;

use crate::buffer::Rect;

/// A rendered glyph: an 8-bit coverage mask and its bounds.
///
/// `bounds` is relative to the pen position, which sits at the top-left of
/// the glyph's advance cell on the current line. `mask` holds
/// `bounds.width * bounds.height` coverage values in row-major order; pixels
/// missing from a short mask are treated as blank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Glyph {
    pub bounds: Rect,
    pub mask: Vec<u8>,
}

impl Glyph {
    /// A fully transparent glyph of the given size.
    #[must_use]
    pub fn blank(width: i32, height: i32) -> Self {
        let bounds = Rect::new(0, 0, width, height);
        Self {
            bounds,
            mask: vec![0; bounds.area() as usize],
        }
    }

    /// Set the coverage at `(x, y)`; coordinates outside the mask are ignored.
    pub fn put(&mut self, x: i32, y: i32, coverage: u8) {
        if x < 0 || y < 0 || x >= self.bounds.width || y >= self.bounds.height {
            return;
        }
        let idx = y as usize * self.bounds.width as usize + x as usize;
        if let Some(px) = self.mask.get_mut(idx) {
            *px = coverage;
        }
    }

    /// Whether any pixel of the glyph carries ink.
    #[must_use]
    pub fn has_ink(&self) -> bool {
        self.mask.iter().any(|&c| c != 0)
    }
}

/// Source of glyph metrics and masks.
pub trait GlyphProvider: Send + Sync {
    /// Advance width of `byte` in pixels, excluding letter spacing.
    fn measure(&self, byte: u8) -> i32;

    /// The mask painted for `byte`.
    fn glyph(&self, byte: u8) -> &Glyph;

    /// Height of one text line in pixels.
    fn line_height(&self) -> i32;

    /// Extra pixels added after every glyph.
    fn letter_spacing(&self) -> i32 {
        0
    }

    /// Horizontal distance the pen moves after `byte`.
    ///
    /// Never less than one pixel, so every byte owns a distinct column
    /// range on screen.
    fn advance(&self, byte: u8) -> i32 {
        (self.measure(byte) + self.letter_spacing()).max(1)
    }
}
