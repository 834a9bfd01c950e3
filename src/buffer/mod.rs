//! Off-screen pixel canvas.
//!
//! [`Canvas`] is the drawing target of the layout engine: a row-major grid of
//! [`Rgba`] pixels the size of the host window. The engine paints into it and
//! records the rectangles it touched; the presentation surface later copies
//! exactly those rectangles out.
//!
//! # Examples
//!
//! ```
//! use textframe::buffer::{Canvas, Point, Rect};
//! use textframe::Rgba;
//!
//! let mut canvas = Canvas::new(16, 8);
//! canvas.fill_rect(Rect::new(2, 2, 4, 4), Rgba::BLACK);
//! assert_eq!(canvas.get(Point::new(3, 3)), Some(Rgba::BLACK));
//! assert_eq!(canvas.get(Point::new(0, 0)), Some(Rgba::TRANSPARENT));
//! ```

mod rect;

pub use rect::{Point, Rect};

use crate::color::Rgba;
use crate::font::Glyph;

/// A 2D pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Rgba>,
}

impl Canvas {
    /// Create a canvas filled with transparent black.
    ///
    /// Negative dimensions are clamped to zero.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; size],
        }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The whole canvas as a rectangle at the origin.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Raw pixel data in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Compute pixel index, `None` when out of bounds.
    #[inline]
    fn index(&self, pt: Point) -> Option<usize> {
        if pt.x < 0 || pt.y < 0 || pt.x >= self.width || pt.y >= self.height {
            return None;
        }
        Some(pt.y as usize * self.width as usize + pt.x as usize)
    }

    /// Get pixel at `pt`.
    #[must_use]
    pub fn get(&self, pt: Point) -> Option<Rgba> {
        self.index(pt).map(|idx| self.pixels[idx])
    }

    /// Set pixel at `pt`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pt: Point, color: Rgba) {
        if let Some(idx) = self.index(pt) {
            self.pixels[idx] = color;
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(r) = rect.intersect(&self.bounds()) else {
            return;
        };
        let stride = self.width as usize;
        for y in r.y..r.bottom() {
            let row = y as usize * stride;
            self.pixels[row + r.x as usize..row + r.right() as usize].fill(color);
        }
    }

    /// Blend a glyph mask in `color` with its pen at `pen`, clipped to `clip`.
    ///
    /// The glyph's bounds are relative to the pen (the top-left corner of the
    /// glyph's advance cell).
    pub fn draw_glyph(&mut self, pen: Point, glyph: &Glyph, color: Rgba, clip: Rect) {
        let dst = glyph.bounds.translate(pen);
        let Some(area) = dst
            .intersect(&clip)
            .and_then(|r| r.intersect(&self.bounds()))
        else {
            return;
        };
        let gw = glyph.bounds.width as usize;
        for y in area.y..area.bottom() {
            let my = (y - dst.y) as usize;
            for x in area.x..area.right() {
                let mx = (x - dst.x) as usize;
                let coverage = glyph.mask.get(my * gw + mx).copied().unwrap_or(0);
                if coverage == 0 {
                    continue;
                }
                let idx = y as usize * self.width as usize + x as usize;
                self.pixels[idx] = color.over(self.pixels[idx], coverage);
            }
        }
    }

    /// Copy `rect` of `src` so that its top-left lands on `dest`.
    ///
    /// Both sides are clipped; pixels that fall outside either canvas are
    /// skipped.
    pub fn copy_from(&mut self, dest: Point, src: &Self, rect: Rect) {
        let Some(r) = rect.intersect(&src.bounds()) else {
            return;
        };
        let shift = dest - rect.min();
        let Some(d) = r.translate(shift).intersect(&self.bounds()) else {
            return;
        };
        let len = d.width as usize;
        for y in d.y..d.bottom() {
            let sy = y - shift.y;
            let sx = d.x - shift.x;
            let s = sy as usize * src.width as usize + sx as usize;
            let t = y as usize * self.width as usize + d.x as usize;
            self.pixels[t..t + len].copy_from_slice(&src.pixels[s..s + len]);
        }
    }
}
