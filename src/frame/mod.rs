//! Layout and redraw engine.
//!
//! A [`Frame`] lays a byte sequence out into lines of [`LayoutBox`]es inside
//! a rectangle of a window-sized [`Canvas`], keeps a selection (the *dot*),
//! and repaints only what an edit actually changed. Every painted rectangle
//! is recorded in a [`DirtyCache`] until the host presents it.
//!
//! The frame only ever holds what fits on screen. Bytes that flow past the
//! last line are dropped; the owner of the full document (see
//! [`Viewport`](crate::viewport::Viewport)) refills from its own store.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use textframe::buffer::{Canvas, Point, Rect};
//! use textframe::font::BlockFont;
//! use textframe::frame::{Frame, FrameOptions};
//! use textframe::Theme;
//!
//! let canvas = Canvas::new(70, 39);
//! let mut frame = Frame::new(
//!     canvas,
//!     Rect::new(0, 0, 70, 39),
//!     Arc::new(BlockFont::new(7, 13)),
//!     Theme::default(),
//!     FrameOptions::default(),
//! );
//! frame.insert(b"hello\nworld", 0);
//! assert_eq!(frame.line_count(), 2);
//! assert_eq!(frame.point_of(6), Point::new(0, 13));
//! assert_eq!(frame.index_of(Point::new(8, 14)), 7);
//! ```

mod boxes;
mod dirty;
mod draw;
mod layout;

pub use boxes::{Arena, BoxKind, ByteSpan, LayoutBox, RUN_LIMIT, rebase, tokenize};
pub use dirty::DirtyCache;
pub use layout::{Line, LineEnd, LineState};

use layout::Prior;

use crate::buffer::{Canvas, Point, Rect};
use crate::error::Result;
use crate::font::GlyphProvider;
use crate::renderer::BlitPool;
use crate::style::Theme;
use std::sync::Arc;
use tracing::trace;

/// Layout knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOptions {
    /// Tab stop spacing, in spaces.
    pub tab_width: usize,
    /// Width of the caret drawn for an empty selection. Zero hides it.
    pub tick_width: i32,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            tab_width: 4,
            tick_width: 2,
        }
    }
}

/// Scroll wanted by a sweep that left the frame.
///
/// Negative `lines` scroll toward the start of the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollRequest {
    pub lines: i32,
}

/// The layout and redraw engine.
pub struct Frame {
    bounds: Rect,
    font: Arc<dyn GlyphProvider>,
    theme: Theme,
    options: FrameOptions,
    line_height: i32,
    max_lines: usize,
    arena: Arena,
    boxes: Vec<LayoutBox>,
    lines: Vec<Line>,
    truncated: bool,
    dot: (usize, usize),
    canvas: Arc<Canvas>,
    cache: DirtyCache,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("bounds", &self.bounds)
            .field("len", &self.arena.len())
            .field("lines", &self.lines.len())
            .field("max_lines", &self.max_lines)
            .field("dot", &self.dot)
            .field("dirty", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl Frame {
    /// Create an empty frame laying out into `bounds` of `canvas`.
    ///
    /// `bounds` is clipped to the canvas. The whole area is painted with the
    /// theme background and marked dirty.
    #[must_use]
    pub fn new(
        canvas: Canvas,
        bounds: Rect,
        font: Arc<dyn GlyphProvider>,
        theme: Theme,
        options: FrameOptions,
    ) -> Self {
        let bounds = bounds
            .intersect(&canvas.bounds())
            .unwrap_or_else(|| Rect::new(bounds.x, bounds.y, 0, 0));
        let line_height = font.line_height().max(1);
        let max_lines = (bounds.height / line_height) as usize;
        let mut frame = Self {
            bounds,
            font,
            theme,
            options,
            line_height,
            max_lines,
            arena: Arena::new(),
            boxes: Vec::new(),
            lines: Vec::new(),
            truncated: false,
            dot: (0, 0),
            canvas: Arc::new(canvas),
            cache: DirtyCache::new(),
        };
        frame.refresh();
        frame
    }

    /// Rectangle the layout fills.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub const fn options(&self) -> &FrameOptions {
        &self.options
    }

    #[must_use]
    pub fn font(&self) -> &Arc<dyn GlyphProvider> {
        &self.font
    }

    #[must_use]
    pub const fn line_height(&self) -> i32 {
        self.line_height
    }

    /// The canvas the frame paints into.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Take the canvas back, e.g. to rebuild the frame at a new size.
    #[must_use]
    pub fn into_canvas(self) -> Canvas {
        Arc::unwrap_or_clone(self.canvas)
    }

    /// Number of bytes on screen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// The bytes on screen.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.arena.bytes()
    }

    /// Current selection `(p0, p1)`, `p0 <= p1 <= len()`.
    #[must_use]
    pub const fn dot(&self) -> (usize, usize) {
        self.dot
    }

    #[must_use]
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// Arena the boxes view, for [`LayoutBox::visible_bytes`].
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines that fit in the bounds.
    #[must_use]
    pub const fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Number of lines in use, counting the empty line after a trailing
    /// newline.
    #[must_use]
    pub fn line_count(&self) -> usize {
        if self.arena.is_empty() {
            0
        } else {
            (self.tail_line() + 1).min(self.max_lines)
        }
    }

    /// Whether no more bytes can be appended.
    #[must_use]
    pub fn full(&self) -> bool {
        self.truncated || self.tail_line() >= self.max_lines
    }

    /// Upper bound on the bytes the frame can display at once.
    #[must_use]
    pub fn capacity_bytes(&self) -> usize {
        (self.bounds.width.max(0) as usize + 1) * self.max_lines
    }

    /// Insert `bytes` at offset `p`, clamped to `len()`.
    ///
    /// Bytes that flow past the last line are dropped.
    pub fn insert(&mut self, bytes: &[u8], p: usize) {
        if bytes.is_empty() {
            return;
        }
        let p = p.min(self.len());
        let n = bytes.len();
        let before = self.line_keys();
        let (boxes, len) = (self.boxes.len(), self.len());
        let from = self.line_of(p).saturating_sub(1);

        let at = self.split_at(p);
        let new = tokenize(bytes, &*self.font);
        let prior = Prior {
            boxes,
            bytes: len,
            end: at + new.len() + 1,
        };
        self.boxes.splice(at..at, new);
        self.arena.insert(p, bytes);
        rebase(&mut self.boxes, &self.arena);

        let (mut p0, mut p1) = self.dot;
        if p <= p1 {
            p1 += n;
        }
        if p <= p0 {
            p0 += n;
        }
        self.dot = (p0, p1);

        self.reflow(from, prior);
        trace!(at = p, n, len = self.len(), truncated = self.truncated, "frame insert");
        self.repaint_changed(&before);
    }

    /// Delete `[p0, p1)`, clamped to `len()`.
    pub fn delete(&mut self, p0: usize, p1: usize) {
        let p1 = p1.min(self.len());
        let p0 = p0.min(p1);
        if p0 == p1 {
            return;
        }
        let n = p1 - p0;
        let before = self.line_keys();
        let (boxes, len) = (self.boxes.len(), self.len());
        let from = self.line_of(p0).saturating_sub(1);

        let b0 = self.split_at(p0);
        let b1 = self.split_at(p1);
        self.boxes.drain(b0..b1);
        self.arena.remove(p0..p1);
        rebase(&mut self.boxes, &self.arena);

        let shift = |q: usize| if q > p0 { q - n.min(q - p0) } else { q };
        self.dot = (shift(self.dot.0), shift(self.dot.1));

        let prior = Prior {
            boxes,
            bytes: len,
            end: b0 + 1,
        };
        self.reflow(from, prior);
        trace!(p0, p1, len = self.len(), "frame delete");
        self.repaint_changed(&before);
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.delete(0, self.len());
    }

    /// Select between `anchor` and the byte under `pt`.
    ///
    /// Returns a scroll request when `pt` lies above or below the bounds;
    /// the owner decides whether and how to act on it.
    pub fn sweep(&mut self, anchor: usize, pt: Point) -> Option<ScrollRequest> {
        let p = self.index_of(pt);
        self.select(anchor.min(p), anchor.max(p));

        let lh = self.line_height;
        if pt.y < self.bounds.y {
            let above = self.bounds.y - pt.y;
            Some(ScrollRequest {
                lines: -((above + lh - 1) / lh),
            })
        } else if pt.y >= self.bounds.bottom() {
            Some(ScrollRequest {
                lines: (pt.y - self.bounds.bottom()) / lh + 1,
            })
        } else {
            None
        }
    }

    /// Paint a host decoration, such as a scrollbar, and mark it dirty.
    pub fn fill_rect(&mut self, rect: Rect, color: crate::color::Rgba) {
        let Some(r) = rect.intersect(&self.canvas.bounds()) else {
            return;
        };
        Arc::make_mut(&mut self.canvas).fill_rect(r, color);
        self.cache.add(r);
    }

    /// Rectangles painted since the last flush.
    #[must_use]
    pub const fn dirty(&self) -> &DirtyCache {
        &self.cache
    }

    /// Drain the dirty rectangles.
    pub fn flush_cache(&mut self) -> Vec<Rect> {
        self.cache.take()
    }

    /// Blit every dirty rectangle to `dest + rect.min` through `pool`.
    ///
    /// The cache is cleared only once every blit has been acknowledged. On
    /// failure it is kept so the next present retries. Returns the number of
    /// rectangles blitted.
    pub fn present(&mut self, pool: &BlitPool, dest: Point) -> Result<usize> {
        if self.cache.is_empty() {
            return Ok(0);
        }
        let rects = self.cache.rects().to_vec();
        pool.blit(&self.canvas, &rects, dest)?;
        self.cache.clear();
        Ok(rects.len())
    }
}
