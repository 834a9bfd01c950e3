//! The viewport buffer.
//!
//! A [`Viewport`] owns the whole document and a [`Frame`] showing the part of
//! it that starts at the *origin*. Edits go to the document first; the part
//! that falls inside the visible window is forwarded to the frame with
//! offsets translated to frame-local ones. After deletes and scrolls the
//! viewport refills the frame from the document.
//!
//! Two marks besides the selection follow edits: the origin and the *hold*
//! mark, an offset the host uses to keep a region (such as a command prompt)
//! anchored. Compaction of a large document never shifts text at or past
//! either mark.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use textframe::buffer::Point;
//! use textframe::font::BlockFont;
//! use textframe::viewport::{Viewport, ViewportOptions};
//! use textframe::Theme;
//!
//! let mut view = Viewport::new(
//!     Arc::new(BlockFont::default()),
//!     Theme::default(),
//!     ViewportOptions {
//!         size: Point::new(200, 100),
//!         ..ViewportOptions::default()
//!     },
//! );
//! view.insert(b"hello, world", 0)?;
//! view.select(7, 12);
//! assert_eq!(view.selected_bytes(), b"world");
//! # Ok::<(), textframe::Error>(())
//! ```

mod scroll;
mod store;

pub use store::WaterMarks;

use crate::buffer::{Canvas, Point, Rect};
use crate::error::Result;
use crate::font::GlyphProvider;
use crate::frame::{Frame, FrameOptions};
use crate::input::{Buttons, MouseEvent, MouseEventKind};
use crate::renderer::BlitPool;
use crate::style::Theme;
use std::sync::Arc;
use store::Store;
use tracing::{debug, trace};

/// Most bytes pulled from the document per refill step.
const FILL_CHUNK: usize = 2000;

/// How far a non-exact origin looks ahead for a line start.
const SNAP_LOOKAHEAD: usize = 256;

/// Lines scrolled per wheel notch.
const WHEEL_LINES: i32 = 3;

/// Viewport configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportOptions {
    /// Size of the widget's canvas.
    pub size: Point,
    /// Offset of the text area inside the widget. The left padding also
    /// hosts the scrollbar when it is wide enough.
    pub pad: Point,
    /// Position of the widget in its host window.
    pub origin: Point,
    pub water: WaterMarks,
    pub frame: FrameOptions,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            size: Point::new(640, 480),
            pad: Point::new(14, 4),
            origin: Point::ZERO,
            water: WaterMarks::default(),
            frame: FrameOptions::default(),
        }
    }
}

/// A scrollable window onto a document.
#[derive(Debug)]
pub struct Viewport {
    frame: Frame,
    store: Store,
    origin: usize,
    hold: usize,
    q0: usize,
    q1: usize,
    options: ViewportOptions,
    scrollbar: Option<Rect>,
    thumb: Option<Rect>,
    sweeping: bool,
    anchor: usize,
}

impl Viewport {
    /// Create an empty viewport.
    #[must_use]
    pub fn new(font: Arc<dyn GlyphProvider>, theme: Theme, options: ViewportOptions) -> Self {
        let frame = Self::build_frame(&options, font, theme);
        let mut view = Self {
            frame,
            store: Store::new(),
            origin: 0,
            hold: 0,
            q0: 0,
            q1: 0,
            options,
            scrollbar: scroll::scrollbar_rect(&options),
            thumb: None,
            sweeping: false,
            anchor: 0,
        };
        view.repaint_all();
        view
    }

    fn build_frame(options: &ViewportOptions, font: Arc<dyn GlyphProvider>, theme: Theme) -> Frame {
        let text = Rect::from_corners(options.pad, options.size).inset(1);
        Frame::new(
            Canvas::new(options.size.x, options.size.y),
            text,
            font,
            theme,
            options.frame,
        )
    }

    /// Paint the whole widget: background, text and scrollbar.
    fn repaint_all(&mut self) {
        let back = self.frame.theme().back;
        let all = self.frame.canvas().bounds();
        self.frame.fill_rect(all, back);
        self.frame.refresh();
        self.thumb = None;
        self.draw_scrollbar();
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    #[must_use]
    pub const fn options(&self) -> &ViewportOptions {
        &self.options
    }

    /// Document length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Logical capacity of the document store.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Offset of the first visible byte.
    #[must_use]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// Number of bytes on screen.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.frame.len()
    }

    #[must_use]
    pub const fn hold(&self) -> usize {
        self.hold
    }

    pub fn set_hold(&mut self, q: usize) {
        self.hold = q.min(self.len());
    }

    /// The whole document.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.store.bytes()
    }

    /// Copy document bytes starting at `offset` into `buf`, returning how
    /// many were copied.
    pub fn read_at(&self, offset: usize, buf: &mut [u8]) -> usize {
        let Some(src) = self.store.bytes().get(offset..) else {
            return 0;
        };
        let n = src.len().min(buf.len());
        buf[..n].copy_from_slice(&src[..n]);
        n
    }

    /// Selection, clamped to the document.
    #[must_use]
    pub fn dot(&self) -> (usize, usize) {
        let len = self.len();
        (self.q0.min(len), self.q1.min(len))
    }

    /// The selected bytes.
    #[must_use]
    pub fn selected_bytes(&self) -> &[u8] {
        let (q0, q1) = self.dot();
        &self.store.bytes()[q0..q1]
    }

    /// Insert `bytes` at `at`, clamped to the document length.
    ///
    /// Returns the offset the bytes ended up at, which is lower than `at`
    /// when the insert compacted the store.
    pub fn insert(&mut self, bytes: &[u8], at: usize) -> Result<usize> {
        let mut at = at.min(self.len());
        let n = bytes.len();
        if n == 0 {
            return Ok(at);
        }

        let water = self.options.water;
        if self.len() + n > water.high && at >= self.origin && at >= self.hold {
            let m = water
                .high
                .saturating_sub(water.low)
                .min(self.origin.min(self.hold));
            if m > 0 {
                self.store.compact_front(m);
                self.origin -= m;
                self.hold -= m;
                self.q0 = self.q0.saturating_sub(m);
                self.q1 = self.q1.saturating_sub(m);
                at -= m;
                debug!(shifted = m, len = self.len(), "compacted document store");
            }
        }

        self.store.reserve_for(n, &water)?;
        self.store.insert(at, bytes);

        if at <= self.q1 {
            self.q1 += n;
        }
        if at <= self.q0 {
            self.q0 += n;
        }
        if at < self.hold {
            self.hold += n;
        }
        if at < self.origin {
            self.origin += n;
        } else if at <= self.origin + self.frame.len() {
            let k = n.min(self.frame.capacity_bytes());
            self.frame.insert(&bytes[..k], at - self.origin);
        }
        trace!(at, n, len = self.len(), origin = self.origin, "insert");

        self.sync_selection();
        self.draw_scrollbar();
        Ok(at)
    }

    /// Delete `[q0, q1)`, clamped to the document and swapped if inverted.
    pub fn delete(&mut self, q0: usize, q1: usize) {
        let len = self.len();
        let (q0, q1) = (q0.min(q1).min(len), q0.max(q1).min(len));
        if q0 == q1 {
            return;
        }
        let n = q1 - q0;
        self.store.remove(q0..q1);

        let shift = |x: usize| if x > q0 { x - n.min(x - q0) } else { x };
        self.q0 = shift(self.q0);
        self.q1 = shift(self.q1);
        self.hold = shift(self.hold);

        let nchars = self.frame.len();
        if q1 <= self.origin {
            self.origin -= n;
        } else if q0 < self.origin + nchars {
            let p1 = (q1 - self.origin).min(nchars);
            let p0 = if q0 < self.origin {
                self.origin = q0;
                0
            } else {
                q0 - self.origin
            };
            self.frame.delete(p0, p1);
            self.fill();
        } else if q0 == self.origin + nchars && nchars > 0 && self.frame.full() {
            // The last line may have wrapped on text that is now gone.
            self.frame.delete(nchars - 1, nchars);
            self.fill();
        }
        trace!(q0, q1, len = self.len(), origin = self.origin, "delete");

        self.sync_selection();
        self.draw_scrollbar();
    }

    /// Append document text to the frame until it is full or the document
    /// runs out.
    fn fill(&mut self) {
        while !self.frame.full() {
            let end = self.origin + self.frame.len();
            let n = (self.len() - end).min(FILL_CHUNK);
            if n == 0 {
                break;
            }
            let chunk = &self.store.bytes()[end..end + n];
            let budget = self
                .frame
                .max_lines()
                .saturating_sub(self.frame.line_count());
            let mut lines = 0;
            let mut take = n;
            for (i, &b) in chunk.iter().enumerate() {
                if b == b'\n' {
                    lines += 1;
                    if lines >= budget {
                        take = i + 1;
                        break;
                    }
                }
            }
            let before = self.frame.len();
            self.frame.insert(&chunk[..take], before);
            if self.frame.len() == before {
                break;
            }
        }
    }

    /// Move the first visible byte to `org`.
    ///
    /// Unless `exact`, a nonzero `org` moves forward to the start of the
    /// next line when one begins within a short lookahead.
    pub fn set_origin(&mut self, org: usize, exact: bool) {
        let len = self.len();
        let mut org = org.min(len);
        if org > 0 && !exact {
            let window = &self.store.bytes()[org..len.min(org + SNAP_LOOKAHEAD)];
            if let Some(i) = window.iter().position(|&b| b == b'\n') {
                org += i + 1;
            }
        }

        let old = self.origin;
        let nchars = self.frame.len();
        if org >= old && org - old < nchars {
            debug!(from = old, to = org, "set origin: trim head");
            self.frame.delete(0, org - old);
        } else if org < old && old - org < nchars {
            debug!(from = old, to = org, "set origin: extend head");
            self.frame.insert(&self.store.bytes()[org..old], 0);
        } else {
            debug!(from = old, to = org, "set origin: relayout");
            self.frame.clear();
        }
        self.origin = org;
        self.fill();
        self.draw_scrollbar();
        self.sync_selection();
    }

    /// Select `[q0, q1)`, clamped and swapped if inverted.
    pub fn select(&mut self, q0: usize, q1: usize) {
        let len = self.len();
        self.q0 = q0.min(q1).min(len);
        self.q1 = q0.max(q1).min(len);
        trace!(q0 = self.q0, q1 = self.q1, "select");
        self.sync_selection();
    }

    /// Show the visible part of the selection in the frame.
    fn sync_selection(&mut self) {
        let n = self.frame.len();
        let local = |q: usize| q.saturating_sub(self.origin).min(n);
        let (p0, p1) = (local(self.q0), local(self.q1));
        self.frame.select(p0, p1);
    }

    /// Rebuild the frame for a new widget size.
    pub fn resize(&mut self, size: Point) {
        self.options.size = size;
        self.rebuild(Arc::clone(self.frame.font()));
    }

    /// Rebuild the frame with a new font.
    pub fn set_font(&mut self, font: Arc<dyn GlyphProvider>) {
        self.rebuild(font);
    }

    fn rebuild(&mut self, font: Arc<dyn GlyphProvider>) {
        let theme = *self.frame.theme();
        self.frame = Self::build_frame(&self.options, font, theme);
        self.scrollbar = scroll::scrollbar_rect(&self.options);
        self.fill();
        self.sync_selection();
        self.repaint_all();
        debug!(size = ?self.options.size, visible = self.frame.len(), "rebuilt frame");
    }

    /// Route a host mouse event to the widget.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let event = event.relative_to(self.options.origin);
        let pt = event.pos;
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_lines(-WHEEL_LINES),
            MouseEventKind::ScrollDown => self.scroll_lines(WHEEL_LINES),
            MouseEventKind::Press => {
                if self.scrollbar.is_some_and(|bar| bar.contains(pt)) {
                    self.click_scrollbar(pt, event.buttons);
                } else if event.buttons.contains(Buttons::LEFT) {
                    let q = self.origin + self.frame.index_of(pt);
                    self.sweeping = true;
                    self.anchor = q;
                    self.select(q, q);
                }
            }
            MouseEventKind::Drag => {
                if !self.sweeping {
                    return;
                }
                let local = self
                    .anchor
                    .saturating_sub(self.origin)
                    .min(self.frame.len());
                let request = self.frame.sweep(local, pt);
                let q = self.origin + self.frame.index_of(pt);
                self.select(self.anchor.min(q), self.anchor.max(q));
                if let Some(request) = request {
                    self.scroll_lines(request.lines);
                }
            }
            MouseEventKind::Release => {
                if event.buttons.contains(Buttons::LEFT) {
                    self.sweeping = false;
                }
            }
        }
    }

    /// Whether a selection sweep is in progress.
    #[must_use]
    pub const fn sweeping(&self) -> bool {
        self.sweeping
    }

    /// Blit everything painted since the last present to the host window.
    pub fn present(&mut self, pool: &BlitPool) -> Result<usize> {
        self.frame.present(pool, self.options.origin)
    }
}
