//! Scrolling and the scrollbar.

use super::{Viewport, ViewportOptions};
use crate::buffer::{Point, Rect};
use crate::input::Buttons;
use tracing::trace;

/// Narrowest scrollbar worth drawing.
pub const MIN_SCROLLBAR_WIDTH: i32 = 5;

/// Longest line `back_nl` scans before calling it a line anyway.
const BACK_NL_SCAN: usize = 128;

/// Scrollbar area for `options`, if the left padding has room for one.
pub(super) fn scrollbar_rect(options: &ViewportOptions) -> Option<Rect> {
    (options.pad.x > MIN_SCROLLBAR_WIDTH + 3)
        .then(|| Rect::new(0, 0, options.pad.x - 3, options.size.y))
}

impl Viewport {
    /// Scrollbar area, if drawn.
    #[must_use]
    pub const fn scrollbar(&self) -> Option<Rect> {
        self.scrollbar
    }

    /// The part of the scrollbar standing for the visible text.
    fn thumb_rect(&self, bar: Rect) -> Rect {
        let len = self.len();
        if len == 0 {
            return bar;
        }
        let dy = bar.height.max(0) as usize;
        let y0 = (dy * self.origin / len) as i32;
        let y1 = (dy * (self.origin + self.frame.len()) / len) as i32;
        Rect::new(bar.x, bar.y + y0, bar.width, y1 - y0)
    }

    /// Repaint the scrollbar if the thumb moved.
    pub(super) fn draw_scrollbar(&mut self) {
        let Some(bar) = self.scrollbar else {
            return;
        };
        let thumb = self.thumb_rect(bar);
        if self.thumb == Some(thumb) {
            return;
        }
        let theme = *self.frame.theme();
        self.frame.fill_rect(bar, theme.scroll_back);
        self.frame.fill_rect(thumb, theme.scroll_thumb);
        self.thumb = Some(thumb);
    }

    /// Start of the line `n` lines above the one holding `p`.
    ///
    /// With `n == 0` this is the start of the line holding `p`. Lines longer
    /// than 128 bytes are cut into 128-byte pieces so binary data cannot
    /// make the scan unbounded.
    #[must_use]
    pub fn back_nl(&self, p: usize, n: usize) -> usize {
        let bytes = self.store.bytes();
        let mut p = p.min(bytes.len());
        let mut n = n;
        if n == 0 && p > 0 && bytes[p - 1] != b'\n' {
            n = 1;
        }
        for _ in 0..n {
            if p == 0 {
                break;
            }
            // Step back over the newline ending the previous line.
            p -= 1;
            if p == 0 {
                break;
            }
            for _ in 1..BACK_NL_SCAN {
                if p == 0 || bytes[p - 1] == b'\n' {
                    break;
                }
                p -= 1;
            }
        }
        p
    }

    /// Scroll by `dl` lines; negative values scroll toward the start.
    ///
    /// During a selection sweep the selection is stretched from the sweep
    /// anchor to the text scrolled into view.
    pub fn scroll_lines(&mut self, dl: i32) {
        if dl == 0 {
            return;
        }
        trace!(dl, origin = self.origin, "scroll");
        if dl < 0 {
            let target = self.back_nl(self.origin, dl.unsigned_abs() as usize);
            self.set_origin(target, true);
            if self.sweeping {
                let top = self.origin;
                self.select(self.anchor.min(top), self.anchor.max(top));
            }
        } else {
            if self.origin + self.frame.len() >= self.len() {
                return;
            }
            let bounds = self.frame.bounds();
            let row = Point::new(bounds.x, bounds.y + dl * self.frame.line_height());
            let target = self.origin + self.frame.index_of(row);
            self.set_origin(target, true);
            if self.sweeping {
                let end = self.origin + self.frame.len();
                self.select(self.anchor.min(end), self.anchor.max(end));
            }
        }
    }

    /// Scroll so that offset `q` is on screen.
    ///
    /// Does nothing when `q` is already visible; otherwise the line holding
    /// `q` is placed a quarter of the way down the frame.
    pub fn show(&mut self, q: usize) {
        let q = q.min(self.len());
        let end = self.origin + self.frame.len();
        let visible = q >= self.origin && (q < end || (q == end && !self.frame.full()));
        if visible {
            return;
        }
        let context = self.frame.max_lines() / 4;
        let target = self.back_nl(q, context);
        self.set_origin(target, true);
    }

    /// Handle a press at `pt` inside the scrollbar.
    ///
    /// The left button scrolls back by as many lines as the click is below
    /// the top of the bar, the middle button jumps to the proportional
    /// position in the document, and the right button scrolls forward,
    /// bringing the line next to the click to the top.
    pub fn click_scrollbar(&mut self, pt: Point, button: Buttons) {
        let Some(bar) = self.scrollbar else {
            return;
        };
        let dy = (pt.y - bar.y).clamp(0, bar.height);
        if button.contains(Buttons::LEFT) {
            let lines = (dy / self.frame.line_height()).max(1) as usize;
            let target = self.back_nl(self.origin, lines);
            self.set_origin(target, true);
        } else if button.contains(Buttons::MIDDLE) {
            if bar.height == 0 {
                return;
            }
            let target = self.len() * dy as usize / bar.height as usize;
            self.set_origin(target, false);
        } else if button.contains(Buttons::RIGHT) {
            if self.origin + self.frame.len() >= self.len() {
                return;
            }
            let bounds = self.frame.bounds();
            let y = pt.y.max(bounds.y);
            let target = self.origin + self.frame.index_of(Point::new(bounds.x, y));
            self.set_origin(target, true);
        }
    }
}
