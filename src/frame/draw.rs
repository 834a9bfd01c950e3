//! Painting and dirty tracking.
//!
//! A screen row's pixels are a pure function of its [`LineKey`]: the bytes
//! on it, the highlighted slice and the caret position. Edits snapshot the
//! keys before and after and repaint exactly the rows whose key changed.

use super::Frame;
use super::boxes::BoxKind;
use crate::buffer::{Point, Rect};
use crate::color::Rgba;
use std::sync::Arc;

/// Everything that determines how a screen row renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct LineKey {
    bytes: Vec<u8>,
    hi: Option<(usize, usize)>,
    tick: Option<i32>,
}

/// One byte's cell on screen.
struct Cell {
    rect: Rect,
    back: Rgba,
    glyph: Option<(u8, Rgba)>,
}

impl Frame {
    fn in_dot(&self, off: usize) -> bool {
        self.dot.0 <= off && off < self.dot.1
    }

    /// Caret position, if the dot is empty and the caret is enabled.
    fn tick_point(&self) -> Option<Point> {
        (self.dot.0 == self.dot.1 && self.options.tick_width > 0)
            .then(|| self.point_of(self.dot.0))
    }

    fn tick_rect(&self, pt: Point) -> Rect {
        let w = self.options.tick_width.min(self.bounds.width);
        let x = pt.x.min(self.bounds.right() - w).max(self.bounds.x);
        Rect::new(x, pt.y, w, self.line_height)
    }

    /// Screen row holding the caret.
    fn tick_row(&self) -> Option<usize> {
        let pt = self.tick_point()?;
        let row = ((pt.y - self.bounds.y) / self.line_height) as usize;
        (row < self.max_lines).then_some(row)
    }

    pub(super) fn line_keys(&self) -> Vec<LineKey> {
        let tick = self.tick_point();
        (0..self.max_lines)
            .map(|i| {
                let mut key = LineKey::default();
                if let Some(line) = self.lines.get(i) {
                    key.bytes = self.arena.bytes()[line.start..line.end_offset()].to_vec();
                    let a = self.dot.0.max(line.start);
                    let b = self.dot.1.min(line.end_offset());
                    if a < b {
                        key.hi = Some((a - line.start, b - line.start));
                    }
                }
                key.tick = tick.filter(|pt| pt.y == self.row_y(i)).map(|pt| pt.x);
                key
            })
            .collect()
    }

    /// Repaint the rows whose key differs from `before`.
    pub(super) fn repaint_changed(&mut self, before: &[LineKey]) {
        let after = self.line_keys();
        for (i, (old, new)) in before.iter().zip(&after).enumerate() {
            if old != new {
                self.repaint_line(i);
            }
        }
    }

    /// Cells of the bytes in `[from, to)` on line `i`.
    fn line_cells(&self, i: usize, from: usize, to: usize) -> Vec<Cell> {
        let Some(line) = self.lines.get(i) else {
            return Vec::new();
        };
        let y = self.row_y(i);
        let mut cells = Vec::new();
        let mut x = self.bounds.x;
        let mut off = line.start;
        for bx in &self.boxes[line.first_box..line.first_box + line.box_count] {
            if off >= to {
                break;
            }
            match bx.kind {
                BoxKind::Run { .. } => {
                    for &c in bx.visible_bytes(&self.arena) {
                        let w = self.font.advance(c);
                        if off >= from && off < to {
                            let (back, text) = self.theme.colors(self.in_dot(off));
                            cells.push(Cell {
                                rect: Rect::new(x, y, w, self.line_height),
                                back,
                                glyph: Some((c, text)),
                            });
                        }
                        x += w;
                        off += 1;
                    }
                }
                BoxKind::Tab | BoxKind::Newline => {
                    if off >= from && off < to {
                        let (back, _) = self.theme.colors(self.in_dot(off));
                        cells.push(Cell {
                            rect: Rect::new(x, y, bx.width, self.line_height),
                            back,
                            glyph: None,
                        });
                    }
                    x += bx.width;
                    off += 1;
                }
            }
        }
        cells
    }

    /// Paint cells, clipped to the bounds. Returns the area touched.
    fn paint_cells(&mut self, cells: &[Cell]) -> Option<Rect> {
        let Self {
            canvas,
            font,
            bounds,
            ..
        } = self;
        let canvas = Arc::make_mut(canvas);
        let mut touched: Option<Rect> = None;
        for cell in cells {
            let Some(clip) = cell.rect.intersect(bounds) else {
                continue;
            };
            canvas.fill_rect(clip, cell.back);
            if let Some((byte, color)) = cell.glyph {
                canvas.draw_glyph(cell.rect.min(), font.glyph(byte), color, clip);
            }
            touched = Some(touched.map_or(clip, |t| t.union(&clip)));
        }
        touched
    }

    fn draw_tick(&mut self) {
        if self.tick_row().is_none() {
            return;
        }
        let Some(pt) = self.tick_point() else {
            return;
        };
        let Some(r) = self.tick_rect(pt).intersect(&self.bounds) else {
            return;
        };
        let color = self.theme.tick;
        Arc::make_mut(&mut self.canvas).fill_rect(r, color);
        self.cache.add(r);
    }

    /// Repaint screen row `i` from scratch.
    pub(super) fn repaint_line(&mut self, i: usize) {
        let row = self.row_rect(i);
        let back = self.theme.back;
        Arc::make_mut(&mut self.canvas).fill_rect(row, back);
        let cells = self.line_cells(i, 0, usize::MAX);
        self.paint_cells(&cells);
        if self.tick_row() == Some(i) {
            self.draw_tick();
        }
        self.cache.add(row);
    }

    /// Repaint the bytes in `[p0, p1)` with the current highlight.
    fn paint_range(&mut self, p0: usize, p1: usize) {
        if p0 >= p1 {
            return;
        }
        let first = self.line_of(p0);
        for i in first..self.lines.len() {
            if self.lines[i].start >= p1 {
                break;
            }
            let cells = self.line_cells(i, p0, p1);
            if let Some(r) = self.paint_cells(&cells) {
                self.cache.add(r);
            }
        }
    }

    /// Set the selection to `[p0, p1)` and repaint what changed.
    ///
    /// Arguments are clamped to `len()` and swapped if inverted. When the
    /// old and new selections overlap only the two edge slices are
    /// repainted; otherwise the old span is unhighlighted and the new one
    /// highlighted.
    pub fn select(&mut self, p0: usize, p1: usize) {
        let len = self.len();
        let (p0, p1) = (p0.min(p1).min(len), p0.max(p1).min(len));
        let old = self.dot;
        if old == (p0, p1) {
            return;
        }
        let old_tick = self.tick_row();
        self.dot = (p0, p1);
        if let Some(row) = old_tick {
            self.repaint_line(row);
        }

        let disjoint = old.0 == old.1 || p0 == p1 || old.1 <= p0 || p1 <= old.0;
        if disjoint {
            self.paint_range(old.0, old.1);
            self.paint_range(p0, p1);
        } else {
            self.paint_range(old.0.min(p0), old.0.max(p0));
            self.paint_range(old.1.min(p1), old.1.max(p1));
        }
        self.draw_tick();
    }

    /// Repaint the whole bounds.
    pub fn refresh(&mut self) {
        let bounds = self.bounds;
        let back = self.theme.back;
        Arc::make_mut(&mut self.canvas).fill_rect(bounds, back);
        for i in 0..self.lines.len() {
            let cells = self.line_cells(i, 0, usize::MAX);
            self.paint_cells(&cells);
        }
        self.draw_tick();
        self.cache.add(bounds);
    }
}
