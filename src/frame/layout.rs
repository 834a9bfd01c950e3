//! Line flow and the offset/point mapping.

use super::Frame;
use super::boxes::{BoxKind, LayoutBox, rebase, run_width};
use crate::buffer::{Point, Rect};

/// How a line ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEnd {
    /// The last line, still accepting boxes.
    Open,
    /// Broken because the next box did not fit.
    Wrapped,
    /// Ended by a newline box.
    Newline,
}

/// Fill state of a screen line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    Empty,
    Partial,
    Full,
}

/// One laid-out line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    /// Index of the first box on the line.
    pub first_box: usize,
    pub box_count: usize,
    /// Byte offset of the first byte on the line.
    pub start: usize,
    /// Bytes on the line, including a terminating newline.
    pub len: usize,
    /// Rendered width in pixels.
    pub width: i32,
    pub end: LineEnd,
}

impl Line {
    const fn open(first_box: usize, start: usize) -> Self {
        Self {
            first_box,
            box_count: 0,
            start,
            len: 0,
            width: 0,
            end: LineEnd::Open,
        }
    }

    /// Offset one past the last byte on the line.
    #[must_use]
    pub const fn end_offset(&self) -> usize {
        self.start + self.len
    }

    /// Whether `p` lies on this line. The end of a closed line belongs to
    /// the next one.
    #[must_use]
    pub fn holds(&self, p: usize) -> bool {
        p >= self.start
            && (p < self.end_offset() || (p == self.end_offset() && self.end == LineEnd::Open))
    }

    const fn push(&mut self, len: usize, width: i32) {
        self.box_count += 1;
        self.len += len;
        self.width += width;
    }
}

/// Layout shape before an edit.
#[derive(Clone, Copy, Debug)]
pub(super) struct Prior {
    /// Box count before the edit.
    pub boxes: usize,
    /// Byte count before the edit.
    pub bytes: usize,
    /// One past the last box the edit created, in current indices.
    pub end: usize,
}

impl Frame {
    /// State of screen line `i`.
    #[must_use]
    pub fn line_state(&self, i: usize) -> LineState {
        match self.lines.get(i) {
            None => LineState::Empty,
            Some(line) if line.end == LineEnd::Open => LineState::Partial,
            Some(_) => LineState::Full,
        }
    }

    /// Index of the line a new box would land on.
    pub(super) fn tail_line(&self) -> usize {
        match self.lines.last() {
            None => 0,
            Some(line) if line.end == LineEnd::Open => self.lines.len() - 1,
            Some(_) => self.lines.len(),
        }
    }

    /// Line holding offset `p`, or `lines.len()` when `p` follows a closed
    /// last line.
    pub(super) fn line_of(&self, p: usize) -> usize {
        self.lines
            .iter()
            .position(|line| line.holds(p))
            .unwrap_or(self.lines.len())
    }

    /// Top edge of screen row `i`.
    pub(super) fn row_y(&self, i: usize) -> i32 {
        self.bounds.y + i as i32 * self.line_height
    }

    pub(super) fn row_rect(&self, i: usize) -> Rect {
        Rect::new(self.bounds.x, self.row_y(i), self.bounds.width, self.line_height)
    }

    /// Make `p` a box boundary, splitting the run that straddles it.
    /// Returns the index of the first box at or after `p`.
    pub(super) fn split_at(&mut self, p: usize) -> usize {
        let mut off = 0;
        for i in 0..self.boxes.len() {
            if off == p {
                return i;
            }
            let len = self.boxes[i].len();
            if p < off + len {
                let tail = self.boxes[i].split(p - off, &self.arena, &*self.font);
                self.boxes.insert(i + 1, tail);
                return i + 1;
            }
            off += len;
        }
        self.boxes.len()
    }

    /// Merge adjacent runs in boxes `[b, end)`, up to [`RUN_LIMIT`](super::RUN_LIMIT).
    /// Returns the end of the range after merging.
    fn coalesce(&mut self, b: usize, end: usize) -> usize {
        let end = end.min(self.boxes.len());
        if b + 1 >= end {
            return end;
        }
        let mut merged: Vec<LayoutBox> = Vec::with_capacity(end - b);
        for bx in self.boxes.drain(b..end) {
            match merged.last_mut() {
                Some(last) if last.can_absorb(&bx) => last.absorb(&bx),
                _ => merged.push(bx),
            }
        }
        let n = merged.len();
        self.boxes.splice(b..b, merged);
        b + n
    }

    /// Leading runes of box `b` that fit in `room` pixels.
    fn fit(&self, b: usize, room: i32) -> usize {
        let mut used = 0;
        let mut k = 0;
        for &c in self.boxes[b].visible_bytes(&self.arena) {
            used += self.font.advance(c);
            if used > room {
                break;
            }
            k += 1;
        }
        k
    }

    fn tab_stop(&self, x: i32) -> i32 {
        let stop = (self.options.tab_width as i32 * self.font.advance(b' ')).max(1);
        let left = self.bounds.x;
        left + ((x - left) / stop + 1) * stop
    }

    /// Lay out the boxes from line `from` on, dropping whatever flows past
    /// the last line.
    ///
    /// Stops early at the first line that starts on a box the edit left
    /// alone, where the old layout is known to hold; the rest of the old
    /// lines are shifted into place.
    pub(super) fn reflow(&mut self, from: usize, prior: Prior) {
        let from = from.min(self.lines.len());
        let (mut b, start) = match self.lines.get(from) {
            Some(line) => (line.first_box, line.start),
            None => self.lines.last().map_or((0, 0), |line| {
                (line.first_box + line.box_count, line.end_offset())
            }),
        };
        let old = self.lines.split_off(from);
        self.truncated = false;
        // Boxes at or after `touched` are the old ones, shifted.
        let mut touched = self.coalesce(b, prior.end);

        let left = self.bounds.x;
        let right = self.bounds.right();
        let mut x = left;
        let mut line = Line::open(b, start);

        while b < self.boxes.len() {
            if self.lines.len() >= self.max_lines {
                self.boxes.truncate(b);
                self.arena.truncate(line.start);
                self.truncated = true;
                break;
            }
            if line.box_count == 0 && b >= touched {
                if let Some(j) = self.old_line_at(&old, &line, prior) {
                    self.adopt(&old[j..], prior);
                    line = Line::open(self.boxes.len(), self.arena.len());
                    break;
                }
            }
            let bx = self.boxes[b];
            let mut wrap = false;
            match bx.kind {
                BoxKind::Newline => {
                    let w = (right - x).max(0);
                    self.boxes[b].width = w;
                    line.push(1, w);
                    b += 1;
                    line.end = LineEnd::Newline;
                    self.lines.push(line);
                    line = Line::open(b, line.end_offset());
                    x = left;
                    continue;
                }
                BoxKind::Tab => {
                    if line.box_count > 0 && x + bx.min_width > right {
                        wrap = true;
                    } else {
                        let w = (self.tab_stop(x) - x).min((right - x).max(0));
                        self.boxes[b].width = w;
                        line.push(1, w);
                        x += w;
                        b += 1;
                    }
                }
                BoxKind::Run { runes } => {
                    if x + bx.width <= right {
                        line.push(runes, bx.width);
                        x += bx.width;
                        b += 1;
                    } else {
                        let mut k = self.fit(b, right - x);
                        if line.box_count == 0 {
                            k = k.max(1);
                        }
                        if k == 0 {
                            wrap = true;
                        } else {
                            if k < runes {
                                let tail = self.boxes[b].split(k, &self.arena, &*self.font);
                                self.boxes.insert(b + 1, tail);
                                touched = touched.max(b + 2);
                                wrap = true;
                            }
                            let w = self.boxes[b].width;
                            line.push(k, w);
                            x += w;
                            b += 1;
                        }
                    }
                }
            }
            if wrap {
                line.end = LineEnd::Wrapped;
                self.lines.push(line);
                line = Line::open(b, line.end_offset());
                x = left;
            }
        }
        if line.box_count > 0 {
            self.lines.push(line);
        }

        rebase(&mut self.boxes, &self.arena);
        let len = self.arena.len();
        self.dot.1 = self.dot.1.min(len);
        self.dot.0 = self.dot.0.min(self.dot.1);
    }

    /// Index into `old` of the pre-edit line that began where `line` begins.
    fn old_line_at(&self, old: &[Line], line: &Line, prior: Prior) -> Option<usize> {
        let first_box = (line.first_box + prior.boxes).checked_sub(self.boxes.len())?;
        let start = (line.start + prior.bytes).checked_sub(self.arena.len())?;
        let j = old.binary_search_by_key(&first_box, |l| l.first_box).ok()?;
        (old[j].start == start).then_some(j)
    }

    /// Append the pre-edit lines `tail`, shifted to current offsets, and
    /// drop whatever no longer fits.
    fn adopt(&mut self, tail: &[Line], prior: Prior) {
        let boxes = self.boxes.len();
        let bytes = self.arena.len();
        for old in tail {
            let first_box = old.first_box + boxes - prior.boxes;
            let start = old.start + bytes - prior.bytes;
            if self.lines.len() >= self.max_lines {
                self.boxes.truncate(first_box);
                self.arena.truncate(start);
                self.truncated = true;
                break;
            }
            self.lines.push(Line {
                first_box,
                start,
                ..*old
            });
        }
    }

    /// X of the left edge of byte `p` on `line`.
    fn x_in_line(&self, line: &Line, p: usize) -> i32 {
        let mut x = self.bounds.x;
        let mut off = line.start;
        for bx in &self.boxes[line.first_box..line.first_box + line.box_count] {
            if off >= p {
                break;
            }
            let len = bx.len();
            if p < off + len {
                return x + run_width(&bx.visible_bytes(&self.arena)[..p - off], &*self.font);
            }
            x += bx.width;
            off += len;
        }
        x
    }

    /// Top-left corner of the glyph at offset `p`, clamped to `len()`.
    ///
    /// Offsets past a closed last line map to the start of the row below it,
    /// which may lie outside the bounds.
    #[must_use]
    pub fn point_of(&self, p: usize) -> Point {
        let p = p.min(self.len());
        let i = self.line_of(p);
        match self.lines.get(i) {
            Some(line) => Point::new(self.x_in_line(line, p), self.row_y(i)),
            None => Point::new(self.bounds.x, self.row_y(i)),
        }
    }

    /// Offset of the byte under `pt`.
    ///
    /// Points left of a line map to its first byte, points right of it to
    /// its end (the newline itself for newline-terminated lines), points
    /// above the bounds to the first line and points below the last line to
    /// `len()`.
    #[must_use]
    pub fn index_of(&self, pt: Point) -> usize {
        if self.lines.is_empty() {
            return 0;
        }
        let row = if pt.y < self.bounds.y {
            0
        } else {
            ((pt.y - self.bounds.y) / self.line_height) as usize
        };
        let Some(line) = self.lines.get(row) else {
            return self.len();
        };

        let mut x = self.bounds.x;
        let mut off = line.start;
        for bx in &self.boxes[line.first_box..line.first_box + line.box_count] {
            match bx.kind {
                BoxKind::Run { .. } => {
                    for &c in bx.visible_bytes(&self.arena) {
                        x += self.font.advance(c);
                        if pt.x < x {
                            return off;
                        }
                        off += 1;
                    }
                }
                BoxKind::Tab | BoxKind::Newline => {
                    x += bx.width;
                    if pt.x < x {
                        return off;
                    }
                    off += 1;
                }
            }
        }
        if line.end == LineEnd::Newline {
            line.end_offset() - 1
        } else {
            line.end_offset()
        }
    }
}
