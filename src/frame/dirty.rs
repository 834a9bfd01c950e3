//! Dirty rectangle tracking.

use crate::buffer::Rect;

/// Set of canvas rectangles painted since the last flush.
///
/// Rectangles are merged only when the union adds no area: a rectangle
/// already covered is dropped, rectangles it covers are absorbed, and
/// neighbours on the same row band that touch are joined. Merging never
/// marks pixels that were not painted.
#[derive(Clone, Debug, Default)]
pub struct DirtyCache {
    rects: Vec<Rect>,
}

impl DirtyCache {
    /// Create an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Record `rect` as painted.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_empty() || self.rects.iter().any(|r| r.contains_rect(&rect)) {
            return;
        }
        self.rects.retain(|r| !rect.contains_rect(r));

        let mut rect = rect;
        while let Some(i) = self.rects.iter().position(|r| same_band_touching(r, &rect)) {
            let r = self.rects.swap_remove(i);
            rect = rect.union(&r);
        }
        self.rects.push(rect);
    }

    /// Pending rectangles.
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Total area of the pending rectangles. Rectangles may overlap, so this
    /// is an upper bound on the number of distinct pixels.
    #[must_use]
    pub fn area(&self) -> i64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Drain the pending rectangles.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.rects)
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

fn same_band_touching(a: &Rect, b: &Rect) -> bool {
    a.y == b.y && a.height == b.height && a.x <= b.right() && b.x <= a.right()
}
