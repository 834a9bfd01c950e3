//! Layout boxes and the byte arena they view.
//!
//! A [`LayoutBox`] is the atomic unit of layout: a run of printable byte-runes
//! or a single control break (tab or newline). Boxes never own bytes. Each
//! one carries a [`ByteSpan`] into the frame's [`Arena`], stamped with the
//! arena generation it was derived under. Any arena mutation bumps the
//! generation, so a span that was not re-based afterwards is detected the
//! moment someone reads through it.

use crate::font::GlyphProvider;
use std::ops::Range;

/// Longest run a single box may hold.
pub const RUN_LIMIT: usize = 25;

/// What a box represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxKind {
    /// `runes` consecutive printable bytes.
    Run { runes: usize },
    /// A horizontal tab, widened by layout to the next tab stop.
    Tab,
    /// A newline; forces a line break right after it.
    Newline,
}

/// A view of `len` bytes at `start` in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteSpan {
    pub start: usize,
    pub len: usize,
    generation: u64,
}

impl ByteSpan {
    /// Byte range covered by the span.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Generation of the arena this span was derived under.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Growable byte storage with a generation counter.
#[derive(Clone, Debug)]
pub struct Arena {
    bytes: Vec<u8>,
    generation: u64,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Create an empty arena. Generation 0 is never valid, so freshly
    /// tokenized boxes cannot be read before they are re-based.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            generation: 1,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn insert(&mut self, at: usize, bytes: &[u8]) {
        self.bytes.splice(at..at, bytes.iter().copied());
        self.generation += 1;
    }

    pub fn remove(&mut self, range: Range<usize>) {
        self.bytes.drain(range);
        self.generation += 1;
    }

    pub fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.generation += 1;
    }

    /// Bytes under `span`.
    ///
    /// # Panics
    /// Panics if the span was derived under an older generation.
    #[must_use]
    pub fn view(&self, span: ByteSpan) -> &[u8] {
        assert_eq!(
            span.generation, self.generation,
            "stale box span {span:?} read at arena generation {}",
            self.generation
        );
        &self.bytes[span.range()]
    }
}

/// One unit of layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutBox {
    /// Rendered width in pixels. For tabs and newlines this is the width the
    /// last flow assigned.
    pub width: i32,
    /// Width the box needs at the very least when it has to be broken onto
    /// its own line.
    pub min_width: i32,
    pub kind: BoxKind,
    span: ByteSpan,
}

impl LayoutBox {
    fn new(kind: BoxKind, width: i32, min_width: i32) -> Self {
        let len = match kind {
            BoxKind::Run { runes } => runes,
            BoxKind::Tab | BoxKind::Newline => 1,
        };
        Self {
            width,
            min_width,
            kind,
            span: ByteSpan {
                start: 0,
                len,
                generation: 0,
            },
        }
    }

    /// Number of bytes the box represents.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self.kind {
            BoxKind::Run { runes } => runes,
            BoxKind::Tab | BoxKind::Newline => 1,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is a tab or newline box.
    #[must_use]
    pub const fn is_control(&self) -> bool {
        !matches!(self.kind, BoxKind::Run { .. })
    }

    #[must_use]
    pub const fn span(&self) -> ByteSpan {
        self.span
    }

    /// First byte of the box, or 0 for an empty box.
    #[must_use]
    pub fn leading_byte(&self, arena: &Arena) -> u8 {
        self.visible_bytes(arena).first().copied().unwrap_or(0)
    }

    /// The bytes the box renders.
    #[must_use]
    pub fn visible_bytes<'a>(&self, arena: &'a Arena) -> &'a [u8] {
        if self.is_empty() {
            return &[];
        }
        arena.view(self.span)
    }

    /// Split a run after `at` runes, returning the tail as a new box.
    ///
    /// `self` keeps the head. Widths are recomputed from the arena so both
    /// halves stay exact.
    pub(crate) fn split(&mut self, at: usize, arena: &Arena, font: &dyn GlyphProvider) -> Self {
        let BoxKind::Run { runes } = self.kind else {
            unreachable!("control boxes are a single byte and never split");
        };
        debug_assert!(at > 0 && at < runes, "split at {at} of {runes}");
        let tail_width = run_width(&arena.view(self.span)[at..], font);
        let tail = Self {
            width: tail_width,
            min_width: tail_width,
            kind: BoxKind::Run { runes: runes - at },
            span: ByteSpan {
                start: self.span.start + at,
                len: runes - at,
                generation: self.span.generation,
            },
        };
        self.width -= tail_width;
        self.min_width = self.width;
        self.kind = BoxKind::Run { runes: at };
        self.span.len = at;
        tail
    }

    /// Append an adjacent run to this one.
    pub(crate) fn absorb(&mut self, next: &Self) {
        let (BoxKind::Run { runes: a }, BoxKind::Run { runes: b }) = (self.kind, next.kind) else {
            unreachable!("only runs merge");
        };
        debug_assert_eq!(self.span.start + self.span.len, next.span.start);
        self.kind = BoxKind::Run { runes: a + b };
        self.width += next.width;
        self.min_width = self.width;
        self.span.len += next.span.len;
    }

    /// Whether `next` may be merged into this box.
    pub(crate) const fn can_absorb(&self, next: &Self) -> bool {
        match (self.kind, next.kind) {
            (BoxKind::Run { runes: a }, BoxKind::Run { runes: b }) => a + b <= RUN_LIMIT,
            _ => false,
        }
    }
}

/// Sum of advances of `bytes`.
pub(crate) fn run_width(bytes: &[u8], font: &dyn GlyphProvider) -> i32 {
    bytes.iter().map(|&b| font.advance(b)).sum()
}

/// Turn `bytes` into boxes.
///
/// The boxes come back unbound: their spans must be re-based against the
/// arena that receives the bytes before anything reads them.
#[must_use]
pub fn tokenize(bytes: &[u8], font: &dyn GlyphProvider) -> Vec<LayoutBox> {
    let mut out = Vec::with_capacity(bytes.len() / RUN_LIMIT + 1);
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                out.push(LayoutBox::new(BoxKind::Newline, 0, 0));
                i += 1;
            }
            b'\t' => {
                let min = font.advance(b' ');
                out.push(LayoutBox::new(BoxKind::Tab, min, min));
                i += 1;
            }
            _ => {
                let end = bytes[i..]
                    .iter()
                    .take(RUN_LIMIT)
                    .position(|&b| b == b'\n' || b == b'\t')
                    .map_or_else(|| (i + RUN_LIMIT).min(bytes.len()), |n| i + n);
                let width = run_width(&bytes[i..end], font);
                out.push(LayoutBox::new(
                    BoxKind::Run { runes: end - i },
                    width,
                    width,
                ));
                i = end;
            }
        }
    }
    out
}

/// Re-derive every span from box lengths and stamp the arena generation.
///
/// # Panics
/// Panics if the boxes do not cover the arena exactly.
pub fn rebase(boxes: &mut [LayoutBox], arena: &Arena) {
    let mut start = 0;
    for b in boxes.iter_mut() {
        let len = b.len();
        b.span = ByteSpan {
            start,
            len,
            generation: arena.generation(),
        };
        start += len;
    }
    assert_eq!(
        start,
        arena.len(),
        "box lengths sum to {start} but the arena holds {} bytes",
        arena.len()
    );
}
