#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every fixture

//! Shared fixtures for the integration tests.

use std::sync::Arc;
use textframe::buffer::{Canvas, Point, Rect};
use textframe::font::BlockFont;
use textframe::frame::{Frame, FrameOptions};
use textframe::viewport::{Viewport, ViewportOptions, WaterMarks};
use textframe::Theme;
use tracing::Level;

/// Cell width of the test font.
pub const CELL: i32 = 7;
/// Line height of the test font.
pub const LINE: i32 = 13;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

pub fn font() -> Arc<BlockFont> {
    Arc::new(BlockFont::new(CELL, LINE))
}

/// A frame filling a `w` x `h` canvas.
pub fn frame(w: i32, h: i32) -> Frame {
    Frame::new(
        Canvas::new(w, h),
        Rect::new(0, 0, w, h),
        font(),
        Theme::default(),
        FrameOptions::default(),
    )
}

/// A viewport of the given size with the default padding.
pub fn viewport(w: i32, h: i32) -> Viewport {
    viewport_with(w, h, WaterMarks::default())
}

pub fn viewport_with(w: i32, h: i32, water: WaterMarks) -> Viewport {
    Viewport::new(
        font(),
        Theme::default(),
        ViewportOptions {
            size: Point::new(w, h),
            pad: Point::new(14, 4),
            water,
            ..ViewportOptions::default()
        },
    )
}

/// `"line 00\n"`, `"line 01\n"`, ... every line 8 bytes long.
pub fn numbered_lines(n: usize) -> Vec<u8> {
    (0..n)
        .flat_map(|i| format!("line {i:02}\n").into_bytes())
        .collect()
}

/// One row per laid-out line: index, byte range, width, ending and text.
pub fn dump_lines(frame: &Frame) -> String {
    frame
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let text = &frame.bytes()[line.start..line.end_offset()];
            format!(
                "{i} {}..{} w={} {:?} {}",
                line.start,
                line.end_offset(),
                line.width,
                line.end,
                text.escape_ascii()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Copy every flushed rectangle from `frame` into `shadow`.
///
/// If dirty tracking is sound, `shadow` ends up identical to the frame's
/// canvas.
pub fn apply_flush(frame: &mut Frame, shadow: &mut Canvas) {
    for rect in frame.flush_cache() {
        shadow.copy_from(rect.min(), frame.canvas(), rect);
    }
}
