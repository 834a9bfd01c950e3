//! End-to-end viewport scenarios: edits, growth, compaction and scrolling.
//!
//! Each test drives a [`Viewport`] through its public API only and checks
//! the document, the marks and what the frame shows.

mod common;

use common::{init_tracing, numbered_lines, viewport, viewport_with};
use textframe::Error;
use textframe::viewport::{Viewport, WaterMarks};

/// The frame must always show the document from the origin onward.
fn assert_frame_mirrors_document(v: &Viewport) {
    let start = v.origin();
    let end = start + v.visible_len();
    assert!(end <= v.len(), "visible text runs past the document");
    assert_eq!(v.frame().bytes(), &v.bytes()[start..end]);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn repeated_head_inserts_stay_on_one_line() {
    init_tracing();
    let mut v = viewport(200, 100);
    v.insert(b"abc\n", 0).unwrap();
    for _ in 0..10 {
        v.insert(b"1", 0).unwrap();
    }

    assert_eq!(v.origin(), 0);
    assert_eq!(v.frame().bytes(), b"1111111111abc\n");
    assert_eq!(v.visible_len(), 14);
    assert_eq!(v.frame().line_count(), 2);
}

#[test]
fn tail_insert_below_high_water_grows_by_doubling() {
    init_tracing();
    let mut v = viewport(200, 100);
    v.insert(&[b'x'; 2000], 0).unwrap();
    assert_eq!(v.capacity(), 2 * 2000 + 1024);

    let at = v.insert(b"0123456789", 2000).unwrap();

    assert_eq!(at, 2000);
    assert_eq!(v.len(), 2010);
    assert_eq!(v.origin(), 0);
    assert_eq!(&v.bytes()[..2000], &[b'x'; 2000][..]);
    assert_ne!(v.capacity(), 2010);
    assert_eq!(v.capacity(), 5024);
}

#[test]
fn delete_before_origin_shifts_origin_only() {
    init_tracing();
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(50), 0).unwrap();
    v.set_origin(80, true);
    let boxes = v.frame().boxes().to_vec();
    let visible = v.frame().bytes().to_vec();

    v.delete(8, 24);

    assert_eq!(v.origin(), 64);
    assert_eq!(v.frame().bytes(), &visible[..]);
    assert_eq!(v.frame().boxes().len(), boxes.len());
    for (a, b) in v.frame().boxes().iter().zip(&boxes) {
        assert_eq!((a.kind, a.width, a.len()), (b.kind, b.width, b.len()));
    }
    assert_frame_mirrors_document(&v);
}

#[test]
fn delete_after_visible_text_leaves_frame() {
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(50), 0).unwrap();
    let visible = v.frame().bytes().to_vec();

    v.delete(300, 340);

    assert_eq!(v.len(), 360);
    assert_eq!(v.frame().bytes(), &visible[..]);
}

#[test]
fn delete_inside_visible_text_refills() {
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(50), 0).unwrap();
    let lines = v.frame().line_count();

    v.delete(8, 40);

    assert_eq!(&v.bytes()[..16], b"line 00\nline 05\n");
    assert_eq!(v.frame().line_count(), lines);
    assert!(v.frame().full());
    assert_frame_mirrors_document(&v);
}

#[test]
fn selection_survives_scrolling_out_of_view() {
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(50), 0).unwrap();
    v.select(8, 16);
    v.set_origin(200, true);

    assert_eq!(v.dot(), (8, 16));
    assert_eq!(v.frame().dot(), (0, 0));

    v.set_origin(0, true);
    assert_eq!(v.frame().dot(), (8, 16));
    assert_eq!(v.selected_bytes(), b"line 01\n");
}

// ============================================================================
// Compaction boundary
// ============================================================================

fn small_marks() -> WaterMarks {
    WaterMarks {
        high: 100,
        low: 20,
        min: 10,
    }
}

#[test]
fn insert_between_hold_and_origin_never_compacts() {
    init_tracing();
    let mut v = viewport_with(200, 100, small_marks());
    v.insert(&numbered_lines(11), 0).unwrap();
    v.set_origin(40, true);
    v.set_hold(30);

    // Past the high water mark, but before the origin.
    let at = v.insert(&[b'-'; 20], 35).unwrap();

    assert_eq!(at, 35);
    assert_eq!(v.len(), 108);
    assert_eq!(v.origin(), 60);
    assert_eq!(v.hold(), 30);
    assert_frame_mirrors_document(&v);
}

#[test]
fn insert_between_origin_and_hold_never_compacts() {
    let mut v = viewport_with(200, 100, small_marks());
    v.insert(&numbered_lines(11), 0).unwrap();
    v.set_origin(40, true);
    v.set_hold(60);

    let at = v.insert(&[b'-'; 20], 50).unwrap();

    assert_eq!(at, 50);
    assert_eq!(v.len(), 108);
    assert_eq!(v.origin(), 40);
    assert_eq!(v.hold(), 80);
    assert_frame_mirrors_document(&v);
}

#[test]
fn insert_past_both_marks_compacts_up_to_lower_mark() {
    init_tracing();
    let mut v = viewport_with(200, 100, small_marks());
    v.insert(&numbered_lines(11), 0).unwrap();
    v.set_origin(40, true);
    v.set_hold(30);
    v.insert(&[b'-'; 20], 35).unwrap();
    v.select(50, 70);
    let mut expected = v.bytes().to_vec();
    expected.extend_from_slice(b"tail\n");

    let at = v.insert(b"tail\n", v.len()).unwrap();

    // Shifted by min(high - low, min(origin, hold)) = 30.
    assert_eq!(at, 108 - 30);
    assert_eq!(v.bytes(), &expected[30..]);
    assert_eq!(v.origin(), 30);
    assert_eq!(v.hold(), 0);
    assert_eq!(v.dot(), (20, 40));
    assert_frame_mirrors_document(&v);
}

#[test]
fn compaction_never_exceeds_high_minus_low() {
    let mut v = viewport_with(200, 100, small_marks());
    v.insert(&numbered_lines(12), 0).unwrap();
    v.set_origin(88, true);
    v.set_hold(88);

    let at = v.insert(b"line 12\n", 96).unwrap();

    assert_eq!(at, 16);
    assert_eq!(v.origin(), 8);
    assert_eq!(v.hold(), 8);
    assert_eq!(v.len(), 24);
    assert_frame_mirrors_document(&v);
}

#[test]
fn compaction_needs_a_nonzero_mark() {
    let mut v = viewport_with(200, 100, small_marks());
    v.insert(&numbered_lines(11), 0).unwrap();

    let at = v.insert(&[b'-'; 20], 88).unwrap();

    assert_eq!(at, 88);
    assert_eq!(v.len(), 108);
    assert_eq!(v.origin(), 0);
}

#[test]
fn failed_growth_leaves_viewport_usable() {
    init_tracing();
    let mut v = viewport_with(
        200,
        100,
        WaterMarks {
            high: usize::MAX / 4,
            low: 0,
            min: usize::MAX,
        },
    );

    let err = v.insert(b"hello\nworld\n", 0).unwrap_err();
    assert!(matches!(err, Error::Capacity { .. }), "{err:?}");
    assert!(std::error::Error::source(&err).is_some());

    assert_eq!(v.len(), 0);
    assert_eq!(v.origin(), 0);
    assert_eq!(v.hold(), 0);
    assert_eq!(v.dot(), (0, 0));
    assert_eq!(v.visible_len(), 0);
    assert!(v.frame().is_empty());
    assert_frame_mirrors_document(&v);

    v.select(0, 3);
    v.scroll_lines(2);
    v.delete(0, 4);
    assert_eq!(v.dot(), (0, 0));
    assert!(v.insert(b"x", 0).is_err());
    assert_eq!(v.len(), 0);
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn scrolling_keeps_frame_consistent() {
    init_tracing();
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(60), 0).unwrap();

    v.scroll_lines(5);
    assert_eq!(v.origin(), 40);
    assert_frame_mirrors_document(&v);

    v.show(400);
    assert!(v.origin() <= 400 && 400 < v.origin() + v.visible_len());
    assert_frame_mirrors_document(&v);

    v.scroll_lines(-100);
    assert_eq!(v.origin(), 0);
    assert_frame_mirrors_document(&v);
}

#[test]
fn binary_document_scrolls_in_bounded_steps() {
    let mut v = viewport(200, 100);
    let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
    v.insert(&data, 0).unwrap();
    v.set_origin(3000, false);
    assert_frame_mirrors_document(&v);

    let before = v.origin();
    v.scroll_lines(-1);
    assert!(v.origin() < before);
    assert!(before - v.origin() <= 128);
    assert_frame_mirrors_document(&v);
}
