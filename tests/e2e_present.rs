//! End-to-end presentation: edits painted by the engine reach a host surface
//! through the blit pool, and mouse input routed through the viewport
//! selects and scrolls.

mod common;

use common::{CELL, LINE, font, init_tracing, numbered_lines, viewport};
use std::sync::Arc;
use textframe::buffer::{Canvas, Point};
use textframe::input::{Buttons, MouseEvent};
use textframe::renderer::{BlitPool, MemorySurface};
use textframe::viewport::{Viewport, ViewportOptions};
use textframe::Theme;

/// Whether `surface` shows `canvas` with its top-left at `at`.
fn shows_at(surface: &Canvas, canvas: &Canvas, at: Point) -> bool {
    (0..canvas.height()).all(|y| {
        (0..canvas.width()).all(|x| {
            surface.get(Point::new(x + at.x, y + at.y)) == canvas.get(Point::new(x, y))
        })
    })
}

/// Screen point in the middle of column `col` of text row `row` for a
/// viewport with the default padding.
fn cell_point(col: i32, row: i32) -> Point {
    Point::new(15 + col * CELL + CELL / 2, 5 + row * LINE + LINE / 2)
}

// ============================================================================
// Presentation
// ============================================================================

#[test]
fn present_mirrors_widget_at_its_window_position() {
    init_tracing();
    let at = Point::new(10, 20);
    let mut v = Viewport::new(
        font(),
        Theme::default(),
        ViewportOptions {
            size: Point::new(200, 100),
            origin: at,
            ..ViewportOptions::default()
        },
    );
    let surface = Arc::new(MemorySurface::new(240, 140));
    let pool = BlitPool::new(surface.clone(), 2).unwrap();

    assert!(v.present(&pool).unwrap() > 0);
    assert!(shows_at(&surface.snapshot(), v.frame().canvas(), at));
    assert_eq!(v.present(&pool).unwrap(), 0);

    v.insert(&numbered_lines(30), 0).unwrap();
    v.select(3, 20);
    assert!(v.present(&pool).unwrap() > 0);
    assert!(shows_at(&surface.snapshot(), v.frame().canvas(), at));
    assert!(v.frame().dirty().is_empty());
}

#[test]
fn present_after_scroll_matches_fresh_render() {
    let surface = Arc::new(MemorySurface::new(200, 100));
    let pool = BlitPool::new(surface.clone(), BlitPool::default_workers()).unwrap();
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(40), 0).unwrap();
    v.present(&pool).unwrap();

    v.scroll_lines(4);
    v.present(&pool).unwrap();

    let mut fresh = viewport(200, 100);
    fresh.insert(&numbered_lines(40), 0).unwrap();
    fresh.set_origin(32, true);
    assert_eq!(&surface.snapshot(), fresh.frame().canvas());
}

// ============================================================================
// Mouse
// ============================================================================

#[test]
fn press_drag_release_selects() {
    init_tracing();
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(20), 0).unwrap();

    v.handle_mouse(MouseEvent::press(cell_point(0, 0), Buttons::LEFT));
    assert!(v.sweeping());
    assert_eq!(v.dot(), (0, 0));

    v.handle_mouse(MouseEvent::drag(cell_point(4, 1), Buttons::LEFT));
    assert_eq!(v.dot(), (0, 12));

    v.handle_mouse(MouseEvent::release(cell_point(4, 1), Buttons::LEFT));
    assert!(!v.sweeping());
    assert_eq!(v.selected_bytes(), b"line 00\nline");
}

#[test]
fn drag_backwards_orders_selection() {
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(20), 0).unwrap();

    v.handle_mouse(MouseEvent::press(cell_point(2, 2), Buttons::LEFT));
    v.handle_mouse(MouseEvent::drag(cell_point(1, 0), Buttons::LEFT));

    assert_eq!(v.dot(), (1, 18));
}

#[test]
fn drag_without_press_is_ignored() {
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(20), 0).unwrap();
    v.select(3, 5);

    v.handle_mouse(MouseEvent::drag(cell_point(4, 1), Buttons::LEFT));

    assert_eq!(v.dot(), (3, 5));
}

#[test]
fn drag_below_frame_scrolls_and_extends() {
    init_tracing();
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(40), 0).unwrap();

    v.handle_mouse(MouseEvent::press(cell_point(0, 0), Buttons::LEFT));
    v.handle_mouse(MouseEvent::drag(Point::new(30, 110), Buttons::LEFT));

    assert_eq!(v.origin(), 8);
    assert_eq!(v.dot(), (0, 64));
    assert!(v.sweeping());
}

#[test]
fn wheel_scrolls_three_lines() {
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(40), 0).unwrap();

    v.handle_mouse(MouseEvent::scroll_down(cell_point(0, 0)));
    assert_eq!(v.origin(), 24);
    v.handle_mouse(MouseEvent::scroll_up(cell_point(0, 0)));
    assert_eq!(v.origin(), 0);
}

#[test]
fn events_are_translated_by_window_position() {
    let at = Point::new(100, 50);
    let mut v = Viewport::new(
        font(),
        Theme::default(),
        ViewportOptions {
            size: Point::new(200, 100),
            origin: at,
            ..ViewportOptions::default()
        },
    );
    v.insert(&numbered_lines(20), 0).unwrap();

    let pt = cell_point(3, 1);
    v.handle_mouse(MouseEvent::press(
        Point::new(pt.x + at.x, pt.y + at.y),
        Buttons::LEFT,
    ));

    assert_eq!(v.dot(), (11, 11));
}

#[test]
fn press_in_scrollbar_jumps() {
    let mut v = viewport(200, 100);
    v.insert(&numbered_lines(50), 0).unwrap();

    v.handle_mouse(MouseEvent::press(Point::new(3, 50), Buttons::MIDDLE));

    assert_eq!(v.origin(), 208);
    assert!(!v.sweeping());
}
