//! Snapshot tests of line layout.
//!
//! Each snapshot lists the laid-out lines as
//! `index start..end w=<width> <ending> <escaped bytes>`.

mod common;

use common::{dump_lines, frame, viewport};

#[test]
fn snapshot_tabs_wraps_and_blank_lines() {
    // Ten cells per line, five lines.
    let mut f = frame(70, 65);
    f.insert(b"ab\tc\nhello world\n\nx", 0);

    insta::assert_snapshot!(dump_lines(&f), @r"
    0 0..5 w=70 Newline ab\tc\n
    1 5..15 w=70 Wrapped hello worl
    2 15..17 w=70 Newline d\n
    3 17..18 w=70 Newline \n
    4 18..19 w=7 Open x
    ");
    assert!(!f.full());
}

#[test]
fn snapshot_truncated_overflow() {
    let mut f = frame(70, 26);
    f.insert(b"first\nsecond\nthird\n", 0);

    insta::assert_snapshot!(dump_lines(&f), @r"
    0 0..6 w=70 Newline first\n
    1 6..13 w=70 Newline second\n
    ");
    assert!(f.full());
    assert_eq!(f.len(), 13);
}

#[test]
fn snapshot_head_inserts() {
    let mut v = viewport(200, 100);
    v.insert(b"abc\n", 0).unwrap();
    for _ in 0..10 {
        v.insert(b"1", 0).unwrap();
    }

    insta::assert_snapshot!(dump_lines(v.frame()), @r"0 0..14 w=184 Newline 1111111111abc\n");
}
