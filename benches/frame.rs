//! Layout and redraw benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use textframe::{BlockFont, Canvas, Frame, FrameOptions, Rect, Theme};

fn new_frame() -> Frame {
    Frame::new(
        Canvas::new(640, 480),
        Rect::new(0, 0, 640, 480),
        Arc::new(BlockFont::default()),
        Theme::default(),
        FrameOptions::default(),
    )
}

fn sample_text(len: usize) -> Vec<u8> {
    b"The quick brown fox\tjumps over the lazy dog.\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn frame_insert_at_head(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_insert_at_head");
    for len in [1usize, 100, 10_000, 100_000] {
        let text = sample_text(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter_batched(
                || {
                    let mut frame = new_frame();
                    frame.insert(&sample_text(2_000), 0);
                    frame
                },
                |mut frame| frame.insert(black_box(text), 0),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn frame_typing(c: &mut Criterion) {
    c.bench_function("frame_type_char_mid_line", |b| {
        let mut frame = new_frame();
        frame.insert(&sample_text(2_000), 0);
        b.iter(|| {
            frame.insert(black_box(b"x"), 10);
            frame.delete(10, 11);
            frame.flush_cache();
        })
    });
}

fn frame_select(c: &mut Criterion) {
    let mut frame = new_frame();
    frame.insert(&sample_text(2_000), 0);

    c.bench_function("frame_select_extend_one", |b| {
        let mut end = 100;
        b.iter(|| {
            end = if end >= 1_500 { 100 } else { end + 1 };
            frame.select(black_box(50), black_box(end));
            frame.flush_cache();
        })
    });
}

fn frame_mapping(c: &mut Criterion) {
    let mut frame = new_frame();
    frame.insert(&sample_text(2_000), 0);

    c.bench_function("frame_point_of", |b| {
        b.iter(|| frame.point_of(black_box(1_200)))
    });

    c.bench_function("frame_index_of", |b| {
        b.iter(|| frame.index_of(black_box(textframe::Point::new(300, 250))))
    });
}

criterion_group!(
    benches,
    frame_insert_at_head,
    frame_typing,
    frame_select,
    frame_mapping
);
criterion_main!(benches);
