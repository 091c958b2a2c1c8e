//! Benchmarks for icon rasterisation and frame encoding.
//!
//! Run with: cargo bench --package renderer --bench icon_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use inky_common::{IconType, Position};
use renderer::png::encode_frame;
use renderer::{draw_icon, Accent, Canvas, Palette, BLACK, WHITE};

fn full_strip() -> Canvas {
    let mut canvas = Canvas::new(400, 300, WHITE);
    for (i, icon) in IconType::ALL.iter().enumerate() {
        let x = 10 + (i as i32 % 5) * 78;
        let y = 40 + (i as i32 / 5) * 120;
        draw_icon(&mut canvas, *icon, Position::new(x, y), BLACK, WHITE);
    }
    canvas
}

// =============================================================================
// ICON BENCHMARKS
// =============================================================================

fn bench_draw_icon(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_icon");

    for icon in IconType::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(icon), &icon, |b, &icon| {
            let mut canvas = Canvas::new(80, 70, WHITE);
            b.iter(|| {
                draw_icon(&mut canvas, black_box(icon), Position::new(5, 5), BLACK, WHITE);
            });
        });
    }

    group.finish();
}

// =============================================================================
// FRAME BENCHMARKS
// =============================================================================

fn bench_quantise_and_encode(c: &mut Criterion) {
    let canvas = full_strip();
    let palette = Palette::new(Accent::Yellow);

    c.bench_function("quantise_400x300", |b| {
        b.iter(|| black_box(palette.quantise(black_box(&canvas))))
    });

    let frame = palette.quantise(&canvas);
    c.bench_function("encode_png_400x300", |b| {
        b.iter(|| black_box(encode_frame(black_box(&frame))))
    });
}

criterion_group!(benches, bench_draw_icon, bench_quantise_and_encode);
criterion_main!(benches);
