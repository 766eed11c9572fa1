//! Benchmarks for per-frame column geometry lookups.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gridsizer::layout::{ColumnFilter, ColumnSizer, ColumnStretcher, StretchMode, Viewport};
use gridsizer::{GridSettings, RowHeaderWidth, WidthSetting};

fn settings(columns: usize) -> GridSettings {
    GridSettings::new()
        .with_column_width(WidthSetting::PerIndex(
            (0..columns).map(|i| Some(40.0 + (i % 7) as f64 * 10.0)).collect(),
        ))
        .with_row_header_width(RowHeaderWidth::Uniform(50.0))
        .with_row_headers(1)
}

/// Benchmark resolving stretched widths for every visible column of a frame
fn bench_stretched_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("stretched_widths");

    for columns in [50usize, 500, 5000] {
        let mut sizer = ColumnSizer::new(
            settings(columns),
            ColumnFilter::new(0, columns, 1),
            Viewport::new(),
        );
        let widths = sizer
            .stretched_widths(0..columns, None)
            .expect("widths")
            .into_iter()
            .map(|w| w.unwrap_or(0.0))
            .collect();
        let mut stretcher = ColumnStretcher::new(StretchMode::All, widths);
        sizer.viewport_mut().resize(1_000_000.0, 600.0);
        sizer.calculate_widths(Some(&mut stretcher));

        group.throughput(Throughput::Elements(columns as u64));
        group.bench_with_input(BenchmarkId::from_parameter(columns), &columns, |b, &n| {
            b.iter(|| {
                sizer
                    .stretched_widths(black_box(0..n), Some(&stretcher))
                    .expect("widths")
            })
        });
    }

    group.finish();
}

/// Benchmark the once-per-pass header width rebuild
fn bench_calculate_widths(c: &mut Criterion) {
    let mut sizer = ColumnSizer::new(settings(100), ColumnFilter::new(0, 100, 1), Viewport::new());
    let mut stretcher = ColumnStretcher::new(StretchMode::Last, vec![50.0; 100]);

    c.bench_function("calculate_widths", |b| {
        b.iter(|| sizer.calculate_widths(Some(&mut stretcher)))
    });
}

criterion_group!(benches, bench_stretched_widths, bench_calculate_widths);
criterion_main!(benches);
