//! Benchmarks for the color engine and calendar rendering.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use heatmap_common::calendar::dates_of_year;
use heatmap_common::{AlignedCell, MetricFamily};
use renderer::{render_calendar, GridLayout, RenderMode, StyleSet};
use test_utils::seasonal_temperature;

fn year_of_cells(year: i32) -> Vec<AlignedCell> {
    dates_of_year(year)
        .map(|d| AlignedCell::new(d, Some(seasonal_temperature(d, 55.0, 30.0).round())))
        .collect()
}

fn bench_color_lookup(c: &mut Criterion) {
    let styles = StyleSet::builtin();
    let values: Vec<f64> = (0..1000).map(|i| -40.0 + i as f64 * 0.17).collect();

    let mut group = c.benchmark_group("color_lookup");
    group.throughput(Throughput::Elements(values.len() as u64));

    for mode in [RenderMode::Absolute, RenderMode::Differential] {
        let policy = styles.policy(MetricFamily::Temperature, mode);
        group.bench_with_input(
            BenchmarkId::new("temperature", format!("{:?}", mode)),
            &values,
            |b, values| {
                b.iter(|| {
                    for v in values {
                        black_box(policy.color_for(Some(*v)));
                    }
                })
            },
        );
    }
    group.finish();
}

fn bench_render_calendar(c: &mut Criterion) {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Absolute);
    let cells = year_of_cells(2021);

    let mut group = c.benchmark_group("render_calendar");
    for cell_size in [20u32, 40] {
        let layout = GridLayout::with_cell_size(cell_size);
        group.bench_with_input(BenchmarkId::new("cell_size", cell_size), &layout, |b, layout| {
            b.iter(|| render_calendar(black_box(&cells), 2021, &policy, "Bench", layout, None))
        });
    }
    group.finish();
}

fn bench_encode_png(c: &mut Criterion) {
    let styles = StyleSet::builtin();
    let policy = styles.policy(MetricFamily::Temperature, RenderMode::Absolute);
    let img = render_calendar(
        &year_of_cells(2021),
        2021,
        &policy,
        "Bench",
        &GridLayout::default(),
        None,
    )
    .expect("render");

    c.bench_function("encode_png/calendar", |b| b.iter(|| img.to_png()));
}

criterion_group!(benches, bench_color_lookup, bench_render_calendar, bench_encode_png);
criterion_main!(benches);
