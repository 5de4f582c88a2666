use bump_chart::api::{BumpChart, BumpChartConfig, ChartLayout};
use bump_chart::core::{
    BumpChartSnapshot, ChartAxis, DataRow, Grid, HexColor, Point, SnapshotBuilder, Viewport,
    build_line_segments,
};
use bump_chart::render::{NullRenderer, RenderSurface};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const PALETTE: [HexColor; 4] = [
    HexColor::rgb(0x1f, 0x77, 0xb4),
    HexColor::rgb(0xff, 0x7f, 0x0e),
    HexColor::rgb(0x2c, 0xa0, 0x2c),
    HexColor::rgb(0xd6, 0x27, 0x28),
];

/// `lines` categories over `periods` periods; ranks rotate each period.
fn generated_snapshot(lines: usize, periods: usize) -> BumpChartSnapshot {
    let period_names: Vec<String> = (0..periods).map(|p| format!("P{p:03}")).collect();
    let ranks: Vec<String> = (1..=lines).map(|r| r.to_string()).collect();
    let mut builder = SnapshotBuilder::new()
        .with_periods(period_names.iter().map(String::as_str))
        .with_rankings(ranks.iter().map(String::as_str));
    for (p, period) in period_names.iter().enumerate() {
        for line in 0..lines {
            let rank = &ranks[(line + p) % lines];
            let color = PALETTE[(line + p) % PALETTE.len()];
            builder = builder.with_row(&format!("line-{line}"), period, rank, color, line % 7 == 0);
        }
    }
    builder.build()
}

fn bench_grid_resolution(c: &mut Criterion) {
    c.bench_function("grid_resolve_range", |b| {
        b.iter(|| {
            let grid = Grid::new(
                black_box(1920.0),
                black_box(1080.0),
                "30px 60px 12px 1fr 12px 60px",
                "12px 12px 1fr 12px 12px",
            )
            .expect("valid grid");
            let _ = grid.get_coords(black_box("c2:e4")).expect("graph area");
        })
    });
}

fn bench_layout_and_segments_50x40(c: &mut Criterion) {
    let snapshot = generated_snapshot(50, 40);
    let config = BumpChartConfig::new(Viewport::new(1920, 1080));
    let layout = ChartLayout::compute(&config, config.viewport, &snapshot).expect("layout");
    let step_x = layout.drawing.width / 40.0;
    let step_y = layout.drawing.height / 50.0;
    let position = |row: &DataRow| -> Option<Point> {
        let rank: f64 = row.ranking.formatted.parse().ok()?;
        Some(Point::new(
            layout.drawing.x1 + (row.period.leaf_index as f64 + 0.5) * step_x,
            layout.drawing.y1 + (rank - 0.5) * step_y,
        ))
    };

    c.bench_function("layout_compute_50x40", |b| {
        b.iter(|| {
            let _ = ChartLayout::compute(black_box(&config), config.viewport, black_box(&snapshot))
                .expect("layout");
        })
    });

    c.bench_function("line_segments_50x40", |b| {
        b.iter(|| {
            for leaf in snapshot.leaves(ChartAxis::LineBy) {
                let rows: Vec<&DataRow> = snapshot.leaf_rows(leaf).collect();
                let _ = build_line_segments(
                    black_box(&rows),
                    position,
                    layout.marker_radius(),
                    layout.line_width,
                );
            }
        })
    });
}

fn bench_render_pass_50x40(c: &mut Criterion) {
    let snapshot = generated_snapshot(50, 40);
    let config = BumpChartConfig::new(Viewport::new(1920, 1080));
    let mut chart = BumpChart::new(NullRenderer::default(), config).expect("chart");
    let mut surface = RenderSurface::new();

    c.bench_function("render_pass_reconcile_50x40", |b| {
        b.iter(|| {
            let _ = chart
                .render(&mut surface, black_box(&snapshot))
                .expect("render pass");
        })
    });
}

criterion_group!(
    benches,
    bench_grid_resolution,
    bench_layout_and_segments_50x40,
    bench_render_pass_50x40
);
criterion_main!(benches);
