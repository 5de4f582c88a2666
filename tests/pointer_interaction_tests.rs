use approx::assert_abs_diff_eq;
use bump_chart::api::{BumpChart, BumpChartConfig, ChartStyle, ClickOutcome, TooltipAxis};
use bump_chart::core::{
    BumpChartSnapshot, ChartAxis, HexColor, MarkingCommand, MarkingOperation, Point, Rect, RowId,
    SnapshotBuilder, Viewport,
};
use bump_chart::interaction::{DragEndOutcome, InteractionRegion, Modifiers};
use bump_chart::render::{CanvasLayerKind, DrawCommand, NullRenderer, RenderSurface};

const RED: HexColor = HexColor::rgb(0xff, 0x00, 0x00);
const BLUE: HexColor = HexColor::rgb(0x00, 0x00, 0xff);

// Layout of the fixture at 400x300, font 10, marker share 0.2:
// graph marking x 50..365, y 10..290; column strip y 0..10; rank strip x 0..15.
// Markers (r 14.5): row 0 (137, 88.25), row 1 (137, 211.75),
// row 2 (278, 211.75), row 3 (278, 88.25).
fn snapshot() -> BumpChartSnapshot {
    SnapshotBuilder::new()
        .with_periods(["2020", "2021"])
        .with_rankings(["1", "2"])
        .with_row("alpha", "2020", "1", RED, false)
        .with_row("beta", "2020", "2", BLUE, false)
        .with_row("alpha", "2021", "2", BLUE, false)
        .with_row("beta", "2021", "1", RED, false)
        .build()
}

fn rendered() -> (BumpChart<NullRenderer>, RenderSurface, BumpChartSnapshot) {
    let config = BumpChartConfig::new(Viewport::new(400, 300))
        .with_font_size(10.0)
        .with_relative_marker_size(0.2);
    let mut chart = BumpChart::new(NullRenderer::default(), config).expect("chart");
    let mut surface = RenderSurface::new();
    let snapshot = snapshot();
    chart.render(&mut surface, &snapshot).expect("render");
    (chart, surface, snapshot)
}

#[test]
fn interaction_areas_match_the_marking_grid() {
    let (_, surface, _) = rendered();

    let graph = surface
        .interaction_area(InteractionRegion::Graph)
        .expect("graph");
    assert_abs_diff_eq!(graph.x, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(graph.width, 315.0, epsilon = 1e-9);
    assert_abs_diff_eq!(graph.y, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(graph.height, 280.0, epsilon = 1e-9);

    assert_eq!(
        surface.interaction_region_at(Point::new(100.0, 5.0)),
        Some(InteractionRegion::PeriodAxis)
    );
    assert_eq!(
        surface.interaction_region_at(Point::new(8.0, 150.0)),
        Some(InteractionRegion::RankingAxis)
    );
    assert_eq!(surface.interaction_region_at(Point::new(390.0, 295.0)), None);
}

#[test]
fn graph_drag_marks_covered_markers_and_clears_the_overlay() {
    let (mut chart, mut surface, _) = rendered();

    assert_eq!(
        chart.drag_start(&mut surface, Point::new(60.0, 20.0)),
        Some(InteractionRegion::Graph)
    );
    let rect = chart
        .drag(&mut surface, Point::new(150.0, 100.0))
        .expect("active drag");
    assert_eq!(rect, Rect::new(60.0, 20.0, 90.0, 80.0));

    let overlay = surface.marking_overlay().expect("overlay");
    assert_abs_diff_eq!(overlay.width, 90.0);
    assert_abs_diff_eq!(overlay.fill_color.alpha, 0.1);
    assert_abs_diff_eq!(overlay.border_width, 1.0);
    let frame = surface.to_frame(chart.viewport());
    assert_eq!(
        frame
            .layer(CanvasLayerKind::MarkingOverlay)
            .map(|layer| layer.commands.len()),
        Some(1)
    );

    let mut sink: Vec<MarkingCommand> = Vec::new();
    let outcome = chart.drag_end(&mut surface, Modifiers::NONE, &mut sink);
    assert!(matches!(
        outcome,
        DragEndOutcome::Marked { ref rows, operation: MarkingOperation::Replace }
            if rows.as_slice() == [RowId(0)]
    ));
    assert_eq!(
        sink,
        vec![MarkingCommand::MarkRow {
            row: RowId(0),
            operation: MarkingOperation::Replace
        }]
    );
    assert!(surface.marking_overlay().is_none());
    assert!(chart.active_marking().is_none());
}

#[test]
fn column_strip_drag_marks_a_full_height_band() {
    let (mut chart, mut surface, _) = rendered();

    assert_eq!(
        chart.drag_start(&mut surface, Point::new(100.0, 5.0)),
        Some(InteractionRegion::PeriodAxis)
    );
    let rect = chart
        .drag(&mut surface, Point::new(150.0, 6.0))
        .expect("active drag");
    assert_eq!(rect, Rect::new(100.0, 1.0, 50.0, 280.0));

    let mut sink: Vec<MarkingCommand> = Vec::new();
    chart.drag_end(&mut surface, Modifiers::CTRL, &mut sink);
    assert_eq!(
        sink,
        vec![
            MarkingCommand::MarkRow {
                row: RowId(0),
                operation: MarkingOperation::ToggleOrAdd
            },
            MarkingCommand::MarkRow {
                row: RowId(1),
                operation: MarkingOperation::ToggleOrAdd
            },
        ]
    );
}

#[test]
fn rank_strip_drag_marks_a_full_width_band() {
    let (mut chart, mut surface, _) = rendered();

    assert_eq!(
        chart.drag_start(&mut surface, Point::new(8.0, 80.0)),
        Some(InteractionRegion::RankingAxis)
    );
    let rect = chart
        .drag(&mut surface, Point::new(9.0, 100.0))
        .expect("active drag");
    assert_abs_diff_eq!(rect.x, 50.5, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.width, 314.5, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.y, 80.0);
    assert_abs_diff_eq!(rect.height, 20.0);

    let mut sink: Vec<MarkingCommand> = Vec::new();
    chart.drag_end(&mut surface, Modifiers::NONE, &mut sink);
    let rows: Vec<RowId> = sink
        .iter()
        .filter_map(|command| match command {
            MarkingCommand::MarkRow { row, .. } => Some(*row),
            _ => None,
        })
        .collect();
    assert_eq!(rows, vec![RowId(0), RowId(3)]);
}

#[test]
fn empty_drag_clears_marking() {
    let (mut chart, mut surface, _) = rendered();
    chart.drag_start(&mut surface, Point::new(180.0, 20.0));
    chart.drag(&mut surface, Point::new(240.0, 40.0));

    let mut sink: Vec<MarkingCommand> = Vec::new();
    assert_eq!(
        chart.drag_end(&mut surface, Modifiers::NONE, &mut sink),
        DragEndOutcome::Cleared
    );
    assert_eq!(sink, vec![MarkingCommand::Clear]);
}

#[test]
fn drag_outside_every_area_is_not_tracked() {
    let (mut chart, mut surface, _) = rendered();
    assert_eq!(chart.drag_start(&mut surface, Point::new(390.0, 295.0)), None);
    assert!(surface.marking_overlay().is_none());
    assert_eq!(chart.drag(&mut surface, Point::new(395.0, 298.0)), None);

    let mut sink: Vec<MarkingCommand> = Vec::new();
    assert_eq!(
        chart.drag_end(&mut surface, Modifiers::NONE, &mut sink),
        DragEndOutcome::Ignored
    );
    assert!(sink.is_empty());
}

#[test]
fn tiny_drag_falls_through_to_click() {
    let (mut chart, mut surface, _) = rendered();
    let press = Point::new(207.5, 30.0);
    chart.drag_start(&mut surface, press);
    chart.drag(&mut surface, Point::new(208.5, 31.0));

    let mut sink: Vec<MarkingCommand> = Vec::new();
    assert_eq!(
        chart.drag_end(&mut surface, Modifiers::NONE, &mut sink),
        DragEndOutcome::Click
    );
    assert!(sink.is_empty());

    assert_eq!(
        chart.click(&surface, press, Modifiers::NONE, &mut sink),
        ClickOutcome::Cleared
    );
    assert_eq!(sink, vec![MarkingCommand::Clear]);
}

#[test]
fn cancel_drops_the_gesture() {
    let (mut chart, mut surface, _) = rendered();
    chart.drag_start(&mut surface, Point::new(60.0, 20.0));
    chart.drag(&mut surface, Point::new(150.0, 100.0));
    assert!(chart.active_marking().is_some());

    chart.cancel_drag(&mut surface);
    assert!(surface.marking_overlay().is_none());
    let mut sink: Vec<MarkingCommand> = Vec::new();
    assert_eq!(
        chart.drag_end(&mut surface, Modifiers::NONE, &mut sink),
        DragEndOutcome::Ignored
    );
}

#[test]
fn clicking_a_marker_marks_its_row() {
    let (chart, surface, _) = rendered();
    let mut sink: Vec<MarkingCommand> = Vec::new();

    let outcome = chart.click(&surface, Point::new(137.0, 88.25), Modifiers::NONE, &mut sink);
    assert_eq!(outcome, ClickOutcome::MarkedRow(RowId(0)));

    let outcome = chart.click(&surface, Point::new(280.0, 210.0), Modifiers::CTRL, &mut sink);
    assert_eq!(outcome, ClickOutcome::MarkedRow(RowId(2)));

    assert_eq!(
        sink,
        vec![
            MarkingCommand::MarkRow {
                row: RowId(0),
                operation: MarkingOperation::Replace
            },
            MarkingCommand::MarkRow {
                row: RowId(2),
                operation: MarkingOperation::ToggleOrAdd
            },
        ]
    );
}

#[test]
fn clicking_a_segment_or_side_label_marks_the_line() {
    let (chart, surface, _) = rendered();
    let mut sink: Vec<MarkingCommand> = Vec::new();

    // 30% of the way along alpha's segment, clear of both markers.
    let on_segment = Point::new(137.0 + 0.3 * 141.0, 88.25 + 0.3 * 123.5);
    assert_eq!(
        chart.click(&surface, on_segment, Modifiers::NONE, &mut sink),
        ClickOutcome::MarkedLine { leaf_index: 0 }
    );

    // Left label "beta" is anchored at (20, 211.75).
    assert_eq!(
        chart.click(&surface, Point::new(30.0, 211.75), Modifiers::NONE, &mut sink),
        ClickOutcome::MarkedLine { leaf_index: 1 }
    );

    assert_eq!(
        sink,
        vec![
            MarkingCommand::MarkLeaf {
                axis: ChartAxis::LineBy,
                leaf_index: 0,
                operation: MarkingOperation::Replace
            },
            MarkingCommand::MarkLeaf {
                axis: ChartAxis::LineBy,
                leaf_index: 1,
                operation: MarkingOperation::Replace
            },
        ]
    );
}

#[test]
fn clicking_the_axis_strips_routes_by_region() {
    let (chart, surface, _) = rendered();
    let mut sink: Vec<MarkingCommand> = Vec::new();

    assert_eq!(
        chart.click(&surface, Point::new(100.0, 5.0), Modifiers::NONE, &mut sink),
        ClickOutcome::LabelOrientationMenu { x: 100.0, y: 5.0 }
    );
    assert!(sink.is_empty());

    assert_eq!(
        chart.click(&surface, Point::new(8.0, 150.0), Modifiers::NONE, &mut sink),
        ClickOutcome::Cleared
    );
    assert_eq!(
        chart.click(&surface, Point::new(390.0, 295.0), Modifiers::NONE, &mut sink),
        ClickOutcome::Ignored
    );
    assert_eq!(sink, vec![MarkingCommand::Clear]);
}

#[test]
fn hover_rings_the_marker_and_builds_a_tooltip() {
    let (mut chart, mut surface, snapshot) = rendered();
    chart.set_tooltip_axes(vec![
        TooltipAxis::new("Line By", "[Team]").with_display_parts(["Team"]),
        TooltipAxis::new("Ranking", "[Rank]"),
        TooltipAxis::new("Color by", "<>"),
    ]);

    let hovered = chart
        .hover(&mut surface, &snapshot, Point::new(140.0, 90.0))
        .expect("marker under pointer");
    assert_eq!(hovered.row, RowId(0));
    assert_eq!(hovered.tooltip, "Team: alpha\nRanking: 1");

    let ring = surface.highlight().expect("highlight");
    assert_abs_diff_eq!(ring.radius, 17.5, epsilon = 1e-9);
    assert_abs_diff_eq!(ring.fill.alpha, 0.0);
    let (stroke, width) = ring.stroke.expect("stroke");
    assert_eq!(stroke, ChartStyle::default().font_color.to_color(1.0));
    assert_abs_diff_eq!(width, 1.0);

    let frame = surface.to_frame(chart.viewport());
    let highlight = frame.layer(CanvasLayerKind::Highlight).expect("layer");
    assert!(matches!(highlight.commands.as_slice(), [DrawCommand::Circle(_)]));

    assert!(chart
        .hover(&mut surface, &snapshot, Point::new(207.5, 30.0))
        .is_none());
    assert!(surface.highlight().is_none());
}

#[test]
fn highlight_color_follows_the_style() {
    let (mut chart, mut surface, snapshot) = rendered();
    let accent = HexColor::rgb(0x00, 0x80, 0xff);
    chart.set_style(ChartStyle {
        highlight_color: Some(accent),
        ..ChartStyle::default()
    });

    chart.hover(&mut surface, &snapshot, Point::new(278.0, 88.25));
    let (stroke, _) = surface
        .highlight()
        .and_then(|ring| ring.stroke)
        .expect("stroke");
    assert_eq!(stroke, accent.to_color(1.0));

    chart.hover_leave(&mut surface);
    assert!(surface.highlight().is_none());
}

#[test]
fn new_pass_drops_a_stale_highlight_with_the_graph() {
    let (mut chart, mut surface, snapshot) = rendered();
    chart.hover(&mut surface, &snapshot, Point::new(137.0, 88.25));
    assert!(surface.highlight().is_some());

    chart
        .render(&mut surface, &SnapshotBuilder::new().build())
        .expect("empty pass");
    assert!(surface.highlight().is_none());
}
