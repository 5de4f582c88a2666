use approx::assert_abs_diff_eq;
use bump_chart::core::{
    AxisLeaf, BumpChartSnapshot, DataRow, GradientKey, HexColor, LeafValue, Point, RowId,
    SegmentFill, adjacent_pairs, build_line_segments, clamp_line_width, collect_gradients,
    contrast_color, contrast_ratio, segment_polygon,
};

fn row(id: u64, period_index: usize, rank: &str, color: HexColor) -> DataRow {
    DataRow {
        id: RowId(id),
        period: LeafValue::new(format!("p{period_index}"), period_index),
        ranking: LeafValue::new(rank, 0),
        line_by: LeafValue::new("line", 0),
        color,
        marked: false,
        values: Default::default(),
    }
}

fn place(row: &DataRow) -> Option<Point> {
    let rank: f64 = row.ranking.formatted.parse().ok()?;
    Some(Point::new(row.period.leaf_index as f64 * 100.0, rank * 50.0))
}

const RED: HexColor = HexColor::rgb(0xff, 0x00, 0x00);
const BLUE: HexColor = HexColor::rgb(0x00, 0x00, 0xff);

#[test]
fn gap_between_periods_breaks_the_line() {
    let a = row(1, 3, "1", RED);
    let b = row(2, 5, "2", RED);
    let rows = [&a, &b];
    assert_eq!(adjacent_pairs(&rows).count(), 0);
    assert!(build_line_segments(&rows, place, 10.0, 2.5).is_empty());
}

#[test]
fn adjacent_periods_are_connected() {
    let a = row(1, 3, "1", RED);
    let b = row(2, 4, "2", RED);
    let rows = [&a, &b];
    let segments = build_line_segments(&rows, place, 10.0, 2.5);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].key(), (RowId(1), RowId(2)));
    assert_eq!(segments[0].fill, SegmentFill::Solid(RED));
}

#[test]
fn a_gap_only_drops_its_own_segment() {
    let rows: Vec<DataRow> = [0, 1, 3, 4]
        .into_iter()
        .enumerate()
        .map(|(id, period)| row(id as u64, period, "1", RED))
        .collect();
    let refs: Vec<&DataRow> = rows.iter().collect();
    let keys: Vec<(RowId, RowId)> = build_line_segments(&refs, place, 10.0, 2.5)
        .iter()
        .map(|segment| segment.key())
        .collect();
    assert_eq!(keys, vec![(RowId(0), RowId(1)), (RowId(2), RowId(3))]);
}

#[test]
fn unplaceable_rows_drop_their_segments() {
    let a = row(1, 0, "1", RED);
    let b = row(2, 1, "n/a", RED);
    let rows = [&a, &b];
    assert!(build_line_segments(&rows, place, 10.0, 2.5).is_empty());
}

#[test]
fn vertical_segment_starts_at_marker_edges() {
    let polygon = segment_polygon(Point::new(0.0, 0.0), Point::new(0.0, 80.0), 10.0, 4.0);
    let h = (100.0_f64 - 4.0).sqrt();

    assert_abs_diff_eq!(polygon[0].y, h, epsilon = 1e-9);
    assert_abs_diff_eq!(polygon[1].y, 80.0 - h, epsilon = 1e-9);
    assert_abs_diff_eq!(polygon[0].x - polygon[3].x, 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(polygon[1].x, polygon[0].x, epsilon = 1e-9);
}

#[test]
fn zero_radius_collapses_the_quad() {
    assert_abs_diff_eq!(clamp_line_width(4.0, 0.0), 0.0);
    let polygon = segment_polygon(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 0.0, 4.0);
    assert_eq!(polygon[0], Point::new(0.0, 0.0));
    assert_eq!(polygon[1], Point::new(30.0, 40.0));
}

#[test]
fn gradient_key_concatenates_ordered_digits() {
    let from: HexColor = "#112233".parse().expect("color");
    let to: HexColor = "#445566".parse().expect("color");
    let key = GradientKey::from_pair(from, to);
    assert_eq!(key.as_str(), "112233445566");
    assert_ne!(GradientKey::from_pair(to, from), key);
    assert_eq!(key.stops().expect("stops"), (from, to));
}

#[test]
fn gradient_key_is_stable_across_passes() {
    let from: HexColor = "#112233".parse().expect("color");
    let to: HexColor = "#445566".parse().expect("color");
    let a = row(1, 0, "1", from);
    let b = row(2, 1, "2", to);
    let rows = [&a, &b];

    let first = build_line_segments(&rows, place, 10.0, 2.5);
    let second = build_line_segments(&rows, place, 10.0, 2.5);
    assert_eq!(first[0].fill, second[0].fill);
    assert_eq!(
        first[0].fill,
        SegmentFill::Gradient(GradientKey::from_pair(from, to))
    );
}

#[test]
fn shared_color_pairs_share_one_gradient() {
    let rows = [
        row(1, 0, "1", RED),
        row(2, 1, "2", BLUE),
        row(3, 2, "1", RED),
        row(4, 3, "2", BLUE),
    ];
    let refs: Vec<&DataRow> = rows.iter().collect();
    let segments = build_line_segments(&refs, place, 10.0, 2.5);
    let gradients = collect_gradients(&segments);

    let keys: Vec<&str> = gradients.keys().map(GradientKey::as_str).collect();
    assert_eq!(keys, vec!["ff00000000ff", "0000ffff0000"]);
    let red_to_blue = &gradients[&GradientKey::from_pair(RED, BLUE)];
    assert_eq!((red_to_blue.from, red_to_blue.to), (RED, BLUE));
}

#[test]
fn contrast_color_picks_the_readable_extreme() {
    assert_eq!(contrast_color(HexColor::BLACK), HexColor::WHITE);
    assert_eq!(contrast_color(HexColor::WHITE), HexColor::BLACK);
    assert_eq!(contrast_color("#ffff00".parse().expect("yellow")), HexColor::BLACK);
    assert_eq!(contrast_color("#000080".parse().expect("navy")), HexColor::WHITE);
    assert_abs_diff_eq!(contrast_ratio(HexColor::BLACK, HexColor::WHITE), 21.0, epsilon = 1e-9);
}

#[test]
fn snapshot_rows_feed_the_builder_in_period_order() {
    let rows = vec![row(1, 1, "2", RED), row(2, 0, "1", RED)];
    let mut line = AxisLeaf::new("line", "line", 0);
    line.rows = vec![RowId(2), RowId(1)];
    let snapshot = BumpChartSnapshot::new(Vec::new(), Vec::new(), vec![line.clone()], rows);

    let ordered: Vec<&DataRow> = snapshot.leaf_rows(&line).collect();
    let segments = build_line_segments(&ordered, place, 10.0, 2.5);
    assert_eq!(segments[0].key(), (RowId(2), RowId(1)));
}
