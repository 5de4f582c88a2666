use approx::assert_abs_diff_eq;
use bump_chart::ChartError;
use bump_chart::core::{
    ChartAxis, LabelOrientation, PointScale, decimate, estimate_text_width, label_footprint,
    label_stride, longest_label_width,
};

#[test]
fn point_scale_pads_half_a_step_at_both_ends() {
    let scale = PointScale::new(ChartAxis::Period, ["q1", "q2", "q3", "q4"], (0.0, 400.0))
        .expect("scale");

    assert_abs_diff_eq!(scale.step(), 100.0);
    assert_abs_diff_eq!(scale.map("q1").expect("q1"), 50.0);
    assert_abs_diff_eq!(scale.map("q4").expect("q4"), 350.0);
    assert_eq!(scale.map("q5"), None);
}

#[test]
fn point_scale_without_padding_is_flush() {
    let scale = PointScale::new(ChartAxis::Ranking, ["1", "2", "3"], (10.0, 110.0))
        .expect("scale")
        .with_padding(0.0);
    assert_abs_diff_eq!(scale.map("1").expect("1"), 10.0);
    assert_abs_diff_eq!(scale.map("2").expect("2"), 60.0);
    assert_abs_diff_eq!(scale.map("3").expect("3"), 110.0);
}

#[test]
fn single_value_sits_mid_range() {
    let scale = PointScale::new(ChartAxis::Period, ["only"], (0.0, 90.0)).expect("scale");
    assert_abs_diff_eq!(scale.map("only").expect("only"), 45.0);
}

#[test]
fn empty_domain_is_reported_per_axis() {
    let error = PointScale::new(ChartAxis::Ranking, Vec::<String>::new(), (0.0, 10.0))
        .expect_err("empty domain");
    assert!(matches!(
        error,
        ChartError::EmptyDomain {
            axis: ChartAxis::Ranking
        }
    ));
}

#[test]
fn duplicate_domain_values_collapse() {
    let scale = PointScale::new(ChartAxis::Period, ["a", "b", "a"], (0.0, 200.0)).expect("scale");
    assert_eq!(scale.len(), 2);
    assert_eq!(scale.domain().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn horizontal_labels_spread_on_text_width() {
    let width = longest_label_width(["Jan", "February", "Mar"], 12.0);
    assert_abs_diff_eq!(width, estimate_text_width("February", 12.0));
    assert_abs_diff_eq!(width, 48.0);

    let footprint = label_footprint(LabelOrientation::Horizontal, width, 12.0);
    // 48 * 12 / 200 = 2.88
    assert_eq!(label_stride(footprint, 12, 200.0), 3);
}

#[test]
fn vertical_labels_spread_on_font_height() {
    let footprint = label_footprint(LabelOrientation::Vertical, 48.0, 12.0);
    assert_abs_diff_eq!(footprint, 12.0);
    assert_eq!(label_stride(footprint, 12, 200.0), 1);
    assert_eq!(label_stride(footprint, 40, 200.0), 3);
}

#[test]
fn stride_keeps_the_first_label() {
    let labels = ["1", "2", "3", "4", "5", "6", "7"];
    let shown: Vec<&str> = decimate(&labels, 3).map(|(_, label)| *label).collect();
    assert_eq!(shown, vec!["1", "4", "7"]);
}

#[test]
fn no_room_shows_only_the_first_label() {
    assert_eq!(label_stride(12.0, 5, 0.0), 5);
    let labels = ["a", "b", "c", "d", "e"];
    assert_eq!(decimate(&labels, 5).count(), 1);
}
