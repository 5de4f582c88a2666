use bump_chart::core::{Grid, SizeTemplate, SizeToken};
use proptest::prelude::*;

fn template(fixed: &[f64], flexible: usize) -> SizeTemplate {
    SizeTemplate::new(
        fixed
            .iter()
            .map(|px| SizeToken::Px(*px))
            .chain(std::iter::repeat_n(SizeToken::Fr(1.0), flexible)),
    )
}

proptest! {
    #[test]
    fn resolved_tracks_are_contiguous_and_fill_the_canvas(
        fixed in prop::collection::vec(0.0f64..50.0, 0..6),
        flexible in 1usize..4,
        slack in 0.0f64..2_000.0
    ) {
        let total = fixed.iter().sum::<f64>() + slack;
        let intervals = template(&fixed, flexible).resolve(total);

        prop_assert_eq!(intervals.len(), fixed.len() + flexible);
        prop_assert_eq!(intervals[0].0, 0.0);
        for pair in intervals.windows(2) {
            prop_assert_eq!(pair[0].1, pair[1].0);
        }
        let end = intervals.last().map_or(0.0, |interval| interval.1);
        prop_assert!((end - total).abs() <= 1e-6);
    }

    #[test]
    fn equal_weights_share_the_remainder_equally(
        fixed in prop::collection::vec(0.0f64..50.0, 0..4),
        flexible in 2usize..5,
        slack in 0.0f64..1_000.0
    ) {
        let total = fixed.iter().sum::<f64>() + slack;
        let intervals = template(&fixed, flexible).resolve(total);
        let share = slack / flexible as f64;
        for (start, end) in &intervals[fixed.len()..] {
            prop_assert!((end - start - share).abs() <= 1e-6);
        }
    }

    #[test]
    fn overfull_templates_never_produce_negative_tracks(
        fixed in prop::collection::vec(1.0f64..100.0, 1..6),
        deficit in 0.0f64..1.0
    ) {
        let total = fixed.iter().sum::<f64>() * deficit;
        for (start, end) in template(&fixed, 2).resolve(total) {
            prop_assert!(end >= start);
        }
    }

    #[test]
    fn ranges_contain_their_corner_cells(
        width in 50.0f64..2_000.0,
        height in 50.0f64..2_000.0,
        column in 0usize..6,
        row in 0usize..5
    ) {
        let grid = Grid::new(
            width,
            height,
            "30px 60px 12px 1fr 12px 60px",
            "12px 12px 1fr 12px 12px",
        )
        .expect("grid");
        let letter = char::from(b'a' + column as u8);
        let cell = grid.get_coords(&format!("{letter}{}", row + 1)).expect("cell");
        let range = grid.get_coords(&format!("a1:{letter}{}", row + 1)).expect("range");

        prop_assert_eq!(range.x1, 0.0);
        prop_assert_eq!(range.y1, 0.0);
        prop_assert_eq!(range.x2, cell.x2);
        prop_assert_eq!(range.y2, cell.y2);
    }
}
