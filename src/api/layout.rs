use serde::{Deserialize, Serialize};

use crate::core::{
    BumpChartSnapshot, ChartAxis, Grid, GridArea, LabelOrientation, SizeTemplate, SizeToken,
    Viewport, longest_label_width,
};
use crate::error::ChartResult;
use crate::interaction::{FixedRect, InteractionRegion};

use super::BumpChartConfig;

/// Sizes and grid areas of one render pass.
///
/// Columns: rank scale, left labels, margin, plot, margin, right labels.
/// Rows: column labels, margin, plot, margin, bottom padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub font_size_px: f64,
    pub max_column_label_width: f64,
    pub column_label_height: f64,
    pub side_label_width: f64,
    pub rank_scale_width: f64,
    pub marker_size: f64,
    pub line_width: f64,
    pub inner_margin: f64,
    pub columns: SizeTemplate,
    pub rows: SizeTemplate,
    pub right_labels: GridArea,
    pub left_labels: GridArea,
    pub period_axis: GridArea,
    pub ranking_axis: GridArea,
    pub drawing: GridArea,
    pub period_marking: GridArea,
    pub ranking_marking: GridArea,
    pub graph_marking: GridArea,
}

impl ChartLayout {
    /// Sizes every region from the snapshot's label extents and the viewport.
    pub fn compute(
        config: &BumpChartConfig,
        viewport: Viewport,
        snapshot: &BumpChartSnapshot,
    ) -> ChartResult<Self> {
        let font_size = config.font_size_px;
        let periods = snapshot.leaves(ChartAxis::Period);
        let rankings = snapshot.leaves(ChartAxis::Ranking);

        let max_column_label_width = longest_label_width(
            periods.iter().map(|leaf| leaf.formatted_path.as_str()),
            font_size,
        );
        let column_label_height = match config.label_orientation {
            LabelOrientation::Horizontal => font_size,
            LabelOrientation::Vertical => max_column_label_width + font_size,
        };

        // Lines are measured on the first period, where the left labels sit.
        let max_line_label_width = periods.first().map_or(0.0, |first| {
            longest_label_width(
                snapshot
                    .leaf_rows(first)
                    .map(|row| row.line_by.formatted.as_str()),
                font_size,
            )
        });
        let side_label_width = max_line_label_width + font_size;

        let rank_scale_width = longest_label_width(
            rankings.iter().map(|leaf| leaf.formatted_path.as_str()),
            font_size,
        ) + font_size;

        let width = viewport.width_px();
        let height = viewport.height_px();
        let row_pitch = (height - column_label_height) / rankings.len().max(1) as f64;
        let column_pitch =
            (width - rank_scale_width - 2.0 * side_label_width) / periods.len().max(1) as f64;
        let marker_size = (config.relative_marker_size * row_pitch.min(column_pitch)).max(0.0);
        let line_width = marker_size / config.marker_to_line_ratio;
        let inner_margin = marker_size * 0.5 + config.inner_margin_extra_px;

        let columns = SizeTemplate::new([
            SizeToken::Px(rank_scale_width),
            SizeToken::Px(side_label_width),
            SizeToken::Px(inner_margin),
            SizeToken::Fr(1.0),
            SizeToken::Px(inner_margin),
            SizeToken::Px(side_label_width),
        ]);
        let rows = SizeTemplate::new([
            SizeToken::Px(column_label_height),
            SizeToken::Px(inner_margin),
            SizeToken::Fr(1.0),
            SizeToken::Px(inner_margin),
            SizeToken::Px(font_size),
        ]);
        let grid = Grid::from_templates(width, height, &columns, &rows);

        Ok(Self {
            font_size_px: font_size,
            max_column_label_width,
            column_label_height,
            side_label_width,
            rank_scale_width,
            marker_size,
            line_width,
            inner_margin,
            right_labels: grid.get_coords("f3")?,
            left_labels: grid.get_coords("b3")?,
            period_axis: grid.get_coords("d1")?,
            ranking_axis: grid.get_coords("a3")?,
            drawing: grid.get_coords("d3")?,
            period_marking: grid.get_coords("c1:e1")?,
            ranking_marking: grid.get_coords("a2:a4")?,
            graph_marking: grid.get_coords("c2:e4")?,
            columns,
            rows,
        })
    }

    #[must_use]
    pub fn marker_radius(&self) -> f64 {
        self.marker_size * 0.5
    }

    #[must_use]
    pub fn marking_area(&self, region: InteractionRegion) -> GridArea {
        match region {
            InteractionRegion::Graph => self.graph_marking,
            InteractionRegion::PeriodAxis => self.period_marking,
            InteractionRegion::RankingAxis => self.ranking_marking,
        }
    }

    /// Pins turning axis-strip drags into bands across the plot.
    #[must_use]
    pub fn marking_pins(&self, region: InteractionRegion) -> FixedRect {
        match region {
            InteractionRegion::Graph => FixedRect::default(),
            InteractionRegion::PeriodAxis => {
                FixedRect::vertical_band(1.0, self.graph_marking.height)
            }
            InteractionRegion::RankingAxis => FixedRect::horizontal_band(
                self.graph_marking.x1 + 0.5,
                self.graph_marking.width - 0.5,
            ),
        }
    }
}
