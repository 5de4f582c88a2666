use tracing::{debug, warn};

use crate::core::{
    AxisLeaf, BumpChartSnapshot, ChartAxis, Circle, DataRow, GradientDef, LabelOrientation,
    LineSegment, MarkerShape, Point, PointScale, RowId, SegmentFill, build_line_segments,
    collect_gradients, contrast_color, decimate, label_footprint, label_stride,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionRegion;
use crate::render::{
    Fill, GradientPrimitive, KeyedSet, LineGroup, MarkerLabelState, MarkerState,
    ReconcileStats, RenderSurface, SegmentState, SideLabelState, TextBaseline, TextHAlign,
    TextPrimitive,
};

use super::{BumpChartConfig, ChartLayout};

/// How far a render pass got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStatus {
    Complete,
    /// The snapshot had no rows; the plot was cleared.
    NoRows,
    /// An axis had no leaves; the regions fed by it were cleared.
    EmptyAxis(ChartAxis),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPassReport {
    pub status: PassStatus,
    pub stats: ReconcileStats,
    pub column_label_stride: usize,
    pub row_label_stride: usize,
    /// Layout of a completed pass.
    pub layout: Option<ChartLayout>,
}

impl RenderPassReport {
    fn stopped(status: PassStatus, exited: usize) -> Self {
        Self {
            status,
            stats: ReconcileStats {
                exited,
                ..ReconcileStats::default()
            },
            column_label_stride: 0,
            row_label_stride: 0,
            layout: None,
        }
    }
}

/// Shapes computed for one line before they are reconciled into its group.
struct PreparedLine {
    key: String,
    leaf_index: usize,
    marked_rows: usize,
    segments: Vec<LineSegment>,
    markers: Vec<MarkerState>,
    labels: Vec<(RowId, MarkerLabelState)>,
}

pub(super) fn run_render_pass(
    config: &BumpChartConfig,
    snapshot: &BumpChartSnapshot,
    surface: &mut RenderSurface,
) -> ChartResult<RenderPassReport> {
    let row_count = snapshot.row_count();
    if row_count > config.max_rows {
        return Err(ChartError::TooManyRows {
            row_count,
            limit: config.max_rows,
        });
    }
    debug!(
        width = config.viewport.width,
        height = config.viewport.height,
        rows = row_count,
        "render pass start"
    );

    if row_count == 0 {
        let removed = surface.clear_graph();
        warn!(removed, "no rows to draw; plot cleared");
        return Ok(RenderPassReport::stopped(PassStatus::NoRows, removed));
    }

    let domains = [ChartAxis::Period, ChartAxis::Ranking, ChartAxis::LineBy]
        .into_iter()
        .try_for_each(|axis| ensure_leaves(snapshot, axis));
    match domains {
        Ok(()) => {}
        Err(ChartError::EmptyDomain { axis }) => {
            let removed = clear_empty_axis(surface, axis);
            warn!(%axis, removed, "axis has no leaves; dependent regions cleared");
            return Ok(RenderPassReport::stopped(PassStatus::EmptyAxis(axis), removed));
        }
        Err(other) => return Err(other),
    }

    let layout = ChartLayout::compute(config, config.viewport, snapshot)?;
    let periods = snapshot.leaves(ChartAxis::Period);
    let rankings = snapshot.leaves(ChartAxis::Ranking);
    let period_scale = PointScale::new(
        ChartAxis::Period,
        periods.iter().map(|leaf| leaf.formatted_path.as_str()),
        (layout.drawing.x1, layout.drawing.x2),
    )?;
    let rank_scale = PointScale::new(
        ChartAxis::Ranking,
        rankings.iter().map(|leaf| leaf.formatted_path.as_str()),
        (layout.drawing.y1, layout.drawing.y2),
    )?;

    surface.interaction_areas = InteractionRegion::ALL
        .into_iter()
        .map(|region| (region, layout.marking_area(region).to_rect()))
        .collect();

    let font_size = layout.font_size_px;
    let font_color = config.style.font_color.to_color(1.0);

    let column_label_stride = label_stride(
        label_footprint(config.label_orientation, layout.max_column_label_width, font_size),
        periods.len(),
        layout.drawing.width,
    );
    let column_labels = decimate(periods, column_label_stride).filter_map(|(_, leaf)| {
        let text = non_empty(&leaf.formatted_path)?;
        let x = period_scale.map(&leaf.formatted_path)?;
        let y = layout.period_axis.y2 - font_size * 0.5;
        let label = match config.label_orientation {
            LabelOrientation::Horizontal => {
                TextPrimitive::new(text, x, y, font_size, font_color, TextHAlign::Center)
            }
            LabelOrientation::Vertical => {
                TextPrimitive::new(text, x, y, font_size, font_color, TextHAlign::Left)
                    .with_baseline(TextBaseline::Hanging)
                    .with_rotation(90.0)
            }
        };
        Some((leaf.key.clone(), label))
    });
    let column_stats = sync_texts(&mut surface.column_labels, column_labels);

    let row_label_stride = label_stride(font_size, rankings.len(), layout.drawing.height);
    let row_labels = decimate(rankings, row_label_stride).filter_map(|(_, leaf)| {
        let text = non_empty(&leaf.formatted_path)?;
        let y = rank_scale.map(&leaf.formatted_path)?;
        let x = layout.ranking_axis.x2 - font_size * 0.5;
        let label = TextPrimitive::new(text, x, y, font_size, font_color, TextHAlign::Right);
        Some((leaf.key.clone(), label))
    });
    let row_stats = sync_texts(&mut surface.row_labels, row_labels);

    let side_label = |row: &DataRow, x: f64| -> Option<(String, SideLabelState)> {
        if !shows_side_label(&row.ranking.formatted, row_label_stride) {
            return None;
        }
        let text = non_empty(&row.line_by.formatted)?;
        let y = rank_scale.map(&row.ranking.formatted)?;
        let line = snapshot.leaf(ChartAxis::LineBy, row.line_by.leaf_index)?;
        let label = TextPrimitive::new(text, x, y, font_size, font_color, TextHAlign::Left)
            .with_bold(snapshot.marked_row_count(line) > 0);
        Some((
            line.key.clone(),
            SideLabelState {
                line_leaf: line.leaf_index,
                label,
            },
        ))
    };
    let left_x = layout.left_labels.x1 + font_size * 0.5;
    let right_x = layout.right_labels.x1 + font_size;
    let left_rows: Vec<&DataRow> = periods
        .first()
        .map(|leaf| snapshot.leaf_rows(leaf).collect())
        .unwrap_or_default();
    let right_rows: Vec<&DataRow> = periods
        .last()
        .map(|leaf| snapshot.leaf_rows(leaf).collect())
        .unwrap_or_default();
    let left_stats = sync_side_labels(
        &mut surface.left_labels,
        left_rows.iter().filter_map(|row| side_label(*row, left_x)),
    );
    let right_stats = sync_side_labels(
        &mut surface.right_labels,
        right_rows.iter().filter_map(|row| side_label(*row, right_x)),
    );

    let position = |row: &DataRow| -> Option<Point> {
        Some(Point::new(
            period_scale.map(&row.period.formatted)?,
            rank_scale.map(&row.ranking.formatted)?,
        ))
    };
    let radius = layout.marker_radius();
    let show_marker_labels = layout.marker_size > font_size;
    let prepared: Vec<PreparedLine> = snapshot
        .leaves(ChartAxis::LineBy)
        .iter()
        .map(|leaf| {
            prepare_line(
                snapshot,
                leaf,
                &position,
                radius,
                layout.line_width,
                font_size,
                show_marker_labels,
            )
        })
        .collect();

    let gradients: Vec<GradientDef> =
        collect_gradients(prepared.iter().flat_map(|line| line.segments.iter()))
            .into_values()
            .collect();
    let gradient_stats =
        sync_gradients(&mut surface.gradients, gradients, config.line_transparency);

    let mut line_stats = surface.lines.reconcile(
        prepared.iter().map(|line| (line.key.clone(), line.leaf_index)),
        |_, leaf_index| LineGroup::new(leaf_index),
        |_, group, leaf_index| group.leaf_index = leaf_index,
    );
    for line in prepared {
        if let Some(group) = surface.lines.get_mut(&line.key) {
            line_stats = line_stats.merge(sync_line(group, line));
        }
    }
    surface.lines.raise(|_, group| group.is_marked());

    let stats = [column_stats, row_stats, left_stats, right_stats, gradient_stats, line_stats]
        .into_iter()
        .fold(ReconcileStats::default(), ReconcileStats::merge);
    debug!(
        column_labels = surface.column_labels.len(),
        row_labels = surface.row_labels.len(),
        lines = surface.lines.len(),
        gradients = surface.gradients.len(),
        entered = stats.entered,
        updated = stats.updated,
        exited = stats.exited,
        marker_size = layout.marker_size,
        "render pass reconciled"
    );

    Ok(RenderPassReport {
        status: PassStatus::Complete,
        stats,
        column_label_stride,
        row_label_stride,
        layout: Some(layout),
    })
}

fn ensure_leaves(snapshot: &BumpChartSnapshot, axis: ChartAxis) -> ChartResult<()> {
    if snapshot.leaves(axis).is_empty() {
        return Err(ChartError::EmptyDomain { axis });
    }
    Ok(())
}

/// Clears what an empty axis would otherwise feed.
fn clear_empty_axis(surface: &mut RenderSurface, axis: ChartAxis) -> usize {
    match axis {
        ChartAxis::Period => surface.clear_column_labels(),
        ChartAxis::Ranking => surface.clear_rank_guides(),
        ChartAxis::LineBy => surface.clear_graph(),
    }
}

/// Labels with no text are left out of the pass rather than drawn empty.
fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

/// Side labels follow the row-label stride, counted from rank 1.
fn shows_side_label(rank: &str, stride: usize) -> bool {
    let Some(rank) = leading_integer(rank) else {
        return false;
    };
    let Ok(stride) = i64::try_from(stride.max(1)) else {
        return false;
    };
    rank.checked_sub(1).is_some_and(|offset| offset.rem_euclid(stride) == 0)
}

/// Integer prefix of a formatted rank, e.g. `"12."` gives 12.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let digits_len = text[sign_len..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    text[..sign_len + digits_len].parse().ok()
}

fn prepare_line<F>(
    snapshot: &BumpChartSnapshot,
    leaf: &AxisLeaf,
    position: &F,
    radius: f64,
    line_width: f64,
    font_size: f64,
    show_marker_labels: bool,
) -> PreparedLine
where
    F: Fn(&DataRow) -> Option<Point>,
{
    let mut rows: Vec<&DataRow> = snapshot.leaf_rows(leaf).collect();
    rows.sort_by_key(|row| row.period.leaf_index);

    let segments = build_line_segments(&rows, position, radius, line_width);
    let mut markers = Vec::with_capacity(rows.len());
    let mut labels = Vec::with_capacity(rows.len());
    for &row in &rows {
        let Some(center) = position(row) else {
            continue;
        };
        markers.push(MarkerState {
            row: row.id,
            shape: MarkerShape::Circle(Circle::new(center.x, center.y, radius)),
            fill: row.color.to_color(1.0),
        });
        let label = TextPrimitive::new(
            &row.ranking.formatted,
            center.x,
            center.y,
            font_size,
            contrast_color(row.color).to_color(1.0),
            TextHAlign::Center,
        );
        labels.push((
            row.id,
            MarkerLabelState {
                label,
                visible: row.marked && show_marker_labels && !row.ranking.formatted.is_empty(),
            },
        ));
    }

    PreparedLine {
        key: leaf.key.clone(),
        leaf_index: leaf.leaf_index,
        marked_rows: rows.iter().filter(|row| row.marked).count(),
        segments,
        markers,
        labels,
    }
}

fn sync_line(group: &mut LineGroup, line: PreparedLine) -> ReconcileStats {
    group.marked_rows = line.marked_rows;
    let segments = line.segments.into_iter().map(|segment| {
        let state = SegmentState {
            from: segment.from,
            to: segment.to,
            polygon: segment.polygon,
            fill: match segment.fill {
                SegmentFill::Solid(color) => Fill::Solid(color.to_color(1.0)),
                SegmentFill::Gradient(key) => Fill::Gradient(key),
            },
        };
        ((state.from, state.to), state)
    });
    let segment_stats = replace_all(&mut group.segments, segments);
    let markers = line.markers.into_iter().map(|marker| (marker.row, marker));
    let marker_stats = replace_all(&mut group.markers, markers);
    let label_stats = replace_all(&mut group.labels, line.labels);
    segment_stats.merge(marker_stats).merge(label_stats)
}

/// Reconciles `items` into `set`, overwriting surviving state.
fn replace_all<K, S, I>(set: &mut KeyedSet<K, S>, items: I) -> ReconcileStats
where
    K: std::hash::Hash + Eq,
    I: IntoIterator<Item = (K, S)>,
{
    set.reconcile(items, |_, state| state, |_, current, state| *current = state)
}

fn sync_texts<I>(set: &mut KeyedSet<String, TextPrimitive>, items: I) -> ReconcileStats
where
    I: IntoIterator<Item = (String, TextPrimitive)>,
{
    replace_all(set, items)
}

fn sync_side_labels<I>(set: &mut KeyedSet<String, SideLabelState>, items: I) -> ReconcileStats
where
    I: IntoIterator<Item = (String, SideLabelState)>,
{
    replace_all(set, items)
}

fn sync_gradients(
    set: &mut KeyedSet<crate::core::GradientKey, GradientPrimitive>,
    gradients: Vec<GradientDef>,
    opacity: f64,
) -> ReconcileStats {
    set.reconcile(
        gradients.into_iter().map(|def| (def.key.clone(), def)),
        |key, def| GradientPrimitive {
            key: key.clone(),
            start: def.from.to_color(opacity),
            end: def.to.to_color(opacity),
        },
        |_, state, def| {
            state.start = def.from.to_color(opacity);
            state.end = def.to.to_color(opacity);
        },
    )
}
