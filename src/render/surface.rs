//! Retained shape state of one chart instance.
//!
//! The host creates a `RenderSurface`, hands it to the orchestrator on each
//! pass and tears it down when the chart goes away. Every shape category is a
//! [`KeyedSet`], so reconciliation keeps identity for stable keys.

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    GradientKey, MarkerShape, Point, Rect, RowId, Viewport, estimate_text_width,
};
use crate::interaction::InteractionRegion;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Color, DrawCommand, Fill, GradientPrimitive, KeyedSet,
    PolygonPrimitive, RectPrimitive, RenderFrame, TextBaseline, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentState {
    pub from: RowId,
    pub to: RowId,
    pub polygon: [Point; 4],
    pub fill: Fill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub row: RowId,
    pub shape: MarkerShape,
    pub fill: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLabelState {
    pub label: TextPrimitive,
    pub visible: bool,
}

/// Left/right line label bound to a Line-By leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct SideLabelState {
    pub line_leaf: usize,
    pub label: TextPrimitive,
}

/// Everything drawn for one Line-By category.
#[derive(Debug, Clone, Default)]
pub struct LineGroup {
    pub leaf_index: usize,
    pub marked_rows: usize,
    pub segments: KeyedSet<(RowId, RowId), SegmentState>,
    pub markers: KeyedSet<RowId, MarkerState>,
    pub labels: KeyedSet<RowId, MarkerLabelState>,
}

impl LineGroup {
    #[must_use]
    pub fn new(leaf_index: usize) -> Self {
        Self {
            leaf_index,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.marked_rows > 0
    }
}

#[derive(Debug, Default)]
pub struct RenderSurface {
    initialized: bool,
    pub(crate) column_labels: KeyedSet<String, TextPrimitive>,
    pub(crate) row_labels: KeyedSet<String, TextPrimitive>,
    pub(crate) left_labels: KeyedSet<String, SideLabelState>,
    pub(crate) right_labels: KeyedSet<String, SideLabelState>,
    pub(crate) gradients: KeyedSet<GradientKey, GradientPrimitive>,
    pub(crate) lines: KeyedSet<String, LineGroup>,
    pub(crate) interaction_areas: IndexMap<InteractionRegion, Rect>,
    pub(crate) marking_overlay: Option<RectPrimitive>,
    pub(crate) highlight: Option<CirclePrimitive>,
}

impl RenderSurface {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initialized: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Disposes every retained shape; returns how many were removed.
    pub fn teardown(&mut self) -> usize {
        let removed = self.clear_graph()
            + self.clear_column_labels()
            + self.clear_rank_guides()
            + self.interaction_areas.len()
            + usize::from(self.marking_overlay.take().is_some())
            + usize::from(self.highlight.take().is_some());
        self.interaction_areas.clear();
        self.initialized = false;
        debug!(removed, "render surface torn down");
        removed
    }

    /// Clears line groups and their gradients.
    pub fn clear_graph(&mut self) -> usize {
        self.highlight = None;
        self.lines.clear() + self.gradients.clear()
    }

    pub fn clear_column_labels(&mut self) -> usize {
        self.column_labels.clear()
    }

    /// Clears the rank scale and both side label columns.
    pub fn clear_rank_guides(&mut self) -> usize {
        self.row_labels.clear() + self.left_labels.clear() + self.right_labels.clear()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&String, &LineGroup)> {
        self.lines.iter()
    }

    #[must_use]
    pub fn line(&self, key: &str) -> Option<&LineGroup> {
        self.lines.get(&key.to_owned())
    }

    pub fn column_labels(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.column_labels.values()
    }

    pub fn row_labels(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.row_labels.values()
    }

    pub fn left_labels(&self) -> impl Iterator<Item = &SideLabelState> {
        self.left_labels.values()
    }

    pub fn right_labels(&self) -> impl Iterator<Item = &SideLabelState> {
        self.right_labels.values()
    }

    pub fn gradients(&self) -> impl Iterator<Item = &GradientPrimitive> {
        self.gradients.values()
    }

    #[must_use]
    pub fn interaction_area(&self, region: InteractionRegion) -> Option<Rect> {
        self.interaction_areas.get(&region).copied()
    }

    #[must_use]
    pub fn marking_overlay(&self) -> Option<&RectPrimitive> {
        self.marking_overlay.as_ref()
    }

    pub fn set_marking_overlay(&mut self, overlay: Option<RectPrimitive>) {
        self.marking_overlay = overlay;
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&CirclePrimitive> {
        self.highlight.as_ref()
    }

    pub fn set_highlight(&mut self, highlight: Option<CirclePrimitive>) {
        self.highlight = highlight;
    }

    /// Hit-testable markers in paint order.
    pub fn markers(&self) -> impl Iterator<Item = (RowId, &MarkerShape)> {
        self.lines
            .values()
            .flat_map(|line| line.markers.values())
            .map(|marker| (marker.row, &marker.shape))
    }

    /// Topmost marker under `point`.
    #[must_use]
    pub fn marker_at(&self, point: Point) -> Option<&MarkerState> {
        self.lines.values().rev().find_map(|line| {
            line.markers
                .values()
                .rev()
                .find(|marker| marker.shape.contains_point(point))
        })
    }

    /// Line-By leaf of the topmost segment under `point`.
    #[must_use]
    pub fn segment_at(&self, point: Point) -> Option<usize> {
        self.lines.values().rev().find_map(|line| {
            line.segments
                .values()
                .any(|segment| crate::core::point_in_polygon(point, &segment.polygon))
                .then_some(line.leaf_index)
        })
    }

    /// Line-By leaf of the left or right label under `point`.
    #[must_use]
    pub fn side_label_at(&self, point: Point) -> Option<usize> {
        self.left_labels
            .values()
            .chain(self.right_labels.values())
            .find(|side| text_bounds(&side.label).contains(point))
            .map(|side| side.line_leaf)
    }

    /// Marking surface under `point`; the plot wins where areas touch.
    #[must_use]
    pub fn interaction_region_at(&self, point: Point) -> Option<InteractionRegion> {
        InteractionRegion::ALL.into_iter().find(|region| {
            self.interaction_areas
                .get(region)
                .is_some_and(|area| area.contains(point))
        })
    }

    /// Flattens the retained state into a frame, bottom layer first.
    #[must_use]
    pub fn to_frame(&self, viewport: Viewport) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport);
        frame.gradients = self.gradients.values().cloned().collect();

        for label in self
            .column_labels
            .values()
            .chain(self.row_labels.values())
            .chain(self.left_labels.values().map(|side| &side.label))
            .chain(self.right_labels.values().map(|side| &side.label))
        {
            frame.push(CanvasLayerKind::Guide, DrawCommand::Text(label.clone()));
        }

        for area in self.interaction_areas.values() {
            frame.push(
                CanvasLayerKind::Interaction,
                DrawCommand::Rect(RectPrimitive::new(
                    area.x,
                    area.y,
                    area.width,
                    area.height,
                    Color::transparent(),
                )),
            );
        }

        for line in self.lines.values() {
            for segment in line.segments.values() {
                frame.push(
                    CanvasLayerKind::Graph,
                    DrawCommand::Polygon(PolygonPrimitive {
                        points: segment.polygon.to_vec(),
                        fill: segment.fill.clone(),
                    }),
                );
            }
            for marker in line.markers.values() {
                if let MarkerShape::Circle(circle) = &marker.shape {
                    frame.push(
                        CanvasLayerKind::Graph,
                        DrawCommand::Circle(CirclePrimitive {
                            cx: circle.cx,
                            cy: circle.cy,
                            radius: circle.r,
                            fill: marker.fill,
                            stroke: None,
                        }),
                    );
                }
            }
            for label in line.labels.values().filter(|label| label.visible) {
                frame.push(CanvasLayerKind::Graph, DrawCommand::Text(label.label.clone()));
            }
        }

        if let Some(highlight) = self.highlight {
            frame.push(CanvasLayerKind::Highlight, DrawCommand::Circle(highlight));
        }
        if let Some(overlay) = self.marking_overlay {
            frame.push(CanvasLayerKind::MarkingOverlay, DrawCommand::Rect(overlay));
        }
        frame
    }
}

/// Estimated box covered by a label, accounting for alignment and rotation.
#[must_use]
pub fn text_bounds(text: &TextPrimitive) -> Rect {
    let width = estimate_text_width(&text.text, text.font_size_px);
    let height = text.font_size_px;
    let left = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -width * 0.5,
        TextHAlign::Right => -width,
    };
    let top = match text.baseline {
        TextBaseline::Hanging => 0.0,
        TextBaseline::Middle => -height * 0.5,
        TextBaseline::Bottom => -height,
    };

    let (sin, cos) = text.rotation_deg.to_radians().sin_cos();
    let corners = [
        (left, top),
        (left + width, top),
        (left + width, top + height),
        (left, top + height),
    ];
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (dx, dy) in corners {
        // Counter-clockwise on screen, where y grows downwards.
        let x = text.x + dx * cos + dy * sin;
        let y = text.y - dx * sin + dy * cos;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Rect::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y))
}
