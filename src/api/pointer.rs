use tracing::debug;

use crate::core::{ChartAxis, MarkingOperation, MarkingSink, Point, Rect, RowId};
use crate::interaction::{DragEndOutcome, InteractionRegion, MarkingEngine, Modifiers};
use crate::render::{RectPrimitive, RenderSurface, Renderer};

use super::{BumpChart, ChartLayout, ChartStyle};

/// What a plain click resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    MarkedRow(RowId),
    /// Every row of a Line-By leaf was marked.
    MarkedLine { leaf_index: usize },
    Cleared,
    /// The host should offer the column label orientation choice at this point.
    LabelOrientationMenu { x: f64, y: f64 },
    /// Nothing interactive under the pointer.
    Ignored,
}

/// One marking engine per surface plus the gesture currently routed to one of them.
#[derive(Debug, Clone)]
pub(super) struct PointerState {
    graph: MarkingEngine,
    period_axis: MarkingEngine,
    ranking_axis: MarkingEngine,
    active: Option<InteractionRegion>,
}

impl PointerState {
    pub(super) fn new(threshold_px: f64) -> Self {
        Self {
            graph: MarkingEngine::free(threshold_px),
            period_axis: MarkingEngine::free(threshold_px),
            ranking_axis: MarkingEngine::free(threshold_px),
            active: None,
        }
    }

    pub(super) fn relayout(&mut self, layout: &ChartLayout) {
        for region in InteractionRegion::ALL {
            self.engine_mut(region).set_fixed(layout.marking_pins(region));
        }
    }

    fn engine(&self, region: InteractionRegion) -> &MarkingEngine {
        match region {
            InteractionRegion::Graph => &self.graph,
            InteractionRegion::PeriodAxis => &self.period_axis,
            InteractionRegion::RankingAxis => &self.ranking_axis,
        }
    }

    fn engine_mut(&mut self, region: InteractionRegion) -> &mut MarkingEngine {
        match region {
            InteractionRegion::Graph => &mut self.graph,
            InteractionRegion::PeriodAxis => &mut self.period_axis,
            InteractionRegion::RankingAxis => &mut self.ranking_axis,
        }
    }
}

fn overlay(rect: Rect, style: ChartStyle) -> RectPrimitive {
    let color = style.font_color;
    RectPrimitive::new(rect.x, rect.y, rect.width, rect.height, color.to_color(0.1))
        .with_border(1.0, color.to_color(0.8))
}

impl<R: Renderer> BumpChart<R> {
    /// Starts a marking gesture on the surface under `point`.
    ///
    /// Returns `None`, and tracks nothing, when no marking area was hit.
    pub fn drag_start(
        &mut self,
        surface: &mut RenderSurface,
        point: Point,
    ) -> Option<InteractionRegion> {
        let region = surface.interaction_region_at(point)?;
        if let Some(previous) = self.pointer.active.replace(region) {
            self.pointer.engine_mut(previous).cancel();
        }
        let rect = self.pointer.engine_mut(region).drag_start(point);
        surface.set_marking_overlay(Some(overlay(rect, self.config.style)));
        debug!(?region, x = point.x, y = point.y, "marking gesture started");
        Some(region)
    }

    /// Follows the pointer; the overlay mirrors the engine's rectangle.
    pub fn drag(&mut self, surface: &mut RenderSurface, point: Point) -> Option<Rect> {
        let region = self.pointer.active?;
        let engine = self.pointer.engine_mut(region);
        let rect = engine.drag(point);
        if engine.is_active() {
            surface.set_marking_overlay(Some(overlay(rect, self.config.style)));
        }
        Some(rect)
    }

    /// Releases the gesture and applies marking for every marker on the surface.
    pub fn drag_end<M>(
        &mut self,
        surface: &mut RenderSurface,
        modifiers: Modifiers,
        sink: &mut M,
    ) -> DragEndOutcome
    where
        M: MarkingSink + ?Sized,
    {
        let Some(region) = self.pointer.active.take() else {
            return DragEndOutcome::Ignored;
        };
        let outcome = self
            .pointer
            .engine_mut(region)
            .drag_end(modifiers, surface.markers(), sink);
        surface.set_marking_overlay(None);
        outcome
    }

    /// Drops an unfinished gesture without touching marking.
    pub fn cancel_drag(&mut self, surface: &mut RenderSurface) {
        if let Some(region) = self.pointer.active.take() {
            self.pointer.engine_mut(region).cancel();
        }
        surface.set_marking_overlay(None);
    }

    /// Region whose gesture is in progress, if any.
    #[must_use]
    pub fn active_marking(&self) -> Option<(InteractionRegion, Rect)> {
        let region = self.pointer.active?;
        Some((region, self.pointer.engine(region).rect()))
    }

    /// Resolves a click that did not turn into a drag.
    ///
    /// Markers win over line segments and line labels, which win over the
    /// marking surfaces underneath.
    pub fn click<M>(
        &self,
        surface: &RenderSurface,
        point: Point,
        modifiers: Modifiers,
        sink: &mut M,
    ) -> ClickOutcome
    where
        M: MarkingSink + ?Sized,
    {
        let operation = MarkingOperation::from_toggle(modifiers.toggle());

        if let Some(marker) = surface.marker_at(point) {
            sink.mark_row(marker.row, operation);
            debug!(row = marker.row.0, ?operation, "marker clicked");
            return ClickOutcome::MarkedRow(marker.row);
        }

        if let Some(leaf_index) = surface
            .segment_at(point)
            .or_else(|| surface.side_label_at(point))
        {
            sink.mark_leaf(ChartAxis::LineBy, leaf_index, operation);
            debug!(leaf_index, ?operation, "line clicked");
            return ClickOutcome::MarkedLine { leaf_index };
        }

        match surface.interaction_region_at(point) {
            Some(InteractionRegion::Graph | InteractionRegion::RankingAxis) => {
                sink.clear_marking();
                ClickOutcome::Cleared
            }
            Some(InteractionRegion::PeriodAxis) => ClickOutcome::LabelOrientationMenu {
                x: point.x,
                y: point.y,
            },
            None => ClickOutcome::Ignored,
        }
    }
}
