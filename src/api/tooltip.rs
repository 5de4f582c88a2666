use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BumpChartSnapshot, DataRow, MarkerShape, Point, RowId};
use crate::render::{CirclePrimitive, Color, RenderSurface, Renderer};

use super::BumpChart;

/// Gap between a hovered marker and its highlight ring.
const HIGHLIGHT_RING_GAP_PX: f64 = 3.0;

/// An axis listed in the host's tooltip configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipAxis {
    /// Name used to look the value up on a row.
    pub name: String,
    /// Bound expression; empty or `<>` means the axis is unused.
    pub expression: String,
    /// Display names of the expression parts.
    pub display_parts: Vec<String>,
}

impl TooltipAxis {
    #[must_use]
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_parts: vec![name.clone()],
            name,
            expression: expression.into(),
        }
    }

    #[must_use]
    pub fn with_display_parts<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_parts = parts.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.display_parts.join(",")
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.expression.is_empty() && self.expression != "<>"
    }
}

/// Hovered marker and the text the host should show for it.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverOutcome {
    pub row: RowId,
    pub tooltip: String,
}

/// `"<display name>: <value>"` per bound axis, one per line, without repeats.
#[must_use]
pub fn tooltip_text(row: &DataRow, axes: &[TooltipAxis]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(axes.len());
    for axis in axes.iter().filter(|axis| axis.is_bound()) {
        let Some(value) = row.formatted_value(&axis.name) else {
            continue;
        };
        let line = format!("{}: {value}", axis.display_name());
        if !lines.contains(&line) {
            lines.push(line);
        }
    }
    lines.join("\n")
}

impl<R: Renderer> BumpChart<R> {
    /// Highlights the marker under `point` and builds its tooltip.
    ///
    /// Moving off every marker removes the highlight and returns `None`.
    pub fn hover(
        &self,
        surface: &mut RenderSurface,
        snapshot: &BumpChartSnapshot,
        point: Point,
    ) -> Option<HoverOutcome> {
        let hovered = surface.marker_at(point).and_then(|marker| match &marker.shape {
            MarkerShape::Circle(circle) => Some((marker.row, *circle)),
            MarkerShape::Polygon(_) => None,
        });
        let Some((row, circle)) = hovered else {
            surface.set_highlight(None);
            return None;
        };

        surface.set_highlight(Some(CirclePrimitive {
            cx: circle.cx,
            cy: circle.cy,
            radius: circle.r + HIGHLIGHT_RING_GAP_PX,
            fill: Color::transparent(),
            stroke: Some((self.config.style.highlight().to_color(1.0), 1.0)),
        }));
        let tooltip = snapshot
            .row(row)
            .map(|data| tooltip_text(data, &self.tooltip_axes))
            .unwrap_or_default();
        trace!(row = row.0, "marker hovered");
        Some(HoverOutcome { row, tooltip })
    }

    /// Pointer left the plot.
    pub fn hover_leave(&self, surface: &mut RenderSurface) {
        surface.set_highlight(None);
    }
}
