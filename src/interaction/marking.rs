use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{MarkerShape, MarkingOperation, MarkingSink, Point, Rect, RowId};

use super::Modifiers;

/// Displacement, on either axis, a drag must exceed before it marks.
pub const DEFAULT_MARKING_THRESHOLD_PX: f64 = 2.0;

/// Per-axis overrides pinning the marking rectangle.
///
/// A pinned coordinate or size is used verbatim and never follows the pointer,
/// which turns a free rectangle into a one-dimensional band.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedRect {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl FixedRect {
    /// Full-height band: `y` and `height` pinned, `x`/`width` follow the drag.
    #[must_use]
    pub fn vertical_band(y: f64, height: f64) -> Self {
        Self {
            y: Some(y),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Full-width band: `x` and `width` pinned, `y`/`height` follow the drag.
    #[must_use]
    pub fn horizontal_band(x: f64, width: f64) -> Self {
        Self {
            x: Some(x),
            width: Some(width),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkingPhase {
    Idle,
    Tracking,
}

/// Result of releasing a drag.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEndOutcome {
    /// No drag was in progress.
    Ignored,
    /// Movement stayed under the threshold; treated as a click.
    Click,
    /// The rectangle covered no marker and marking was cleared.
    Cleared,
    /// Every covered marker was marked with one operation.
    Marked {
        rows: SmallVec<[RowId; 16]>,
        operation: MarkingOperation,
    },
}

/// Drag-gesture state machine turning a pointer drag into marking commands.
///
/// The engine owns the authoritative marking rectangle; renderers only mirror
/// `rect()` while `is_active()` holds.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkingEngine {
    fixed: FixedRect,
    threshold_px: f64,
    phase: MarkingPhase,
    start: Point,
    current: Point,
    began: bool,
    rect: Rect,
    active: bool,
}

impl MarkingEngine {
    #[must_use]
    pub fn new(fixed: FixedRect, threshold_px: f64) -> Self {
        let threshold_px = if threshold_px.is_finite() && threshold_px >= 0.0 {
            threshold_px
        } else {
            DEFAULT_MARKING_THRESHOLD_PX
        };
        Self {
            fixed,
            threshold_px,
            phase: MarkingPhase::Idle,
            start: Point::default(),
            current: Point::default(),
            began: false,
            rect: Rect::default(),
            active: false,
        }
    }

    /// Unpinned two-dimensional marking.
    #[must_use]
    pub fn free(threshold_px: f64) -> Self {
        Self::new(FixedRect::default(), threshold_px)
    }

    #[must_use]
    pub fn phase(&self) -> MarkingPhase {
        self.phase
    }

    #[must_use]
    pub fn fixed(&self) -> FixedRect {
        self.fixed
    }

    /// Replaces the pins, e.g. after a relayout; an ongoing gesture keeps its rectangle.
    pub fn set_fixed(&mut self, fixed: FixedRect) {
        self.fixed = fixed;
    }

    #[must_use]
    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    /// Whether the movement threshold has been crossed in the current gesture.
    #[must_use]
    pub fn has_begun(&self) -> bool {
        self.began
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the marking rectangle should be shown.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts a gesture, discarding whatever the previous one left behind.
    pub fn drag_start(&mut self, point: Point) -> Rect {
        self.phase = MarkingPhase::Tracking;
        self.began = false;
        self.start = point;
        self.current = point;
        self.rect = Rect::new(
            self.fixed.x.unwrap_or(point.x),
            self.fixed.y.unwrap_or(point.y),
            self.fixed.width.unwrap_or(0.0),
            self.fixed.height.unwrap_or(0.0),
        );
        self.active = true;
        trace!(x = point.x, y = point.y, "marking drag start");
        self.rect
    }

    /// Follows the pointer; ignored while idle.
    pub fn drag(&mut self, point: Point) -> Rect {
        if self.phase != MarkingPhase::Tracking {
            return self.rect;
        }
        self.current = point;

        let dx = (self.start.x - point.x).abs();
        let dy = (self.start.y - point.y).abs();
        self.began = self.began || dx.max(dy) > self.threshold_px;

        if self.fixed.width.is_none() {
            self.rect.width = dx;
            self.rect.x = self.fixed.x.unwrap_or(self.start.x.min(point.x));
        }
        if self.fixed.height.is_none() {
            self.rect.height = dy;
            self.rect.y = self.fixed.y.unwrap_or(self.start.y.min(point.y));
        }
        self.rect
    }

    /// Finishes the gesture and applies marking through `sink`.
    ///
    /// `markers` are the hit-testable shapes of the surface. A drag that never
    /// crossed the threshold issues no command at all.
    pub fn drag_end<'a, I, M>(
        &mut self,
        modifiers: Modifiers,
        markers: I,
        sink: &mut M,
    ) -> DragEndOutcome
    where
        I: IntoIterator<Item = (RowId, &'a MarkerShape)>,
        M: MarkingSink + ?Sized,
    {
        if self.phase != MarkingPhase::Tracking {
            return DragEndOutcome::Ignored;
        }
        self.phase = MarkingPhase::Idle;
        self.active = false;

        if !self.began {
            trace!("marking drag ended below threshold");
            return DragEndOutcome::Click;
        }
        self.began = false;

        let rect = self.rect;
        let rows: SmallVec<[RowId; 16]> = markers
            .into_iter()
            .filter(|(_, shape)| shape.intersects_rect(rect))
            .map(|(row, _)| row)
            .collect();

        if rows.is_empty() {
            debug!(?rect, "marking rectangle hit no markers; clearing marking");
            sink.clear_marking();
            return DragEndOutcome::Cleared;
        }

        let operation = MarkingOperation::from_toggle(modifiers.toggle());
        for row in &rows {
            sink.mark_row(*row, operation);
        }
        debug!(?rect, hits = rows.len(), ?operation, "marking rectangle applied");
        DragEndOutcome::Marked { rows, operation }
    }

    /// Drops an unfinished gesture without issuing commands.
    pub fn cancel(&mut self) {
        self.phase = MarkingPhase::Idle;
        self.began = false;
        self.active = false;
    }
}

impl Default for MarkingEngine {
    fn default() -> Self {
        Self::free(DEFAULT_MARKING_THRESHOLD_PX)
    }
}
