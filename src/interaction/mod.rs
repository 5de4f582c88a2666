mod marking;

use serde::{Deserialize, Serialize};

pub use marking::{
    DEFAULT_MARKING_THRESHOLD_PX, DragEndOutcome, FixedRect, MarkingEngine, MarkingPhase,
};

/// Keyboard modifiers captured with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
        shift: false,
    };

    /// Ctrl or meta turns a marking gesture into toggle/add.
    #[must_use]
    pub fn toggle(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Surfaces that accept marking gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionRegion {
    /// Free two-dimensional marking over the plot.
    Graph,
    /// Horizontal band marking from the column label strip.
    PeriodAxis,
    /// Vertical band marking from the rank scale strip.
    RankingAxis,
}

impl InteractionRegion {
    pub const ALL: [Self; 3] = [Self::Graph, Self::PeriodAxis, Self::RankingAxis];
}
