use serde::{Deserialize, Serialize};

/// Drawing layers of a bump chart surface, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    /// Column labels, rank scale and left/right line labels.
    Guide,
    /// Transparent hit areas driving marking gestures.
    Interaction,
    /// Line groups: segments, markers and marker labels.
    Graph,
    /// Hover highlight ring.
    Highlight,
    /// The visible marking rectangle while a drag is active.
    MarkingOverlay,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [Self; 5] = [
        Self::Guide,
        Self::Interaction,
        Self::Graph,
        Self::Highlight,
        Self::MarkingOverlay,
    ];

    /// Whether backends paint this layer; interaction areas are hit-test only.
    #[must_use]
    pub fn is_painted(self) -> bool {
        !matches!(self, Self::Interaction)
    }
}
