mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
mod reconcile;
mod surface;

pub use frame::{DrawCommand, LayerPrimitives, RenderFrame};
pub use layer_stack::CanvasLayerKind;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, Fill, GradientPrimitive, PolygonPrimitive, RectPrimitive,
    TextBaseline, TextHAlign, TextPrimitive,
};
pub use reconcile::{KeyedSet, ReconcileStats};
pub use surface::{
    LineGroup, MarkerLabelState, MarkerState, RenderSurface, SegmentState, SideLabelState,
    text_bounds,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, validated-on-demand `RenderFrame`
/// so drawing code stays isolated from layout, data and marking logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
