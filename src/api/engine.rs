use tracing::debug;

use crate::core::{BumpChartSnapshot, LabelOrientation, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderSurface, Renderer};

use super::pointer::PointerState;
use super::render_pass::run_render_pass;
use super::{BumpChartConfig, ChartLayout, ChartStyle, RenderPassReport, TooltipAxis};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `BumpChart` owns configuration, the last layout and the marking gestures.
/// Retained shapes live in a caller-owned [`RenderSurface`] passed to every call
/// that reads or changes them.
pub struct BumpChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: BumpChartConfig,
    pub(super) layout: Option<ChartLayout>,
    pub(super) pointer: PointerState,
    pub(super) tooltip_axes: Vec<TooltipAxis>,
}

impl<R: Renderer> BumpChart<R> {
    pub fn new(renderer: R, config: BumpChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            pointer: PointerState::new(config.marking_threshold_px),
            config,
            layout: None,
            tooltip_axes: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BumpChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Takes effect on the next render pass.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        Ok(())
    }

    #[must_use]
    pub fn label_orientation(&self) -> LabelOrientation {
        self.config.label_orientation
    }

    /// Applies a host-persisted column label orientation.
    pub fn set_label_orientation(&mut self, orientation: LabelOrientation) {
        debug!(orientation = orientation.as_str(), "column label orientation changed");
        self.config.label_orientation = orientation;
    }

    #[must_use]
    pub fn style(&self) -> ChartStyle {
        self.config.style
    }

    pub fn set_style(&mut self, style: ChartStyle) {
        self.config.style = style;
    }

    #[must_use]
    pub fn tooltip_axes(&self) -> &[TooltipAxis] {
        &self.tooltip_axes
    }

    pub fn set_tooltip_axes(&mut self, axes: Vec<TooltipAxis>) {
        self.tooltip_axes = axes;
    }

    /// Layout of the last completed pass.
    #[must_use]
    pub fn layout(&self) -> Option<&ChartLayout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Reconciles `surface` against `snapshot` and hands the result to the renderer.
    pub fn render(
        &mut self,
        surface: &mut RenderSurface,
        snapshot: &BumpChartSnapshot,
    ) -> ChartResult<RenderPassReport> {
        let report = self.reconcile(surface, snapshot)?;
        let frame = surface.to_frame(self.config.viewport);
        self.renderer.render(&frame)?;
        Ok(report)
    }

    /// Renders into an external cairo context, e.g. from a GTK draw callback.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        surface: &mut RenderSurface,
        snapshot: &BumpChartSnapshot,
        context: &cairo::Context,
    ) -> ChartResult<RenderPassReport>
    where
        R: CairoContextRenderer,
    {
        let report = self.reconcile(surface, snapshot)?;
        let frame = surface.to_frame(self.config.viewport);
        self.renderer.render_on_cairo_context(context, &frame)?;
        Ok(report)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn reconcile(
        &mut self,
        surface: &mut RenderSurface,
        snapshot: &BumpChartSnapshot,
    ) -> ChartResult<RenderPassReport> {
        if !surface.is_initialized() {
            return Err(ChartError::InvalidData(
                "render surface has been torn down".to_owned(),
            ));
        }
        let report = run_render_pass(&self.config, snapshot, surface)?;
        if let Some(layout) = &report.layout {
            self.pointer.relayout(layout);
            self.layout = Some(layout.clone());
        }
        Ok(report)
    }
}
