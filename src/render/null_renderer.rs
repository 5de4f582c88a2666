use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so tests catch invalid geometry and
/// dangling gradient references without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_polygon_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub last_gradient_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_polygon_count = frame.polygon_count();
        self.last_circle_count = frame.circle_count();
        self.last_text_count = frame.text_count();
        self.last_gradient_count = frame.gradients.len();
        Ok(())
    }
}
