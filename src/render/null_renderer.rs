use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_bubble_count: usize,
    pub last_breadcrumb_y: Option<f64>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_bubble_count = frame.bubbles.len();
        self.last_breadcrumb_y = frame
            .breadcrumbs
            .as_ref()
            .map(|breadcrumbs| breadcrumbs.position_y);
        Ok(())
    }
}
