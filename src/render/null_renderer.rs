use crate::core::{TextMeasurer, estimate_text_width_px};
use crate::error::RaceResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced. Text is measured with the built-in estimate.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_rect_count: usize,
    pub last_bar_count: usize,
    pub last_text_count: usize,
}

impl TextMeasurer for NullRenderer {
    fn text_width_px(&self, text: &str, font_size_px: f64) -> f64 {
        estimate_text_width_px(text, font_size_px)
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> RaceResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_rect_count = frame.rects.len();
        self.last_bar_count = frame.bars().len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
