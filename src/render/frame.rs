use crate::core::Viewport;
use crate::error::{RaceChartError, RaceResult};
use crate::render::{RectPrimitive, TextPrimitive};

/// Draw list for one race frame.
///
/// Rects are painted first, in insertion order, then texts. The leading
/// `chrome_rects` rects are the background and header band; every later rect
/// is a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub chrome_rects: usize,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            texts: Vec::new(),
            chrome_rects: 0,
        }
    }

    /// Adds a background-layer rect, painted below every bar already pushed.
    #[must_use]
    pub fn with_chrome_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.insert(self.chrome_rects, rect);
        self.chrome_rects += 1;
        self
    }

    #[must_use]
    pub fn with_bar_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn chrome(&self) -> &[RectPrimitive] {
        &self.rects[..self.chrome_rects.min(self.rects.len())]
    }

    /// Bar rects in display order.
    #[must_use]
    pub fn bars(&self) -> &[RectPrimitive] {
        &self.rects[self.chrome_rects.min(self.rects.len())..]
    }

    /// Text contents in paint order.
    #[must_use]
    pub fn text_contents(&self) -> Vec<&str> {
        self.texts.iter().map(|text| text.text.as_str()).collect()
    }

    /// Paint position of the first text primitive reading `content`.
    #[must_use]
    pub fn text_paint_index(&self, content: &str) -> Option<usize> {
        self.texts.iter().position(|text| text.text == content)
    }

    pub fn validate(&self) -> RaceResult<()> {
        if !self.viewport.is_valid() {
            return Err(RaceChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.chrome_rects > self.rects.len() {
            return Err(RaceChartError::InvalidData(format!(
                "frame declares {} chrome rects but holds {}",
                self.chrome_rects,
                self.rects.len()
            )));
        }

        self.rects.iter().try_for_each(|rect| rect.validate())?;
        self.texts.iter().try_for_each(TextPrimitive::validate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.texts.is_empty()
    }
}
