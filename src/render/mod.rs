mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, RectPrimitive, TextHAlign, TextPrimitive, default_palette};

use crate::core::TextMeasurer;
use crate::error::RaceResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from ranking and timing logic. The measurer
/// half is used for label widths and the automatic left margin.
pub trait Renderer: TextMeasurer {
    fn render(&mut self, frame: &RenderFrame) -> RaceResult<()>;
}
