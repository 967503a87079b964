use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RaceResult;
use crate::render::RenderFrame;

/// Consumer of rendered frames, e.g. a video encoder.
///
/// Failures are reported back to the engine, which logs them and keeps
/// animating.
pub trait ExportSink {
    fn capture(&mut self, frame: &RenderFrame) -> RaceResult<()>;

    /// Called once, when the race reaches its terminal state.
    fn finalize(&mut self) -> RaceResult<()>;
}

/// In-memory sink that keeps every captured frame.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<RenderFrame>,
    finalized: bool,
}

impl FrameRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[must_use]
    pub fn into_frames(self) -> Vec<RenderFrame> {
        self.frames
    }
}

impl ExportSink for FrameRecorder {
    fn capture(&mut self, frame: &RenderFrame) -> RaceResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finalize(&mut self) -> RaceResult<()> {
        self.finalized = true;
        Ok(())
    }
}

/// Lets a caller keep a handle on a sink after handing it to the engine.
impl<S: ExportSink + ?Sized> ExportSink for Rc<RefCell<S>> {
    fn capture(&mut self, frame: &RenderFrame) -> RaceResult<()> {
        self.borrow_mut().capture(frame)
    }

    fn finalize(&mut self) -> RaceResult<()> {
        self.borrow_mut().finalize()
    }
}
