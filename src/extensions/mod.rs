//! Observer plugins and the frame export boundary.
//!
//! Neither can mutate animation state, and failures in either never reach
//! the scheduler.

pub mod export;
pub mod plugins;

pub use export::{ExportSink, FrameRecorder};
pub use plugins::{RaceContext, RaceEvent, RacePlugin};
