use tracing::warn;

use crate::core::{
    CompletionDetector, EntityAnimationState, EntityId, FrameScheduler, SchedulerPhase,
    TimeSeriesDataset,
};
use crate::error::RaceResult;
use crate::extensions::{ExportSink, RaceEvent, RacePlugin};
use crate::render::{Color, Renderer};

use super::RaceChartConfig;

/// Main orchestration facade consumed by host applications.
///
/// `RaceChartEngine` owns the dataset through its scheduler, tracks
/// completion, and hands each frame to the renderer, the plugins and the
/// optional export sink.
pub struct RaceChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: RaceChartConfig,
    pub(super) scheduler: FrameScheduler,
    pub(super) completion: CompletionDetector,
    pub(super) colors: Vec<Color>,
    pub(super) frames_rendered: u64,
    pub(super) plugins: Vec<Box<dyn RacePlugin>>,
    pub(super) export_sink: Option<Box<dyn ExportSink>>,
}

impl<R: Renderer> RaceChartEngine<R> {
    /// Builds the current frame and draws it.
    ///
    /// The frame is also passed to the export sink until the race has been
    /// finalized. Export failures are logged and never abort rendering.
    pub fn render(&mut self) -> RaceResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        self.frames_rendered += 1;

        if !self.completion.has_fired() {
            if let Some(sink) = self.export_sink.as_mut() {
                if let Err(err) = sink.capture(&frame) {
                    warn!(
                        error = %err,
                        frame_index = self.frames_rendered,
                        "export sink failed to capture frame"
                    );
                }
            }
        }

        self.emit_event(RaceEvent::Rendered {
            frame_index: self.frames_rendered,
        });
        Ok(())
    }

    /// Attaches the sink that receives rendered frames and the finalize call.
    pub fn set_export_sink(&mut self, sink: Box<dyn ExportSink>) {
        self.export_sink = Some(sink);
    }

    pub fn take_export_sink(&mut self) -> Option<Box<dyn ExportSink>> {
        self.export_sink.take()
    }

    #[must_use]
    pub fn has_export_sink(&self) -> bool {
        self.export_sink.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &RaceChartConfig {
        &self.config
    }

    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn dataset(&self) -> &TimeSeriesDataset {
        self.scheduler.dataset()
    }

    #[must_use]
    pub fn states(&self) -> &[EntityAnimationState] {
        self.scheduler.states()
    }

    #[must_use]
    pub fn state_for_key(&self, key: &str) -> Option<&EntityAnimationState> {
        self.scheduler.state_for_key(key)
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.scheduler.current_step()
    }

    #[must_use]
    pub fn current_step_label(&self) -> &str {
        self.scheduler.current_step_label()
    }

    #[must_use]
    pub fn phase(&self) -> SchedulerPhase {
        self.scheduler.phase()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.scheduler.schedule().elapsed_since_start
    }

    /// Left edge of the bars after widening for name labels.
    #[must_use]
    pub fn bar_left(&self) -> f64 {
        self.scheduler.settings().bar_left
    }

    /// Pixels per data unit after fitting to the viewport.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scheduler.settings().scale
    }

    #[must_use]
    pub fn entity_color(&self, entity: EntityId) -> Option<Color> {
        self.colors.get(entity.index()).copied()
    }

    #[must_use]
    pub fn active_entity(&self) -> Option<EntityId> {
        self.scheduler.active_entity()
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
