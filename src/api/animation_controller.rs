use tracing::{info, warn};

use crate::core::{SchedulerPhase, TickReport};
use crate::error::{RaceChartError, RaceResult};
use crate::extensions::RaceEvent;
use crate::render::Renderer;

use super::RaceChartEngine;

impl<R: Renderer> RaceChartEngine<R> {
    /// Advances the animation clock by one frame delta.
    ///
    /// Plugins see `Seeded` after the first successful call, one
    /// `StepAdvanced` per crossed boundary, and a single `Completed` once the
    /// race turns terminal. The export sink is finalized at that point.
    pub fn tick(&mut self, delta_seconds: f64) -> RaceResult<TickReport> {
        let first_tick = self.scheduler.phase() == SchedulerPhase::Seeding;
        let report = self.scheduler.tick(delta_seconds)?;
        if first_tick {
            let dataset = self.scheduler.dataset();
            let event = RaceEvent::Seeded {
                entities: dataset.entity_count(),
                steps: dataset.step_count(),
            };
            self.emit_event(event);
        }
        for &step in &report.crossed_steps {
            self.emit_event(RaceEvent::StepAdvanced { step });
        }

        if self.completion.observe(self.scheduler.phase()) {
            let elapsed_seconds = self.elapsed_seconds();
            info!(
                elapsed_seconds,
                steps = self.scheduler.dataset().step_count(),
                "race complete"
            );
            self.finalize_export();
            self.emit_event(RaceEvent::Completed { elapsed_seconds });
        }

        Ok(report)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }

    /// Ticks at the configured frame rate and renders every frame until the
    /// race completes. Returns the number of frames rendered by this call.
    pub fn render_until_complete(&mut self) -> RaceResult<u64> {
        let frame_delta = 1.0 / self.config.frames_per_second;
        if !frame_delta.is_finite() || frame_delta <= 0.0 {
            return Err(RaceChartError::Configuration(
                "frames_per_second must be finite and > 0".to_owned(),
            ));
        }

        let start = self.frames_rendered;
        if self.frames_rendered == 0 {
            self.render()?;
        }
        while !self.is_complete() {
            self.tick(frame_delta)?;
            self.render()?;
        }
        Ok(self.frames_rendered - start)
    }

    fn finalize_export(&mut self) {
        if let Some(sink) = self.export_sink.as_mut() {
            if let Err(err) = sink.finalize() {
                warn!(error = %err, "export sink failed to finalize");
            }
        }
    }
}
