use crate::extensions::{RaceContext, RaceEvent};
use crate::render::Renderer;

use super::RaceChartEngine;

impl<R: Renderer> RaceChartEngine<R> {
    pub(super) fn plugin_context(&self) -> RaceContext {
        let schedule = self.scheduler.schedule();
        let current_step = schedule.current_step;
        let dataset = self.scheduler.dataset();
        let leader = self
            .scheduler
            .display_order()
            .first()
            .copied()
            .filter(|entity| dataset.value_at(*entity, current_step).is_some());
        RaceContext {
            viewport: self.config.viewport,
            current_step,
            step_count: dataset.step_count(),
            elapsed_seconds: schedule.elapsed_since_start,
            phase: schedule.phase,
            leader,
            active_entity: self.scheduler.active_entity(),
        }
    }

    pub(super) fn emit_event(&mut self, event: RaceEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
