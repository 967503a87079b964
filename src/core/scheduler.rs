use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{
    ChoreographyPolicy, EntityAnimationState, EntityId, RankingPolicy, StepPlan,
    TimeSeriesDataset,
};
use crate::error::{RaceChartError, RaceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulerPhase {
    /// States are seeded from step 0 and the clock has not advanced yet.
    #[default]
    Seeding,
    Running,
    /// Final step settled and grace period elapsed; `tick` is a no-op.
    Terminal,
}

/// Virtual clock owned by `FrameScheduler`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleState {
    pub current_step: usize,
    pub elapsed_since_start: f64,
    /// Clock value at which `current_step` began.
    pub step_started_at: f64,
    /// Dwell of `current_step`, as planned by the choreography.
    pub step_span: f64,
    pub phase: SchedulerPhase,
}

impl ScheduleState {
    #[must_use]
    pub fn elapsed_in_step(&self) -> f64 {
        self.elapsed_since_start - self.step_started_at
    }
}

/// Outcome of one `tick` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    /// Steps entered during this tick, in order.
    pub crossed_steps: SmallVec<[usize; 4]>,
    pub current_step: usize,
    pub entered_terminal: bool,
}

impl TickReport {
    #[must_use]
    pub fn advanced(&self) -> bool {
        !self.crossed_steps.is_empty()
    }
}

/// Static inputs of a scheduler run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerSettings {
    pub ranking: RankingPolicy,
    pub choreography: ChoreographyPolicy,
    /// Left edge of every bar in pixels.
    pub bar_left: f64,
    /// Pixels per raw data unit.
    pub scale: f64,
    /// Seconds the final step stays on screen before the run is terminal.
    pub grace_duration: f64,
}

/// Below this many entities the serial interpolation pass is used even with
/// `parallel-projection` enabled.
#[cfg(feature = "parallel-projection")]
const PARALLEL_INTERPOLATION_MIN_ENTITIES: usize = 2048;

/// Drives entity states through the dataset's steps from frame deltas.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    dataset: TimeSeriesDataset,
    settings: SchedulerSettings,
    states: Vec<EntityAnimationState>,
    plan: StepPlan,
    display_order: Vec<EntityId>,
    schedule: ScheduleState,
}

impl FrameScheduler {
    /// Binds `dataset` and seeds one state per entity from step 0.
    ///
    /// Bars start at zero width and grow to their step 0 value during the
    /// first step.
    pub fn new(dataset: TimeSeriesDataset, settings: SchedulerSettings) -> RaceResult<Self> {
        if !settings.scale.is_finite() || settings.scale <= 0.0 {
            return Err(RaceChartError::Configuration(
                "scale must be finite and > 0".to_owned(),
            ));
        }
        if !settings.grace_duration.is_finite() || settings.grace_duration < 0.0 {
            return Err(RaceChartError::Configuration(
                "grace_duration must be finite and >= 0".to_owned(),
            ));
        }
        if !settings.bar_left.is_finite() {
            return Err(RaceChartError::Configuration(
                "bar left edge must be finite".to_owned(),
            ));
        }

        let layout = settings.ranking.layout();
        let (ranked, unranked) = settings.ranking.seed_order(&dataset);
        let mut states: Vec<EntityAnimationState> = dataset
            .entity_ids()
            .map(|entity| {
                EntityAnimationState::at_rest(
                    entity,
                    settings.bar_left,
                    layout.slot_top(0),
                    layout.bar_height,
                    0.0,
                    0,
                )
            })
            .collect();

        for entry in &ranked {
            let state = &mut states[entry.entity.index()];
            *state = EntityAnimationState::at_rest(
                entry.entity,
                settings.bar_left,
                entry.slot_top,
                layout.bar_height,
                0.0,
                entry.rank,
            );
            state.commit_transition(entry.value, entry.slot_top);
        }
        for (offset, entity) in unranked.iter().enumerate() {
            let rank = ranked.len() + offset;
            let state = &mut states[entity.index()];
            *state = EntityAnimationState::at_rest(
                *entity,
                settings.bar_left,
                layout.slot_top(rank),
                layout.bar_height,
                0.0,
                rank,
            );
            state.freeze();
        }

        let rank_order: Vec<EntityId> = ranked.iter().map(|entry| entry.entity).collect();
        let plan = settings.choreography.plan(&states, &rank_order);
        let mut display_order = rank_order;
        display_order.extend(unranked);

        debug!(
            entities = states.len(),
            steps = dataset.step_count(),
            mode = %settings.choreography.mode(),
            step_span = plan.span(),
            "seeded scheduler"
        );

        let schedule = ScheduleState {
            step_span: plan.span(),
            ..ScheduleState::default()
        };
        let mut scheduler = Self {
            dataset,
            settings,
            states,
            plan,
            display_order,
            schedule,
        };
        scheduler.interpolate_all(0.0);
        Ok(scheduler)
    }

    /// Advances the clock by `delta_seconds`.
    ///
    /// Every boundary crossed by the delta is processed in order before the
    /// frame geometry is computed, so large or irregular deltas land on the
    /// same state as many small ones.
    pub fn tick(&mut self, delta_seconds: f64) -> RaceResult<TickReport> {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return Err(RaceChartError::InvalidData(
                "tick delta seconds must be finite and >= 0".to_owned(),
            ));
        }

        let mut report = TickReport {
            current_step: self.schedule.current_step,
            ..TickReport::default()
        };
        if self.schedule.phase == SchedulerPhase::Terminal {
            return Ok(report);
        }

        self.schedule.phase = SchedulerPhase::Running;
        self.schedule.elapsed_since_start += delta_seconds;

        while !self.is_final_step() && self.schedule.elapsed_in_step() >= self.schedule.step_span
        {
            self.advance_step();
            report.crossed_steps.push(self.schedule.current_step);
        }

        let elapsed_in_step = self.schedule.elapsed_in_step();
        self.interpolate_all(elapsed_in_step);

        if self.is_final_step()
            && elapsed_in_step >= self.schedule.step_span.max(self.settings.grace_duration)
        {
            self.schedule.phase = SchedulerPhase::Terminal;
            report.entered_terminal = true;
            debug!(
                elapsed = self.schedule.elapsed_since_start,
                "scheduler reached terminal state"
            );
        }

        report.current_step = self.schedule.current_step;
        trace!(
            delta_seconds,
            step = self.schedule.current_step,
            elapsed_in_step,
            crossed = report.crossed_steps.len(),
            "tick"
        );
        Ok(report)
    }

    fn is_final_step(&self) -> bool {
        self.schedule.current_step + 1 >= self.dataset.step_count()
    }

    fn advance_step(&mut self) {
        // Settle every bar at the boundary so commits start from the target
        // of the step being left.
        self.interpolate_all(self.schedule.step_span);

        self.schedule.step_started_at += self.schedule.step_span;
        self.schedule.current_step += 1;
        let step = self.schedule.current_step;

        let ranked = self
            .settings
            .ranking
            .reorder(&self.dataset, step, &mut self.states);
        let mut survives = vec![false; self.states.len()];
        for entry in &ranked {
            self.states[entry.entity.index()].commit_transition(entry.value, entry.slot_top);
            survives[entry.entity.index()] = true;
        }
        let mut frozen: Vec<EntityId> = Vec::new();
        for state in &mut self.states {
            if !survives[state.entity.index()] {
                state.freeze();
                frozen.push(state.entity);
            }
        }
        frozen.sort_by_key(|entity| (self.states[entity.index()].rank, *entity));

        let rank_order: Vec<EntityId> = ranked.iter().map(|entry| entry.entity).collect();
        self.plan = self.settings.choreography.plan(&self.states, &rank_order);
        self.schedule.step_span = self.plan.span();
        self.display_order = rank_order;
        self.display_order.extend(frozen);

        debug!(
            step,
            label = self.dataset.step_label(step).unwrap_or_default(),
            survivors = ranked.len(),
            step_span = self.schedule.step_span,
            "advanced step"
        );
    }

    fn interpolate_all(&mut self, elapsed_in_step: f64) {
        let plan = &self.plan;
        let scale = self.settings.scale;
        let apply = |state: &mut EntityAnimationState| {
            let time = plan.window(state.entity).effective_time(elapsed_in_step);
            state.interpolate(time.elapsed, time.duration, scale);
        };

        #[cfg(feature = "parallel-projection")]
        {
            if self.states.len() >= PARALLEL_INTERPOLATION_MIN_ENTITIES {
                self.states.par_iter_mut().for_each(apply);
                return;
            }
        }

        self.states.iter_mut().for_each(apply);
    }

    #[must_use]
    pub fn dataset(&self) -> &TimeSeriesDataset {
        &self.dataset
    }

    #[must_use]
    pub fn settings(&self) -> SchedulerSettings {
        self.settings
    }

    #[must_use]
    pub fn schedule(&self) -> ScheduleState {
        self.schedule
    }

    #[must_use]
    pub fn phase(&self) -> SchedulerPhase {
        self.schedule.phase
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.schedule.current_step
    }

    #[must_use]
    pub fn current_step_label(&self) -> &str {
        self.dataset
            .step_label(self.schedule.current_step)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn states(&self) -> &[EntityAnimationState] {
        &self.states
    }

    #[must_use]
    pub fn state(&self, entity: EntityId) -> Option<&EntityAnimationState> {
        self.states.get(entity.index())
    }

    #[must_use]
    pub fn state_for_key(&self, key: &str) -> Option<&EntityAnimationState> {
        self.dataset
            .entity_index(key)
            .and_then(|entity| self.state(entity))
    }

    #[must_use]
    pub fn plan(&self) -> &StepPlan {
        &self.plan
    }

    /// Ranked entities by rank, then entities without a value at the current
    /// step by their retained rank.
    #[must_use]
    pub fn display_order(&self) -> &[EntityId] {
        &self.display_order
    }

    /// Entity whose growth window is open right now.
    #[must_use]
    pub fn active_entity(&self) -> Option<EntityId> {
        self.plan.active_entity(self.schedule.elapsed_in_step())
    }
}
