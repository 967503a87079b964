use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{EntityAnimationState, EntityId};
use crate::error::{RaceChartError, RaceResult};

/// Growth-timing strategy applied inside each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoreographyMode {
    /// Every bar animates over `[0, step_duration]`.
    #[default]
    Simultaneous,
    /// Every bar starts at 0 and moves at a constant `rate`.
    SimultaneousFlat,
    /// Bars animate one after another from rank 0 down, `step_duration` each.
    TopDown,
    /// Bars animate one after another from rank 0 down at a constant `rate`.
    TopDownFlat,
    /// `TopDown` starting from the last rank.
    BottomUp,
    /// `TopDownFlat` starting from the last rank.
    BottomUpFlat,
}

impl ChoreographyMode {
    pub const ALL: [Self; 6] = [
        Self::Simultaneous,
        Self::SimultaneousFlat,
        Self::TopDown,
        Self::TopDownFlat,
        Self::BottomUp,
        Self::BottomUpFlat,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simultaneous => "simultaneous",
            Self::SimultaneousFlat => "simultaneous_flat",
            Self::TopDown => "top_down",
            Self::TopDownFlat => "top_down_flat",
            Self::BottomUp => "bottom_up",
            Self::BottomUpFlat => "bottom_up_flat",
        }
    }

    /// Flat modes derive durations from `|Δvalue| / rate`.
    #[must_use]
    pub const fn is_flat(self) -> bool {
        matches!(
            self,
            Self::SimultaneousFlat | Self::TopDownFlat | Self::BottomUpFlat
        )
    }

    #[must_use]
    pub const fn is_sequential(self) -> bool {
        !matches!(self, Self::Simultaneous | Self::SimultaneousFlat)
    }

    #[must_use]
    pub const fn is_bottom_up(self) -> bool {
        matches!(self, Self::BottomUp | Self::BottomUpFlat)
    }
}

impl fmt::Display for ChoreographyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoreographyMode {
    type Err = RaceChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| {
                RaceChartError::Configuration(format!("unknown choreography mode `{value}`"))
            })
    }
}

/// Time slice, relative to the start of a step, during which one bar moves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthWindow {
    pub start: f64,
    pub duration: f64,
}

impl GrowthWindow {
    #[must_use]
    pub const fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    #[must_use]
    pub fn is_active(self, elapsed_in_step: f64) -> bool {
        elapsed_in_step >= self.start && elapsed_in_step < self.end()
    }

    /// Maps step time to window-local time.
    ///
    /// Reaching the window end snaps to exactly `duration`; `(start + d) -
    /// start` is not always `d` in floating point.
    #[must_use]
    pub fn effective_time(self, elapsed_in_step: f64) -> EffectiveTime {
        let elapsed = if elapsed_in_step >= self.end() {
            self.duration
        } else {
            elapsed_in_step - self.start
        };
        EffectiveTime {
            elapsed,
            duration: self.duration,
        }
    }
}

/// Window-local time handed to `EntityAnimationState::interpolate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveTime {
    pub elapsed: f64,
    pub duration: f64,
}

/// Timing inputs; fixed modes read `step_duration`, flat modes read `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChoreographyTiming {
    pub step_duration: f64,
    pub rate: f64,
}

impl ChoreographyTiming {
    pub fn new(step_duration: f64, rate: f64) -> RaceResult<Self> {
        if !step_duration.is_finite() || step_duration <= 0.0 {
            return Err(RaceChartError::Configuration(
                "step_duration must be finite and > 0".to_owned(),
            ));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RaceChartError::Configuration(
                "rate must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            step_duration,
            rate,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoreographyPolicy {
    mode: ChoreographyMode,
    timing: ChoreographyTiming,
}

impl ChoreographyPolicy {
    #[must_use]
    pub fn new(mode: ChoreographyMode, timing: ChoreographyTiming) -> Self {
        Self { mode, timing }
    }

    #[must_use]
    pub fn mode(&self) -> ChoreographyMode {
        self.mode
    }

    #[must_use]
    pub fn timing(&self) -> ChoreographyTiming {
        self.timing
    }

    fn duration_for(&self, delta: f64) -> f64 {
        if self.mode.is_flat() {
            delta.abs() / self.timing.rate
        } else {
            self.timing.step_duration
        }
    }

    /// Windows for `ordered_deltas` (rank order, top first), returned in the
    /// same order.
    #[must_use]
    pub fn windows(&self, ordered_deltas: &[f64]) -> Vec<GrowthWindow> {
        let mut windows = vec![GrowthWindow::default(); ordered_deltas.len()];
        if !self.mode.is_sequential() {
            for (window, delta) in windows.iter_mut().zip(ordered_deltas) {
                *window = GrowthWindow::new(0.0, self.duration_for(*delta));
            }
            return windows;
        }

        // Each start is the previous window's end, computed with the same
        // addition, so consecutive windows never overlap.
        let mut cursor = 0.0;
        let mut place = |index: usize| {
            let duration = self.duration_for(ordered_deltas[index]);
            windows[index] = GrowthWindow::new(cursor, duration);
            cursor += duration;
        };
        if self.mode.is_bottom_up() {
            (0..ordered_deltas.len()).rev().for_each(&mut place);
        } else {
            (0..ordered_deltas.len()).for_each(&mut place);
        }
        windows
    }

    /// Window of the entity at `index_in_order` among `ordered_deltas`.
    #[must_use]
    pub fn window(&self, index_in_order: usize, ordered_deltas: &[f64]) -> GrowthWindow {
        self.windows(ordered_deltas)
            .get(index_in_order)
            .copied()
            .unwrap_or_default()
    }

    /// Effective elapsed time and duration for one entity.
    #[must_use]
    pub fn effective_time(
        &self,
        elapsed_in_step: f64,
        index_in_order: usize,
        ordered_deltas: &[f64],
    ) -> EffectiveTime {
        self.window(index_in_order, ordered_deltas)
            .effective_time(elapsed_in_step)
    }

    /// Plans one step: windows for the ranked entities in `rank_order`,
    /// empty windows for everything else.
    #[must_use]
    pub fn plan(&self, states: &[EntityAnimationState], rank_order: &[EntityId]) -> StepPlan {
        let deltas: Vec<f64> = rank_order
            .iter()
            .map(|entity| {
                states
                    .get(entity.index())
                    .map_or(0.0, EntityAnimationState::value_delta)
            })
            .collect();
        let ordered_windows = self.windows(&deltas);

        let mut windows = vec![GrowthWindow::default(); states.len()];
        for (entity, window) in rank_order.iter().zip(&ordered_windows) {
            if let Some(slot) = windows.get_mut(entity.index()) {
                *slot = *window;
            }
        }

        let mut sequence = rank_order.to_vec();
        if self.mode.is_bottom_up() {
            sequence.reverse();
        }

        let span = if self.mode == ChoreographyMode::Simultaneous {
            self.timing.step_duration
        } else {
            ordered_windows
                .iter()
                .map(|window| window.end())
                .fold(0.0, f64::max)
        };

        StepPlan {
            windows,
            sequence,
            span,
        }
    }
}

/// Per-step schedule: one window per entity plus the step's total span.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepPlan {
    windows: Vec<GrowthWindow>,
    sequence: Vec<EntityId>,
    span: f64,
}

impl StepPlan {
    #[must_use]
    pub fn window(&self, entity: EntityId) -> GrowthWindow {
        self.windows
            .get(entity.index())
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn windows(&self) -> &[GrowthWindow] {
        &self.windows
    }

    /// Ranked entities in the order they start moving.
    #[must_use]
    pub fn sequence(&self) -> &[EntityId] {
        &self.sequence
    }

    /// Seconds until every window in the step has closed.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.span
    }

    /// First entity, in animation order, whose window is open at
    /// `elapsed_in_step`.
    #[must_use]
    pub fn active_entity(&self, elapsed_in_step: f64) -> Option<EntityId> {
        self.sequence
            .iter()
            .copied()
            .find(|entity| self.window(*entity).is_active(elapsed_in_step))
    }
}
