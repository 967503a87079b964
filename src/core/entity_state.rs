use serde::{Deserialize, Serialize};

use crate::core::primitives::{lerp_exact, window_progress};
use crate::core::{EntityId, Geometry};

/// Animated bar state owned by the scheduler, one per dataset entity.
///
/// Width endpoints are kept in raw data units; `scale` is applied when the
/// geometry is produced. Vertical endpoints are already in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityAnimationState {
    pub entity: EntityId,
    pub geometry: Geometry,
    pub value_start: f64,
    pub value_finish: f64,
    pub v_start: f64,
    pub v_finish: f64,
    pub rank: usize,
    /// `false` when the entity had no value at the current step.
    pub ranked: bool,
    current_value: f64,
}

impl EntityAnimationState {
    /// Creates a bar at rest at `value` (raw units) and vertical slot `top`.
    #[must_use]
    pub fn at_rest(
        entity: EntityId,
        left: f64,
        top: f64,
        bar_height: f64,
        value: f64,
        rank: usize,
    ) -> Self {
        Self {
            entity,
            geometry: Geometry::new(left, top, 0.0, bar_height),
            value_start: value,
            value_finish: value,
            v_start: top,
            v_finish: top,
            rank,
            ranked: true,
            current_value: value,
        }
    }

    /// Raw-unit value at the last interpolation.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Raw-unit change the current transition covers.
    #[must_use]
    pub fn value_delta(&self) -> f64 {
        self.value_finish - self.value_start
    }

    /// Starts a new transition from wherever the bar currently is.
    pub fn commit_transition(&mut self, new_finish_value: f64, new_finish_v: f64) {
        self.value_start = self.current_value;
        self.v_start = self.geometry.y;
        self.value_finish = new_finish_value;
        self.v_finish = new_finish_v;
        self.ranked = true;
    }

    /// Pins the bar at its committed value and vertical slot for one step.
    pub fn freeze(&mut self) {
        self.value_start = self.current_value;
        self.value_finish = self.current_value;
        self.v_start = self.geometry.y;
        self.v_finish = self.geometry.y;
        self.ranked = false;
    }

    /// Moves the bar to `elapsed` seconds into a window of `duration` seconds.
    ///
    /// Progress is clamped to `[0, 1]`, so the bar never overshoots its
    /// target regardless of frame timing.
    pub fn interpolate(&mut self, elapsed: f64, duration: f64, scale: f64) -> Geometry {
        let t = window_progress(elapsed, duration);
        self.current_value = lerp_exact(self.value_start, self.value_finish, t);
        self.geometry.width = self.current_value * scale;
        self.geometry.y = lerp_exact(self.v_start, self.v_finish, t);
        self.geometry
    }
}
