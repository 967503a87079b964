use serde::{Deserialize, Serialize};

use crate::core::{EntityId, SchedulerPhase, Viewport};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceContext {
    pub viewport: Viewport,
    pub current_step: usize,
    pub step_count: usize,
    pub elapsed_seconds: f64,
    pub phase: SchedulerPhase,
    /// Entity ranked first at the current step, if any entity has a value.
    pub leader: Option<EntityId>,
    pub active_entity: Option<EntityId>,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    /// Emitted once, after the first successful tick.
    Seeded { entities: usize, steps: usize },
    StepAdvanced { step: usize },
    Rendered { frame_index: u64 },
    Completed { elapsed_seconds: f64 },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating the
/// animation state directly.
pub trait RacePlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: RaceEvent, context: RaceContext);
}
