use serde::{Deserialize, Serialize};

use crate::core::SchedulerPhase;

/// One-shot terminal signal derived from the scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionDetector {
    complete: bool,
    fired: bool,
}

impl CompletionDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest scheduler phase.
    ///
    /// Returns `true` exactly once: on the first observation of the terminal
    /// phase. Every later call returns `false`.
    pub fn observe(&mut self, phase: SchedulerPhase) -> bool {
        if phase != SchedulerPhase::Terminal {
            return false;
        }
        self.complete = true;
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the terminal event has already been handed out.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
