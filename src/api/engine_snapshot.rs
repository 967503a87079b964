use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Geometry, SchedulerPhase, Viewport};
use crate::error::RaceResult;
use crate::render::Renderer;

use super::RaceChartEngine;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub rank: usize,
    pub ranked: bool,
    pub value: f64,
    pub geometry: Geometry,
    pub label_text: String,
    pub label_visible: bool,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling. Entities are keyed by entity key in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub current_step: usize,
    pub current_step_label: String,
    pub elapsed_seconds: f64,
    pub phase: SchedulerPhase,
    pub scale: f64,
    pub bar_left: f64,
    pub entities: IndexMap<String, EntitySnapshot>,
}

impl EngineSnapshot {
    /// Loads a snapshot fixture written by `snapshot_json_pretty`.
    pub fn from_json_str(input: &str) -> RaceResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

impl<R: Renderer> RaceChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        let states = self.scheduler.states();
        let entities = self
            .race_frame()
            .entities
            .into_iter()
            .filter_map(|frame| {
                let state = states.get(frame.entity.index())?;
                Some((
                    frame.entity_key,
                    EntitySnapshot {
                        rank: state.rank,
                        ranked: state.ranked,
                        value: state.current_value(),
                        geometry: state.geometry,
                        label_text: frame.label_text,
                        label_visible: frame.label_visible,
                    },
                ))
            })
            .collect();

        EngineSnapshot {
            viewport: self.config.viewport,
            current_step: self.current_step(),
            current_step_label: self.current_step_label().to_owned(),
            elapsed_seconds: self.elapsed_seconds(),
            phase: self.phase(),
            scale: self.scale(),
            bar_left: self.bar_left(),
            entities,
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> RaceResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
