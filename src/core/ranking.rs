use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{EntityAnimationState, EntityId, TimeSeriesDataset};
use crate::error::{RaceChartError, RaceResult};

/// Vertical slot geometry shared by every rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotLayout {
    pub header_height: f64,
    pub bar_height: f64,
    pub gap: f64,
    pub visible_count: usize,
}

impl SlotLayout {
    /// Resolves slot spacing for `visible_count` bars below the header.
    ///
    /// Without an explicit gap the free height is split evenly into
    /// `visible_count + 1` gaps around the bars.
    pub fn new(
        total_height: f64,
        header_height: f64,
        bar_height: f64,
        visible_count: usize,
        explicit_gap: Option<f64>,
    ) -> RaceResult<Self> {
        if visible_count == 0 {
            return Err(RaceChartError::Configuration(
                "visible count must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("total_height", total_height),
            ("header_height", header_height),
            ("bar_height", bar_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RaceChartError::Configuration(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if bar_height <= 0.0 {
            return Err(RaceChartError::Configuration(
                "bar_height must be > 0".to_owned(),
            ));
        }

        let gap = match explicit_gap {
            Some(gap) => gap,
            None => {
                let free = total_height - header_height - visible_count as f64 * bar_height;
                free / (visible_count as f64 + 1.0)
            }
        };
        if !gap.is_finite() || gap < 0.0 {
            return Err(RaceChartError::Configuration(format!(
                "{visible_count} bars of height {bar_height} do not fit below the header"
            )));
        }

        Ok(Self {
            header_height,
            bar_height,
            gap,
            visible_count,
        })
    }

    #[must_use]
    pub fn slot_top(&self, rank: usize) -> f64 {
        let rank = rank as f64;
        self.header_height + self.gap * (rank + 1.0) + self.bar_height * rank
    }

    #[must_use]
    pub fn is_visible_rank(&self, rank: usize) -> bool {
        rank < self.visible_count
    }
}

/// One ranked survivor at a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub entity: EntityId,
    pub value: f64,
    pub rank: usize,
    pub slot_top: f64,
}

/// Descending-value ordering with deterministic tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingPolicy {
    layout: SlotLayout,
}

impl RankingPolicy {
    #[must_use]
    pub fn new(layout: SlotLayout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    /// Orders every entity with a value at `step`.
    ///
    /// Ties fall back to `prior_rank`, then to dataset order, so the result
    /// never depends on the sort implementation.
    pub fn rank_step<F>(
        &self,
        dataset: &TimeSeriesDataset,
        step: usize,
        prior_rank: F,
    ) -> Vec<RankedEntity>
    where
        F: Fn(EntityId) -> usize,
    {
        let mut survivors: Vec<(EntityId, f64)> = dataset
            .entity_ids()
            .filter_map(|entity| dataset.value_at(entity, step).map(|value| (entity, value)))
            .collect();
        survivors.sort_by_key(|&(entity, value)| {
            (Reverse(OrderedFloat(value)), prior_rank(entity), entity)
        });

        survivors
            .into_iter()
            .enumerate()
            .map(|(rank, (entity, value))| RankedEntity {
                entity,
                value,
                rank,
                slot_top: self.layout.slot_top(rank),
            })
            .collect()
    }

    /// Re-ranks `states` for `step` and returns the survivors in rank order.
    ///
    /// Entities without a value keep their previous rank.
    pub fn reorder(
        &self,
        dataset: &TimeSeriesDataset,
        step: usize,
        states: &mut [EntityAnimationState],
    ) -> Vec<RankedEntity> {
        let ranked = self.rank_step(dataset, step, |entity| {
            states
                .get(entity.index())
                .map_or(usize::MAX, |state| state.rank)
        });
        for entry in &ranked {
            if let Some(state) = states.get_mut(entry.entity.index()) {
                state.rank = entry.rank;
            }
        }
        trace!(step, survivors = ranked.len(), "reorder step");
        ranked
    }

    /// Initial ranking: survivors of step 0 first, then entities without a
    /// step 0 value in dataset order.
    #[must_use]
    pub fn seed_order(&self, dataset: &TimeSeriesDataset) -> (Vec<RankedEntity>, Vec<EntityId>) {
        let ranked = self.rank_step(dataset, 0, EntityId::index);
        let unranked = dataset
            .entity_ids()
            .filter(|entity| dataset.value_at(*entity, 0).is_none())
            .collect();
        (ranked, unranked)
    }
}
