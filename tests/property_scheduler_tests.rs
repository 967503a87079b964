use racing_bars::core::{
    ChoreographyMode, ChoreographyPolicy, ChoreographyTiming, DatasetRow, FrameScheduler,
    RankingPolicy, SchedulerSettings, SlotLayout, TimeSeriesDataset,
};
use proptest::prelude::*;

fn race(values: &[Vec<Option<u16>>]) -> TimeSeriesDataset {
    let steps = values.first().map_or(0, Vec::len);
    TimeSeriesDataset::from_rows(
        (0..steps).map(|step| format!("s{step}")).collect(),
        values
            .iter()
            .enumerate()
            .map(|(index, row)| {
                DatasetRow::new(
                    format!("e{index}"),
                    row.iter().map(|value| value.map(f64::from)).collect(),
                )
            })
            .collect(),
    )
    .expect("valid dataset")
}

fn settings(mode: ChoreographyMode) -> SchedulerSettings {
    SchedulerSettings {
        ranking: RankingPolicy::new(
            SlotLayout::new(2_000.0, 0.0, 10.0, 8, Some(2.0)).expect("valid layout"),
        ),
        choreography: ChoreographyPolicy::new(
            mode,
            ChoreographyTiming::new(0.75, 400.0).expect("valid timing"),
        ),
        bar_left: 0.0,
        scale: 0.5,
        grace_duration: 1.0,
    }
}

fn dataset_strategy() -> impl Strategy<Value = Vec<Vec<Option<u16>>>> {
    (1usize..6, 2usize..6).prop_flat_map(|(entities, steps)| {
        prop::collection::vec(
            prop::collection::vec(prop::option::weighted(0.85, 0u16..1_000), steps),
            entities,
        )
    })
}

proptest! {
    #[test]
    fn split_ticks_match_a_single_tick(
        values in dataset_strategy(),
        mode in prop::sample::select(ChoreographyMode::ALL.to_vec()),
        deltas in prop::collection::vec(0.0f64..0.4, 1..40),
    ) {
        let dataset = race(&values);
        let mut split = FrameScheduler::new(dataset.clone(), settings(mode)).expect("scheduler");
        let mut single = FrameScheduler::new(dataset, settings(mode)).expect("scheduler");

        for delta in &deltas {
            split.tick(*delta).expect("split tick");
        }
        single.tick(split.schedule().elapsed_since_start).expect("single tick");

        prop_assert_eq!(split.current_step(), single.current_step());
        prop_assert_eq!(split.phase(), single.phase());
        for (a, b) in split.states().iter().zip(single.states()) {
            prop_assert!((a.geometry.width - b.geometry.width).abs() <= 1e-6);
            prop_assert!((a.geometry.y - b.geometry.y).abs() <= 1e-6);
        }
    }

    #[test]
    fn bars_never_overshoot_their_transition(
        values in dataset_strategy(),
        mode in prop::sample::select(ChoreographyMode::ALL.to_vec()),
        deltas in prop::collection::vec(0.0f64..0.6, 1..40),
    ) {
        let mut scheduler = FrameScheduler::new(race(&values), settings(mode)).expect("scheduler");
        let scale = scheduler.settings().scale;

        for delta in deltas {
            let before_step = scheduler.current_step();
            scheduler.tick(delta).expect("tick");
            prop_assert!(scheduler.current_step() >= before_step);
            for state in scheduler.states() {
                let low = state.value_start.min(state.value_finish) * scale;
                let high = state.value_start.max(state.value_finish) * scale;
                let width = state.geometry.width;
                prop_assert!(width >= low - 1e-9 && width <= high + 1e-9);
            }
        }
    }
}
