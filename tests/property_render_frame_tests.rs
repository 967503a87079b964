use racing_bars::api::{RaceChartConfig, RaceChartEngine};
use racing_bars::core::{ChoreographyMode, DatasetRow, TimeSeriesDataset, Viewport};
use racing_bars::render::NullRenderer;
use proptest::prelude::*;

fn dataset_strategy() -> impl Strategy<Value = Vec<Vec<Option<u16>>>> {
    (1usize..10, 1usize..5).prop_flat_map(|(entities, steps)| {
        prop::collection::vec(
            prop::collection::vec(prop::option::weighted(0.9, 0u16..20_000), steps),
            entities,
        )
    })
}

proptest! {
    #[test]
    fn render_frames_are_deterministic_and_valid(
        values in dataset_strategy(),
        mode in prop::sample::select(ChoreographyMode::ALL.to_vec()),
        deltas in prop::collection::vec(0.0f64..0.5, 1..24),
    ) {
        let steps = values[0].len();
        let rows: Vec<DatasetRow> = values
            .iter()
            .enumerate()
            .map(|(index, row)| {
                DatasetRow::new(
                    format!("entity-{index}"),
                    row.iter().map(|value| value.map(f64::from)).collect(),
                )
            })
            .collect();
        let dataset = TimeSeriesDataset::from_rows(
            (0..steps).map(|step| format!("step {step}")).collect(),
            rows,
        )
        .expect("valid dataset");
        let config = RaceChartConfig::new(Viewport::new(1280, 720))
            .with_visible_count(values.len())
            .with_choreography_mode(mode)
            .with_rate(5_000.0)
            .with_scale(1.0);
        let mut engine = RaceChartEngine::new(NullRenderer::default(), dataset, config)
            .expect("engine init");

        for delta in deltas {
            engine.tick(delta).expect("tick");
            let first = engine.build_render_frame();
            let second = engine.build_render_frame();
            prop_assert_eq!(&first, &second);
            prop_assert!(first.validate().is_ok());
            prop_assert!(
                first
                    .bars()
                    .iter()
                    .all(|rect| rect.x + rect.width <= 1280.0 - 50.0 + 1e-9)
            );
            engine.render().expect("render");
        }
    }
}
