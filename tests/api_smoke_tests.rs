use racing_bars::api::{ColorAssignment, RaceChartConfig, RaceChartEngine};
use racing_bars::core::{
    ChoreographyMode, DatasetRow, EntityId, SchedulerPhase, TimeSeriesDataset, Viewport,
};
use racing_bars::render::{Color, NullRenderer};
use racing_bars::RaceChartError;

fn three_entity_race() -> TimeSeriesDataset {
    TimeSeriesDataset::from_rows(
        vec!["Jan 2020".to_owned(), "Feb 2020".to_owned()],
        vec![
            DatasetRow::new("A", vec![Some(10.0), Some(40.0)]),
            DatasetRow::new("B", vec![Some(30.0), Some(5.0)]),
            DatasetRow::new("C", vec![Some(20.0), Some(25.0)]),
        ],
    )
    .expect("valid dataset")
}

fn config() -> RaceChartConfig {
    RaceChartConfig::new(Viewport::new(800, 400))
        .with_visible_count(3)
        .with_scale(2.0)
        .with_fit_scale_to_viewport(false)
        .with_grace_duration(0.5)
        .with_bar_layout(40.0, 40.0, Some(10.0))
}

#[test]
fn engine_runs_the_reference_race() {
    let mut engine =
        RaceChartEngine::new(NullRenderer::default(), three_entity_race(), config())
            .expect("engine init");
    assert_eq!(engine.phase(), SchedulerPhase::Seeding);
    assert_eq!(engine.current_step_label(), "Jan 2020");
    assert_eq!(engine.scale(), 2.0);
    assert_eq!(engine.bar_left(), 200.0);

    engine.tick(1.0).expect("tick");
    engine.tick(0.5).expect("tick");
    assert_eq!(engine.current_step(), 1);
    assert_eq!(engine.current_step_label(), "Feb 2020");
    let a = engine.state_for_key("A").expect("A");
    assert_eq!(a.geometry.width, 50.0);
    assert_eq!(a.geometry.x, 200.0);

    engine.tick(0.5).expect("tick");
    assert!(engine.is_complete());
    let widths: Vec<f64> = engine.states().iter().map(|s| s.geometry.width).collect();
    assert_eq!(widths, vec![80.0, 10.0, 50.0]);
}

#[test]
fn render_until_complete_drives_the_whole_race() {
    let mut engine = RaceChartEngine::new(
        NullRenderer::default(),
        three_entity_race(),
        config().with_frames_per_second(8.0),
    )
    .expect("engine init");

    let frames = engine.render_until_complete().expect("run");
    assert_eq!(frames, 17);
    assert!(engine.is_complete());
    assert_eq!(engine.elapsed_seconds(), 2.0);
    assert_eq!(engine.frames_rendered(), 17);
    assert_eq!(engine.into_renderer().frames_rendered, 17);
}

#[test]
fn scale_is_fitted_to_the_viewport() {
    let fitted = RaceChartEngine::new(
        NullRenderer::default(),
        three_entity_race(),
        config().with_scale(100.0).with_fit_scale_to_viewport(true),
    )
    .expect("engine init");
    assert_eq!(fitted.scale(), (800.0 - 200.0 - 50.0) / 40.0);

    let small = RaceChartEngine::new(
        NullRenderer::default(),
        three_entity_race(),
        config().with_scale(1.0).with_fit_scale_to_viewport(true),
    )
    .expect("engine init");
    assert_eq!(small.scale(), 1.0);
}

#[test]
fn left_margin_widens_for_long_names() {
    let dataset = three_entity_race()
        .with_labels([("B", "W".repeat(40))])
        .expect("relabel");
    let engine = RaceChartEngine::new(NullRenderer::default(), dataset, config())
        .expect("engine init");

    let expected = 0.58 * 40.0 * 24.0 + 20.0 + 20.0;
    assert!((engine.bar_left() - expected).abs() <= 1e-9);
    assert!(
        engine
            .states()
            .iter()
            .all(|state| state.geometry.x == engine.bar_left())
    );
}

#[test]
fn colors_follow_the_configured_assignment() {
    let palette = vec![
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(0.0, 1.0, 0.0),
        Color::rgb(0.0, 0.0, 1.0),
    ];

    let by_index = RaceChartEngine::new(
        NullRenderer::default(),
        three_entity_race(),
        config().with_palette(palette.clone()),
    )
    .expect("engine init");
    assert_eq!(by_index.entity_color(EntityId::new(0)), Some(palette[0]));
    assert_eq!(by_index.entity_color(EntityId::new(2)), Some(palette[2]));

    let by_rank = RaceChartEngine::new(
        NullRenderer::default(),
        three_entity_race(),
        config()
            .with_palette(palette[..2].to_vec())
            .with_color_assignment(ColorAssignment::RankCyclic),
    )
    .expect("engine init");
    assert_eq!(by_rank.entity_color(EntityId::new(1)), Some(palette[0]));
    assert_eq!(by_rank.entity_color(EntityId::new(2)), Some(palette[1]));
    assert_eq!(by_rank.entity_color(EntityId::new(0)), Some(palette[0]));
    assert_eq!(by_rank.entity_color(EntityId::new(3)), None);
}

#[test]
fn invalid_configuration_is_rejected_at_construction() {
    let cases = [
        config().with_visible_count(4),
        config().with_visible_count(0),
        config().with_step_duration(0.0),
        config().with_rate(f64::NAN),
        config().with_scale(-1.0),
        config().with_grace_duration(-0.5),
        config().with_palette(Vec::new()),
        config().with_palette(vec![Color::rgb(2.0, 0.0, 0.0)]),
        config().with_bar_layout(40.0, 400.0, None),
        config().with_margins(500.0, 400.0).with_fit_scale_to_viewport(true),
    ];
    for case in cases {
        let err = RaceChartEngine::new(NullRenderer::default(), three_entity_race(), case)
            .err()
            .expect("invalid config must fail");
        assert!(matches!(err, RaceChartError::Configuration(_)), "{err}");
    }

    let err = RaceChartEngine::new(
        NullRenderer::default(),
        three_entity_race(),
        RaceChartConfig::new(Viewport::new(0, 400)).with_visible_count(3),
    )
    .err()
    .expect("zero viewport must fail");
    assert!(matches!(
        err,
        RaceChartError::InvalidViewport {
            width: 0,
            height: 400
        }
    ));
}

#[test]
fn sequential_mode_reports_the_moving_entity() {
    let mut engine = RaceChartEngine::new(
        NullRenderer::default(),
        three_entity_race(),
        config().with_choreography_mode(ChoreographyMode::BottomUp),
    )
    .expect("engine init");

    engine.tick(0.5).expect("tick");
    assert_eq!(engine.active_entity(), Some(EntityId::new(0)));
    engine.tick(1.0).expect("tick");
    assert_eq!(engine.active_entity(), Some(EntityId::new(2)));
    engine.tick(1.0).expect("tick");
    assert_eq!(engine.active_entity(), Some(EntityId::new(1)));
}

#[test]
fn negative_tick_is_rejected_without_side_effects() {
    let mut engine =
        RaceChartEngine::new(NullRenderer::default(), three_entity_race(), config())
            .expect("engine init");
    let err = engine.tick(-1.0).expect_err("negative delta must fail");
    assert!(matches!(err, RaceChartError::InvalidData(_)));
    assert_eq!(engine.elapsed_seconds(), 0.0);
    assert!(!engine.is_complete());
}
