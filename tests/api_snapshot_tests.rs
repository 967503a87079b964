use racing_bars::RaceChartError;
use racing_bars::api::{
    ColorAssignment, EngineSnapshot, RaceChartConfig, RaceChartEngine, ThemeColors,
};
use racing_bars::core::{ChoreographyMode, DatasetRow, SchedulerPhase, TimeSeriesDataset, Viewport};
use racing_bars::render::{Color, NullRenderer};

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
fn config_json_roundtrip() {
    let config = config()
        .with_choreography_mode(ChoreographyMode::BottomUpFlat)
        .with_value_affixes("$", "M")
        .with_color_assignment(ColorAssignment::RankCyclic)
        .with_palette(vec![Color::rgb(1.0, 0.5, 0.25), Color::rgba(0.0, 0.0, 0.0, 0.5)])
        .with_theme(ThemeColors {
            background: Color::BLACK,
            header: Color::rgb(0.5, 0.5, 0.5),
            text: Color::WHITE,
            header_text: Color::rgb(0.25, 0.25, 0.25),
        })
        .with_header_text("Most popular languages")
        .with_header_font_size_px(36.0);

    let json = config.to_json_pretty().expect("config should serialize");
    assert!(json.contains("\"bottom_up_flat\""));
    assert!(json.contains("\"rank_cyclic\""));
    let restored = RaceChartConfig::from_json_str(&json).expect("config should deserialize");
    assert_eq!(restored, config);
}

#[test]
fn partial_json_config_uses_defaults() {
    let config = RaceChartConfig::from_json_str(
        r#"{ "choreography_mode": "top_down_flat", "visible_count": 5, "rate": 250.0 }"#,
    )
    .expect("partial config");

    assert_eq!(config.choreography_mode, ChoreographyMode::TopDownFlat);
    assert_eq!(config.visible_count, 5);
    assert_eq!(config.rate, 250.0);
    assert_eq!(config.viewport, Viewport::new(1280, 720));
    assert_eq!(config.step_duration, 1.0);
    assert_eq!(config.grace_duration, 3.0);
    assert_eq!(config.header_height, 80.0);
    assert_eq!(config.bar_height, 40.0);
    assert_eq!(config.gap_around_bars, None);
    assert_eq!(config.header_text, "");
    assert_eq!(config.header_font_size_px, 40.0);
    assert_eq!(config.palette.len(), 10);
    assert_eq!(config, RaceChartConfig::default()
        .with_choreography_mode(ChoreographyMode::TopDownFlat)
        .with_visible_count(5)
        .with_rate(250.0));
}

#[test]
fn theme_without_header_text_color_defaults_to_white() {
    let config = RaceChartConfig::from_json_str(
        r#"{
            "header_text": "Steam players",
            "theme": {
                "background": { "red": 0.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 },
                "header": { "red": 1.0, "green": 1.0, "blue": 1.0, "alpha": 1.0 },
                "text": { "red": 0.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 }
            }
        }"#,
    )
    .expect("theme without header text color");

    assert_eq!(config.header_text, "Steam players");
    assert_eq!(config.theme.header, Color::WHITE);
    assert_eq!(config.theme.header_text, Color::WHITE);
}

#[test]
fn unknown_mode_in_json_is_a_configuration_error() {
    let err = RaceChartConfig::from_json_str(r#"{ "choreography_mode": "sideways" }"#)
        .expect_err("unknown mode must fail");
    assert!(matches!(err, RaceChartError::Configuration(_)));
}

#[test]
fn hex_palette_is_parsed() {
    let config = config()
        .with_hex_palette(&["#ff0000", "00ff0080"])
        .expect("valid hex palette");
    assert_eq!(config.palette[0], Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(config.palette[1], Color::rgba(0.0, 1.0, 0.0, 128.0 / 255.0));

    let err = config
        .with_hex_palette(&["#ff00"])
        .expect_err("short hex must fail");
    assert!(matches!(err, RaceChartError::InvalidData(_)));

    assert!(Color::from_hex("#gg0000").is_err());
    let pastel = Color::from_hex("#f98284").expect("valid hex");
    assert_eq!(pastel, Color::rgb8(0xf9, 0x82, 0x84));
}

#[test]
fn snapshot_lists_entities_in_display_order() {
    let mut engine = RaceChartEngine::new(NullRenderer::default(), three_entity_race(), config())
        .expect("engine init");
    engine.tick(2.0).expect("tick");

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, SchedulerPhase::Terminal);
    assert_eq!(snapshot.current_step, 1);
    assert_eq!(snapshot.current_step_label, "Feb 2020");
    assert_eq!(snapshot.scale, 2.0);
    assert_eq!(snapshot.bar_left, 200.0);

    let keys: Vec<&str> = snapshot.entities.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["A", "C", "B"]);
    let b = &snapshot.entities["B"];
    assert_eq!(b.rank, 2);
    assert!(b.ranked);
    assert_eq!(b.value, 5.0);
    assert_eq!(b.geometry.width, 10.0);
    assert_eq!(b.label_text, "5");
    assert!(!b.label_visible);
}

#[test]
fn snapshot_json_roundtrip() {
    let mut engine = RaceChartEngine::new(NullRenderer::default(), three_entity_race(), config())
        .expect("engine init");
    engine.tick(1.5).expect("tick");

    let json = engine
        .snapshot_json_pretty()
        .expect("snapshot should serialize");
    let restored = EngineSnapshot::from_json_str(&json).expect("snapshot should parse");
    assert_eq!(restored, engine.snapshot());
}

#[test]
fn malformed_snapshot_fixture_is_a_json_error() {
    let err = EngineSnapshot::from_json_str(r#"{ "viewport": { "width": 800 } "#)
        .expect_err("truncated fixture must fail");
    assert!(matches!(err, RaceChartError::Json(_)));

    let err = EngineSnapshot::from_json_str(r#"{ "current_step": "first" }"#)
        .expect_err("wrong field type must fail");
    assert!(matches!(err, RaceChartError::Json(_)));
}
