use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use racing_bars::api::{RaceChartConfig, RaceChartEngine};
use racing_bars::core::{
    ChoreographyMode, ChoreographyPolicy, ChoreographyTiming, DatasetRow, FrameScheduler,
    RankingPolicy, SchedulerSettings, SlotLayout, TimeSeriesDataset, Viewport,
};
use racing_bars::render::NullRenderer;
use std::hint::black_box;

fn generated_dataset(entities: usize, steps: usize) -> TimeSeriesDataset {
    let labels = (0..steps).map(|step| format!("step {step}")).collect();
    let rows = (0..entities)
        .map(|entity| {
            let values = (0..steps)
                .map(|step| {
                    let drift = ((entity * 31 + step * 17) % 97) as f64;
                    Some(100.0 + entity as f64 * 0.5 + drift * step as f64)
                })
                .collect();
            DatasetRow::new(format!("entity-{entity}"), values)
        })
        .collect();
    TimeSeriesDataset::from_rows(labels, rows).expect("valid generated dataset")
}

fn bench_scheduler_step_crossing_2k(c: &mut Criterion) {
    let dataset = generated_dataset(2_000, 8);
    let layout = SlotLayout::new(1080.0, 80.0, 40.0, 20, None).expect("valid layout");
    let settings = SchedulerSettings {
        ranking: RankingPolicy::new(layout),
        choreography: ChoreographyPolicy::new(
            ChoreographyMode::Simultaneous,
            ChoreographyTiming::new(1.0, 100.0).expect("valid timing"),
        ),
        bar_left: 200.0,
        scale: 0.5,
        grace_duration: 3.0,
    };
    let scheduler = FrameScheduler::new(dataset, settings).expect("scheduler init");

    c.bench_function("scheduler_step_crossing_2k", |b| {
        b.iter_batched(
            || scheduler.clone(),
            |mut scheduler| {
                let _ = scheduler.tick(black_box(2.5)).expect("tick should succeed");
                scheduler
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_build_render_frame_500(c: &mut Criterion) {
    let config = RaceChartConfig::new(Viewport::new(1920, 1080)).with_visible_count(20);
    let mut engine = RaceChartEngine::new(
        NullRenderer::default(),
        generated_dataset(500, 12),
        config,
    )
    .expect("engine init");
    engine.tick(1.5).expect("tick should succeed");

    c.bench_function("build_render_frame_500", |b| {
        b.iter(|| black_box(engine.build_render_frame()))
    });
}

fn bench_engine_snapshot_json_500(c: &mut Criterion) {
    let config = RaceChartConfig::new(Viewport::new(1600, 900)).with_visible_count(15);
    let mut engine = RaceChartEngine::new(
        NullRenderer::default(),
        generated_dataset(500, 12),
        config,
    )
    .expect("engine init");
    engine.tick(4.25).expect("tick should succeed");

    c.bench_function("engine_snapshot_json_500", |b| {
        b.iter(|| {
            let _ = engine
                .snapshot_json_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_scheduler_step_crossing_2k,
    bench_build_render_frame_500,
    bench_engine_snapshot_json_500
);
criterion_main!(benches);
