use tracing::debug;

use crate::core::{
    ChoreographyPolicy, ChoreographyTiming, CompletionDetector, FrameScheduler, RankingPolicy,
    SchedulerSettings, SlotLayout, TimeSeriesDataset,
};
use crate::error::RaceResult;
use crate::render::Renderer;

use super::layout_helpers::{assign_colors, resolve_bar_left, resolve_scale};
use super::validation::validate_config;
use super::{RaceChartConfig, RaceChartEngine};

impl<R: Renderer> RaceChartEngine<R> {
    /// Creates a fully seeded engine for `dataset`.
    ///
    /// Bars start left of the widest name label measured by `renderer`, and
    /// the scale is shrunk to the viewport when fitting is enabled.
    pub fn new(
        renderer: R,
        dataset: TimeSeriesDataset,
        config: RaceChartConfig,
    ) -> RaceResult<Self> {
        validate_config(&config, &dataset)?;

        let bar_left = resolve_bar_left(&renderer, &dataset, &config);
        let scale = resolve_scale(&dataset, &config, bar_left)?;
        let layout = SlotLayout::new(
            f64::from(config.viewport.height),
            config.header_height,
            config.bar_height,
            config.visible_count,
            config.gap_around_bars,
        )?;
        let timing = ChoreographyTiming::new(config.step_duration, config.rate)?;
        let settings = SchedulerSettings {
            ranking: RankingPolicy::new(layout),
            choreography: ChoreographyPolicy::new(config.choreography_mode, timing),
            bar_left,
            scale,
            grace_duration: config.grace_duration,
        };

        let scheduler = FrameScheduler::new(dataset, settings)?;
        let colors = assign_colors(
            scheduler.dataset().entity_count(),
            scheduler.display_order(),
            &config,
        );

        debug!(
            bar_left,
            scale,
            gap = layout.gap,
            mode = %config.choreography_mode,
            "initialized race chart engine"
        );

        Ok(Self {
            renderer,
            config,
            scheduler,
            completion: CompletionDetector::new(),
            colors,
            frames_rendered: 0,
            plugins: Vec::new(),
            export_sink: None,
        })
    }
}
