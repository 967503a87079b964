use crate::core::{EntityId, TextMeasurer, TimeSeriesDataset};
use crate::error::{RaceChartError, RaceResult};
use crate::render::Color;

use super::{ColorAssignment, RaceChartConfig};

/// Extra room kept left of the widest name label.
const NAME_LABEL_PADDING_PX: f64 = 20.0;

pub(super) fn resolve_bar_left<M: TextMeasurer + ?Sized>(
    measurer: &M,
    dataset: &TimeSeriesDataset,
    config: &RaceChartConfig,
) -> f64 {
    let widest = dataset
        .entities()
        .iter()
        .map(|entity| measurer.text_width_px(&entity.label, config.name_font_size_px))
        .filter(|width| width.is_finite())
        .fold(0.0, f64::max);
    config
        .left_margin
        .max(widest + config.text_bar_gap + NAME_LABEL_PADDING_PX)
}

pub(super) fn resolve_scale(
    dataset: &TimeSeriesDataset,
    config: &RaceChartConfig,
    bar_left: f64,
) -> RaceResult<f64> {
    if !config.fit_scale_to_viewport {
        return Ok(config.scale);
    }

    let available = f64::from(config.viewport.width) - bar_left - config.right_margin;
    if available <= 0.0 {
        return Err(RaceChartError::Configuration(format!(
            "no horizontal room for bars: viewport width {} with bars starting at {bar_left}",
            config.viewport.width
        )));
    }

    Ok(match dataset.max_value() {
        Some(max_value) if max_value > 0.0 => config.scale.min(available / max_value),
        _ => config.scale,
    })
}

pub(super) fn assign_colors(
    entity_count: usize,
    seed_order: &[EntityId],
    config: &RaceChartConfig,
) -> Vec<Color> {
    let palette = &config.palette;
    match config.color_assignment {
        ColorAssignment::ByOriginalIndex => (0..entity_count)
            .map(|index| palette[index % palette.len()])
            .collect(),
        ColorAssignment::RankCyclic => {
            let mut colors = vec![palette[0]; entity_count];
            for (position, entity) in seed_order.iter().enumerate() {
                colors[entity.index()] = palette[position % palette.len()];
            }
            colors
        }
    }
}
