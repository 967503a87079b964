use crate::core::TimeSeriesDataset;
use crate::error::{RaceChartError, RaceResult};

use super::RaceChartConfig;

pub(super) fn validate_config(
    config: &RaceChartConfig,
    dataset: &TimeSeriesDataset,
) -> RaceResult<()> {
    if !config.viewport.is_valid() {
        return Err(RaceChartError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        });
    }

    for (name, value) in [
        ("step_duration", config.step_duration),
        ("rate", config.rate),
        ("scale", config.scale),
        ("frames_per_second", config.frames_per_second),
        ("name_font_size_px", config.name_font_size_px),
        ("value_font_size_px", config.value_font_size_px),
        ("step_label_font_size_px", config.step_label_font_size_px),
        ("header_font_size_px", config.header_font_size_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(RaceChartError::Configuration(format!(
                "{name} must be finite and > 0"
            )));
        }
    }
    for (name, value) in [
        ("grace_duration", config.grace_duration),
        ("left_margin", config.left_margin),
        ("right_margin", config.right_margin),
        ("text_bar_gap", config.text_bar_gap),
        ("value_label_gap", config.value_label_gap),
        ("step_label_margin", config.step_label_margin),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(RaceChartError::Configuration(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }
    if let Some(gap) = config.gap_around_bars {
        if !gap.is_finite() || gap < 0.0 {
            return Err(RaceChartError::Configuration(
                "gap_around_bars must be finite and >= 0".to_owned(),
            ));
        }
    }

    if config.visible_count == 0 {
        return Err(RaceChartError::Configuration(
            "visible_count must be > 0".to_owned(),
        ));
    }
    if config.visible_count > dataset.entity_count() {
        return Err(RaceChartError::Configuration(format!(
            "visible_count {} exceeds entity count {}",
            config.visible_count,
            dataset.entity_count()
        )));
    }

    if config.palette.is_empty() {
        return Err(RaceChartError::Configuration(
            "palette must contain at least one color".to_owned(),
        ));
    }
    for color in &config.palette {
        color
            .validate()
            .map_err(|e| RaceChartError::Configuration(format!("invalid palette color: {e}")))?;
    }
    for color in [
        config.theme.background,
        config.theme.header,
        config.theme.text,
        config.theme.header_text,
    ] {
        color
            .validate()
            .map_err(|e| RaceChartError::Configuration(format!("invalid theme color: {e}")))?;
    }

    Ok(())
}
