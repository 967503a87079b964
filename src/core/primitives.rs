use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{RaceChartError, RaceResult};

/// Default `chrono` pattern for month-granularity step labels ("Jan 2020").
pub const MONTH_STEP_LABEL_FORMAT: &str = "%b %Y";

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> RaceResult<f64> {
    value.to_f64().ok_or_else(|| {
        RaceChartError::DataFormat(format!("{field_name} cannot be represented as f64"))
    })
}

/// Formats one label per step from calendar dates.
#[must_use]
pub fn step_labels_from_dates(dates: &[NaiveDate], format: &str) -> Vec<String> {
    dates
        .iter()
        .map(|date| date.format(format).to_string())
        .collect()
}

/// Linear interpolation that lands exactly on its endpoints.
///
/// `start + (finish - start) * 1.0` is not guaranteed to equal `finish` in
/// floating point, so both ends are returned verbatim.
#[must_use]
pub fn lerp_exact(start: f64, finish: f64, t: f64) -> f64 {
    if t <= 0.0 {
        start
    } else if t >= 1.0 {
        finish
    } else {
        start + (finish - start) * t
    }
}

/// Normalized progress of `elapsed` through a window of `duration` seconds.
///
/// Empty windows complete as soon as they start.
#[must_use]
pub fn window_progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if elapsed >= 0.0 { 1.0 } else { 0.0 };
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
