use tracing::warn;

use crate::core::scale::LinearScale;
use crate::core::series::LineSeries;
use crate::error::ChartResult;

/// Y maximum used when the data has no positive value to scale from.
pub const FALLBACK_Y_MAX: f64 = 3.0;

/// Rounding unit for a y maximum: `3 * 10^(floor(log10(raw * 4/3)) - 1)`.
///
/// Non-positive or non-finite input has no magnitude and yields `None`.
#[must_use]
pub fn y_max_step(max_raw_value: f64) -> Option<f64> {
    let scaled = with_headroom(max_raw_value);
    if !scaled.is_finite() || scaled <= 0.0 {
        return None;
    }
    let magnitude = scaled.log10().floor() as i32 - 1;
    Some(3.0 * 10f64.powi(magnitude))
}

/// Rounds the largest data value up to a y-axis maximum whose thirds are
/// round numbers, leaving a quarter of headroom above the data.
///
/// Values too close to `f64::MAX` to take the headroom are returned as is.
#[must_use]
pub fn y_max(max_raw_value: f64) -> f64 {
    let Some(step) = y_max_step(max_raw_value) else {
        if max_raw_value.is_finite() && max_raw_value > 0.0 {
            return max_raw_value;
        }
        warn!(max_raw_value, "no positive data maximum, using fallback y max");
        return FALLBACK_Y_MAX;
    };
    let rounded = (with_headroom(max_raw_value) / step).ceil() * step;
    if rounded.is_finite() { rounded } else { max_raw_value }
}

fn with_headroom(value: f64) -> f64 {
    value * 4.0 / 3.0
}

/// Largest finite value among the visible series.
#[must_use]
pub fn max_visible_value(lines: &[LineSeries]) -> Option<f64> {
    lines
        .iter()
        .filter(|line| line.visible)
        .flat_map(|line| line.values.iter().map(|point| point.value))
        .filter(|value| value.is_finite())
        .max_by(f64::total_cmp)
}

#[must_use]
pub fn y_max_of_series(lines: &[LineSeries]) -> f64 {
    y_max(max_visible_value(lines).unwrap_or(0.0))
}

/// Horizontal gridline values: zero, the thirds, and the maximum.
#[must_use]
pub fn y_grid_lines(y_max: f64) -> [f64; 4] {
    [0.0, y_max / 3.0, y_max * 2.0 / 3.0, y_max]
}

/// Maps `[0, y_max]` onto `[height, 0]` in whole pixels.
pub fn y_scale(y_max: f64, height: f64) -> ChartResult<LinearScale> {
    Ok(LinearScale::new(0.0, y_max)?
        .with_range(height.max(0.0), 0.0)?
        .rounded(true))
}
