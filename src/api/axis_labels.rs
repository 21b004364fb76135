use serde::{Deserialize, Serialize};

use crate::core::{ChartDate, LinearScale, format_date, y_grid_lines};
use crate::error::ChartResult;

use super::ValueFormatter;

/// Two-line x tick label.
///
/// `secondary` (month/year by default) is only emitted when it changes, so
/// consecutive ticks in the same month share one caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxisLabel {
    pub date: ChartDate,
    pub x: f64,
    pub primary: String,
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisLabel {
    pub value: f64,
    pub y: f64,
    pub text: String,
}

pub fn x_axis_labels<F>(
    ticks: &[ChartDate],
    x_of: F,
    primary_format: &str,
    secondary_format: &str,
) -> ChartResult<Vec<XAxisLabel>>
where
    F: Fn(&ChartDate) -> f64,
{
    let mut labels = Vec::with_capacity(ticks.len());
    let mut previous_secondary: Option<String> = None;

    for tick in ticks {
        let secondary = format_date(tick, secondary_format)?;
        let changed = previous_secondary.as_deref() != Some(secondary.as_str());
        labels.push(XAxisLabel {
            date: tick.clone(),
            x: x_of(tick),
            primary: format_date(tick, primary_format)?,
            secondary: changed.then(|| secondary.clone()),
        });
        previous_secondary = Some(secondary);
    }

    Ok(labels)
}

/// Labels for the gridlines at zero, the thirds and `y_max`.
#[must_use]
pub fn y_axis_labels(
    y_max: f64,
    y_scale: LinearScale,
    formatter: &dyn ValueFormatter,
) -> Vec<YAxisLabel> {
    y_grid_lines(y_max)
        .into_iter()
        .map(|value| YAxisLabel {
            value,
            y: y_scale.map(value),
            text: formatter.format_value(value),
        })
        .collect()
}
