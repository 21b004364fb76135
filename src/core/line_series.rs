use serde::{Deserialize, Serialize};

use crate::core::dates::ChartDate;
use crate::core::scale::LinearScale;
use crate::core::series::LineSeries;
use crate::core::time_scale::TimeScale;

/// Projected data point in plot-area pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePointGeometry {
    pub date: ChartDate,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub key: String,
    pub focus: bool,
    pub points: Vec<LinePointGeometry>,
}

/// Projects every visible series into plot-area pixels.
///
/// Points keep row order; hidden series are skipped entirely.
#[must_use]
pub fn project_line_points(
    lines: &[LineSeries],
    x_scale: TimeScale,
    y_scale: LinearScale,
) -> Vec<LineGeometry> {
    lines
        .iter()
        .filter(|line| line.visible)
        .map(|line| LineGeometry {
            key: line.key.clone(),
            focus: line.focus,
            points: line
                .values
                .iter()
                .map(|point| LinePointGeometry {
                    date: point.date.clone(),
                    x: x_scale.date_to_pixel(&point.date),
                    y: y_scale.map(point.value),
                    value: point.value,
                })
                .collect(),
        })
        .collect()
}
