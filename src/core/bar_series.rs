use serde::{Deserialize, Serialize};

use crate::core::dates::ChartDate;
use crate::core::scale::{BandScale, LinearScale};
use crate::core::series::LineSeries;

/// Inner padding between date groups of a bar chart.
pub const DATE_BAND_PADDING_INNER: f64 = 0.1;
/// Padding between and around the bars of one date group.
pub const KEY_BAND_PADDING: f64 = 0.07;

/// One bar rectangle in plot-area pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub date: ChartDate,
    pub key: String,
    pub focus: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

/// One band per unique date across the plot width.
#[must_use]
pub fn date_band_scale(date_count: usize, width: f64) -> BandScale {
    BandScale::new(date_count, 0.0, width.max(0.0), DATE_BAND_PADDING_INNER, 0.0, true)
}

/// One band per visible key inside a date band.
#[must_use]
pub fn key_band_scale(visible_keys: usize, date_bandwidth: f64) -> BandScale {
    BandScale::new(
        visible_keys,
        0.0,
        date_bandwidth.max(0.0),
        KEY_BAND_PADDING,
        KEY_BAND_PADDING,
        true,
    )
}

/// Lays out grouped bars: one group per date, one bar per visible series.
///
/// Bars grow up from the baseline at `plot_height`. A series without a row
/// for a date gets no bar there.
#[must_use]
pub fn project_bars(
    unique_dates: &[ChartDate],
    lines: &[LineSeries],
    date_bands: BandScale,
    key_bands: BandScale,
    y_scale: LinearScale,
    plot_height: f64,
) -> Vec<BarGeometry> {
    let visible: Vec<&LineSeries> = lines.iter().filter(|line| line.visible).collect();
    let mut bars = Vec::with_capacity(unique_dates.len() * visible.len());

    for (date_index, date) in unique_dates.iter().enumerate() {
        let Some(group_x) = date_bands.position(date_index) else {
            continue;
        };
        for (key_index, line) in visible.iter().enumerate() {
            let Some(offset) = key_bands.position(key_index) else {
                continue;
            };
            let Some(point) = line.values.iter().find(|point| point.date.same_instant(date)) else {
                continue;
            };
            let y = y_scale.map(point.value);
            bars.push(BarGeometry {
                date: date.clone(),
                key: line.key.clone(),
                focus: line.focus,
                x: group_x + offset,
                y,
                width: key_bands.bandwidth(),
                height: (plot_height - y).max(0.0),
                value: point.value,
            });
        }
    }

    bars
}
