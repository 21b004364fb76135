use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    BandScale, BarGeometry, ChartDate, ChartType, Color, ColorScale, DataRow, DateParser,
    DateSpace, FormatDateParser, LineGeometry, OrderedKey, TimeScale, band_date_spaces,
    date_band_scale, date_space_at, date_spaces, key_band_scale, key_color, line_data,
    ordered_keys, parse_rows, plot_size, project_bars, project_line_points, unique_dates,
    unique_keys, x_ticks, y_max_of_series, y_scale,
};
use crate::error::ChartResult;
use crate::interaction::{TooltipGeometry, TooltipPlacement, calculate_tooltip_position};

use super::{
    ChartConfig, TooltipContent, ValueFormatter, XAxisLabel, YAxisLabel, tooltip_content,
    x_axis_labels, y_axis_labels,
};

/// Injected strategies for one layout pass.
#[derive(Clone, Copy)]
pub struct LayoutStrategies<'a> {
    pub parser: &'a dyn DateParser,
    pub colors: &'a dyn ColorScale,
    pub y_format: &'a dyn ValueFormatter,
}

/// X mapping used for ticks and hover spans.
#[derive(Debug, Clone, Copy)]
enum XPlacement {
    Time(TimeScale),
    Bands(BandScale),
}

impl XPlacement {
    /// Pixel centre of `date`; `unique_dates` resolves band indices.
    fn center(self, date: &ChartDate, unique_dates: &[ChartDate]) -> f64 {
        match self {
            Self::Time(scale) => scale.date_to_pixel(date),
            Self::Bands(bands) => unique_dates
                .iter()
                .position(|candidate| candidate.same_instant(date))
                .and_then(|index| bands.position(index))
                .map_or(0.0, |left| left + bands.bandwidth() / 2.0),
        }
    }
}

/// Everything a renderer needs for one chart draw, in plot-area pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub chart_type: ChartType,
    pub plot_width: f64,
    pub plot_height: f64,
    pub ordered_keys: Vec<OrderedKey>,
    /// Key to color, in ordered-key order.
    pub colors: IndexMap<String, Color>,
    pub unique_dates: Vec<ChartDate>,
    pub x_ticks: Vec<ChartDate>,
    pub x_labels: Vec<XAxisLabel>,
    pub y_max: f64,
    pub y_labels: Vec<YAxisLabel>,
    pub date_spaces: Vec<DateSpace>,
    pub lines: Vec<LineGeometry>,
    pub bars: Vec<BarGeometry>,
}

impl ChartLayout {
    /// Lays out `rows` with the parser, colors and y format held by `config`.
    pub fn compute(rows: &[DataRow], config: &ChartConfig) -> ChartResult<Self> {
        let parser = FormatDateParser::new(config.date_format.clone());
        Self::compute_with(
            rows,
            config,
            LayoutStrategies {
                parser: &parser,
                colors: &config.colors,
                y_format: &config.y_format,
            },
        )
    }

    pub fn compute_with(
        rows: &[DataRow],
        config: &ChartConfig,
        strategies: LayoutStrategies<'_>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let (plot_width, plot_height) = plot_size(config.viewport, config.margin);
        if plot_width == 0.0 || plot_height == 0.0 {
            warn!(
                width = config.viewport.width,
                height = config.viewport.height,
                "margins leave no plot area"
            );
        }

        let parsed = parse_rows(rows, strategies.parser)?;
        let keys = unique_keys(&parsed);
        let ordered = ordered_keys(&parsed, &keys, &config.key_display);
        let lines = line_data(&parsed, &ordered);
        let dates = unique_dates(parsed.iter().map(|row| &row.date));
        trace!(rows = parsed.len(), keys = keys.len(), dates = dates.len(), "dataset prepared");

        let ticks = x_ticks(&dates, plot_width, config.mode, config.interval);

        let y_max = y_max_of_series(&lines);
        let y = y_scale(y_max, plot_height)?;

        let visible_keys = ordered.iter().filter(|key| key.visible).count();
        let (placement, line_geometry, bar_geometry) = match config.chart_type {
            ChartType::Line => {
                let scale = TimeScale::from_sorted_dates(&dates, plot_width)?;
                let geometry = scale
                    .map(|scale| project_line_points(&lines, scale, y))
                    .unwrap_or_default();
                (scale.map(XPlacement::Time), geometry, Vec::new())
            }
            ChartType::Bar => {
                let date_bands = date_band_scale(dates.len(), plot_width);
                let key_bands = key_band_scale(visible_keys, date_bands.bandwidth());
                let bars = project_bars(&dates, &lines, date_bands, key_bands, y, plot_height);
                (Some(XPlacement::Bands(date_bands)), Vec::new(), bars)
            }
        };

        let center = |date: &ChartDate| placement.map_or(0.0, |placement| placement.center(date, &dates));
        let spaces = match placement {
            Some(XPlacement::Bands(bands)) => band_date_spaces(&dates, &parsed, plot_width, bands),
            _ => date_spaces(&dates, &parsed, plot_width, center),
        };
        let x_labels = x_axis_labels(
            &ticks,
            center,
            &config.date_labels.x_format,
            &config.date_labels.x2_format,
        )?;
        let y_labels = y_axis_labels(y_max, y, strategies.y_format);

        let colors = ordered
            .iter()
            .filter_map(|key| {
                key_color(&key.key, &ordered, strategies.colors).map(|color| (key.key.clone(), color))
            })
            .collect();

        debug!(
            chart_type = ?config.chart_type,
            dates = dates.len(),
            ticks = ticks.len(),
            visible_keys,
            y_max,
            "chart layout computed"
        );

        Ok(Self {
            chart_type: config.chart_type,
            plot_width,
            plot_height,
            ordered_keys: ordered,
            colors,
            unique_dates: dates,
            x_ticks: ticks,
            x_labels,
            y_max,
            y_labels,
            date_spaces: spaces,
            lines: line_geometry,
            bars: bar_geometry,
        })
    }

    /// Date span under plot-area pixel `x`.
    #[must_use]
    pub fn hit_test(&self, x: f64) -> Option<&DateSpace> {
        date_space_at(&self.date_spaces, x)
    }

    /// Tooltip text for the span under `x`, using the config's formats.
    ///
    /// Row colors are the ones assigned during layout.
    pub fn tooltip_at(&self, x: f64, config: &ChartConfig) -> ChartResult<Option<TooltipContent>> {
        let Some(space) = self.hit_test(x) else {
            return Ok(None);
        };
        tooltip_content(
            space,
            &self.ordered_keys,
            &self.colors,
            &config.date_labels.tooltip_title_format,
            &config.tooltip_value_format,
        )
        .map(Some)
    }

    /// Tooltip offset for measured boxes, using the config's position mode.
    #[must_use]
    pub fn tooltip_placement(
        &self,
        geometry: TooltipGeometry,
        config: &ChartConfig,
    ) -> TooltipPlacement {
        calculate_tooltip_position(geometry, config.tooltip_position)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
