use serde::{Deserialize, Serialize};

use crate::core::{
    ChartMode, ChartType, DEFAULT_DATE_FORMAT, Interval, KeyDisplay, LinearGradient, Margin,
    Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipPosition;

use super::ValueFormat;

/// `strftime` patterns used for x tick labels and the tooltip title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateLabelFormats {
    #[serde(default = "default_x_format")]
    pub x_format: String,
    #[serde(default = "default_x2_format")]
    pub x2_format: String,
    #[serde(default = "default_tooltip_title_format")]
    pub tooltip_title_format: String,
}

impl Default for DateLabelFormats {
    fn default() -> Self {
        Self {
            x_format: default_x_format(),
            x2_format: default_x2_format(),
            tooltip_title_format: default_tooltip_title_format(),
        }
    }
}

/// Serializable chart setup.
///
/// Hosts can persist this next to their dashboards and reload it without
/// inventing an ad-hoc format; every field except the viewport has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margin: Margin,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub mode: ChartMode,
    #[serde(default)]
    pub interval: Interval,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub date_labels: DateLabelFormats,
    #[serde(default = "default_y_format")]
    pub y_format: ValueFormat,
    #[serde(default)]
    pub tooltip_value_format: ValueFormat,
    #[serde(default)]
    pub tooltip_position: TooltipPosition,
    #[serde(default)]
    pub colors: LinearGradient,
    #[serde(default)]
    pub key_display: KeyDisplay,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin: Margin::default(),
            chart_type: ChartType::default(),
            mode: ChartMode::default(),
            interval: Interval::default(),
            date_format: default_date_format(),
            date_labels: DateLabelFormats::default(),
            y_format: default_y_format(),
            tooltip_value_format: ValueFormat::default(),
            tooltip_position: TooltipPosition::default(),
            colors: LinearGradient::default(),
            key_display: KeyDisplay::default(),
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_date_labels(mut self, labels: DateLabelFormats) -> Self {
        self.date_labels = labels;
        self
    }

    #[must_use]
    pub fn with_y_format(mut self, format: ValueFormat) -> Self {
        self.y_format = format;
        self
    }

    #[must_use]
    pub fn with_tooltip_value_format(mut self, format: ValueFormat) -> Self {
        self.tooltip_value_format = format;
        self
    }

    #[must_use]
    pub fn with_tooltip_position(mut self, position: TooltipPosition) -> Self {
        self.tooltip_position = position;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: LinearGradient) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_key_display(mut self, display: KeyDisplay) -> Self {
        self.key_display = display;
        self
    }

    /// Rejects geometry that cannot be laid out at all.
    ///
    /// Zero sizes are accepted and simply produce an empty plot area.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.margin.is_valid() {
            return Err(ChartError::InvalidData(
                "margins must be finite and >= 0".to_owned(),
            ));
        }
        if self.date_format.is_empty() {
            return Err(ChartError::InvalidData(
                "date format must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_owned()
}

fn default_x_format() -> String {
    "%d".to_owned()
}

fn default_x2_format() -> String {
    "%b %Y".to_owned()
}

fn default_tooltip_title_format() -> String {
    "%B %d, %Y".to_owned()
}

fn default_y_format() -> ValueFormat {
    ValueFormat::compact(1)
}
