mod axis_labels;
mod config;
mod layout;
mod tooltip_content;
mod value_format;

pub use axis_labels::{XAxisLabel, YAxisLabel, x_axis_labels, y_axis_labels};
pub use config::{ChartConfig, DateLabelFormats};
pub use layout::{ChartLayout, LayoutStrategies};
pub use tooltip_content::{TooltipContent, TooltipRow, tooltip_content};
pub use value_format::{ValueFormat, ValueFormatter};
