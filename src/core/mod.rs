pub mod bar_series;
pub mod color;
pub mod date_spaces;
pub mod dates;
pub mod factors;
pub mod line_series;
pub mod scale;
pub mod series;
pub mod time_scale;
pub mod types;
pub mod x_ticks;
pub mod y_scale;

pub use bar_series::{BarGeometry, date_band_scale, key_band_scale, project_bars};
pub use color::{Color, ColorScale, LinearGradient, key_color};
pub use date_spaces::{
    DateSpace, DateSpaceValue, band_date_spaces, date_space_at, date_spaces,
};
pub use dates::{
    ChartDate, DEFAULT_DATE_FORMAT, DateParser, FormatDateParser, format_date, unique_dates,
};
pub use factors::{Factors, factors};
pub use line_series::{LineGeometry, LinePointGeometry, project_line_points};
pub use scale::{BandScale, LinearScale};
pub use series::{
    DataRow, KeyDisplay, LinePoint, LineSeries, OrderedKey, ParsedRow, SeriesValue, line_data,
    ordered_keys, parse_rows, unique_keys,
};
pub use time_scale::TimeScale;
pub use types::{ChartMode, ChartType, Interval, Margin, Rect, Viewport, plot_size};
pub use x_ticks::{first_date_per_month, max_x_ticks, x_ticks, x_ticks_increment_factor};
pub use y_scale::{
    FALLBACK_Y_MAX, max_visible_value, y_grid_lines, y_max, y_max_of_series, y_max_step, y_scale,
};
