use serde::{Deserialize, Serialize};

use crate::core::dates::ChartDate;
use crate::core::scale::LinearScale;
use crate::error::ChartResult;

/// Continuous x axis over parsed dates, mapped onto `[0, width]` in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: &ChartDate, end: &ChartDate, width: f64) -> ChartResult<Self> {
        let linear = LinearScale::new(start.unix_seconds(), end.unix_seconds())?
            .with_range(0.0, width.max(0.0))?
            .rounded(true);
        Ok(Self { linear })
    }

    /// Spans the first and last of chronologically sorted `dates`.
    ///
    /// Returns `None` when there are no dates to span.
    pub fn from_sorted_dates(dates: &[ChartDate], width: f64) -> ChartResult<Option<Self>> {
        match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => Self::new(first, last, width).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn date_to_pixel(self, date: &ChartDate) -> f64 {
        self.linear.map(date.unix_seconds())
    }

    /// Unix seconds at a pixel offset.
    #[must_use]
    pub fn pixel_to_seconds(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.linear.range().1
    }
}
