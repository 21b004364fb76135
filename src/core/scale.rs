use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Rounds half toward positive infinity, matching browser pixel snapping.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Continuous domain-to-range mapping.
///
/// A zero-span domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    round: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
            round: false,
        })
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    /// Snaps mapped values to whole pixels.
    #[must_use]
    pub fn rounded(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        let mapped = self.range_start + normalized * (self.range_end - self.range_start);
        if self.round {
            round_half_up(mapped)
        } else {
            mapped
        }
    }

    /// Maps a range value back into the domain. Rounding is not undone.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return (self.domain_start + self.domain_end) / 2.0;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Ordinal scale splitting a range into equal bands, one per domain index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Lays out `count` bands over `[range_start, range_end]`.
    ///
    /// Inner padding is a fraction of the step left between bands, outer
    /// padding a fraction of the step left before the first and after the
    /// last band. Leftover space is split evenly on both sides.
    #[must_use]
    pub fn new(
        count: usize,
        range_start: f64,
        range_end: f64,
        padding_inner: f64,
        padding_outer: f64,
        round: bool,
    ) -> Self {
        let padding_inner = sanitize_padding(padding_inner);
        let padding_outer = sanitize_padding(padding_outer);
        let (range_start, range_end) = if range_start <= range_end {
            (range_start, range_end)
        } else {
            (range_end, range_start)
        };
        let extent = range_end - range_start;
        let n = count as f64;

        let mut step = extent / (n - padding_inner + padding_outer * 2.0).max(1.0);
        if round {
            step = step.floor();
        }
        let mut start = range_start + (extent - step * (n - padding_inner)) * 0.5;
        let mut bandwidth = step * (1.0 - padding_inner);
        if round {
            start = round_half_up(start);
            bandwidth = round_half_up(bandwidth);
        }

        Self {
            count,
            start,
            step,
            bandwidth,
        }
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn step(self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    /// Left edge of band `index`, or `None` outside the domain.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.start + self.step * index as f64)
    }
}

fn sanitize_padding(padding: f64) -> f64 {
    if padding.is_finite() {
        padding.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
