use crate::core::dates::ChartDate;
use crate::core::factors::factors;
use crate::core::types::{ChartMode, Interval};

pub const SMALL_BREAK_PX: f64 = 783.0;
pub const MEDIUM_BREAK_PX: f64 = 1130.0;
pub const WIDE_BREAK_PX: f64 = 1365.0;

const SMALL_POINTS: usize = 7;
const MEDIUM_POINTS: usize = 12;
const LARGE_POINTS: usize = 16;
const MOST_POINTS: usize = 31;

/// Daily series at least this long are labelled once per month.
pub const DAY_TICKS_THRESHOLD: usize = 63;
/// Weekly series at least this long are labelled once per month.
pub const WEEK_TICKS_THRESHOLD: usize = 9;

/// Tick budget for a chart of `width` pixels.
///
/// Time comparisons get the larger budget on wide charts since their labels
/// are shorter and denser data is expected.
#[must_use]
pub fn max_x_ticks(width: f64, mode: ChartMode) -> usize {
    if width.is_nan() || width < SMALL_BREAK_PX {
        return SMALL_POINTS;
    }
    if width <= MEDIUM_BREAK_PX {
        return MEDIUM_POINTS;
    }
    if width <= WIDE_BREAK_PX {
        return match mode {
            ChartMode::TimeComparison => LARGE_POINTS,
            ChartMode::ItemComparison => MEDIUM_POINTS,
        };
    }
    match mode {
        ChartMode::TimeComparison => MOST_POINTS,
        ChartMode::ItemComparison => LARGE_POINTS,
    }
}

/// Keeps the first date and every date that starts a new calendar month.
#[must_use]
pub fn first_date_per_month(dates: &[ChartDate]) -> Vec<ChartDate> {
    let mut kept: Vec<ChartDate> = Vec::new();
    for date in dates {
        let starts_month = kept.last().is_none_or(|last| !last.same_month(date));
        if starts_month {
            kept.push(date.clone());
        }
    }
    kept
}

/// Smallest stride that keeps `count` dates under `max_ticks`.
///
/// Prime or near-prime counts only divide by 1 and themselves, so the
/// divisors are taken from the first smaller count with more than three.
#[must_use]
pub fn x_ticks_increment_factor(count: usize, max_ticks: usize) -> usize {
    let mut offset = 1;
    let mut divisors = factors(count.saturating_sub(offset));
    while divisors.len() <= 3 && offset < count {
        offset += 1;
        divisors = factors(count - offset);
    }

    divisors
        .iter()
        .copied()
        .find(|factor| (count as f64) / (*factor as f64) < max_ticks as f64)
        .unwrap_or(count.max(1))
}

/// Selects the x-axis tick dates for sorted `unique_dates`.
#[must_use]
pub fn x_ticks(
    unique_dates: &[ChartDate],
    width: f64,
    mode: ChartMode,
    interval: Interval,
) -> Vec<ChartDate> {
    let max_ticks = max_x_ticks(width, mode);
    let collapse = match interval {
        Interval::Day => unique_dates.len() >= DAY_TICKS_THRESHOLD,
        Interval::Week => unique_dates.len() >= WEEK_TICKS_THRESHOLD,
        _ => false,
    };
    let dates = if collapse {
        first_date_per_month(unique_dates)
    } else {
        unique_dates.to_vec()
    };

    if dates.len() <= max_ticks {
        return dates;
    }

    let factor = x_ticks_increment_factor(dates.len(), max_ticks);
    let mut ticks: Vec<ChartDate> = dates.iter().step_by(factor).cloned().collect();
    if ticks.first() != dates.first() {
        ticks.insert(0, dates[0].clone());
    }
    ticks
}
