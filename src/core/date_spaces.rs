use serde::{Deserialize, Serialize};

use crate::core::dates::ChartDate;
use crate::core::scale::BandScale;
use crate::core::series::ParsedRow;

/// One series value reachable from a hovered date span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSpaceValue {
    pub key: String,
    pub value: f64,
    pub date: ChartDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Half-open pixel interval `[start, start + width)` owned by one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSpace {
    pub date: ChartDate,
    pub start: f64,
    pub width: f64,
    pub values: Vec<DateSpaceValue>,
}

impl DateSpace {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x < self.end()
    }
}

/// Partitions the x axis into hover regions centred on each date.
///
/// Each span starts halfway back to its left neighbour and is as wide as
/// that gap. The first and last spans are halved so the partition ends on
/// the first and last date. A lone date owns the whole axis.
pub fn date_spaces<F>(
    unique_dates: &[ChartDate],
    rows: &[ParsedRow],
    total_width: f64,
    x_of: F,
) -> Vec<DateSpace>
where
    F: Fn(&ChartDate) -> f64,
{
    let total_width = finite_non_negative(total_width);
    let x_at = |index: usize| finite_or_zero(x_of(&unique_dates[index]));
    let last = unique_dates.len().saturating_sub(1);

    unique_dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let values = values_for(date, rows);
            if unique_dates.len() == 1 {
                return DateSpace {
                    date: date.clone(),
                    start: 0.0,
                    width: total_width,
                    values,
                };
            }

            let x_now = x_at(index);
            let x_prev = x_at(index.saturating_sub(1));
            let x_next = x_at((index + 1).min(last));

            let raw_width = if index == 0 {
                x_next - x_now
            } else {
                x_now - x_prev
            };
            let start = if index == 0 {
                0.0
            } else {
                x_now - raw_width / 2.0
            };
            let width = if index == 0 || index == last {
                raw_width / 2.0
            } else {
                raw_width
            };

            DateSpace {
                date: date.clone(),
                start,
                width,
                values,
            }
        })
        .collect()
}

/// Partitions the x axis of a bar chart along its date bands.
///
/// Span `i` runs from half the inner padding before band `i` to half the
/// padding after it, so neighbouring spans meet in the middle of each gap.
/// The first span starts at 0 and the last one ends at `total_width`.
pub fn band_date_spaces(
    unique_dates: &[ChartDate],
    rows: &[ParsedRow],
    total_width: f64,
    bands: BandScale,
) -> Vec<DateSpace> {
    let total_width = finite_non_negative(total_width);
    let half_gap = finite_or_zero((bands.step() - bands.bandwidth()) / 2.0);
    let last = unique_dates.len().saturating_sub(1);

    unique_dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let left = bands.position(index).map_or(0.0, finite_or_zero);
            let start = if index == 0 { 0.0 } else { left - half_gap };
            let end = if index == last {
                total_width
            } else {
                left + bands.step() - half_gap
            };
            DateSpace {
                date: date.clone(),
                start,
                width: (end - start).max(0.0),
                values: values_for(date, rows),
            }
        })
        .collect()
}

/// Span under pixel `x`. The right edge of the last span still hits it.
#[must_use]
pub fn date_space_at(spaces: &[DateSpace], x: f64) -> Option<&DateSpace> {
    if !x.is_finite() {
        return None;
    }
    spaces
        .iter()
        .find(|space| space.contains(x))
        .or_else(|| spaces.last().filter(|space| x == space.end()))
}

fn values_for(date: &ChartDate, rows: &[ParsedRow]) -> Vec<DateSpaceValue> {
    rows.iter()
        .filter(|row| row.date.same_instant(date))
        .flat_map(|row| {
            row.values.iter().map(|(key, value)| DateSpaceValue {
                key: key.clone(),
                value: value.value,
                date: date.clone(),
                label: value.label.clone(),
            })
        })
        .collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn finite_non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{band_date_spaces, date_space_at, date_spaces};
    use crate::core::dates::{ChartDate, FormatDateParser};
    use crate::core::scale::BandScale;
    use crate::core::series::{DataRow, SeriesValue, parse_rows};

    fn day(raw: &str) -> ChartDate {
        ChartDate::parse(raw, &FormatDateParser::new("%Y-%m-%d")).expect("date")
    }

    #[test]
    fn spans_partition_evenly_spaced_dates() {
        let dates = vec![day("2024-01-01"), day("2024-01-02"), day("2024-01-03"), day("2024-01-04")];
        let positions = [0.0, 100.0, 200.0, 300.0];
        let spaces = date_spaces(&dates, &[], 300.0, |date| {
            let index = dates.iter().position(|d| d == date).expect("known");
            positions[index]
        });

        let bounds: Vec<(f64, f64)> = spaces.iter().map(|s| (s.start, s.width)).collect();
        assert_eq!(bounds, vec![(0.0, 50.0), (50.0, 100.0), (150.0, 100.0), (250.0, 50.0)]);
        assert_abs_diff_eq!(spaces.last().expect("last").end(), 300.0);
    }

    #[test]
    fn lone_date_owns_the_axis() {
        let dates = vec![day("2024-01-01")];
        let spaces = date_spaces(&dates, &[], 420.0, |_| 210.0);
        assert_eq!(spaces.len(), 1);
        assert_eq!((spaces[0].start, spaces[0].width), (0.0, 420.0));
    }

    #[test]
    fn values_are_attached_by_parsed_date() {
        let rows = parse_rows(
            &[
                DataRow::new("2024-01-01").with_value("Cap", SeriesValue::new(4.0)),
                DataRow::new("2024-01-02")
                    .with_value("Cap", SeriesValue::new(5.0))
                    .with_value("Hoodie", SeriesValue::new(6.0)),
            ],
            &FormatDateParser::new("%Y-%m-%d"),
        )
        .expect("rows");
        let dates = vec![day("2024-01-01"), day("2024-01-02")];
        let spaces = date_spaces(&dates, &rows, 100.0, |date| {
            if date == &dates[0] { 0.0 } else { 100.0 }
        });

        assert_eq!(spaces[0].values.len(), 1);
        let keys: Vec<&str> = spaces[1].values.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["Cap", "Hoodie"]);
        assert_eq!(spaces[1].values[1].value, 6.0);
    }

    #[test]
    fn degenerate_inputs_fall_back_to_zero() {
        assert!(date_spaces(&[], &[], 100.0, |_| 0.0).is_empty());

        let dates = vec![day("2024-01-01")];
        let spaces = date_spaces(&dates, &[], f64::NAN, |_| f64::NAN);
        assert_eq!((spaces[0].start, spaces[0].width), (0.0, 0.0));

        let two = vec![day("2024-01-01"), day("2024-01-02")];
        let spaces = date_spaces(&two, &[], 100.0, |_| f64::INFINITY);
        assert!(spaces.iter().all(|s| s.start == 0.0 && s.width == 0.0));
    }

    #[test]
    fn hit_testing_finds_the_owning_span() {
        let dates = vec![day("2024-01-01"), day("2024-01-02"), day("2024-01-03")];
        let spaces = date_spaces(&dates, &[], 200.0, |date| {
            dates.iter().position(|d| d == date).expect("known") as f64 * 100.0
        });

        assert_eq!(date_space_at(&spaces, 10.0).expect("hit").date, dates[0]);
        assert_eq!(date_space_at(&spaces, 50.0).expect("hit").date, dates[1]);
        assert_eq!(date_space_at(&spaces, 200.0).expect("hit").date, dates[2]);
        assert!(date_space_at(&spaces, 250.0).is_none());
    }

    #[test]
    fn band_spans_cover_the_whole_bar_axis() {
        let dates = vec![day("2024-01-01"), day("2024-01-02"), day("2024-01-03")];
        // step 68, bandwidth 61, first band at 1.
        let bands = BandScale::new(3, 0.0, 200.0, 0.1, 0.0, true);
        let spaces = band_date_spaces(&dates, &[], 200.0, bands);

        let bounds: Vec<(f64, f64)> = spaces.iter().map(|s| (s.start, s.end())).collect();
        assert_eq!(bounds, vec![(0.0, 65.5), (65.5, 133.5), (133.5, 200.0)]);
        assert_eq!(date_space_at(&spaces, 199.0).expect("hit").date, dates[2]);
    }

    #[test]
    fn lone_band_owns_the_axis() {
        let dates = vec![day("2024-01-01")];
        let bands = BandScale::new(1, 0.0, 120.0, 0.1, 0.0, true);
        let spaces = band_date_spaces(&dates, &[], 120.0, bands);
        assert_eq!((spaces[0].start, spaces[0].width), (0.0, 120.0));
    }
}
