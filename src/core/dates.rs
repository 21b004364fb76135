use std::collections::HashSet;
use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default serialized date layout of incoming rows.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Strategy used to turn serialized row dates into comparable timestamps.
///
/// Every date comparison in the crate goes through a parser so locale or
/// zero-padding differences in the raw strings never affect ordering.
pub trait DateParser {
    fn parse(&self, raw: &str) -> ChartResult<NaiveDateTime>;
}

impl<F> DateParser for F
where
    F: Fn(&str) -> ChartResult<NaiveDateTime>,
{
    fn parse(&self, raw: &str) -> ChartResult<NaiveDateTime> {
        self(raw)
    }
}

/// `strftime`-style parser. Date-only formats resolve to midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDateParser {
    format: String,
}

impl FormatDateParser {
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for FormatDateParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DateParser for FormatDateParser {
    fn parse(&self, raw: &str) -> ChartResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, &self.format)
            .or_else(|_| {
                NaiveDate::parse_from_str(raw, &self.format)
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .map_err(|_| ChartError::DateParse {
                raw: raw.to_owned(),
                format: self.format.clone(),
            })
    }
}

/// A row date: the caller's raw string paired with its parsed timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDate {
    pub raw: String,
    pub time: NaiveDateTime,
}

impl ChartDate {
    pub fn parse(raw: &str, parser: &dyn DateParser) -> ChartResult<Self> {
        Ok(Self {
            raw: raw.to_owned(),
            time: parser.parse(raw)?,
        })
    }

    #[must_use]
    pub fn new(raw: impl Into<String>, time: NaiveDateTime) -> Self {
        Self {
            raw: raw.into(),
            time,
        }
    }

    /// Seconds since the unix epoch, treating the naive time as UTC.
    #[must_use]
    pub fn unix_seconds(&self) -> f64 {
        self.time.and_utc().timestamp_millis() as f64 / 1000.0
    }

    #[must_use]
    pub fn same_instant(&self, other: &Self) -> bool {
        self.time == other.time
    }

    #[must_use]
    pub fn same_month(&self, other: &Self) -> bool {
        self.time.year() == other.time.year() && self.time.month() == other.time.month()
    }
}

/// Formats a parsed date with a `strftime` pattern.
///
/// Invalid patterns are reported as data errors instead of panicking.
pub fn format_date(date: &ChartDate, pattern: &str) -> ChartResult<String> {
    let mut out = String::new();
    write!(out, "{}", date.time.format(pattern)).map_err(|_| {
        ChartError::InvalidData(format!("invalid date format pattern `{pattern}`"))
    })?;
    Ok(out)
}

/// Deduplicates dates by parsed instant and sorts them chronologically.
///
/// The first raw spelling seen for an instant is kept.
#[must_use]
pub fn unique_dates<'a>(dates: impl IntoIterator<Item = &'a ChartDate>) -> Vec<ChartDate> {
    let mut seen = HashSet::new();
    let mut unique: Vec<ChartDate> = Vec::new();
    for date in dates {
        if seen.insert(date.time) {
            unique.push(date.clone());
        }
    }
    unique.sort_by_key(|date| date.time);
    unique
}

#[cfg(test)]
mod tests {
    use super::{ChartDate, DateParser, FormatDateParser, format_date, unique_dates};
    use crate::error::ChartError;

    fn day(raw: &str) -> ChartDate {
        ChartDate::parse(raw, &FormatDateParser::new("%Y-%m-%d")).expect("valid date")
    }

    #[test]
    fn date_only_format_resolves_to_midnight() {
        let parsed = FormatDateParser::new("%Y-%m-%d")
            .parse("2024-03-05")
            .expect("parse");
        assert_eq!(parsed.to_string(), "2024-03-05 00:00:00");
    }

    #[test]
    fn unparsable_date_reports_raw_and_format() {
        let error = FormatDateParser::default()
            .parse("yesterday")
            .expect_err("must fail");
        assert!(matches!(error, ChartError::DateParse { ref raw, .. } if raw == "yesterday"));
    }

    #[test]
    fn closures_are_parsers() {
        let parser = |raw: &str| FormatDateParser::new("%d/%m/%Y").parse(raw);
        let date = ChartDate::parse("05/03/2024", &parser).expect("parse");
        assert_eq!(date.time.to_string(), "2024-03-05 00:00:00");
    }

    #[test]
    fn unique_dates_sort_chronologically_not_lexically() {
        let parser = FormatDateParser::new("%d/%m/%Y");
        let raw = ["10/01/2024", "02/02/2024", "10/01/2024", "01/01/2024"];
        let dates: Vec<ChartDate> = raw
            .iter()
            .map(|raw| ChartDate::parse(raw, &parser).expect("parse"))
            .collect();

        let unique = unique_dates(&dates);
        let ordered: Vec<&str> = unique.iter().map(|date| date.raw.as_str()).collect();
        assert_eq!(ordered, vec!["01/01/2024", "10/01/2024", "02/02/2024"]);
    }

    #[test]
    fn format_date_rejects_broken_pattern() {
        assert_eq!(format_date(&day("2024-07-01"), "%b %Y").expect("format"), "Jul 2024");
        assert!(format_date(&day("2024-07-01"), "%Q").is_err());
    }
}
