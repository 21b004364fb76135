use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::core::dates::{ChartDate, DateParser};
use crate::error::ChartResult;

/// One category measurement inside a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesValue {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SeriesValue {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    #[must_use]
    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// Input row as supplied by the host: `{ "date": "...", "<key>": { "value": .. }, .. }`.
///
/// `IndexMap` keeps category order as written so key discovery is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub date: String,
    #[serde(flatten)]
    pub values: IndexMap<String, SeriesValue>,
}

impl DataRow {
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: SeriesValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Parses a JSON array of rows.
    pub fn list_from_json_str(json: &str) -> ChartResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Row whose date has been resolved through a [`DateParser`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRow {
    pub date: ChartDate,
    pub values: IndexMap<String, SeriesValue>,
}

pub fn parse_rows(rows: &[DataRow], parser: &dyn DateParser) -> ChartResult<Vec<ParsedRow>> {
    rows.iter()
        .map(|row| {
            Ok(ParsedRow {
                date: ChartDate::parse(&row.date, parser)?,
                values: row.values.clone(),
            })
        })
        .collect()
}

/// Category ranked by cumulative value, with its display flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedKey {
    pub key: String,
    pub total: f64,
    pub visible: bool,
    pub focus: bool,
}

/// Legend state applied while ranking keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyDisplay {
    #[serde(default)]
    pub hidden: Vec<String>,
    #[serde(default)]
    pub focused: Option<String>,
}

impl KeyDisplay {
    fn is_visible(&self, key: &str) -> bool {
        !self.hidden.iter().any(|hidden| hidden == key)
    }

    fn is_focused(&self, key: &str) -> bool {
        self.focused.as_deref().is_none_or(|focused| focused == key)
    }
}

/// Distinct category names in first-seen order.
#[must_use]
pub fn unique_keys(rows: &[ParsedRow]) -> Vec<String> {
    let mut keys: IndexSet<&str> = IndexSet::new();
    for row in rows {
        keys.extend(row.values.keys().map(String::as_str));
    }
    keys.into_iter().map(str::to_owned).collect()
}

/// Ranks keys by descending total. Ties keep first-seen order.
#[must_use]
pub fn ordered_keys(rows: &[ParsedRow], keys: &[String], display: &KeyDisplay) -> Vec<OrderedKey> {
    let mut ordered: Vec<OrderedKey> = keys
        .iter()
        .map(|key| {
            let total = rows
                .iter()
                .filter_map(|row| row.values.get(key))
                .map(|value| value.value)
                .filter(|value| value.is_finite())
                .sum();
            OrderedKey {
                key: key.clone(),
                total,
                visible: display.is_visible(key),
                focus: display.is_focused(key),
            }
        })
        .collect();

    ordered.sort_by(|left, right| right.total.total_cmp(&left.total));
    ordered
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub date: ChartDate,
    pub value: f64,
    pub label: String,
}

/// Per-key value series in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub key: String,
    pub visible: bool,
    pub focus: bool,
    pub values: Vec<LinePoint>,
}

/// Builds one series per ordered key. Rows missing a key contribute `0`.
#[must_use]
pub fn line_data(rows: &[ParsedRow], ordered_keys: &[OrderedKey]) -> Vec<LineSeries> {
    ordered_keys
        .iter()
        .map(|ordered| LineSeries {
            key: ordered.key.clone(),
            visible: ordered.visible,
            focus: ordered.focus,
            values: rows
                .iter()
                .map(|row| {
                    let entry = row.values.get(&ordered.key);
                    LinePoint {
                        date: row.date.clone(),
                        value: entry.map_or(0.0, |entry| entry.value),
                        label: entry
                            .and_then(|entry| entry.label.clone())
                            .unwrap_or_default(),
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DataRow, KeyDisplay, SeriesValue, line_data, ordered_keys, parse_rows, unique_keys};
    use crate::core::dates::FormatDateParser;

    fn rows() -> Vec<DataRow> {
        vec![
            DataRow::new("2024-01-01")
                .with_value("Hoodie", SeriesValue::new(3.0))
                .with_value("Cap", SeriesValue::new(10.0)),
            DataRow::new("2024-01-02")
                .with_value("Cap", SeriesValue::labeled(1.0, "Cap (blue)"))
                .with_value("Beanie", SeriesValue::new(12.0)),
        ]
    }

    #[test]
    fn rows_deserialize_from_host_json() {
        let json = r#"[
            {"date": "2024-01-01", "Cap": {"value": 10}, "Hoodie": {"value": 3.5, "label": "H"}}
        ]"#;
        let rows = DataRow::list_from_json_str(json).expect("rows");
        assert_eq!(rows[0].values.len(), 2);
        assert_eq!(rows[0].values["Hoodie"].label.as_deref(), Some("H"));
        let keys: Vec<&String> = rows[0].values.keys().collect();
        assert_eq!(keys, vec!["Cap", "Hoodie"]);
    }

    #[test]
    fn keys_are_ranked_by_total() {
        let parsed = parse_rows(&rows(), &FormatDateParser::new("%Y-%m-%d")).expect("parse");
        let keys = unique_keys(&parsed);
        assert_eq!(keys, vec!["Hoodie", "Cap", "Beanie"]);

        let ordered = ordered_keys(&parsed, &keys, &KeyDisplay::default());
        let names: Vec<&str> = ordered.iter().map(|key| key.key.as_str()).collect();
        assert_eq!(names, vec!["Beanie", "Cap", "Hoodie"]);
        assert_eq!(ordered[1].total, 11.0);
        assert!(ordered.iter().all(|key| key.visible && key.focus));
    }

    #[test]
    fn display_flags_follow_legend_state() {
        let parsed = parse_rows(&rows(), &FormatDateParser::new("%Y-%m-%d")).expect("parse");
        let keys = unique_keys(&parsed);
        let display = KeyDisplay {
            hidden: vec!["Cap".to_owned()],
            focused: Some("Beanie".to_owned()),
        };

        let ordered = ordered_keys(&parsed, &keys, &display);
        let cap = ordered.iter().find(|key| key.key == "Cap").expect("cap");
        let beanie = ordered.iter().find(|key| key.key == "Beanie").expect("beanie");
        assert!(!cap.visible);
        assert!(!cap.focus);
        assert!(beanie.visible && beanie.focus);
    }

    #[test]
    fn line_data_fills_missing_values_with_zero() {
        let parsed = parse_rows(&rows(), &FormatDateParser::new("%Y-%m-%d")).expect("parse");
        let keys = unique_keys(&parsed);
        let ordered = ordered_keys(&parsed, &keys, &KeyDisplay::default());
        let lines = line_data(&parsed, &ordered);

        let hoodie = lines.iter().find(|line| line.key == "Hoodie").expect("hoodie");
        let values: Vec<f64> = hoodie.values.iter().map(|point| point.value).collect();
        assert_eq!(values, vec![3.0, 0.0]);

        let cap = lines.iter().find(|line| line.key == "Cap").expect("cap");
        assert_eq!(cap.values[1].label, "Cap (blue)");
        assert_eq!(cap.values[0].label, "");
    }
}
