use serde::{Deserialize, Serialize};

/// Turns a series value into display text for axes and tooltips.
pub trait ValueFormatter {
    fn format_value(&self, value: f64) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String,
{
    fn format_value(&self, value: f64) -> String {
        self(value)
    }
}

const COMPACT_UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];

/// Serializable number format for axis and tooltip values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFormat {
    #[serde(default)]
    pub precision: u8,
    /// Inserts `,` between thousands.
    #[serde(default = "default_grouping")]
    pub grouping: bool,
    /// Abbreviates with `k`, `M`, `G` and `T`; trailing fraction zeros are dropped.
    #[serde(default)]
    pub compact: bool,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

fn default_grouping() -> bool {
    true
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self {
            precision: 0,
            grouping: default_grouping(),
            compact: false,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl ValueFormat {
    /// Short labels for the y axis, e.g. `1.5k`.
    #[must_use]
    pub fn compact(precision: u8) -> Self {
        Self {
            precision,
            grouping: false,
            compact: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl ValueFormatter for ValueFormat {
    fn format_value(&self, value: f64) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }

        let precision = usize::from(self.precision);
        let magnitude = value.abs();
        let (mut digits, unit) = if self.compact {
            compact_digits(magnitude, precision)
        } else {
            (format!("{magnitude:.precision$}"), "")
        };

        if self.compact && digits.contains('.') {
            digits = digits.trim_end_matches('0').trim_end_matches('.').to_owned();
        }
        if self.grouping {
            digits = group_thousands(&digits);
        }

        let negative = value < 0.0 && digits.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{digits}{unit}{}", self.prefix, self.suffix)
    }
}

/// Scales `magnitude` into its compact unit and rounds it.
///
/// Rounding can carry into the next unit (`999.96k` -> `1000.0k`); the value
/// is then rescaled by that larger unit.
fn compact_digits(magnitude: f64, precision: usize) -> (String, &'static str) {
    let mut unit = COMPACT_UNITS
        .iter()
        .position(|(threshold, _)| magnitude >= *threshold);
    loop {
        let (scaled, suffix) = unit.map_or((magnitude, ""), |index| {
            let (threshold, suffix) = COMPACT_UNITS[index];
            (magnitude / threshold, suffix)
        });
        let digits = format!("{scaled:.precision$}");
        let carried = digits.parse::<f64>().is_ok_and(|rounded| rounded >= 1000.0);
        let larger = match unit {
            None => Some(COMPACT_UNITS.len() - 1),
            Some(0) => None,
            Some(index) => Some(index - 1),
        };
        match larger {
            Some(next) if carried => unit = Some(next),
            _ => return (digits, suffix),
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 1);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
