use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Color, DateSpace, OrderedKey, format_date};
use crate::error::ChartResult;

use super::ValueFormatter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipRow {
    pub key: String,
    /// Row label when the data carries one, otherwise the key.
    pub label: String,
    pub value: f64,
    pub text: String,
    pub color: Color,
    pub focus: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

/// Builds the tooltip for a hovered date span.
///
/// Rows follow the ordered keys and skip hidden series; keys with no value
/// on that date, or no entry in `colors`, are left out.
pub fn tooltip_content(
    space: &DateSpace,
    ordered_keys: &[OrderedKey],
    colors: &IndexMap<String, Color>,
    title_format: &str,
    formatter: &dyn ValueFormatter,
) -> ChartResult<TooltipContent> {
    let rows = ordered_keys
        .iter()
        .filter(|ordered| ordered.visible)
        .filter_map(|ordered| {
            let entry = space.values.iter().find(|value| value.key == ordered.key)?;
            let color = *colors.get(&ordered.key)?;
            Some(TooltipRow {
                key: ordered.key.clone(),
                label: entry
                    .label
                    .clone()
                    .filter(|label| !label.is_empty())
                    .unwrap_or_else(|| ordered.key.clone()),
                value: entry.value,
                text: formatter.format_value(entry.value),
                color,
                focus: ordered.focus,
            })
        })
        .collect();

    Ok(TooltipContent {
        title: format_date(&space.date, title_format)?,
        rows,
    })
}
