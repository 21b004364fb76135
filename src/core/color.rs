use serde::{Deserialize, Serialize};

use crate::core::series::OrderedKey;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ChartError::InvalidData(format!("invalid hex color `{hex}`"));
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |offset: usize| {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb`, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |from: f64, to: f64| from + (to - from) * t;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }
}

/// Continuous color scheme sampled over `[0, 1]`.
pub trait ColorScale {
    fn color_at(&self, t: f64) -> Color;
}

impl<F> ColorScale for F
where
    F: Fn(f64) -> Color,
{
    fn color_at(&self, t: f64) -> Color {
        self(t)
    }
}

/// Two-stop scheme; the default runs from a deep blue to a light cyan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub from: Color,
    pub to: Color,
}

impl Default for LinearGradient {
    fn default() -> Self {
        Self {
            from: Color::rgb(0.0, 0.294, 0.608),
            to: Color::rgb(0.588, 0.882, 0.973),
        }
    }
}

impl ColorScale for LinearGradient {
    fn color_at(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        self.from.lerp(self.to, t)
    }
}

/// Samples `scale` at the key's rank: `index / (n - 1)`.
///
/// With a single key the divisor is 1, so it gets `scale(0)`.
#[must_use]
pub fn key_color(key: &str, ordered_keys: &[OrderedKey], scale: &dyn ColorScale) -> Option<Color> {
    let index = ordered_keys.iter().position(|ordered| ordered.key == key)?;
    let divisor = ordered_keys.len().saturating_sub(1).max(1);
    Some(scale.color_at(index as f64 / divisor as f64))
}

#[cfg(test)]
mod tests {
    use super::{Color, ColorScale, LinearGradient, key_color};
    use crate::core::series::OrderedKey;

    fn keys(names: &[&str]) -> Vec<OrderedKey> {
        names
            .iter()
            .map(|name| OrderedKey {
                key: (*name).to_owned(),
                total: 0.0,
                visible: true,
                focus: true,
            })
            .collect()
    }

    #[test]
    fn hex_round_trip() {
        let color = Color::from_hex("#ff8000").expect("hex");
        assert_eq!(color.red, 1.0);
        assert_eq!(color.to_hex(), "#ff8000");
        assert!(Color::from_hex("#ff80").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
    }

    #[test]
    fn keys_sample_the_scale_by_rank() {
        let ordered = keys(&["a", "b", "c"]);
        let scale = |t: f64| Color::rgb(t, 0.0, 0.0);
        let reds: Vec<f64> = ["a", "b", "c"]
            .iter()
            .map(|key| key_color(key, &ordered, &scale).expect("known").red)
            .collect();
        assert_eq!(reds, vec![0.0, 0.5, 1.0]);
        assert!(key_color("missing", &ordered, &scale).is_none());
    }

    #[test]
    fn single_key_takes_scale_start() {
        let gradient = LinearGradient::default();
        let color = key_color("only", &keys(&["only"]), &gradient).expect("known");
        assert_eq!(color, gradient.color_at(0.0));
    }
}
