mod tooltip;

pub use tooltip::{
    TOOLTIP_MARGIN_PX, TooltipGeometry, TooltipPlacement, TooltipPosition,
    calculate_tooltip_position,
};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::KeyDisplay;

/// Legend interaction state: which series are hidden and which one is hovered.
///
/// Feeds [`KeyDisplay`] into the next layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendState {
    display: KeyDisplay,
}

impl LegendState {
    #[must_use]
    pub fn new(display: KeyDisplay) -> Self {
        Self { display }
    }

    #[must_use]
    pub fn display(&self) -> &KeyDisplay {
        &self.display
    }

    #[must_use]
    pub fn is_visible(&self, key: &str) -> bool {
        !self.display.hidden.iter().any(|hidden| hidden == key)
    }

    /// Shows a hidden key or hides a visible one.
    ///
    /// Hiding is refused when `key` is the last visible entry of `all_keys`,
    /// so the chart never ends up empty. Returns whether the state changed.
    pub fn toggle_visibility(&mut self, key: &str, all_keys: &[String]) -> bool {
        if let Some(index) = self.display.hidden.iter().position(|hidden| hidden == key) {
            self.display.hidden.remove(index);
            trace!(key, "legend key shown");
            return true;
        }

        let visible_others = all_keys
            .iter()
            .filter(|candidate| candidate.as_str() != key && self.is_visible(candidate))
            .count();
        if visible_others == 0 {
            return false;
        }

        self.display.hidden.push(key.to_owned());
        trace!(key, "legend key hidden");
        true
    }

    pub fn focus(&mut self, key: &str) {
        self.display.focused = Some(key.to_owned());
    }

    pub fn clear_focus(&mut self) {
        self.display.focused = None;
    }
}

#[cfg(test)]
mod tests {
    use super::LegendState;

    fn keys() -> Vec<String> {
        vec!["Cap".to_owned(), "Hoodie".to_owned()]
    }

    #[test]
    fn toggling_hides_and_shows() {
        let mut legend = LegendState::default();
        assert!(legend.toggle_visibility("Cap", &keys()));
        assert!(!legend.is_visible("Cap"));
        assert!(legend.toggle_visibility("Cap", &keys()));
        assert!(legend.is_visible("Cap"));
    }

    #[test]
    fn last_visible_key_cannot_be_hidden() {
        let mut legend = LegendState::default();
        assert!(legend.toggle_visibility("Cap", &keys()));
        assert!(!legend.toggle_visibility("Hoodie", &keys()));
        assert!(legend.is_visible("Hoodie"));
    }

    #[test]
    fn focus_is_tracked_in_display() {
        let mut legend = LegendState::default();
        legend.focus("Hoodie");
        assert_eq!(legend.display().focused.as_deref(), Some("Hoodie"));
        legend.clear_focus();
        assert!(legend.display().focused.is_none());
    }
}
