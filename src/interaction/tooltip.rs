use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Gap kept between the tooltip, the hovered element and the chart edges.
pub const TOOLTIP_MARGIN_PX: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipPosition {
    /// Floats next to the hovered element.
    #[default]
    Over,
    /// Docked under the plot area, horizontally centred on the element.
    Below,
}

/// Measured boxes for one tooltip placement, all in the same coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipGeometry {
    pub element: Rect,
    pub chart: Rect,
    pub tooltip: Rect,
    /// Anchor along the element's width: 0 is its left edge, 1 its right edge.
    pub element_width_ratio: f64,
    pub margin: f64,
}

impl TooltipGeometry {
    #[must_use]
    pub fn new(element: Rect, chart: Rect, tooltip: Rect) -> Self {
        Self {
            element,
            chart,
            tooltip,
            element_width_ratio: 1.0,
            margin: TOOLTIP_MARGIN_PX,
        }
    }

    #[must_use]
    pub fn with_element_width_ratio(mut self, ratio: f64) -> Self {
        self.element_width_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Tooltip offset in the chart container's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub x: f64,
    pub y: f64,
}

#[must_use]
pub fn calculate_tooltip_position(
    geometry: TooltipGeometry,
    position: TooltipPosition,
) -> TooltipPlacement {
    let ratio = match position {
        TooltipPosition::Below => 0.0,
        TooltipPosition::Over if geometry.element_width_ratio.is_finite() => {
            geometry.element_width_ratio.clamp(0.0, 1.0)
        }
        TooltipPosition::Over => 1.0,
    };
    let margin = if geometry.margin.is_finite() {
        geometry.margin.max(0.0)
    } else {
        TOOLTIP_MARGIN_PX
    };

    TooltipPlacement {
        x: tooltip_x(&geometry, position, ratio, margin),
        y: tooltip_y(&geometry, position, margin),
    }
}

fn tooltip_x(geometry: &TooltipGeometry, position: TooltipPosition, ratio: f64, margin: f64) -> f64 {
    let TooltipGeometry {
        element,
        chart,
        tooltip,
        ..
    } = *geometry;

    if position == TooltipPosition::Below {
        let centred = element.left + element.width * 0.5 - tooltip.width / 2.0 - chart.left;
        return centred.min(chart.width - tooltip.width - margin).max(margin);
    }

    let x = element.left + element.width * ratio + margin - chart.left;
    if x + tooltip.width + margin > chart.width {
        // Not enough room on the right: mirror to the element's other side.
        let flipped =
            element.left + element.width * (1.0 - ratio) - tooltip.width - margin - chart.left;
        return flipped.max(margin);
    }
    x
}

fn tooltip_y(geometry: &TooltipGeometry, position: TooltipPosition, margin: f64) -> f64 {
    let TooltipGeometry {
        element,
        chart,
        tooltip,
        ..
    } = *geometry;

    if position == TooltipPosition::Below {
        return chart.height;
    }

    let y = element.top + margin - chart.top;
    if y + tooltip.height + margin > chart.height {
        let above = element.top - tooltip.height - margin - chart.top;
        return above.max(0.0);
    }
    y
}

#[cfg(test)]
mod tests {
    use super::{TooltipGeometry, TooltipPlacement, TooltipPosition, calculate_tooltip_position};
    use crate::core::Rect;

    const CHART: Rect = Rect::new(100.0, 50.0, 800.0, 400.0);
    const TOOLTIP: Rect = Rect::new(0.0, 0.0, 160.0, 80.0);

    #[test]
    fn over_places_right_of_element_when_room() {
        let element = Rect::new(200.0, 100.0, 20.0, 200.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(element, CHART, TOOLTIP),
            TooltipPosition::Over,
        );
        assert_eq!(placement, TooltipPlacement { x: 144.0, y: 74.0 });
    }

    #[test]
    fn over_flips_left_near_right_edge() {
        let element = Rect::new(800.0, 100.0, 20.0, 200.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(element, CHART, TOOLTIP),
            TooltipPosition::Over,
        );
        // ratio 1 mirrors to the element's left edge: 800 - 160 - 24 - 100.
        assert_eq!(placement.x, 516.0);
    }

    #[test]
    fn over_flips_above_near_bottom_edge() {
        let element = Rect::new(200.0, 400.0, 20.0, 20.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(element, CHART, TOOLTIP),
            TooltipPosition::Over,
        );
        assert_eq!(placement.y, 400.0 - 80.0 - 24.0 - 50.0);
    }

    #[test]
    fn flipped_positions_are_clamped() {
        let element = Rect::new(110.0, 200.0, 700.0, 10.0);
        let tooltip = Rect::new(0.0, 0.0, 200.0, 300.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(element, CHART, tooltip),
            TooltipPosition::Over,
        );
        assert_eq!(placement, TooltipPlacement { x: 24.0, y: 0.0 });
    }

    #[test]
    fn below_centres_under_element_and_docks_under_plot() {
        let element = Rect::new(400.0, 100.0, 40.0, 200.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(element, CHART, TOOLTIP),
            TooltipPosition::Below,
        );
        assert_eq!(placement, TooltipPlacement { x: 240.0, y: 400.0 });

        let at_left_edge = Rect::new(100.0, 100.0, 10.0, 10.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(at_left_edge, CHART, TOOLTIP),
            TooltipPosition::Below,
        );
        assert_eq!(placement.x, 24.0);

        let at_right_edge = Rect::new(890.0, 100.0, 10.0, 10.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(at_right_edge, CHART, TOOLTIP),
            TooltipPosition::Below,
        );
        assert_eq!(placement.x, 800.0 - 160.0 - 24.0);
    }

    #[test]
    fn width_ratio_moves_the_anchor() {
        let element = Rect::new(200.0, 100.0, 40.0, 40.0);
        let placement = calculate_tooltip_position(
            TooltipGeometry::new(element, CHART, TOOLTIP).with_element_width_ratio(0.5),
            TooltipPosition::Over,
        );
        assert_eq!(placement.x, 200.0 + 20.0 + 24.0 - 100.0);

        let clamped = calculate_tooltip_position(
            TooltipGeometry::new(element, CHART, TOOLTIP).with_element_width_ratio(7.0),
            TooltipPosition::Over,
        );
        assert_eq!(clamped.x, 200.0 + 40.0 + 24.0 - 100.0);
    }
}
