use std::time::Instant;

use crate::{animation::AnimatedValue, geometry, range::RangeValues};

use super::Thumb;

/// Widths everything else in the slider is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SliderMetrics {
    pub container_width: f32,
    pub low_thumb_width: f32,
    pub high_thumb_width: f32,
}

impl SliderMetrics {
    pub fn is_measurable(&self) -> bool {
        self.container_width != 0.0 && self.low_thumb_width != 0.0 && self.high_thumb_width != 0.0
    }

    pub fn thumb_width(&self, thumb: Thumb) -> f32 {
        match thumb {
            Thumb::Low => self.low_thumb_width,
            Thumb::High => self.high_thumb_width,
        }
    }

    /// Low thumb width minus high thumb width.
    pub fn width_delta(&self) -> f32 {
        self.low_thumb_width - self.high_thumb_width
    }

    /// Left edge of `thumb` when it shows `value`.
    pub fn position(&self, thumb: Thumb, value: f64, range: &RangeValues) -> f32 {
        geometry::position_for_value(
            value,
            self.container_width,
            self.thumb_width(thumb),
            range.min,
            range.max,
        )
    }

    /// Centre of `thumb` when it shows `value`.
    pub fn center(&self, thumb: Thumb, value: f64, range: &RangeValues) -> f32 {
        geometry::thumb_center(
            value,
            self.container_width,
            self.thumb_width(thumb),
            range.min,
            range.max,
        )
    }
}

/// Remembers the last container width reported by layout.
///
/// Layout passes fire far more often than the width changes, so consumers
/// only react when the width actually differs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidthLayout {
    width: f32,
}

impl WidthLayout {
    /// Last stored width. Zero until the first layout.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Stores `width` and returns whether it differs from the stored one.
    pub fn measure(&mut self, width: f32) -> bool {
        if self.width == width {
            return false;
        }
        self.width = width;
        true
    }
}

/// Insets of the highlighted part of the rail.
///
/// `left` is measured from the rail's left end and `right` from its right end,
/// which is enough to place the highlight without knowing the rail's length.
#[derive(Debug, Default)]
pub struct SelectedRail {
    left: AnimatedValue,
    right: AnimatedValue,
}

impl SelectedRail {
    /// Left inset.
    pub fn left(&self) -> f32 {
        self.left.value()
    }

    /// Right inset.
    pub fn right(&self) -> f32 {
        self.right.value()
    }

    pub(super) fn update(&mut self, range: &RangeValues, metrics: &SliderMetrics) {
        let (left, right) = selected_rail_insets(range, metrics);
        self.left.set_value(left);
        self.right.set_value(right);
    }

    pub(super) fn advance(&mut self, now: Instant) -> bool {
        let left = self.left.advance(now);
        let right = self.right.advance(now);
        left || right
    }
}

fn selected_rail_insets(range: &RangeValues, metrics: &SliderMetrics) -> (f32, f32) {
    let span = range.max - range.min;
    let left_travel = metrics.container_width - metrics.low_thumb_width;
    let right_travel = metrics.container_width - metrics.high_thumb_width;
    if span == 0.0 || left_travel <= 0.0 || right_travel <= 0.0 {
        return (0.0, 0.0);
    }
    let left_full_scale = span / f64::from(left_travel);
    let right_full_scale = span / f64::from(right_travel);
    (
        ((range.low - range.min) / left_full_scale) as f32,
        ((range.max - range.high) / right_full_scale) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(container_width: f32) -> SliderMetrics {
        SliderMetrics {
            container_width,
            low_thumb_width: 32.0,
            high_thumb_width: 32.0,
        }
    }

    fn range(low: f64, high: f64) -> RangeValues {
        RangeValues {
            low,
            high,
            min: 0.0,
            max: 100.0,
        }
    }

    #[test]
    fn width_layout_reports_only_changes() {
        let mut layout = WidthLayout::default();
        let changed: Vec<f32> = [320.0, 320.0, 321.0]
            .into_iter()
            .filter(|&width| layout.measure(width))
            .collect();
        assert_eq!(changed, vec![320.0, 321.0]);
        assert_eq!(layout.width(), 321.0);
    }

    #[test]
    fn zero_width_is_not_a_change_initially() {
        let mut layout = WidthLayout::default();
        assert!(!layout.measure(0.0));
    }

    #[test]
    fn metrics_require_all_widths() {
        assert!(!metrics(0.0).is_measurable());
        assert!(metrics(100.0).is_measurable());
        let no_thumb = SliderMetrics {
            low_thumb_width: 0.0,
            ..metrics(100.0)
        };
        assert!(!no_thumb.is_measurable());
    }

    #[test]
    fn centers_include_half_thumb() {
        let m = metrics(432.0);
        let r = range(0.0, 100.0);
        assert_eq!(m.center(Thumb::Low, 0.0, &r), 16.0);
        assert_eq!(m.center(Thumb::High, 100.0, &r), 416.0);
        assert_eq!(m.position(Thumb::High, 50.0, &r), 200.0);
    }

    #[test]
    fn rail_insets_follow_values() {
        let mut rail = SelectedRail::default();
        rail.update(&range(25.0, 50.0), &metrics(432.0));
        assert_eq!(rail.left(), 100.0);
        assert_eq!(rail.right(), 200.0);
    }

    #[test]
    fn rail_insets_with_uneven_thumbs() {
        let m = SliderMetrics {
            container_width: 240.0,
            low_thumb_width: 40.0,
            high_thumb_width: 20.0,
        };
        let (left, right) = selected_rail_insets(&range(50.0, 50.0), &m);
        assert!((left - 100.0).abs() < 1e-3);
        assert!((right - 110.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_rail_stays_at_zero() {
        let empty = RangeValues {
            low: 5.0,
            high: 5.0,
            min: 5.0,
            max: 5.0,
        };
        assert_eq!(selected_rail_insets(&empty, &metrics(432.0)), (0.0, 0.0));
        assert_eq!(selected_rail_insets(&range(10.0, 90.0), &metrics(20.0)), (0.0, 0.0));
    }
}
