//! Conversions between pointer pixel offsets and slider values.
//!
//! All offsets are measured from the left edge of the slider container. A
//! thumb of width `w` travels over `container_width - w` pixels, so its left
//! edge sits at `0` for the minimum value and at `container_width - w` for the
//! maximum.
//!
//! Pixels are `f32` like the rest of the layout code; prices are `f64` so a
//! caller's value survives a round trip through the slider unchanged.

/// Bounds `value` into `[min, max]`.
///
/// Never panics: when `min > max` the upper bound wins.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Maps a pointer offset inside the container to a value in `[min, max]`.
///
/// `position_in_view` is where the thumb's centre should be, so half the thumb
/// width is subtracted before scaling over the available travel. Returns `min`
/// when the thumb leaves no room to travel.
pub fn value_for_position(
    position_in_view: f32,
    container_width: f32,
    thumb_width: f32,
    min: f64,
    max: f64,
) -> f64 {
    let available_space = f64::from(container_width) - f64::from(thumb_width);
    if available_space <= 0.0 {
        return min;
    }
    let relative =
        (f64::from(position_in_view) - f64::from(thumb_width) / 2.0) / available_space;
    clamp(min + relative * (max - min), min, max)
}

/// Left-edge offset of a thumb showing `value`.
///
/// Returns `0.0` for an empty value range.
pub fn position_for_value(
    value: f64,
    container_width: f32,
    thumb_width: f32,
    min: f64,
    max: f64,
) -> f32 {
    let span = max - min;
    if span == 0.0 {
        return 0.0;
    }
    ((value - min) / span * f64::from(container_width - thumb_width)) as f32
}

/// Centre offset of a thumb showing `value`.
pub fn thumb_center(value: f64, container_width: f32, thumb_width: f32, min: f64, max: f64) -> f32 {
    thumb_width / 2.0 + position_for_value(value, container_width, thumb_width, min, max)
}

/// Whether a touch at `touch_x` should grab the low thumb.
///
/// Ties go to the low thumb, which also covers fully overlapping thumbs.
pub fn is_low_closer(touch_x: f32, low_position: f32, high_position: f32) -> bool {
    (touch_x - low_position).abs() <= (touch_x - high_position).abs()
}

/// Rounds `value` to the nearest multiple of `step` counted from `min`.
///
/// A non-positive step leaves the value untouched.
pub fn snap_to_step(value: f64, min: f64, max: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    let steps = ((value - min) / step).round();
    clamp(min + steps * step, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Pixel offsets are f32, so values only round-trip to within that precision.
    const EPSILON: f64 = 1e-4;

    #[test]
    fn clamp_bounds_value() {
        for &(v, lo, hi) in &[
            (-5.0, 0.0, 10.0),
            (15.0, 0.0, 10.0),
            (3.5, 0.0, 10.0),
            (0.0, 0.0, 0.0),
            (-1.0, -2.0, -1.5),
        ] {
            let c = clamp(v, lo, hi);
            assert!(c >= lo && c <= hi, "clamp({v}, {lo}, {hi}) = {c}");
        }
        assert_eq!(clamp(3.5, 0.0, 10.0), 3.5);
        assert_eq!(clamp(0.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn clamp_with_inverted_bounds_does_not_panic() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn value_for_position_is_monotonic() {
        let mut previous = f64::NEG_INFINITY;
        let mut x = -50.0;
        while x <= 450.0 {
            let v = value_for_position(x, 400.0, 32.0, 0.0, 100.0);
            assert!(v >= previous, "value dropped at x={x}");
            previous = v;
            x += 0.5;
        }
    }

    #[test]
    fn value_for_position_clamps_outside_container() {
        assert_eq!(value_for_position(-100.0, 400.0, 32.0, 0.0, 100.0), 0.0);
        assert_eq!(value_for_position(1000.0, 400.0, 32.0, 0.0, 100.0), 100.0);
        assert_eq!(value_for_position(16.0, 400.0, 32.0, 0.0, 100.0), 0.0);
        assert_eq!(value_for_position(384.0, 400.0, 32.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn value_for_position_without_travel_returns_min() {
        assert_eq!(value_for_position(10.0, 32.0, 32.0, 5.0, 100.0), 5.0);
        assert_eq!(value_for_position(10.0, 0.0, 32.0, 5.0, 100.0), 5.0);
    }

    #[test]
    fn value_to_position_round_trip() {
        for &value in &[0.0, 12.5, 30.0, 50.0, 99.0, 100.0] {
            let center = thumb_center(value, 400.0, 32.0, 0.0, 100.0);
            let back = value_for_position(center, 400.0, 32.0, 0.0, 100.0);
            assert!((back - value).abs() < EPSILON, "{value} -> {center} -> {back}");
        }
        let center = thumb_center(250.0, 300.0, 24.0, 200.0, 400.0);
        let back = value_for_position(center, 300.0, 24.0, 200.0, 400.0);
        assert!((back - 250.0).abs() < EPSILON);
    }

    #[test]
    fn large_prices_round_trip_within_a_pixel() {
        let max = 10_000_000.0;
        let center = thumb_center(1_234_567.89, 432.0, 32.0, 0.0, max);
        let back = value_for_position(center, 432.0, 32.0, 0.0, max);
        assert!((back - 1_234_567.89).abs() < 10.0, "{back}");
        assert_eq!(snap_to_step(1_234_567.4, 0.0, max, 1.0), 1_234_567.0);
    }

    #[test]
    fn empty_range_positions_at_origin() {
        assert_eq!(position_for_value(7.0, 400.0, 32.0, 7.0, 7.0), 0.0);
    }

    #[test]
    fn tie_resolves_to_low_thumb() {
        assert!(is_low_closer(100.0, 100.0, 100.0));
        assert!(is_low_closer(50.0, 50.0, 200.0));
        assert!(is_low_closer(125.0, 100.0, 150.0));
        assert!(!is_low_closer(126.0, 100.0, 150.0));
    }

    #[test]
    fn snapping_to_step() {
        assert_eq!(snap_to_step(31.2, 0.0, 100.0, 5.0), 30.0);
        assert_eq!(snap_to_step(32.5, 0.0, 100.0, 5.0), 35.0);
        assert_eq!(snap_to_step(99.0, 0.0, 100.0, 7.0), 98.0);
        assert_eq!(snap_to_step(31.2, 0.0, 100.0, 0.0), 31.2);
        assert_eq!(snap_to_step(12.0, 10.0, 20.0, 4.0), 14.0);
    }
}
