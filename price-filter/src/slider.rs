//! A dual-thumb slider for selecting a price range.
//!
//! ## Usage
//!
//! Create a [`PriceSlider`] with [`SliderProps`] and a shared [`Theme`], report
//! the container width through [`PriceSlider::on_layout`], route touches to it
//! through a [`ResponderHost`](crate::gesture::ResponderHost), step animations
//! with [`PriceSlider::advance`] once per frame, and draw the commands returned
//! by [`PriceSlider::render`].
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use derive_setters::Setters;

use crate::{
    animation::AnimatedValue,
    prop::CallbackWith,
    range::{RangeHandle, RangeProps, RangeState, RangeValues},
    theme::Theme,
};

use interaction::DragSession;
use layout::SliderMetrics;

pub use interaction::{DragPhase, GestureState, Thumb};
pub use layout::{SelectedRail, WidthLayout};
pub use render::{Border, DrawCommand, DrawList, Rect};

mod interaction;
mod layout;
mod render;

/// Scale applied to a thumb's diameter while it is pressed.
const PRESSED_SCALE: f32 = 1.5;
const DIAMETER_ANIMATION: Duration = Duration::from_millis(100);

/// Range reported to value-change and release callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceState {
    /// Value of the low thumb.
    pub minimum: f64,
    /// Value of the high thumb.
    pub maximum: f64,
}

/// Tuning for the high thumb's overlap border.
///
/// The border is hidden while `maximum / (high - low)` stays below
/// `(container_width - width_delta) * ratio_factor / (low_width + high_width)`,
/// where `width_delta` is the low thumb's width minus the high thumb's.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct BorderHeuristic {
    /// Multiplier on the container-to-thumb ratio.
    pub ratio_factor: f32,
}

impl Default for BorderHeuristic {
    fn default() -> Self {
        Self { ratio_factor: 2.0 }
    }
}

/// Arguments for [`PriceSlider`].
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct SliderProps {
    /// Lower bound of the slider.
    pub minimum: f64,
    /// Upper bound of the slider.
    pub maximum: f64,
    /// Controlled value for the low thumb.
    #[setters(strip_option)]
    pub low_value: Option<f64>,
    /// Controlled value for the high thumb.
    #[setters(strip_option)]
    pub high_value: Option<f64>,
    /// Optional step values snap to while dragging.
    #[setters(strip_option)]
    pub step: Option<f64>,
    /// Called on every accepted drag update and thumb recomputation.
    #[setters(skip)]
    pub on_value_change: CallbackWith<PriceState>,
    /// Called once when a gesture is released.
    #[setters(skip)]
    pub on_value_release: CallbackWith<PriceState>,
    /// Overlap border tuning.
    pub border_heuristic: BorderHeuristic,
}

impl SliderProps {
    /// Props for a slider spanning `[minimum, maximum]`.
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self {
            minimum,
            maximum,
            ..Self::default()
        }
    }

    /// Sets the value-change handler.
    pub fn on_value_change<F>(mut self, on_value_change: F) -> Self
    where
        F: Fn(PriceState) + Send + Sync + 'static,
    {
        self.on_value_change = CallbackWith::new(on_value_change);
        self
    }

    /// Sets the value-change handler using a shared callback.
    pub fn on_value_change_shared(mut self, on_value_change: impl Into<CallbackWith<PriceState>>) -> Self {
        self.on_value_change = on_value_change.into();
        self
    }

    /// Sets the release handler.
    pub fn on_value_release<F>(mut self, on_value_release: F) -> Self
    where
        F: Fn(PriceState) + Send + Sync + 'static,
    {
        self.on_value_release = CallbackWith::new(on_value_release);
        self
    }

    /// Sets the release handler using a shared callback.
    pub fn on_value_release_shared(
        mut self,
        on_value_release: impl Into<CallbackWith<PriceState>>,
    ) -> Self {
        self.on_value_release = on_value_release.into();
        self
    }

    fn warn_if_degenerate(&self) {
        if self.minimum > self.maximum {
            tracing::warn!(
                minimum = self.minimum,
                maximum = self.maximum,
                "price slider bounds are inverted"
            );
        }
        if self.step.is_some_and(|step| step <= 0.0) {
            tracing::warn!(step = ?self.step, "ignoring non-positive price slider step");
        }
    }

    fn range_props(&self) -> RangeProps {
        RangeProps {
            min: self.minimum,
            max: self.maximum,
            low_value: self.low_value,
            high_value: self.high_value,
        }
    }
}

impl Default for SliderProps {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
            low_value: None,
            high_value: None,
            step: None,
            on_value_change: CallbackWith::noop(),
            on_value_release: CallbackWith::noop(),
            border_heuristic: BorderHeuristic::default(),
        }
    }
}

/// Dual-thumb range slider.
#[derive(Debug)]
pub struct PriceSlider {
    props: SliderProps,
    theme: Arc<Theme>,
    range: RangeState,
    width: WidthLayout,
    low_thumb_x: AnimatedValue,
    high_thumb_x: AnimatedValue,
    low_diameter: AnimatedValue,
    high_diameter: AnimatedValue,
    pointer_x: AnimatedValue,
    rail: SelectedRail,
    session: Option<DragSession>,
    border_visible: bool,
}

impl PriceSlider {
    /// Creates a slider. Thumbs stay unpositioned until the first layout.
    pub fn new(props: SliderProps, theme: Arc<Theme>) -> Self {
        props.warn_if_degenerate();
        let range = RangeState::new(&props.range_props());
        let low_diameter = AnimatedValue::new(theme.price_slider.minimum.diameter);
        let high_diameter = AnimatedValue::new(theme.price_slider.maximum.diameter);
        Self {
            props,
            theme,
            range,
            width: WidthLayout::default(),
            low_thumb_x: AnimatedValue::default(),
            high_thumb_x: AnimatedValue::default(),
            low_diameter,
            high_diameter,
            pointer_x: AnimatedValue::default(),
            rail: SelectedRail::default(),
            session: None,
            border_visible: false,
        }
    }

    /// Current props.
    pub fn props(&self) -> &SliderProps {
        &self.props
    }

    /// Theme the slider draws with.
    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Replaces the props, re-derives the range and repositions the thumbs.
    pub fn set_props(&mut self, props: SliderProps) {
        props.warn_if_degenerate();
        self.props = props;
        let previous = self.range.evaluate(&self.props.range_props());
        let current = self.range.values();
        if previous != current {
            tracing::debug!(
                low = current.low,
                high = current.high,
                "price slider range re-derived from props"
            );
        }
        self.update_thumbs();
    }

    /// Reports the container width from a layout pass. Returns whether the
    /// width changed, in which case the thumbs were repositioned.
    pub fn on_layout(&mut self, width: f32) -> bool {
        if !self.width.measure(width) {
            return false;
        }
        tracing::debug!(width, "price slider container resized");
        self.update_thumbs();
        true
    }

    /// Positions both thumbs and the selected rail from the current range and
    /// notifies `on_value_change`.
    ///
    /// Does nothing until the container and both thumbs have a width.
    pub fn update_thumbs(&mut self) {
        let metrics = self.metrics();
        if !metrics.is_measurable() {
            tracing::trace!("skipping thumb update without a measured width");
            return;
        }
        let values = self.range.values();
        self.low_thumb_x
            .set_value(metrics.position(Thumb::Low, values.low, &values));
        self.high_thumb_x
            .set_value(metrics.position(Thumb::High, values.high, &values));
        self.rail.update(&values, &metrics);
        self.props.on_value_change.call(PriceState {
            minimum: values.low,
            maximum: values.high,
        });
    }

    /// Steps every animated channel to frame time `now`. Returns whether any
    /// channel is still animating.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut running = false;
        for channel in [
            &mut self.low_diameter,
            &mut self.high_diameter,
            &mut self.low_thumb_x,
            &mut self.high_thumb_x,
        ] {
            running |= channel.advance(now);
        }
        running | self.rail.advance(now)
    }

    /// Current range values.
    pub fn values(&self) -> RangeValues {
        self.range.values()
    }

    /// Shared handle to the live range values.
    pub fn range_handle(&self) -> &RangeHandle {
        self.range.handle()
    }

    /// Last measured container width.
    pub fn container_width(&self) -> f32 {
        self.width.width()
    }

    /// Left-edge offset of a thumb.
    pub fn thumb_x(&self, thumb: Thumb) -> f32 {
        match thumb {
            Thumb::Low => self.low_thumb_x.value(),
            Thumb::High => self.high_thumb_x.value(),
        }
    }

    /// Current (possibly animating) diameter of a thumb.
    pub fn thumb_diameter(&self, thumb: Thumb) -> f32 {
        match thumb {
            Thumb::Low => self.low_diameter.value(),
            Thumb::High => self.high_diameter.value(),
        }
    }

    /// Insets of the selected rail from the rail's left and right ends.
    pub fn selected_rail(&self) -> (f32, f32) {
        (self.rail.left(), self.rail.right())
    }

    /// Whether the high thumb shows its overlap border.
    pub fn is_border_visible(&self) -> bool {
        self.border_visible
    }

    /// Gesture phase.
    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map_or(DragPhase::Idle, |session| DragPhase::Dragging(session.thumb()))
    }

    /// Per-gesture bookkeeping, present only while dragging.
    pub fn gesture_state(&self) -> Option<GestureState> {
        self.session.as_ref().map(|session| session.state)
    }

    /// Draw commands for the current frame.
    pub fn render(&self) -> DrawList {
        let frame = render::SliderFrame {
            metrics: self.metrics(),
            height: self.theme.price_slider.minimum.diameter,
            low_x: self.low_thumb_x.value(),
            high_x: self.high_thumb_x.value(),
            low_diameter: self.low_diameter.value(),
            high_diameter: self.high_diameter.value(),
            rail_left: self.rail.left(),
            rail_right: self.rail.right(),
            border_visible: self.border_visible,
        };
        render::render_slider(&frame, &self.theme)
    }

    fn metrics(&self) -> SliderMetrics {
        SliderMetrics {
            container_width: self.width.width(),
            low_thumb_width: self.theme.price_slider.minimum.diameter,
            high_thumb_width: self.theme.price_slider.maximum.diameter,
        }
    }

    fn resting_diameter(&self, thumb: Thumb) -> f32 {
        match thumb {
            Thumb::Low => self.theme.price_slider.minimum.diameter,
            Thumb::High => self.theme.price_slider.maximum.diameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    pub(super) type Log = Arc<Mutex<Vec<PriceState>>>;

    pub(super) fn recording_props(minimum: f64, maximum: f64) -> (SliderProps, Log, Log) {
        let changes: Log = Arc::default();
        let releases: Log = Arc::default();
        let change_sink = Arc::clone(&changes);
        let release_sink = Arc::clone(&releases);
        let props = SliderProps::new(minimum, maximum)
            .on_value_change(move |state| change_sink.lock().push(state))
            .on_value_release(move |state| release_sink.lock().push(state));
        (props, changes, releases)
    }

    #[test]
    fn unmeasured_slider_does_not_notify() {
        let (props, changes, _) = recording_props(0.0, 100.0);
        let mut slider = PriceSlider::new(props, Theme::default().shared());
        slider.update_thumbs();
        assert!(changes.lock().is_empty());
        assert_eq!(slider.thumb_x(Thumb::High), 0.0);
    }

    #[test]
    fn first_layout_positions_thumbs() {
        let (props, changes, _) = recording_props(0.0, 100.0);
        let mut slider = PriceSlider::new(props, Theme::default().shared());
        assert!(slider.on_layout(432.0));
        assert_eq!(slider.thumb_x(Thumb::Low), 0.0);
        assert_eq!(slider.thumb_x(Thumb::High), 400.0);
        assert_eq!(slider.selected_rail(), (0.0, 0.0));
        assert_eq!(
            changes.lock().as_slice(),
            &[PriceState {
                minimum: 0.0,
                maximum: 100.0
            }]
        );
    }

    #[test]
    fn same_width_is_ignored() {
        let (props, changes, _) = recording_props(0.0, 100.0);
        let mut slider = PriceSlider::new(props, Theme::default().shared());
        slider.on_layout(432.0);
        assert!(!slider.on_layout(432.0));
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn resize_moves_thumbs_but_keeps_values() {
        let (props, _, releases) = recording_props(0.0, 100.0);
        let mut slider = PriceSlider::new(props.low_value(25.0).high_value(75.0), Theme::default().shared());
        slider.on_layout(432.0);
        assert_eq!(slider.thumb_x(Thumb::Low), 100.0);
        assert_eq!(slider.thumb_x(Thumb::High), 300.0);

        slider.on_layout(232.0);
        assert_eq!(slider.thumb_x(Thumb::Low), 50.0);
        assert_eq!(slider.thumb_x(Thumb::High), 150.0);
        let values = slider.values();
        assert_eq!((values.low, values.high), (25.0, 75.0));
        assert!(releases.lock().is_empty());
    }

    #[test]
    fn set_props_clamps_controlled_values() {
        let (props, changes, _) = recording_props(0.0, 100.0);
        let mut slider = PriceSlider::new(props.clone(), Theme::default().shared());
        slider.on_layout(432.0);
        slider.set_props(props.low_value(-10.0).high_value(60.0));
        let values = slider.values();
        assert_eq!((values.low, values.high), (0.0, 60.0));
        assert!((slider.thumb_x(Thumb::High) - 240.0).abs() < 1e-3);
        assert_eq!(
            changes.lock().last().copied(),
            Some(PriceState {
                minimum: 0.0,
                maximum: 60.0
            })
        );
    }

    #[test]
    fn selected_rail_tracks_range() {
        let (props, _, _) = recording_props(0.0, 100.0);
        let mut slider = PriceSlider::new(props.low_value(20.0).high_value(90.0), Theme::default().shared());
        slider.on_layout(432.0);
        let (left, right) = slider.selected_rail();
        assert!((left - 80.0).abs() < 1e-3);
        assert!((right - 40.0).abs() < 1e-3);
    }

    #[test]
    fn starts_idle() {
        let slider = PriceSlider::new(SliderProps::default(), Theme::default().shared());
        assert_eq!(slider.phase(), DragPhase::Idle);
        assert!(slider.gesture_state().is_none());
        assert!(!slider.is_border_visible());
    }
}
