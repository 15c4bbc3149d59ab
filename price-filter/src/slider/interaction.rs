use std::time::Instant;

use crate::{
    geometry::{self, clamp, is_low_closer},
    gesture::{GestureSnapshot, PanResponder, TouchEvent},
};

use super::{DIAMETER_ANIMATION, PRESSED_SCALE, PriceSlider, PriceState};

/// One of the two slider thumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thumb {
    /// The thumb holding the lower value.
    Low,
    /// The thumb holding the upper value.
    High,
}

/// Gesture phase of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture owns the slider.
    Idle,
    /// A gesture is dragging the given thumb.
    Dragging(Thumb),
}

/// Bookkeeping for the active gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    /// Whether the low thumb is being dragged.
    pub is_low: bool,
    /// Last value written to the dragged thumb. `NaN` before the first update.
    pub last_value: f64,
    /// Centre offset of the dragged thumb after the last update.
    pub last_position: f32,
}

/// Pointer subscription bound to one gesture.
///
/// Captured once at grant so later moves are interpreted against the
/// container origin and width the gesture started with.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PointerListener {
    container_x: f32,
    container_width: f32,
    thumb_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct DragSession {
    listener: PointerListener,
    pub state: GestureState,
}

impl DragSession {
    pub fn thumb(&self) -> Thumb {
        if self.state.is_low {
            Thumb::Low
        } else {
            Thumb::High
        }
    }
}

impl PriceSlider {
    fn is_low_pressed(&self, touch: &TouchEvent) -> bool {
        let metrics = self.metrics();
        let range = self.range.values();
        let low_center = metrics.center(Thumb::Low, range.low, &range);
        let high_center = metrics.center(Thumb::High, range.high, &range);
        is_low_closer(touch.location_x, low_center, high_center)
    }

    /// Replaces any previous pointer subscription with one for a new gesture.
    fn attach_listener(&mut self, thumb: Thumb, container_x: f32) {
        if self.session.take().is_some() {
            tracing::trace!("detached stale pointer listener");
        }
        let metrics = self.metrics();
        self.session = Some(DragSession {
            listener: PointerListener {
                container_x,
                container_width: metrics.container_width,
                thumb_width: metrics.thumb_width(thumb),
            },
            state: GestureState {
                is_low: thumb == Thumb::Low,
                last_value: f64::NAN,
                last_position: 0.0,
            },
        });
    }

    fn detach_listener(&mut self) {
        self.session = None;
    }

    fn handle_position_change(&mut self, position_in_view: f32) {
        let Some(session) = self.session else {
            return;
        };
        let PointerListener {
            container_width,
            thumb_width,
            ..
        } = session.listener;
        let thumb = session.thumb();
        let range = self.range.values();
        let (lower, upper) = match thumb {
            Thumb::Low => (range.min, range.high),
            Thumb::High => (range.low, range.max),
        };

        let mut raw = geometry::value_for_position(
            position_in_view,
            container_width,
            thumb_width,
            range.min,
            range.max,
        );
        if let Some(step) = self.props.step {
            raw = geometry::snap_to_step(raw, range.min, range.max, step);
        }
        let value = clamp(raw, lower, upper);

        if session.state.last_value == value {
            return;
        }

        let absolute_position =
            geometry::position_for_value(value, container_width, thumb_width, range.min, range.max);
        if let Some(session) = self.session.as_mut() {
            session.state.last_value = value;
            session.state.last_position = absolute_position + thumb_width / 2.0;
        }

        let (minimum, maximum) = match thumb {
            Thumb::Low => (value, range.high),
            Thumb::High => (range.low, value),
        };
        self.update_border_visibility(minimum, maximum, container_width);

        match thumb {
            Thumb::Low => self.low_thumb_x.set_value(absolute_position),
            Thumb::High => self.high_thumb_x.set_value(absolute_position),
        }
        tracing::trace!(?thumb, value, position = absolute_position, "thumb dragged");
        self.props
            .on_value_change
            .call(PriceState { minimum, maximum });
        match thumb {
            Thumb::Low => self.range.set_low(value),
            Thumb::High => self.range.set_high(value),
        }

        let metrics = self.metrics();
        self.rail.update(&self.range.values(), &metrics);
    }

    /// Toggles the high thumb's border when the thumbs get visually close.
    fn update_border_visibility(&mut self, minimum: f64, maximum: f64, container_width: f32) {
        let metrics = self.metrics();
        let span = maximum - minimum;
        let delta_x = self.props.maximum / span;
        let delta_y = f64::from(
            (container_width - metrics.width_delta()) * self.props.border_heuristic.ratio_factor
                / (metrics.low_thumb_width + metrics.high_thumb_width),
        );
        self.border_visible = !(span != 0.0 && delta_x < delta_y);
    }
}

impl PanResponder for PriceSlider {
    fn on_start(&mut self, touch: &TouchEvent, now: Instant) {
        let thumb = if self.is_low_pressed(touch) {
            Thumb::Low
        } else {
            Thumb::High
        };
        let pressed = self.resting_diameter(thumb) * PRESSED_SCALE;
        let channel = match thumb {
            Thumb::Low => &mut self.low_diameter,
            Thumb::High => &mut self.high_diameter,
        };
        channel.animate_to(pressed, DIAMETER_ANIMATION, now);
    }

    fn on_grant(&mut self, touch: &TouchEvent, gesture: &GestureSnapshot, _now: Instant) {
        if gesture.number_active_touches > 1 {
            tracing::debug!(
                touches = gesture.number_active_touches,
                "ignoring grant for multi-touch gesture"
            );
            return;
        }

        let container_x = touch.page_x - touch.location_x;
        let thumb = if self.is_low_pressed(touch) {
            Thumb::Low
        } else {
            Thumb::High
        };
        tracing::debug!(?thumb, x = touch.location_x, "price slider drag started");

        self.attach_listener(thumb, container_x);
        self.handle_position_change(touch.location_x);
    }

    fn on_move(&mut self, _touch: &TouchEvent, gesture: &GestureSnapshot) {
        self.pointer_x.set_value(gesture.move_x);
        let Some(session) = self.session else {
            return;
        };
        let position_in_view = self.pointer_x.value() - session.listener.container_x;
        self.handle_position_change(position_in_view);
    }

    fn on_release(&mut self, touch: &TouchEvent, _gesture: &GestureSnapshot, now: Instant) {
        let range = self.range.values();
        let state = PriceState {
            minimum: range.low,
            maximum: range.high,
        };
        tracing::debug!(minimum = state.minimum, maximum = state.maximum, "price slider released");
        self.props.on_value_release.call(state);

        let thumb = if self.is_low_pressed(touch) {
            Thumb::Low
        } else {
            Thumb::High
        };
        let resting = self.resting_diameter(thumb);
        self.low_diameter.animate_to(resting, DIAMETER_ANIMATION, now);
        self.high_diameter.animate_to(resting, DIAMETER_ANIMATION, now);
        self.detach_listener();
    }

    fn on_terminate(&mut self, _touch: &TouchEvent, _gesture: &GestureSnapshot) {
        tracing::debug!("price slider gesture terminated");
        self.detach_listener();
    }
}
