//! Range state shared between the slider's render pass and its gesture
//! handlers.
//!
//! ## Usage
//!
//! Evaluate a [`RangeState`] with the latest props whenever they change. Gesture
//! handlers read the [`RangeHandle`] directly, so a drag never waits for the
//! next evaluation to see current bounds.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::geometry::clamp;

/// Current bounds and thumb values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeValues {
    /// Value of the low thumb.
    pub low: f64,
    /// Value of the high thumb.
    pub high: f64,
    /// Lower bound of the slider.
    pub min: f64,
    /// Upper bound of the slider.
    pub max: f64,
}

/// Bounds and optional controlled values supplied by the owner of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeProps {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Controlled low value. Overrides the internally tracked one.
    pub low_value: Option<f64>,
    /// Controlled high value. Overrides the internally tracked one.
    pub high_value: Option<f64>,
}

/// Merges props with previously stored values.
///
/// Controlled values take priority over `previous`; either source is clamped
/// into `[min, max]`. `low > high` from the props is passed through as clamped.
pub fn merge(previous: RangeValues, props: &RangeProps) -> RangeValues {
    let RangeProps {
        min,
        max,
        low_value,
        high_value,
    } = *props;
    RangeValues {
        low: clamp(low_value.unwrap_or(previous.low), min, max),
        high: clamp(high_value.unwrap_or(previous.high), min, max),
        min,
        max,
    }
}

/// Shared handle to the live range values.
#[derive(Debug, Clone, Default)]
pub struct RangeHandle {
    inner: Arc<RwLock<RangeValues>>,
}

impl RangeHandle {
    fn new(values: RangeValues) -> Self {
        Self {
            inner: Arc::new(RwLock::new(values)),
        }
    }

    /// Copy of the current values.
    pub fn get(&self) -> RangeValues {
        *self.inner.read()
    }

    /// Reads the values without copying them out.
    pub fn with<R>(&self, f: impl FnOnce(&RangeValues) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Mutates the values in place.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut RangeValues) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

/// Owner of the range values for one slider.
#[derive(Debug)]
pub struct RangeState {
    handle: RangeHandle,
}

impl RangeState {
    /// Seeds the state from props. Missing controlled values start at the
    /// bounds.
    pub fn new(props: &RangeProps) -> Self {
        let seed = RangeValues {
            low: props.min,
            high: props.max,
            min: props.min,
            max: props.max,
        };
        Self {
            handle: RangeHandle::new(merge(seed, props)),
        }
    }

    /// Re-derives the values from `props`, writes them to the shared handle,
    /// and returns what was stored before.
    pub fn evaluate(&self, props: &RangeProps) -> RangeValues {
        self.handle.with_mut(|values| {
            let previous = *values;
            *values = merge(previous, props);
            previous
        })
    }

    /// Shared handle read by gesture handlers.
    pub fn handle(&self) -> &RangeHandle {
        &self.handle
    }

    /// Current values.
    pub fn values(&self) -> RangeValues {
        self.handle.get()
    }

    /// Stores a new low value as-is. The next evaluation clamps it.
    pub fn set_low(&self, value: f64) {
        self.handle.with_mut(|values| values.low = value);
    }

    /// Stores a new high value as-is. The next evaluation clamps it.
    pub fn set_high(&self, value: f64) {
        self.handle.with_mut(|values| values.high = value);
    }
}
