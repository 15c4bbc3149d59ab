//! Animated value channels driven by the host frame clock.
//!
//! ## Usage
//!
//! Keep one [`AnimatedValue`] per animated property. Call
//! [`AnimatedValue::set_value`] for immediate jumps, [`AnimatedValue::animate_to`]
//! for timed transitions, and [`AnimatedValue::advance`] once per frame.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;

/// Cubic ease-in-out mapping.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub(crate) fn easing(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Lifecycle of a single timed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Still interpolating.
    Running,
    /// Reached its target.
    Finished,
    /// Replaced by `set_value` or another `animate_to` before finishing.
    Interrupted,
}

/// Completion signal returned by [`AnimatedValue::animate_to`].
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    status: Arc<Mutex<AnimationStatus>>,
}

impl AnimationHandle {
    fn new(status: AnimationStatus) -> Self {
        Self {
            status: Arc::new(Mutex::new(status)),
        }
    }

    fn resolve(&self, status: AnimationStatus) {
        let mut current = self.status.lock();
        if *current == AnimationStatus::Running {
            *current = status;
        }
    }

    /// Current status of the transition.
    pub fn status(&self) -> AnimationStatus {
        *self.status.lock()
    }

    /// Whether the transition has stopped, for any reason.
    pub fn is_done(&self) -> bool {
        self.status() != AnimationStatus::Running
    }

    /// Whether the transition reached its target.
    pub fn finished(&self) -> bool {
        self.status() == AnimationStatus::Finished
    }
}

#[derive(Debug)]
struct Transition {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    handle: AnimationHandle,
}

impl Transition {
    fn value_at(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from + (self.to - self.from) * easing(progress), false)
    }
}

/// A single animated scalar.
#[derive(Debug)]
pub struct AnimatedValue {
    value: f32,
    transition: Option<Transition>,
}

impl AnimatedValue {
    /// Creates a channel resting at `value`.
    pub fn new(value: f32) -> Self {
        Self {
            value,
            transition: None,
        }
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Where the channel is heading: the running transition's target, or the
    /// current value when idle.
    pub fn target(&self) -> f32 {
        self.transition.as_ref().map_or(self.value, |t| t.to)
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Jumps to `value`, interrupting any running transition.
    pub fn set_value(&mut self, value: f32) {
        self.interrupt();
        self.value = value;
    }

    /// Starts a timed transition from the current value to `to`.
    ///
    /// A zero duration completes immediately.
    pub fn animate_to(&mut self, to: f32, duration: Duration, now: Instant) -> AnimationHandle {
        self.interrupt();
        if duration.is_zero() {
            self.value = to;
            return AnimationHandle::new(AnimationStatus::Finished);
        }
        let handle = AnimationHandle::new(AnimationStatus::Running);
        self.transition = Some(Transition {
            from: self.value,
            to,
            started_at: now,
            duration,
            handle: handle.clone(),
        });
        handle
    }

    /// Steps the channel to frame time `now`. Returns whether it is still
    /// animating.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(transition) = self.transition.as_ref() else {
            return false;
        };
        let (value, done) = transition.value_at(now);
        self.value = value;
        if done {
            if let Some(transition) = self.transition.take() {
                transition.handle.resolve(AnimationStatus::Finished);
            }
            return false;
        }
        true
    }

    fn interrupt(&mut self) {
        if let Some(transition) = self.transition.take() {
            transition.handle.resolve(AnimationStatus::Interrupted);
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints() {
        assert_eq!(easing(0.0), 0.0);
        assert_eq!(easing(1.0), 1.0);
        assert_eq!(easing(0.5), 0.5);
        assert_eq!(easing(-1.0), 0.0);
        assert_eq!(easing(2.0), 1.0);
    }

    #[test]
    fn set_value_is_immediate() {
        let mut channel = AnimatedValue::new(1.0);
        channel.set_value(4.0);
        assert_eq!(channel.value(), 4.0);
        assert!(!channel.is_animating());
    }

    #[test]
    fn animate_to_reaches_target_and_signals_completion() {
        let start = Instant::now();
        let mut channel = AnimatedValue::new(32.0);
        let handle = channel.animate_to(48.0, Duration::from_millis(100), start);
        assert_eq!(channel.target(), 48.0);
        assert!(!handle.is_done());

        assert!(channel.advance(start + Duration::from_millis(50)));
        assert!(channel.value() > 32.0 && channel.value() < 48.0);

        assert!(!channel.advance(start + Duration::from_millis(100)));
        assert_eq!(channel.value(), 48.0);
        assert!(handle.finished());
        assert!(!channel.is_animating());
    }

    #[test]
    fn set_value_interrupts_transition() {
        let start = Instant::now();
        let mut channel = AnimatedValue::new(0.0);
        let handle = channel.animate_to(10.0, Duration::from_millis(100), start);
        channel.set_value(3.0);
        assert_eq!(handle.status(), AnimationStatus::Interrupted);
        assert!(!channel.advance(start + Duration::from_millis(200)));
        assert_eq!(channel.value(), 3.0);
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let start = Instant::now();
        let mut channel = AnimatedValue::new(0.0);
        let first = channel.animate_to(10.0, Duration::from_millis(100), start);
        channel.advance(start + Duration::from_millis(50));
        let midway = channel.value();
        let second = channel.animate_to(0.0, Duration::from_millis(100), start + Duration::from_millis(50));
        assert_eq!(first.status(), AnimationStatus::Interrupted);
        assert_eq!(channel.value(), midway);
        channel.advance(start + Duration::from_millis(150));
        assert_eq!(channel.value(), 0.0);
        assert!(second.finished());
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut channel = AnimatedValue::new(0.0);
        let handle = channel.animate_to(5.0, Duration::ZERO, Instant::now());
        assert!(handle.finished());
        assert_eq!(channel.value(), 5.0);
    }
}
