//! Touch lifecycle shapes and the responder protocol between host and slider.
//!
//! ## Usage
//!
//! The host owns a [`ResponderHost`] per touch surface and feeds it raw
//! [`PointerInput`]s. The host negotiates responder ownership and calls the
//! [`PanResponder`] callbacks in order: start, grant, moves, then release or
//! terminate.

use std::time::Instant;

use smallvec::SmallVec;

/// Native event for one touch, as seen by the responder surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchEvent {
    /// Horizontal offset relative to the responder surface.
    pub location_x: f32,
    /// Vertical offset relative to the responder surface.
    pub location_y: f32,
    /// Horizontal offset relative to the page.
    pub page_x: f32,
    /// Vertical offset relative to the page.
    pub page_y: f32,
}

/// Accumulated state of the current gesture.
///
/// The host keeps every field current for any responder. The slider itself
/// only reads `move_x` and `number_active_touches`; the start point and the
/// distances are there for responders that track relative motion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSnapshot {
    /// Latest page-space x of the moving touch.
    pub move_x: f32,
    /// Latest page-space y of the moving touch.
    pub move_y: f32,
    /// Page-space x where the gesture started.
    pub x0: f32,
    /// Page-space y where the gesture started.
    pub y0: f32,
    /// Horizontal distance since the gesture started.
    pub dx: f32,
    /// Vertical distance since the gesture started.
    pub dy: f32,
    /// Touches currently on the surface.
    pub number_active_touches: usize,
}

/// Callbacks a touch surface exposes to the host's gesture system.
///
/// The negotiation hooks default to claiming everything, so a responder never
/// loses the gesture to an ancestor scroll container.
pub trait PanResponder {
    /// Whether to become responder when a touch starts.
    fn on_start_should_set(&mut self, _touch: &TouchEvent) -> bool {
        true
    }

    /// Capture-phase variant of [`PanResponder::on_start_should_set`].
    fn on_start_should_set_capture(&mut self, _touch: &TouchEvent) -> bool {
        true
    }

    /// Whether to become responder when a touch moves.
    fn on_move_should_set(&mut self, _touch: &TouchEvent) -> bool {
        true
    }

    /// Capture-phase variant of [`PanResponder::on_move_should_set`].
    fn on_move_should_set_capture(&mut self, _touch: &TouchEvent) -> bool {
        true
    }

    /// Whether to let another responder take over.
    fn on_termination_request(&mut self) -> bool {
        true
    }

    /// Whether the native platform responder should be blocked.
    fn should_block_native_responder(&self) -> bool {
        true
    }

    /// A touch started on the surface.
    ///
    /// Called right before the grant, and again for every extra finger that
    /// lands while the responder owns the gesture.
    fn on_start(&mut self, touch: &TouchEvent, now: Instant);

    /// The surface became the responder for a gesture.
    fn on_grant(&mut self, touch: &TouchEvent, gesture: &GestureSnapshot, now: Instant);

    /// A touch moved while the surface is responder.
    fn on_move(&mut self, touch: &TouchEvent, gesture: &GestureSnapshot);

    /// The last touch of the gesture lifted.
    fn on_release(&mut self, touch: &TouchEvent, gesture: &GestureSnapshot, now: Instant);

    /// Another responder took the gesture away.
    fn on_terminate(&mut self, _touch: &TouchEvent, _gesture: &GestureSnapshot) {}
}

/// Phase of a raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Finger down.
    Down,
    /// Finger moved.
    Move,
    /// Finger lifted.
    Up,
}

/// Raw pointer sample delivered by the platform, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Platform touch identifier.
    pub id: u64,
    /// What happened.
    pub phase: PointerPhase,
    /// Page-space x.
    pub page_x: f32,
    /// Page-space y.
    pub page_y: f32,
}

impl PointerInput {
    /// Finger `id` touched down at `(page_x, page_y)`.
    pub fn down(id: u64, page_x: f32, page_y: f32) -> Self {
        Self {
            id,
            phase: PointerPhase::Down,
            page_x,
            page_y,
        }
    }

    /// Finger `id` moved to `(page_x, page_y)`.
    pub fn moved(id: u64, page_x: f32, page_y: f32) -> Self {
        Self {
            id,
            phase: PointerPhase::Move,
            page_x,
            page_y,
        }
    }

    /// Finger `id` lifted at `(page_x, page_y)`.
    pub fn up(id: u64, page_x: f32, page_y: f32) -> Self {
        Self {
            id,
            phase: PointerPhase::Up,
            page_x,
            page_y,
        }
    }
}

/// Routes raw pointer samples for one surface into [`PanResponder`] calls.
#[derive(Debug, Default)]
pub struct ResponderHost {
    origin_x: f32,
    origin_y: f32,
    active: SmallVec<[u64; 4]>,
    granted: bool,
    // Set when the gesture was handed to another surface; its remaining
    // touches are ignored until all of them lift.
    terminated: bool,
    gesture: GestureSnapshot,
    last_touch: TouchEvent,
}

impl ResponderHost {
    /// Creates a host for a surface whose top-left corner sits at
    /// `(origin_x, origin_y)` in page space.
    pub fn new(origin_x: f32, origin_y: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            ..Self::default()
        }
    }

    /// Moves the surface, e.g. after the page scrolled.
    pub fn set_origin(&mut self, origin_x: f32, origin_y: f32) {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
    }

    /// Whether the responder currently owns a gesture.
    pub fn is_responding(&self) -> bool {
        self.granted
    }

    /// Touches currently on the surface.
    pub fn active_touches(&self) -> usize {
        self.active.len()
    }

    fn touch_for(&self, input: &PointerInput) -> TouchEvent {
        TouchEvent {
            location_x: input.page_x - self.origin_x,
            location_y: input.page_y - self.origin_y,
            page_x: input.page_x,
            page_y: input.page_y,
        }
    }

    /// Delivers one raw sample.
    pub fn dispatch<R: PanResponder>(&mut self, responder: &mut R, input: PointerInput, now: Instant) {
        let touch = self.touch_for(&input);
        self.last_touch = touch;
        match input.phase {
            PointerPhase::Down => {
                if !self.active.contains(&input.id) {
                    self.active.push(input.id);
                }
                self.gesture.number_active_touches = self.active.len();
                if self.terminated {
                    return;
                }
                if self.granted {
                    responder.on_start(&touch, now);
                    return;
                }
                let wants = responder.on_start_should_set_capture(&touch)
                    || responder.on_start_should_set(&touch);
                if wants {
                    self.begin(responder, &touch, now);
                }
            }
            PointerPhase::Move => {
                if self.terminated || !self.active.contains(&input.id) {
                    return;
                }
                if !self.granted {
                    let wants = responder.on_move_should_set_capture(&touch)
                        || responder.on_move_should_set(&touch);
                    if !wants {
                        return;
                    }
                    self.begin(responder, &touch, now);
                }
                self.gesture.move_x = input.page_x;
                self.gesture.move_y = input.page_y;
                self.gesture.dx = input.page_x - self.gesture.x0;
                self.gesture.dy = input.page_y - self.gesture.y0;
                responder.on_move(&touch, &self.gesture);
            }
            PointerPhase::Up => {
                self.active.retain(|id| *id != input.id);
                self.gesture.number_active_touches = self.active.len();
                if !self.active.is_empty() {
                    return;
                }
                self.terminated = false;
                if self.granted {
                    self.granted = false;
                    responder.on_release(&touch, &self.gesture, now);
                }
            }
        }
    }

    /// An ancestor asks to take over the current gesture. Returns whether the
    /// responder yielded.
    pub fn request_termination<R: PanResponder>(&mut self, responder: &mut R) -> bool {
        if !self.granted {
            return true;
        }
        if !responder.on_termination_request() {
            return false;
        }
        self.granted = false;
        self.terminated = true;
        responder.on_terminate(&self.last_touch, &self.gesture);
        tracing::debug!("responder yielded gesture to another surface");
        true
    }

    fn begin<R: PanResponder>(&mut self, responder: &mut R, touch: &TouchEvent, now: Instant) {
        self.granted = true;
        self.gesture = GestureSnapshot {
            move_x: touch.page_x,
            move_y: touch.page_y,
            x0: touch.page_x,
            y0: touch.page_y,
            dx: 0.0,
            dy: 0.0,
            number_active_touches: self.active.len(),
        };
        responder.on_start(touch, now);
        responder.on_grant(touch, &self.gesture, now);
    }
}
