//! Recognition of single-pointer gestures: taps, double taps, long presses,
//! scrolls and flings.
//!
//! [`TapRecognizer`] is a plain state machine. Delayed callbacks (show
//! press, long press, single tap confirmation) are kept as deadlines on the
//! clock of the motion events and fire when an event or a
//! [`poll`](TapRecognizer::poll) reaches them.

use smallvec::SmallVec;
use tactile_geometry::Point;
use tactile_input::{MotionAction, MotionEvent, VelocityTracker};

use crate::GesturesConfig;

/// Events produced by [`TapRecognizer`], in the order they happened.
pub type TapEvents = SmallVec<[TapEvent; 2]>;

#[derive(Clone, Debug, PartialEq)]
pub enum TapEvent {
    Down(MotionEvent),
    /// The pointer stayed down for the tap timeout without moving.
    ShowPress(MotionEvent),
    SingleTapUp(MotionEvent),
    /// A tap that is not followed by a second one.
    SingleTapConfirmed(MotionEvent),
    /// Carries the first down of the double tap.
    DoubleTap(MotionEvent),
    /// Down, moves and up of the second tap of a double tap.
    DoubleTapEvent(MotionEvent),
    Scroll {
        down: MotionEvent,
        current: MotionEvent,
        distance_x: f32,
        distance_y: f32,
    },
    Fling {
        down: MotionEvent,
        current: MotionEvent,
        velocity_x: f32,
        velocity_y: f32,
    },
    LongPress(MotionEvent),
}

/// Pixel distances and millisecond timeouts used by [`TapRecognizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapThresholds {
    pub touch_slop: f32,
    pub double_tap_slop: f32,
    pub tap_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
    pub double_tap_timeout_ms: u64,
    pub double_tap_min_time_ms: u64,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
}

impl TapThresholds {
    pub fn from_config(config: &GesturesConfig) -> Self {
        Self {
            touch_slop: config.touch_slop_px(),
            double_tap_slop: config.double_tap_slop_px(),
            tap_timeout_ms: config.tap_timeout_ms,
            long_press_timeout_ms: config.long_press_timeout_ms,
            double_tap_timeout_ms: config.double_tap_timeout_ms,
            double_tap_min_time_ms: config.double_tap_min_time_ms,
            min_fling_velocity: config.min_fling_velocity_px(),
            max_fling_velocity: config.max_fling_velocity_px(),
        }
    }
}

impl Default for TapThresholds {
    fn default() -> Self {
        Self::from_config(&GesturesConfig::default())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    ShowPress,
    LongPress,
    Tap,
}

#[derive(Clone, Debug, Default)]
struct Deadlines {
    show_press: Option<u64>,
    long_press: Option<u64>,
    tap: Option<u64>,
}

impl Deadlines {
    /// The earliest timer due at `now`.
    fn next_due(&self, now: u64) -> Option<Timer> {
        [
            (Timer::ShowPress, self.show_press),
            (Timer::LongPress, self.long_press),
            (Timer::Tap, self.tap),
        ]
        .into_iter()
        .filter_map(|(timer, deadline)| deadline.filter(|d| *d <= now).map(|d| (d, timer)))
        .min_by_key(|(deadline, _)| *deadline)
        .map(|(_, timer)| timer)
    }

    fn slot(&mut self, timer: Timer) -> &mut Option<u64> {
        match timer {
            Timer::ShowPress => &mut self.show_press,
            Timer::LongPress => &mut self.long_press,
            Timer::Tap => &mut self.tap,
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug)]
pub struct TapRecognizer {
    thresholds: TapThresholds,
    long_press_enabled: bool,
    deadlines: Deadlines,
    still_down: bool,
    defer_confirm_single_tap: bool,
    in_long_press: bool,
    always_in_tap_region: bool,
    always_in_bigger_tap_region: bool,
    is_double_tapping: bool,
    last_focus: Point,
    down_focus: Point,
    current_down: Option<MotionEvent>,
    previous_up: Option<MotionEvent>,
    velocity_tracker: VelocityTracker,
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(TapThresholds::default())
    }
}

impl TapRecognizer {
    pub fn new(thresholds: TapThresholds) -> Self {
        Self {
            thresholds,
            long_press_enabled: true,
            deadlines: Deadlines::default(),
            still_down: false,
            defer_confirm_single_tap: false,
            in_long_press: false,
            always_in_tap_region: false,
            always_in_bigger_tap_region: false,
            is_double_tapping: false,
            last_focus: Point::ZERO,
            down_focus: Point::ZERO,
            current_down: None,
            previous_up: None,
            velocity_tracker: VelocityTracker::new(),
        }
    }

    pub fn thresholds(&self) -> &TapThresholds {
        &self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: TapThresholds) {
        self.thresholds = thresholds;
    }

    pub fn is_long_press_enabled(&self) -> bool {
        self.long_press_enabled
    }

    /// Without long press, holding the pointer down lets it scroll instead.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.long_press_enabled = enabled;
    }

    pub fn is_double_tapping(&self) -> bool {
        self.is_double_tapping
    }

    /// Earliest pending deadline, for hosts that schedule their own wakeups.
    pub fn next_deadline(&self) -> Option<u64> {
        [
            self.deadlines.show_press,
            self.deadlines.long_press,
            self.deadlines.tap,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Fires the timers due at `now`.
    pub fn poll(&mut self, now: u64) -> TapEvents {
        let mut out = TapEvents::new();
        self.fire_due(now, &mut out);
        out
    }

    pub fn on_touch_event(&mut self, event: &MotionEvent) -> TapEvents {
        let mut out = TapEvents::new();
        self.fire_due(event.event_time(), &mut out);
        self.velocity_tracker.add_movement(event);

        let action = event.action();
        let focus = focus_of(event);

        match action {
            MotionAction::PointerDown => {
                self.down_focus = focus;
                self.last_focus = focus;
                self.cancel_taps();
            }
            MotionAction::PointerUp => {
                self.down_focus = focus;
                self.last_focus = focus;
                self.clear_opposing_velocities(event);
            }
            MotionAction::Down => self.on_down(event, focus, &mut out),
            MotionAction::Move => self.on_move(event, focus, &mut out),
            MotionAction::Up => self.on_up(event, &mut out),
            MotionAction::Cancel => self.cancel(),
        }
        out
    }

    fn on_down(&mut self, event: &MotionEvent, focus: Point, out: &mut TapEvents) {
        let had_tap = self.deadlines.tap.take().is_some();
        let double_tap = match (&self.current_down, &self.previous_up) {
            (Some(first_down), Some(first_up)) if had_tap => {
                self.is_considered_double_tap(first_down, first_up, event)
            }
            _ => false,
        };

        if double_tap {
            self.is_double_tapping = true;
            if let Some(first_down) = &self.current_down {
                out.push(TapEvent::DoubleTap(first_down.clone()));
            }
            out.push(TapEvent::DoubleTapEvent(event.clone()));
        } else {
            self.deadlines.tap = Some(event.event_time() + self.thresholds.double_tap_timeout_ms);
        }

        self.down_focus = focus;
        self.last_focus = focus;
        self.current_down = Some(event.clone());
        self.always_in_tap_region = true;
        self.always_in_bigger_tap_region = true;
        self.still_down = true;
        self.in_long_press = false;
        self.defer_confirm_single_tap = false;

        self.deadlines.long_press = self
            .long_press_enabled
            .then(|| event.down_time() + self.thresholds.long_press_timeout_ms);
        self.deadlines.show_press = Some(event.down_time() + self.thresholds.tap_timeout_ms);
        out.push(TapEvent::Down(event.clone()));
    }

    fn on_move(&mut self, event: &MotionEvent, focus: Point, out: &mut TapEvents) {
        if self.in_long_press {
            return;
        }
        let scroll = self.last_focus - focus;

        if self.is_double_tapping {
            out.push(TapEvent::DoubleTapEvent(event.clone()));
        } else if self.always_in_tap_region {
            let delta = focus - self.down_focus;
            let distance_square = delta.x * delta.x + delta.y * delta.y;
            let touch_slop_square = self.thresholds.touch_slop * self.thresholds.touch_slop;
            if distance_square > touch_slop_square {
                self.push_scroll(event, scroll, out);
                self.last_focus = focus;
                self.always_in_tap_region = false;
                self.always_in_bigger_tap_region = false;
                self.deadlines.clear();
            }
        } else if scroll.x.abs() >= 1.0 || scroll.y.abs() >= 1.0 {
            self.push_scroll(event, scroll, out);
            self.last_focus = focus;
        }
    }

    fn on_up(&mut self, event: &MotionEvent, out: &mut TapEvents) {
        self.still_down = false;

        if self.is_double_tapping {
            out.push(TapEvent::DoubleTapEvent(event.clone()));
        } else if self.in_long_press {
            self.deadlines.tap = None;
            self.in_long_press = false;
        } else if self.always_in_tap_region {
            out.push(TapEvent::SingleTapUp(event.clone()));
            if self.defer_confirm_single_tap {
                out.push(TapEvent::SingleTapConfirmed(event.clone()));
            }
        } else if let Some(id) = event.pointer_id(0) {
            self.velocity_tracker
                .compute_current_velocity(1000.0, self.thresholds.max_fling_velocity);
            let velocity = self.velocity_tracker.velocity(id);
            let min = self.thresholds.min_fling_velocity;
            if velocity.x.abs() > min || velocity.y.abs() > min {
                if let Some(down) = &self.current_down {
                    out.push(TapEvent::Fling {
                        down: down.clone(),
                        current: event.clone(),
                        velocity_x: velocity.x,
                        velocity_y: velocity.y,
                    });
                }
            }
        }

        self.previous_up = Some(event.clone());
        self.velocity_tracker.clear();
        self.is_double_tapping = false;
        self.defer_confirm_single_tap = false;
        self.deadlines.show_press = None;
        self.deadlines.long_press = None;
    }

    fn push_scroll(&self, event: &MotionEvent, scroll: Point, out: &mut TapEvents) {
        if let Some(down) = &self.current_down {
            out.push(TapEvent::Scroll {
                down: down.clone(),
                current: event.clone(),
                distance_x: scroll.x,
                distance_y: scroll.y,
            });
        }
    }

    fn fire_due(&mut self, now: u64, out: &mut TapEvents) {
        while let Some(timer) = self.deadlines.next_due(now) {
            *self.deadlines.slot(timer) = None;
            let Some(down) = self.current_down.clone() else {
                continue;
            };
            match timer {
                Timer::ShowPress => out.push(TapEvent::ShowPress(down)),
                Timer::LongPress => {
                    self.deadlines.tap = None;
                    self.defer_confirm_single_tap = false;
                    self.in_long_press = true;
                    out.push(TapEvent::LongPress(down));
                }
                Timer::Tap => {
                    if self.still_down {
                        self.defer_confirm_single_tap = true;
                    } else {
                        out.push(TapEvent::SingleTapConfirmed(down));
                    }
                }
            }
        }
    }

    fn is_considered_double_tap(
        &self,
        first_down: &MotionEvent,
        first_up: &MotionEvent,
        second_down: &MotionEvent,
    ) -> bool {
        if !self.always_in_bigger_tap_region {
            return false;
        }
        let gap = second_down.event_time().saturating_sub(first_up.event_time());
        if gap > self.thresholds.double_tap_timeout_ms || gap < self.thresholds.double_tap_min_time_ms {
            return false;
        }
        let dx = first_down.x() - second_down.x();
        let dy = first_down.y() - second_down.y();
        dx * dx + dy * dy < self.thresholds.double_tap_slop * self.thresholds.double_tap_slop
    }

    /// A lifted pointer that moved against any remaining one leaves no
    /// meaningful fling velocity.
    fn clear_opposing_velocities(&mut self, event: &MotionEvent) {
        self.velocity_tracker
            .compute_current_velocity(1000.0, self.thresholds.max_fling_velocity);
        let lifted = self.velocity_tracker.velocity(event.action_pointer_id());
        let opposing = event
            .pointers()
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != event.action_index())
            .any(|(_, pointer)| {
                let other = self.velocity_tracker.velocity(pointer.id);
                lifted.x * other.x + lifted.y * other.y < 0.0
            });
        if opposing {
            self.velocity_tracker.clear();
        }
    }

    fn cancel_taps(&mut self) {
        self.deadlines.clear();
        self.is_double_tapping = false;
        self.always_in_tap_region = false;
        self.always_in_bigger_tap_region = false;
        self.defer_confirm_single_tap = false;
        self.in_long_press = false;
    }

    fn cancel(&mut self) {
        self.cancel_taps();
        self.velocity_tracker.clear();
        self.still_down = false;
    }
}

/// Centroid of the pointers that stay down after this event.
fn focus_of(event: &MotionEvent) -> Point {
    let skip = (event.action() == MotionAction::PointerUp).then(|| event.action_index());
    let (sum, count) = event
        .pointers()
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .fold((Point::ZERO, 0usize), |(sum, count), (_, pointer)| {
            (sum + pointer.position, count + 1)
        });
    if count == 0 {
        return Point::ZERO;
    }
    sum / count as f32
}
