use tactile_input::MotionEvent;

use crate::detector::{Arbiter, DetectorCore, GestureDetector};
use crate::tap::{TapEvent, TapEvents, TapRecognizer, TapThresholds};
use crate::{GestureType, GestureTypeSet, GesturesConfig};

/// Callbacks of [`StandardGestureDetector`]. Every method defaults to
/// ignoring the gesture.
pub trait StandardGestureListener {
    fn on_down(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    /// The pointer rested without moving; a good time for visual feedback.
    fn on_show_press(&mut self, _event: &MotionEvent) {}

    fn on_single_tap_up(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    /// Called once the double tap timeout proves the tap was not the first
    /// half of a double tap.
    fn on_single_tap_confirmed(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    /// `event` is the down of the first tap.
    fn on_double_tap(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    fn on_double_tap_event(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    /// Distances are `previous - current` focal positions.
    fn on_scroll(
        &mut self,
        _down: &MotionEvent,
        _current: &MotionEvent,
        _distance_x: f32,
        _distance_y: f32,
    ) -> bool {
        false
    }

    fn on_fling(
        &mut self,
        _down: &MotionEvent,
        _current: &MotionEvent,
        _velocity_x: f32,
        _velocity_y: f32,
    ) -> bool {
        false
    }

    fn on_long_press(&mut self, _event: &MotionEvent) {}
}

/// Taps, double taps, long presses, scrolls and flings.
///
/// Time-based callbacks need the host to call [`poll`](GestureDetector::poll)
/// or to keep delivering events.
pub struct StandardGestureDetector {
    core: DetectorCore,
    taps: TapRecognizer,
    listener: Option<Box<dyn StandardGestureListener>>,
}

impl Default for StandardGestureDetector {
    fn default() -> Self {
        Self::new(&GesturesConfig::default())
    }
}

impl StandardGestureDetector {
    pub fn new(config: &GesturesConfig) -> Self {
        let mut taps = TapRecognizer::new(TapThresholds::from_config(config));
        taps.set_long_press_enabled(config.long_press_enabled);
        Self {
            core: DetectorCore::default(),
            taps,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl StandardGestureListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn remove_listener(&mut self) {
        self.listener = None;
    }

    pub fn is_long_press_enabled(&self) -> bool {
        self.taps.is_long_press_enabled()
    }

    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.taps.set_long_press_enabled(enabled);
    }

    pub fn thresholds(&self) -> &TapThresholds {
        self.taps.thresholds()
    }

    pub fn set_thresholds(&mut self, thresholds: TapThresholds) {
        self.taps.set_thresholds(thresholds);
    }

    /// Earliest time at which [`poll`](GestureDetector::poll) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.taps.next_deadline()
    }

    pub fn current_event(&self) -> Option<&MotionEvent> {
        self.core.current_event()
    }

    fn can_execute(&self, gesture: GestureType, arbiter: &Arbiter<'_>) -> bool {
        self.listener.is_some()
            && self.core.is_enabled()
            && arbiter.permits(gesture, GestureTypeSet::EMPTY)
    }

    fn dispatch(&mut self, events: TapEvents, arbiter: &Arbiter<'_>) -> bool {
        let mut handled = false;
        for event in events {
            if !self.can_execute(gesture_type(&event), arbiter) {
                continue;
            }
            let Some(listener) = self.listener.as_mut() else {
                break;
            };
            handled |= match &event {
                TapEvent::Down(e) => listener.on_down(e),
                TapEvent::ShowPress(e) => {
                    listener.on_show_press(e);
                    false
                }
                TapEvent::SingleTapUp(e) => listener.on_single_tap_up(e),
                TapEvent::SingleTapConfirmed(e) => listener.on_single_tap_confirmed(e),
                TapEvent::DoubleTap(e) => listener.on_double_tap(e),
                TapEvent::DoubleTapEvent(e) => listener.on_double_tap_event(e),
                TapEvent::Scroll {
                    down,
                    current,
                    distance_x,
                    distance_y,
                } => listener.on_scroll(down, current, *distance_x, *distance_y),
                TapEvent::Fling {
                    down,
                    current,
                    velocity_x,
                    velocity_y,
                } => listener.on_fling(down, current, *velocity_x, *velocity_y),
                TapEvent::LongPress(e) => {
                    listener.on_long_press(e);
                    false
                }
            };
        }
        handled
    }
}

fn gesture_type(event: &TapEvent) -> GestureType {
    match event {
        TapEvent::Down(_) => GestureType::Down,
        TapEvent::ShowPress(_) => GestureType::ShowPress,
        TapEvent::SingleTapUp(_) => GestureType::SingleTapUp,
        TapEvent::SingleTapConfirmed(_) => GestureType::SingleTapConfirmed,
        TapEvent::DoubleTap(_) => GestureType::DoubleTap,
        TapEvent::DoubleTapEvent(_) => GestureType::DoubleTapEvent,
        TapEvent::Scroll { .. } => GestureType::Scroll,
        TapEvent::Fling { .. } => GestureType::Fling,
        TapEvent::LongPress(_) => GestureType::LongPress,
    }
}

impl GestureDetector for StandardGestureDetector {
    fn is_enabled(&self) -> bool {
        self.core.is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.core.set_enabled(enabled);
    }

    fn process(&mut self, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool {
        self.core.record(event);
        let events = self.taps.on_touch_event(event);
        self.dispatch(events, arbiter)
    }

    fn poll(&mut self, now: u64, arbiter: &Arbiter<'_>) -> bool {
        let events = self.taps.poll(now);
        self.dispatch(events, arbiter)
    }
}
