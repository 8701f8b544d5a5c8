use tactile_input::{MotionAction, MotionEvent};

use crate::detector::{notify, Arbiter, GestureDetector, HasListener};
use crate::multi_finger::{
    analyze_multi_finger, base_can_execute, multi_finger_accessors, MultiFingerDetector,
    MultiFingerTracker,
};
use crate::{GestureType, GesturesConfig};

/// Callback of [`MultiFingerTapDetector`].
pub trait MultiFingerTapListener {
    /// `pointers_count` is the number of fingers that were down together.
    fn on_multi_finger_tap(
        &mut self,
        detector: &mut MultiFingerTapDetector,
        pointers_count: usize,
    ) -> bool;
}

impl<F> MultiFingerTapListener for F
where
    F: FnMut(&mut MultiFingerTapDetector, usize) -> bool,
{
    fn on_multi_finger_tap(
        &mut self,
        detector: &mut MultiFingerTapDetector,
        pointers_count: usize,
    ) -> bool {
        self(detector, pointers_count)
    }
}

/// Several fingers touching and leaving the surface quickly without moving.
pub struct MultiFingerTapDetector {
    fingers: MultiFingerTracker,
    listener: Option<Box<dyn MultiFingerTapListener>>,
    time_threshold_ms: u64,
    movement_threshold: f32,
    invalid_movement: bool,
    pointer_lifted: bool,
    last_pointers_down_count: usize,
}

impl Default for MultiFingerTapDetector {
    fn default() -> Self {
        Self::new(&GesturesConfig::default())
    }
}

impl MultiFingerTapDetector {
    pub fn new(config: &GesturesConfig) -> Self {
        Self {
            fingers: MultiFingerTracker::new(
                config.min_span_px(),
                config.edge_slop_px(),
                config.display_size,
            ),
            listener: None,
            time_threshold_ms: config.multi_tap_time_threshold_ms,
            movement_threshold: config.multi_tap_movement_threshold_px(),
            invalid_movement: false,
            pointer_lifted: false,
            last_pointers_down_count: 0,
        }
    }

    pub fn set_listener(&mut self, listener: impl MultiFingerTapListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn remove_listener(&mut self) {
        self.listener = None;
    }

    pub fn time_threshold_ms(&self) -> u64 {
        self.time_threshold_ms
    }

    /// Longest tap, from the first finger down to the last finger up.
    pub fn set_time_threshold_ms(&mut self, threshold: u64) {
        self.time_threshold_ms = threshold;
    }

    pub fn movement_threshold(&self) -> f32 {
        self.movement_threshold
    }

    /// Pixels any pair of fingers may drift apart on either axis between
    /// two events.
    pub fn set_movement_threshold(&mut self, threshold: f32) {
        self.movement_threshold = threshold;
    }

    multi_finger_accessors!();

    fn exceeded_movement_threshold(&self) -> bool {
        self.fingers.distance_values().any(|distances| {
            (distances.curr_diff_x - distances.prev_diff_x).abs() > self.movement_threshold
                || (distances.curr_diff_y - distances.prev_diff_y).abs() > self.movement_threshold
        })
    }

    fn reset(&mut self) {
        self.last_pointers_down_count = 0;
        self.invalid_movement = false;
        self.pointer_lifted = false;
    }
}

impl HasListener for MultiFingerTapDetector {
    type Listener = dyn MultiFingerTapListener;

    fn listener_slot(&mut self) -> &mut Option<Box<dyn MultiFingerTapListener>> {
        &mut self.listener
    }
}

impl MultiFingerDetector for MultiFingerTapDetector {
    fn fingers(&self) -> &MultiFingerTracker {
        &self.fingers
    }

    fn fingers_mut(&mut self) -> &mut MultiFingerTracker {
        &mut self.fingers
    }

    fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    fn can_execute(&self, gesture: GestureType, arbiter: &Arbiter<'_>) -> bool {
        self.last_pointers_down_count > 1
            && !self.invalid_movement
            && self.fingers.core.gesture_duration() < self.time_threshold_ms
            && base_can_execute(self, gesture, arbiter)
    }

    fn analyze_movement(&mut self, _arbiter: &Arbiter<'_>) -> bool {
        false
    }
}

impl GestureDetector for MultiFingerTapDetector {
    fn is_enabled(&self) -> bool {
        self.fingers.core.is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.fingers.core.set_enabled(enabled);
    }

    fn process(&mut self, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool {
        self.fingers.core.record(event);
        analyze_multi_finger(self, event, arbiter);

        match event.action() {
            MotionAction::PointerDown => {
                if self.pointer_lifted {
                    self.invalid_movement = true;
                }
                self.last_pointers_down_count = self.fingers.pointers_count();
            }
            MotionAction::PointerUp => self.pointer_lifted = true,
            MotionAction::Move => {
                if !self.invalid_movement {
                    self.invalid_movement = self.exceeded_movement_threshold();
                }
            }
            MotionAction::Up => {
                let pointers_count = self.last_pointers_down_count;
                let handled = self.can_execute(GestureType::MultiFingerTap, arbiter)
                    && notify(self, false, |listener, detector| {
                        listener.on_multi_finger_tap(detector, pointers_count)
                    });
                if handled {
                    log::debug!("multi finger tap with {pointers_count} pointers");
                }
                self.reset();
                return handled;
            }
            MotionAction::Cancel => self.reset(),
            MotionAction::Down => {}
        }
        false
    }
}
