//! The entry point hosts talk to: one detector of each kind, fed in a fixed
//! order, with the mutually exclusive gesture sets shared between them.

use tactile_geometry::Size;
use tactile_input::MotionEvent;

use crate::detector::{Arbiter, GestureDetector};
use crate::move_detector::{MoveDetector, MoveListener};
use crate::multi_finger_tap::{MultiFingerTapDetector, MultiFingerTapListener};
use crate::rotate::{RotateDetector, RotateListener};
use crate::scale::{ScaleDetector, ScaleListener};
use crate::shove::{ShoveDetector, ShoveListener};
use crate::sideways_shove::{SidewaysShoveDetector, SidewaysShoveListener};
use crate::standard::{StandardGestureDetector, StandardGestureListener};
use crate::{GestureTypeSet, GesturesConfig};

/// Owns every detector and routes motion events through them.
///
/// Events go to the standard, scale, rotate, shove, multi finger tap, move and
/// sideways shove detectors, in that order. Each detector sees the gestures
/// that are in progress at the moment it runs, so a gesture started by an
/// earlier detector already blocks the exclusive gestures of later ones.
pub struct GesturesManager {
    config: GesturesConfig,
    exclusive: Vec<GestureTypeSet>,
    standard: StandardGestureDetector,
    scale: ScaleDetector,
    rotate: RotateDetector,
    shove: ShoveDetector,
    multi_finger_tap: MultiFingerTapDetector,
    move_detector: MoveDetector,
    sideways_shove: SidewaysShoveDetector,
}

impl Default for GesturesManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GesturesManager {
    pub fn new() -> Self {
        Self::with_config(GesturesConfig::default())
    }

    /// Builds every detector with the thresholds of `config`.
    pub fn with_config(config: GesturesConfig) -> Self {
        Self {
            standard: StandardGestureDetector::new(&config),
            scale: ScaleDetector::new(&config),
            rotate: RotateDetector::new(&config),
            shove: ShoveDetector::new(&config),
            multi_finger_tap: MultiFingerTapDetector::new(&config),
            move_detector: MoveDetector::new(&config),
            sideways_shove: SidewaysShoveDetector::new(&config),
            exclusive: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &GesturesConfig {
        &self.config
    }

    /// Feeds `event` to every detector and returns whether any listener
    /// handled it.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        log::trace!(
            "dispatching {:?} with {} pointers at {}",
            event.action(),
            event.pointer_count(),
            event.event_time()
        );
        let mut handled = false;

        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        handled |= self.standard.process(event, &arbiter);
        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        handled |= self.scale.process(event, &arbiter);
        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        handled |= self.rotate.process(event, &arbiter);
        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        handled |= self.shove.process(event, &arbiter);
        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        handled |= self.multi_finger_tap.process(event, &arbiter);
        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        handled |= self.move_detector.process(event, &arbiter);
        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        handled |= self.sideways_shove.process(event, &arbiter);

        handled
    }

    /// Fires the delayed callbacks due at `now`, in milliseconds on the clock
    /// of the motion events.
    pub fn poll(&mut self, now: u64) -> bool {
        let arbiter = Arbiter::new(&self.exclusive, self.active_types());
        self.standard.poll(now, &arbiter)
    }

    /// Earliest time at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.standard.next_deadline()
    }

    /// Replaces the mutually exclusive gesture sets. While a progressive
    /// gesture of a set is in progress, no other gesture of that set can
    /// start or execute.
    pub fn set_mutually_exclusive_gestures(
        &mut self,
        sets: impl IntoIterator<Item = GestureTypeSet>,
    ) {
        self.exclusive = sets.into_iter().collect();
        log::debug!("{} mutually exclusive gesture sets", self.exclusive.len());
    }

    pub fn mutually_exclusive_gestures(&self) -> &[GestureTypeSet] {
        &self.exclusive
    }

    /// Updates the display size used by the edge slop check of every multi
    /// finger detector.
    pub fn set_display_size(&mut self, display_size: Option<Size>) {
        self.config.display_size = display_size;
        self.scale.set_display_size(display_size);
        self.rotate.set_display_size(display_size);
        self.shove.set_display_size(display_size);
        self.multi_finger_tap.set_display_size(display_size);
        self.move_detector.set_display_size(display_size);
        self.sideways_shove.set_display_size(display_size);
    }

    fn active_types(&self) -> GestureTypeSet {
        let detectors: [&dyn GestureDetector; 7] = [
            &self.standard,
            &self.scale,
            &self.rotate,
            &self.shove,
            &self.multi_finger_tap,
            &self.move_detector,
            &self.sideways_shove,
        ];
        detectors
            .into_iter()
            .filter(|detector| detector.is_in_progress())
            .fold(GestureTypeSet::EMPTY, |active, detector| {
                active.union(detector.handled_types())
            })
    }

    pub fn set_standard_gesture_listener(
        &mut self,
        listener: impl StandardGestureListener + 'static,
    ) {
        self.standard.set_listener(listener);
    }

    pub fn remove_standard_gesture_listener(&mut self) {
        self.standard.remove_listener();
    }

    pub fn set_standard_scale_gesture_listener(&mut self, listener: impl ScaleListener + 'static) {
        self.scale.set_listener(listener);
    }

    pub fn remove_standard_scale_gesture_listener(&mut self) {
        self.scale.remove_listener();
    }

    pub fn set_rotate_gesture_listener(&mut self, listener: impl RotateListener + 'static) {
        self.rotate.set_listener(listener);
    }

    pub fn remove_rotate_gesture_listener(&mut self) {
        self.rotate.remove_listener();
    }

    pub fn set_shove_gesture_listener(&mut self, listener: impl ShoveListener + 'static) {
        self.shove.set_listener(listener);
    }

    pub fn remove_shove_gesture_listener(&mut self) {
        self.shove.remove_listener();
    }

    pub fn set_multi_finger_tap_gesture_listener(
        &mut self,
        listener: impl MultiFingerTapListener + 'static,
    ) {
        self.multi_finger_tap.set_listener(listener);
    }

    pub fn remove_multi_finger_tap_gesture_listener(&mut self) {
        self.multi_finger_tap.remove_listener();
    }

    pub fn set_move_gesture_listener(&mut self, listener: impl MoveListener + 'static) {
        self.move_detector.set_listener(listener);
    }

    pub fn remove_move_gesture_listener(&mut self) {
        self.move_detector.remove_listener();
    }

    pub fn set_sideways_shove_gesture_listener(
        &mut self,
        listener: impl SidewaysShoveListener + 'static,
    ) {
        self.sideways_shove.set_listener(listener);
    }

    pub fn remove_sideways_shove_gesture_listener(&mut self) {
        self.sideways_shove.remove_listener();
    }

    pub fn standard_gesture_detector(&self) -> &StandardGestureDetector {
        &self.standard
    }

    pub fn standard_gesture_detector_mut(&mut self) -> &mut StandardGestureDetector {
        &mut self.standard
    }

    pub fn standard_scale_gesture_detector(&self) -> &ScaleDetector {
        &self.scale
    }

    pub fn standard_scale_gesture_detector_mut(&mut self) -> &mut ScaleDetector {
        &mut self.scale
    }

    pub fn rotate_gesture_detector(&self) -> &RotateDetector {
        &self.rotate
    }

    pub fn rotate_gesture_detector_mut(&mut self) -> &mut RotateDetector {
        &mut self.rotate
    }

    pub fn shove_gesture_detector(&self) -> &ShoveDetector {
        &self.shove
    }

    pub fn shove_gesture_detector_mut(&mut self) -> &mut ShoveDetector {
        &mut self.shove
    }

    pub fn multi_finger_tap_gesture_detector(&self) -> &MultiFingerTapDetector {
        &self.multi_finger_tap
    }

    pub fn multi_finger_tap_gesture_detector_mut(&mut self) -> &mut MultiFingerTapDetector {
        &mut self.multi_finger_tap
    }

    pub fn move_gesture_detector(&self) -> &MoveDetector {
        &self.move_detector
    }

    pub fn move_gesture_detector_mut(&mut self) -> &mut MoveDetector {
        &mut self.move_detector
    }

    pub fn sideways_shove_gesture_detector(&self) -> &SidewaysShoveDetector {
        &self.sideways_shove
    }

    pub fn sideways_shove_gesture_detector_mut(&mut self) -> &mut SidewaysShoveDetector {
        &mut self.sideways_shove
    }
}
