use tactile_geometry::Point;
use tactile_input::MotionEvent;

use crate::detector::{notify, Arbiter, GestureDetector, HasListener};
use crate::multi_finger::{
    base_can_execute, multi_finger_accessors, MultiFingerDetector, MultiFingerTracker,
};
use crate::progressive::{
    active_types, analyze_progressive, gesture_started, progressive_accessors,
    stop_if_in_progress, Progress, ProgressiveDetector,
};
use crate::{GestureType, GestureTypeSet, GesturesConfig};

/// Callbacks of [`ShoveDetector`]. Deltas are vertical pixel distances,
/// positive downwards.
pub trait ShoveListener {
    fn on_shove_begin(&mut self, _detector: &mut ShoveDetector) -> bool {
        true
    }

    fn on_shove(
        &mut self,
        _detector: &mut ShoveDetector,
        _delta_pixels_since_last: f32,
        _delta_pixels_since_start: f32,
    ) -> bool {
        false
    }

    fn on_shove_end(&mut self, _detector: &mut ShoveDetector, _velocity_x: f32, _velocity_y: f32) {}
}

/// Two roughly horizontal fingers dragged up or down together.
pub struct ShoveDetector {
    fingers: MultiFingerTracker,
    progress: Progress,
    listener: Option<Box<dyn ShoveListener>>,
    pixel_delta_threshold: f32,
    max_shove_angle: f32,
    delta_pixels_since_start: f32,
    delta_pixels_since_last: f32,
}

impl Default for ShoveDetector {
    fn default() -> Self {
        Self::new(&GesturesConfig::default())
    }
}

impl ShoveDetector {
    pub fn new(config: &GesturesConfig) -> Self {
        Self {
            fingers: MultiFingerTracker::new(
                config.min_span_px(),
                config.edge_slop_px(),
                config.display_size,
            ),
            progress: Progress::default(),
            listener: None,
            pixel_delta_threshold: config.shove_pixel_threshold_px(),
            max_shove_angle: config.shove_max_angle,
            delta_pixels_since_start: 0.0,
            delta_pixels_since_last: 0.0,
        }
    }

    pub fn set_listener(&mut self, listener: impl ShoveListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn remove_listener(&mut self) {
        self.listener = None;
    }

    pub fn pixel_delta_threshold(&self) -> f32 {
        self.pixel_delta_threshold
    }

    pub fn set_pixel_delta_threshold(&mut self, threshold: f32) {
        self.pixel_delta_threshold = threshold;
    }

    pub fn max_shove_angle(&self) -> f32 {
        self.max_shove_angle
    }

    /// Maximum angle in degrees between the fingers and the horizontal axis.
    pub fn set_max_shove_angle(&mut self, angle: f32) {
        self.max_shove_angle = angle;
    }

    pub fn delta_pixels_since_start(&self) -> f32 {
        self.delta_pixels_since_start
    }

    pub fn delta_pixels_since_last(&self) -> f32 {
        self.delta_pixels_since_last
    }

    multi_finger_accessors!();
    progressive_accessors!();

    fn is_angle_acceptable(&self) -> bool {
        self.fingers.first_pair().is_some_and(|distances| {
            let angle = distances.curr_angle_degrees();
            angle <= self.max_shove_angle || 180.0 - angle <= self.max_shove_angle
        })
    }
}

/// Movement of the midpoint of the two oldest pointers between the previous
/// and the current event.
pub(crate) fn first_pair_midpoint_delta(fingers: &MultiFingerTracker) -> Point {
    let (Some(previous), Some(current)) = (fingers.core.previous_event(), fingers.core.current_event())
    else {
        return Point::ZERO;
    };
    let &[first, second, ..] = fingers.pointer_ids() else {
        return Point::ZERO;
    };
    let midpoint = |event: &MotionEvent| {
        let a = event.find_pointer(first)?.position;
        let b = event.find_pointer(second)?.position;
        Some((a + b) / 2.0)
    };
    match (midpoint(previous), midpoint(current)) {
        (Some(before), Some(after)) => after - before,
        _ => Point::ZERO,
    }
}

impl HasListener for ShoveDetector {
    type Listener = dyn ShoveListener;

    fn listener_slot(&mut self) -> &mut Option<Box<dyn ShoveListener>> {
        &mut self.listener
    }
}

impl MultiFingerDetector for ShoveDetector {
    fn fingers(&self) -> &MultiFingerTracker {
        &self.fingers
    }

    fn fingers_mut(&mut self) -> &mut MultiFingerTracker {
        &mut self.fingers
    }

    fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    fn is_sloppy_gesture(&self) -> bool {
        self.fingers.is_sloppy() || !self.is_angle_acceptable()
    }

    fn own_active_types(&self) -> GestureTypeSet {
        active_types(self)
    }

    fn can_execute(&self, gesture: GestureType, arbiter: &Arbiter<'_>) -> bool {
        self.delta_pixels_since_start.abs() > self.pixel_delta_threshold
            && base_can_execute(self, gesture, arbiter)
    }

    fn analyze_movement(&mut self, arbiter: &Arbiter<'_>) -> bool {
        self.delta_pixels_since_last = first_pair_midpoint_delta(&self.fingers).y;
        self.delta_pixels_since_start += self.delta_pixels_since_last;

        if self.progress.is_in_progress() {
            if self.delta_pixels_since_last == 0.0 {
                return false;
            }
            let (last, start) = (self.delta_pixels_since_last, self.delta_pixels_since_start);
            return notify(self, false, |listener, detector| {
                listener.on_shove(detector, last, start)
            });
        }

        if self.can_execute(GestureType::Shove, arbiter)
            && notify(self, false, |listener, detector| listener.on_shove_begin(detector))
        {
            gesture_started(self);
            return true;
        }
        false
    }

    fn on_missing_events(&mut self) {
        stop_if_in_progress(self);
    }
}

impl ProgressiveDetector for ShoveDetector {
    const NAME: &'static str = "shove";

    fn progress(&self) -> &Progress {
        &self.progress
    }

    fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    fn reset(&mut self) {
        self.delta_pixels_since_start = 0.0;
    }

    fn notify_stopped(&mut self, velocity: Point) {
        notify(self, (), |listener, detector| {
            listener.on_shove_end(detector, velocity.x, velocity.y)
        });
    }
}

impl GestureDetector for ShoveDetector {
    fn handled_types(&self) -> GestureTypeSet {
        GestureType::Shove.into()
    }

    fn is_in_progress(&self) -> bool {
        self.progress.is_in_progress()
    }

    fn is_enabled(&self) -> bool {
        self.fingers.core.is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.fingers.core.set_enabled(enabled);
    }

    fn process(&mut self, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool {
        self.fingers.core.record(event);
        analyze_progressive(self, event, arbiter)
    }
}
