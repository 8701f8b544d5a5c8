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

/// Callbacks of [`RotateDetector`]. Angles are in degrees.
pub trait RotateListener {
    fn on_rotate_begin(&mut self, _detector: &mut RotateDetector) -> bool {
        true
    }

    fn on_rotate(
        &mut self,
        _detector: &mut RotateDetector,
        _rotation_since_last: f32,
        _rotation_since_start: f32,
    ) -> bool {
        false
    }

    /// `angular_velocity` is signed like the last rotation step and is 0
    /// when the fingers stopped turning before lifting.
    fn on_rotate_end(
        &mut self,
        _detector: &mut RotateDetector,
        _velocity_x: f32,
        _velocity_y: f32,
        _angular_velocity: f32,
    ) {
    }
}

/// Two fingers turning around their focal point.
pub struct RotateDetector {
    fingers: MultiFingerTracker,
    progress: Progress,
    listener: Option<Box<dyn RotateListener>>,
    angle_threshold: f32,
    delta_since_start: f32,
    delta_since_last: f32,
}

impl Default for RotateDetector {
    fn default() -> Self {
        Self::new(&GesturesConfig::default())
    }
}

impl RotateDetector {
    pub fn new(config: &GesturesConfig) -> Self {
        Self {
            fingers: MultiFingerTracker::new(
                config.min_span_px(),
                config.edge_slop_px(),
                config.display_size,
            ),
            progress: Progress::default(),
            listener: None,
            angle_threshold: config.rotate_angle_threshold,
            delta_since_start: 0.0,
            delta_since_last: 0.0,
        }
    }

    pub fn set_listener(&mut self, listener: impl RotateListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn remove_listener(&mut self) {
        self.listener = None;
    }

    pub fn angle_threshold(&self) -> f32 {
        self.angle_threshold
    }

    /// Degrees the fingers have to turn before the gesture starts.
    pub fn set_angle_threshold(&mut self, angle_threshold: f32) {
        self.angle_threshold = angle_threshold;
    }

    pub fn delta_since_start(&self) -> f32 {
        self.delta_since_start
    }

    pub fn delta_since_last(&self) -> f32 {
        self.delta_since_last
    }

    multi_finger_accessors!();
    progressive_accessors!();

    fn rotation_since_last(&self) -> f32 {
        let Some(distances) = self.fingers.first_pair() else {
            return 0.0;
        };
        let previous = distances.prev_diff_y.atan2(distances.prev_diff_x);
        let current = distances.curr_diff_y.atan2(distances.curr_diff_x);
        normalize_degrees((previous - current).to_degrees())
    }

    fn angular_velocity(&self, velocity: Point) -> f32 {
        let focal = self.fingers.focal_point();
        let denominator = focal.x * focal.x + focal.y * focal.y;
        if denominator == 0.0 {
            return 0.0;
        }
        let magnitude = ((focal.x * velocity.y + focal.y * velocity.x) / denominator).abs();
        if self.delta_since_last < 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Folds an angle into `(-180, 180]` so crossing the negative x axis does not
/// read as a full turn.
fn normalize_degrees(degrees: f32) -> f32 {
    let folded = degrees % 360.0;
    if folded > 180.0 {
        folded - 360.0
    } else if folded <= -180.0 {
        folded + 360.0
    } else {
        folded
    }
}

impl HasListener for RotateDetector {
    type Listener = dyn RotateListener;

    fn listener_slot(&mut self) -> &mut Option<Box<dyn RotateListener>> {
        &mut self.listener
    }
}

impl MultiFingerDetector for RotateDetector {
    fn fingers(&self) -> &MultiFingerTracker {
        &self.fingers
    }

    fn fingers_mut(&mut self) -> &mut MultiFingerTracker {
        &mut self.fingers
    }

    fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    fn own_active_types(&self) -> GestureTypeSet {
        active_types(self)
    }

    fn can_execute(&self, gesture: GestureType, arbiter: &Arbiter<'_>) -> bool {
        self.delta_since_start.abs() > self.angle_threshold
            && base_can_execute(self, gesture, arbiter)
    }

    fn analyze_movement(&mut self, arbiter: &Arbiter<'_>) -> bool {
        self.delta_since_last = self.rotation_since_last();
        self.delta_since_start += self.delta_since_last;

        if self.progress.is_in_progress() {
            if self.delta_since_last == 0.0 {
                return false;
            }
            let (last, start) = (self.delta_since_last, self.delta_since_start);
            return notify(self, false, |listener, detector| {
                listener.on_rotate(detector, last, start)
            });
        }

        if self.can_execute(GestureType::Rotate, arbiter)
            && notify(self, false, |listener, detector| listener.on_rotate_begin(detector))
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

impl ProgressiveDetector for RotateDetector {
    const NAME: &'static str = "rotate";

    fn progress(&self) -> &Progress {
        &self.progress
    }

    fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    fn reset(&mut self) {
        self.delta_since_start = 0.0;
    }

    fn notify_stopped(&mut self, velocity: Point) {
        let (velocity, angular) = if self.delta_since_last == 0.0 {
            (Point::ZERO, 0.0)
        } else {
            (velocity, self.angular_velocity(velocity))
        };
        notify(self, (), |listener, detector| {
            listener.on_rotate_end(detector, velocity.x, velocity.y, angular)
        });
    }
}

impl GestureDetector for RotateDetector {
    fn handled_types(&self) -> GestureTypeSet {
        GestureType::Rotate.into()
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
