//! Gestures with begin, update and end phases.

use tactile_geometry::Point;
use tactile_input::{MotionAction, MotionEvent, VelocityTracker};

use crate::detector::{Arbiter, GestureDetector};
use crate::multi_finger::{analyze_multi_finger, MultiFingerDetector};
use crate::GestureTypeSet;

/// Pixels per second.
const VELOCITY_UNITS: f32 = 1000.0;

/// Phase of a progressive gesture and the velocity it ended with.
#[derive(Clone, Debug, Default)]
pub struct Progress {
    in_progress: bool,
    interrupted: bool,
    velocity_tracker: VelocityTracker,
    velocity: Point,
}

impl Progress {
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Velocity of the first pointer when the last gesture stopped.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub(crate) fn interrupt(&mut self) {
        self.interrupted = true;
    }
}

pub(crate) trait ProgressiveDetector: MultiFingerDetector {
    const NAME: &'static str;

    fn progress(&self) -> &Progress;

    fn progress_mut(&mut self) -> &mut Progress;

    /// Drops per-gesture measurements. Runs on `Down`, `Cancel`, interrupts
    /// and whenever the gesture stops.
    fn reset(&mut self) {}

    /// Delivers the end callback.
    fn notify_stopped(&mut self, velocity: Point);
}

pub(crate) fn analyze_progressive<D>(detector: &mut D, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool
where
    D: ProgressiveDetector,
{
    let action = event.action();
    if matches!(action, MotionAction::Down | MotionAction::Cancel) {
        detector.reset();
    }

    if detector.progress().interrupted {
        detector.progress_mut().interrupted = false;
        detector.reset();
        if detector.progress().in_progress {
            log::debug!("{} interrupted", D::NAME);
            gesture_stopped(detector);
        }
    }

    detector.progress_mut().velocity_tracker.add_movement(event);
    let handled = analyze_multi_finger(detector, event, arbiter);

    if detector.progress().in_progress {
        let lifted_below_required = matches!(action, MotionAction::Up | MotionAction::PointerUp)
            && detector.fingers().pointers_count() < detector.required_pointers_count();
        if lifted_below_required || action == MotionAction::Cancel {
            gesture_stopped(detector);
        }
    }
    handled
}

pub(crate) fn gesture_started<D>(detector: &mut D)
where
    D: ProgressiveDetector,
{
    log::debug!("{} started", D::NAME);
    detector.progress_mut().in_progress = true;
}

pub(crate) fn gesture_stopped<D>(detector: &mut D)
where
    D: ProgressiveDetector,
{
    let pointer_id = detector
        .fingers()
        .core
        .current_event()
        .and_then(|event| event.pointer_id(0));

    let progress = detector.progress_mut();
    progress.in_progress = false;
    progress
        .velocity_tracker
        .compute_current_velocity(VELOCITY_UNITS, f32::MAX);
    progress.velocity = pointer_id
        .map(|id| progress.velocity_tracker.velocity(id))
        .unwrap_or(Point::ZERO);
    let velocity = progress.velocity;

    detector.reset();
    log::debug!("{} stopped at velocity ({}, {})", D::NAME, velocity.x, velocity.y);
    detector.notify_stopped(velocity);
}

/// Handled types while a gesture is in progress, empty otherwise.
pub(crate) fn active_types<D>(detector: &D) -> GestureTypeSet
where
    D: ProgressiveDetector + GestureDetector,
{
    if detector.progress().in_progress {
        detector.handled_types()
    } else {
        GestureTypeSet::EMPTY
    }
}

/// Stops a running gesture whose pointers are about to be forgotten.
pub(crate) fn stop_if_in_progress<D>(detector: &mut D)
where
    D: ProgressiveDetector,
{
    if detector.progress().in_progress {
        gesture_stopped(detector);
    }
}

/// Inherent progress accessors for a detector with a `progress` field.
macro_rules! progressive_accessors {
    () => {
        /// Requests the gesture to end. The end callback fires on the next
        /// event and the gesture has to qualify again before it restarts.
        pub fn interrupt(&mut self) {
            self.progress.interrupt();
        }

        pub fn is_interrupted(&self) -> bool {
            self.progress.is_interrupted()
        }

        /// Horizontal velocity in pixels per second when the gesture stopped.
        pub fn velocity_x(&self) -> f32 {
            self.progress.velocity().x
        }

        pub fn velocity_y(&self) -> f32 {
            self.progress.velocity().y
        }
    };
}

pub(crate) use progressive_accessors;
