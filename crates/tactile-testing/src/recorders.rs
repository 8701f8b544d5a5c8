//! Listeners that record every callback they receive.
//!
//! A detector owns its listener, so each recorder is a cheap handle over a
//! shared [`CallLog`]: hand one clone to the detector and keep another to read
//! the calls back once the events have been played.

use std::cell::RefCell;
use std::rc::Rc;

use tactile_geometry::Point;
use tactile_gestures::{
    MoveDetector, MoveListener, MultiFingerTapDetector, MultiFingerTapListener, RotateDetector,
    RotateListener, ScaleDetector, ScaleListener, ShoveDetector, ShoveListener,
    SidewaysShoveDetector, SidewaysShoveListener, StandardGestureListener,
};
use tactile_input::{MotionAction, MotionEvent};

/// Shared, append-only list of calls.
#[derive(Debug)]
pub struct CallLog<T>(Rc<RefCell<Vec<T>>>);

impl<T> Clone for CallLog<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Default for CallLog<T> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }
}

impl<T: Clone> CallLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: T) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of the calls so far.
    pub fn calls(&self) -> Vec<T> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn count(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.0.borrow().iter().filter(|call| predicate(call)).count()
    }

    pub fn last(&self) -> Option<T> {
        self.0.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MoveCall {
    Begin { focal: Point },
    Move { distance_x: f32, distance_y: f32, focal: Point },
    End { velocity_x: f32, velocity_y: f32 },
}

/// Records [`MoveListener`] callbacks.
#[derive(Clone, Debug)]
pub struct MoveRecorder {
    log: CallLog<MoveCall>,
    accept_begin: bool,
}

impl Default for MoveRecorder {
    fn default() -> Self {
        Self {
            log: CallLog::new(),
            accept_begin: true,
        }
    }
}

impl MoveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose `on_move_begin` refuses the gesture.
    pub fn rejecting() -> Self {
        Self {
            accept_begin: false,
            ..Self::default()
        }
    }

    pub fn log(&self) -> &CallLog<MoveCall> {
        &self.log
    }

    pub fn calls(&self) -> Vec<MoveCall> {
        self.log.calls()
    }

    pub fn begin_count(&self) -> usize {
        self.log.count(|call| matches!(call, MoveCall::Begin { .. }))
    }

    pub fn move_count(&self) -> usize {
        self.log.count(|call| matches!(call, MoveCall::Move { .. }))
    }

    pub fn end_count(&self) -> usize {
        self.log.count(|call| matches!(call, MoveCall::End { .. }))
    }

    /// Focal point reported with every `on_move`.
    pub fn move_focal_points(&self) -> Vec<Point> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MoveCall::Move { focal, .. } => Some(focal),
                _ => None,
            })
            .collect()
    }
}

impl MoveListener for MoveRecorder {
    fn on_move_begin(&mut self, detector: &mut MoveDetector) -> bool {
        self.log.push(MoveCall::Begin {
            focal: detector.focal_point(),
        });
        self.accept_begin
    }

    fn on_move(&mut self, detector: &mut MoveDetector, distance_x: f32, distance_y: f32) -> bool {
        self.log.push(MoveCall::Move {
            distance_x,
            distance_y,
            focal: detector.focal_point(),
        });
        true
    }

    fn on_move_end(&mut self, _detector: &mut MoveDetector, velocity_x: f32, velocity_y: f32) {
        self.log.push(MoveCall::End {
            velocity_x,
            velocity_y,
        });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScaleCall {
    Begin {
        quick: bool,
        span: f32,
    },
    Scale {
        factor: f32,
        scaling_out: bool,
        quick: bool,
    },
    /// `factor` and `scaling_out` as the detector reports them while ending.
    End {
        velocity_x: f32,
        velocity_y: f32,
        factor: f32,
        scaling_out: bool,
    },
}

/// Records [`ScaleListener`] callbacks.
#[derive(Clone, Debug)]
pub struct ScaleRecorder {
    log: CallLog<ScaleCall>,
    accept_begin: bool,
}

impl Default for ScaleRecorder {
    fn default() -> Self {
        Self {
            log: CallLog::new(),
            accept_begin: true,
        }
    }
}

impl ScaleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            accept_begin: false,
            ..Self::default()
        }
    }

    pub fn log(&self) -> &CallLog<ScaleCall> {
        &self.log
    }

    pub fn calls(&self) -> Vec<ScaleCall> {
        self.log.calls()
    }

    pub fn begin_count(&self) -> usize {
        self.log.count(|call| matches!(call, ScaleCall::Begin { .. }))
    }

    pub fn scale_count(&self) -> usize {
        self.log.count(|call| matches!(call, ScaleCall::Scale { .. }))
    }

    pub fn end_count(&self) -> usize {
        self.log.count(|call| matches!(call, ScaleCall::End { .. }))
    }

    /// Scale factors of every `on_scale`, in order.
    pub fn factors(&self) -> Vec<f32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ScaleCall::Scale { factor, .. } => Some(factor),
                _ => None,
            })
            .collect()
    }

    pub fn last_end(&self) -> Option<ScaleCall> {
        self.calls()
            .into_iter()
            .rev()
            .find(|call| matches!(call, ScaleCall::End { .. }))
    }
}

impl ScaleListener for ScaleRecorder {
    fn on_scale_begin(&mut self, detector: &mut ScaleDetector) -> bool {
        self.log.push(ScaleCall::Begin {
            quick: detector.is_quick_scale(),
            span: detector.scale_span(),
        });
        self.accept_begin
    }

    fn on_scale(&mut self, detector: &mut ScaleDetector) -> bool {
        self.log.push(ScaleCall::Scale {
            factor: detector.scale_factor(),
            scaling_out: detector.is_scaling_out(),
            quick: detector.is_quick_scale(),
        });
        true
    }

    fn on_scale_end(&mut self, detector: &mut ScaleDetector, velocity_x: f32, velocity_y: f32) {
        self.log.push(ScaleCall::End {
            velocity_x,
            velocity_y,
            factor: detector.scale_factor(),
            scaling_out: detector.is_scaling_out(),
        });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RotateCall {
    Begin,
    Rotate { since_last: f32, since_start: f32 },
    End { angular_velocity: f32 },
}

/// Records [`RotateListener`] callbacks.
#[derive(Clone, Debug, Default)]
pub struct RotateRecorder {
    log: CallLog<RotateCall>,
}

impl RotateRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RotateCall> {
        self.log.calls()
    }
}

impl RotateListener for RotateRecorder {
    fn on_rotate_begin(&mut self, _detector: &mut RotateDetector) -> bool {
        self.log.push(RotateCall::Begin);
        true
    }

    fn on_rotate(&mut self, _detector: &mut RotateDetector, since_last: f32, since_start: f32) -> bool {
        self.log.push(RotateCall::Rotate {
            since_last,
            since_start,
        });
        true
    }

    fn on_rotate_end(
        &mut self,
        _detector: &mut RotateDetector,
        _velocity_x: f32,
        _velocity_y: f32,
        angular_velocity: f32,
    ) {
        self.log.push(RotateCall::End { angular_velocity });
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShoveCall {
    Begin,
    Shove { since_last: f32, since_start: f32 },
    End,
}

/// Records both vertical and sideways shove callbacks.
#[derive(Clone, Debug, Default)]
pub struct ShoveRecorder {
    log: CallLog<ShoveCall>,
}

impl ShoveRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ShoveCall> {
        self.log.calls()
    }
}

impl ShoveListener for ShoveRecorder {
    fn on_shove_begin(&mut self, _detector: &mut ShoveDetector) -> bool {
        self.log.push(ShoveCall::Begin);
        true
    }

    fn on_shove(&mut self, _detector: &mut ShoveDetector, since_last: f32, since_start: f32) -> bool {
        self.log.push(ShoveCall::Shove {
            since_last,
            since_start,
        });
        true
    }

    fn on_shove_end(&mut self, _detector: &mut ShoveDetector, _velocity_x: f32, _velocity_y: f32) {
        self.log.push(ShoveCall::End);
    }
}

impl SidewaysShoveListener for ShoveRecorder {
    fn on_sideways_shove_begin(&mut self, _detector: &mut SidewaysShoveDetector) -> bool {
        self.log.push(ShoveCall::Begin);
        true
    }

    fn on_sideways_shove(
        &mut self,
        _detector: &mut SidewaysShoveDetector,
        since_last: f32,
        since_start: f32,
    ) -> bool {
        self.log.push(ShoveCall::Shove {
            since_last,
            since_start,
        });
        true
    }

    fn on_sideways_shove_end(
        &mut self,
        _detector: &mut SidewaysShoveDetector,
        _velocity_x: f32,
        _velocity_y: f32,
    ) {
        self.log.push(ShoveCall::End);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiFingerTapCall {
    pub pointers_count: usize,
    pub focal_point: Point,
    /// Centroid of the event that completed the tap.
    pub event_focal_point: Option<Point>,
}

/// Records [`MultiFingerTapListener`] callbacks.
#[derive(Clone, Debug, Default)]
pub struct MultiFingerTapRecorder {
    log: CallLog<MultiFingerTapCall>,
}

impl MultiFingerTapRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MultiFingerTapCall> {
        self.log.calls()
    }

    /// Finger counts of every tap, in order.
    pub fn pointer_counts(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .map(|call| call.pointers_count)
            .collect()
    }
}

impl MultiFingerTapListener for MultiFingerTapRecorder {
    fn on_multi_finger_tap(
        &mut self,
        detector: &mut MultiFingerTapDetector,
        pointers_count: usize,
    ) -> bool {
        self.log.push(MultiFingerTapCall {
            pointers_count,
            focal_point: detector.focal_point(),
            event_focal_point: detector.current_event().map(MotionEvent::focal_point),
        });
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StandardCall {
    Down,
    ShowPress,
    SingleTapUp,
    SingleTapConfirmed,
    LongPress,
    DoubleTap,
    DoubleTapEvent(MotionAction),
    Scroll { distance_x: f32, distance_y: f32 },
    Fling { velocity_x: f32, velocity_y: f32 },
}

/// Records [`StandardGestureListener`] callbacks and consumes all of them.
#[derive(Clone, Debug, Default)]
pub struct StandardRecorder {
    log: CallLog<StandardCall>,
}

impl StandardRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<StandardCall> {
        self.log.calls()
    }
}

impl StandardGestureListener for StandardRecorder {
    fn on_down(&mut self, _event: &MotionEvent) -> bool {
        self.log.push(StandardCall::Down);
        true
    }

    fn on_show_press(&mut self, _event: &MotionEvent) {
        self.log.push(StandardCall::ShowPress);
    }

    fn on_single_tap_up(&mut self, _event: &MotionEvent) -> bool {
        self.log.push(StandardCall::SingleTapUp);
        true
    }

    fn on_single_tap_confirmed(&mut self, _event: &MotionEvent) -> bool {
        self.log.push(StandardCall::SingleTapConfirmed);
        true
    }

    fn on_long_press(&mut self, _event: &MotionEvent) {
        self.log.push(StandardCall::LongPress);
    }

    fn on_double_tap(&mut self, _event: &MotionEvent) -> bool {
        self.log.push(StandardCall::DoubleTap);
        true
    }

    fn on_double_tap_event(&mut self, event: &MotionEvent) -> bool {
        self.log.push(StandardCall::DoubleTapEvent(event.action()));
        true
    }

    fn on_scroll(
        &mut self,
        _down: &MotionEvent,
        _current: &MotionEvent,
        distance_x: f32,
        distance_y: f32,
    ) -> bool {
        self.log.push(StandardCall::Scroll {
            distance_x,
            distance_y,
        });
        true
    }

    fn on_fling(
        &mut self,
        _down: &MotionEvent,
        _current: &MotionEvent,
        velocity_x: f32,
        velocity_y: f32,
    ) -> bool {
        self.log.push(StandardCall::Fling {
            velocity_x,
            velocity_y,
        });
        true
    }
}
