//! Pointer bookkeeping shared by detectors that look at several fingers.
//!
//! [`MultiFingerTracker`] remembers which pointers are down (oldest first),
//! measures pairwise distances on every accepted move and rejects sloppy
//! input: touches at the display edge or fingers placed too close together.

use std::collections::HashMap;

use smallvec::SmallVec;
use tactile_geometry::{Point, Size};
use tactile_input::{MotionAction, MotionEvent, PointerId};

use crate::constants::PRESSURE_THRESHOLD;
use crate::detector::{Arbiter, DetectorCore};
use crate::distances::{MultiFingerDistances, PointerDistancePair};
use crate::permitted_actions::is_missing_actions;
use crate::{GestureType, GestureTypeSet, PointerIndexError};

pub(crate) const DEFAULT_REQUIRED_POINTERS: usize = 2;

/// Active pointers of a gesture and the distances between them.
#[derive(Clone, Debug, Default)]
pub struct MultiFingerTracker {
    pub(crate) core: DetectorCore,
    pointer_ids: SmallVec<[PointerId; 4]>,
    distances: HashMap<PointerDistancePair, MultiFingerDistances>,
    focal_point: Point,
    span_threshold: f32,
    edge_slop: f32,
    display_size: Option<Size>,
}

impl MultiFingerTracker {
    pub(crate) fn new(span_threshold: f32, edge_slop: f32, display_size: Option<Size>) -> Self {
        Self {
            span_threshold,
            edge_slop,
            display_size,
            ..Self::default()
        }
    }

    /// Ids of the pointers that are down, oldest first.
    pub fn pointer_ids(&self) -> &[PointerId] {
        &self.pointer_ids
    }

    pub fn pointers_count(&self) -> usize {
        self.pointer_ids.len()
    }

    /// Centroid of the pointers of the most recent event.
    pub fn focal_point(&self) -> Point {
        self.focal_point
    }

    pub fn span_threshold(&self) -> f32 {
        self.span_threshold
    }

    pub fn set_span_threshold(&mut self, span_threshold: f32) {
        self.span_threshold = span_threshold;
    }

    pub fn edge_slop(&self) -> f32 {
        self.edge_slop
    }

    pub fn set_edge_slop(&mut self, edge_slop: f32) {
        self.edge_slop = edge_slop;
    }

    pub fn display_size(&self) -> Option<Size> {
        self.display_size
    }

    pub fn set_display_size(&mut self, display_size: Option<Size>) {
        self.display_size = display_size;
    }

    pub fn core(&self) -> &DetectorCore {
        &self.core
    }

    /// Distances measured for the pointers at `first` and `second` in
    /// [`pointer_ids`](Self::pointer_ids) order. The order of the indices is
    /// irrelevant.
    pub fn distances(
        &self,
        first: usize,
        second: usize,
    ) -> Result<&MultiFingerDistances, PointerIndexError> {
        let count = self.pointer_ids.len();
        if first == second {
            return Err(PointerIndexError::SamePointer { index: first });
        }
        for index in [first, second] {
            if index >= count {
                return Err(PointerIndexError::OutOfRange { index, count });
            }
        }
        let pair = PointerDistancePair::new(self.pointer_ids[first], self.pointer_ids[second]);
        self.distances
            .get(&pair)
            .ok_or(PointerIndexError::NotMeasured { first, second })
    }

    pub fn current_span(&self, first: usize, second: usize) -> Result<f32, PointerIndexError> {
        self.distances(first, second).map(|d| d.curr_span())
    }

    pub fn previous_span(&self, first: usize, second: usize) -> Result<f32, PointerIndexError> {
        self.distances(first, second).map(|d| d.prev_span())
    }

    pub fn current_span_x(&self, first: usize, second: usize) -> Result<f32, PointerIndexError> {
        self.distances(first, second).map(|d| d.curr_diff_x.abs())
    }

    pub fn current_span_y(&self, first: usize, second: usize) -> Result<f32, PointerIndexError> {
        self.distances(first, second).map(|d| d.curr_diff_y.abs())
    }

    pub fn previous_span_x(&self, first: usize, second: usize) -> Result<f32, PointerIndexError> {
        self.distances(first, second).map(|d| d.prev_diff_x.abs())
    }

    pub fn previous_span_y(&self, first: usize, second: usize) -> Result<f32, PointerIndexError> {
        self.distances(first, second).map(|d| d.prev_diff_y.abs())
    }

    pub(crate) fn distance_values(&self) -> impl Iterator<Item = &MultiFingerDistances> + '_ {
        self.distances.values()
    }

    /// Distances of the two oldest pointers.
    pub(crate) fn first_pair(&self) -> Option<&MultiFingerDistances> {
        self.distances(0, 1).ok()
    }

    pub(crate) fn clear(&mut self) {
        self.pointer_ids.clear();
        self.distances.clear();
    }

    fn update_pointer_list(&mut self, event: &MotionEvent) {
        let id = event.action_pointer_id();
        match event.action() {
            MotionAction::Down | MotionAction::PointerDown => self.pointer_ids.push(id),
            MotionAction::Up | MotionAction::PointerUp => self.pointer_ids.retain(|p| *p != id),
            MotionAction::Cancel => self.clear(),
            MotionAction::Move => {}
        }
    }

    /// Rapid pressure drops usually mean a finger is being lifted and its
    /// position is unreliable.
    fn check_pressure(&self) -> bool {
        let (Some(current), Some(previous)) = (self.core.current_event(), self.core.previous_event())
        else {
            return true;
        };
        let previous_pressure = previous.pressure();
        if previous_pressure <= 0.0 {
            return true;
        }
        current.pressure() / previous_pressure > PRESSURE_THRESHOLD
    }

    fn calculate_distances(&mut self) {
        self.distances.clear();
        let (Some(current), Some(previous)) = (self.core.current_event(), self.core.previous_event())
        else {
            return;
        };
        let offset = |event: &MotionEvent, first: PointerId, second: PointerId| {
            let a = event.find_pointer(first)?.position;
            let b = event.find_pointer(second)?.position;
            Some(b - a)
        };

        for (i, &first) in self.pointer_ids.iter().enumerate() {
            for &second in &self.pointer_ids[i + 1..] {
                let (Some(prev), Some(curr)) =
                    (offset(previous, first, second), offset(current, first, second))
                else {
                    continue;
                };
                self.distances.insert(
                    PointerDistancePair::new(first, second),
                    MultiFingerDistances::new(prev, curr),
                );
            }
        }
    }

    /// Touches in the edge slop of the display, or pairs of fingers closer
    /// than the span threshold.
    pub(crate) fn is_sloppy(&self) -> bool {
        if let (Some(size), Some(event)) = (self.display_size, self.core.current_event()) {
            let right = size.width - self.edge_slop;
            let bottom = size.height - self.edge_slop;
            let at_edge = self.pointer_ids.iter().any(|id| {
                event
                    .find_pointer_index(*id)
                    .and_then(|index| event.raw_position(index))
                    .is_some_and(|raw| {
                        raw.x < self.edge_slop
                            || raw.y < self.edge_slop
                            || raw.x > right
                            || raw.y > bottom
                    })
            });
            if at_edge {
                return true;
            }
        }
        self.distances
            .values()
            .any(|distances| distances.curr_span() < self.span_threshold)
    }
}

/// A detector built on [`MultiFingerTracker`].
pub(crate) trait MultiFingerDetector {
    fn fingers(&self) -> &MultiFingerTracker;

    fn fingers_mut(&mut self) -> &mut MultiFingerTracker;

    fn has_listener(&self) -> bool;

    fn required_pointers_count(&self) -> usize {
        DEFAULT_REQUIRED_POINTERS
    }

    fn is_sloppy_gesture(&self) -> bool {
        self.fingers().is_sloppy()
    }

    /// Types this detector itself has in progress.
    fn own_active_types(&self) -> GestureTypeSet {
        GestureTypeSet::EMPTY
    }

    /// Runs on accepted moves with enough fingers down.
    fn analyze_movement(&mut self, arbiter: &Arbiter<'_>) -> bool;

    /// Runs before the pointers are forgotten because events went missing.
    fn on_missing_events(&mut self) {}

    fn can_execute(&self, gesture: GestureType, arbiter: &Arbiter<'_>) -> bool {
        base_can_execute(self, gesture, arbiter)
    }
}

/// Listener present, detector enabled, not blocked by a running exclusive
/// gesture and not sloppy.
pub(crate) fn base_can_execute<D>(detector: &D, gesture: GestureType, arbiter: &Arbiter<'_>) -> bool
where
    D: MultiFingerDetector + ?Sized,
{
    detector.has_listener()
        && detector.fingers().core.is_enabled()
        && arbiter.permits(gesture, detector.own_active_types())
        && !detector.is_sloppy_gesture()
}

/// Pointer tracking step of every multi-finger detector. Expects the event
/// to be recorded in the detector core already.
pub(crate) fn analyze_multi_finger<D>(detector: &mut D, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool
where
    D: MultiFingerDetector + ?Sized,
{
    let action = event.action();
    let missing = is_missing_actions(
        action,
        event.pointer_count(),
        detector.fingers().pointers_count(),
    );

    if missing {
        detector.on_missing_events();
        detector.fingers_mut().clear();
    }
    if !missing || action == MotionAction::Down {
        detector.fingers_mut().update_pointer_list(event);
    }
    detector.fingers_mut().focal_point = event.focal_point();

    if missing {
        log::warn!(
            "motion events went missing before {:?} with {} pointers",
            action,
            event.pointer_count()
        );
        return false;
    }

    if action == MotionAction::Move
        && detector.fingers().pointers_count() >= detector.required_pointers_count()
        && detector.fingers().check_pressure()
    {
        detector.fingers_mut().calculate_distances();
        if !detector.is_sloppy_gesture() {
            return detector.analyze_movement(arbiter);
        }
    }
    false
}

/// Inherent accessors delegating to the detector's `fingers` tracker.
macro_rules! multi_finger_accessors {
    () => {
        pub fn pointers_count(&self) -> usize {
            self.fingers.pointers_count()
        }

        /// Ids of the active pointers, oldest first.
        pub fn pointer_ids(&self) -> &[tactile_input::PointerId] {
            self.fingers.pointer_ids()
        }

        pub fn focal_point(&self) -> tactile_geometry::Point {
            self.fingers.focal_point()
        }

        pub fn current_span(
            &self,
            first: usize,
            second: usize,
        ) -> Result<f32, $crate::PointerIndexError> {
            self.fingers.current_span(first, second)
        }

        pub fn previous_span(
            &self,
            first: usize,
            second: usize,
        ) -> Result<f32, $crate::PointerIndexError> {
            self.fingers.previous_span(first, second)
        }

        pub fn current_span_x(
            &self,
            first: usize,
            second: usize,
        ) -> Result<f32, $crate::PointerIndexError> {
            self.fingers.current_span_x(first, second)
        }

        pub fn current_span_y(
            &self,
            first: usize,
            second: usize,
        ) -> Result<f32, $crate::PointerIndexError> {
            self.fingers.current_span_y(first, second)
        }

        pub fn previous_span_x(
            &self,
            first: usize,
            second: usize,
        ) -> Result<f32, $crate::PointerIndexError> {
            self.fingers.previous_span_x(first, second)
        }

        pub fn previous_span_y(
            &self,
            first: usize,
            second: usize,
        ) -> Result<f32, $crate::PointerIndexError> {
            self.fingers.previous_span_y(first, second)
        }

        pub fn span_threshold(&self) -> f32 {
            self.fingers.span_threshold()
        }

        /// Minimum distance in pixels between any pair of fingers.
        pub fn set_span_threshold(&mut self, span_threshold: f32) {
            self.fingers.set_span_threshold(span_threshold);
        }

        pub fn set_display_size(&mut self, display_size: Option<tactile_geometry::Size>) {
            self.fingers.set_display_size(display_size);
        }

        pub fn current_event(&self) -> Option<&tactile_input::MotionEvent> {
            self.fingers.core.current_event()
        }

        pub fn previous_event(&self) -> Option<&tactile_input::MotionEvent> {
            self.fingers.core.previous_event()
        }

        pub fn gesture_duration(&self) -> u64 {
            self.fingers.core.gesture_duration()
        }
    };
}

pub(crate) use multi_finger_accessors;
