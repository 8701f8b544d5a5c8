use std::collections::HashMap;

use tactile_geometry::{Point, Rect};
use tactile_input::{MotionAction, MotionEvent, PointerId};

use crate::detector::{notify, Arbiter, GestureDetector, HasListener};
use crate::distances::MoveDistances;
use crate::multi_finger::{
    base_can_execute, multi_finger_accessors, MultiFingerDetector, MultiFingerTracker,
};
use crate::progressive::{
    active_types, analyze_progressive, gesture_started, progressive_accessors,
    stop_if_in_progress, Progress, ProgressiveDetector,
};
use crate::{GestureType, GestureTypeSet, GesturesConfig};

/// Callbacks of [`MoveDetector`].
pub trait MoveListener {
    /// Returning `false` rejects the gesture; it is offered again on the next
    /// movement.
    fn on_move_begin(&mut self, _detector: &mut MoveDetector) -> bool {
        true
    }

    /// Focal point distance since the previous call, `previous - current`.
    fn on_move(&mut self, _detector: &mut MoveDetector, _distance_x: f32, _distance_y: f32) -> bool {
        false
    }

    fn on_move_end(&mut self, _detector: &mut MoveDetector, _velocity_x: f32, _velocity_y: f32) {}
}

/// Panning with any number of fingers.
///
/// The gesture starts once some pointer has moved `move_threshold` pixels on
/// either axis, unless the focal point is inside `move_threshold_rect`.
pub struct MoveDetector {
    fingers: MultiFingerTracker,
    progress: Progress,
    listener: Option<Box<dyn MoveListener>>,
    move_distances: HashMap<PointerId, MoveDistances>,
    previous_focal: Point,
    reset_focal: bool,
    last_distance: Point,
    move_threshold: f32,
    move_threshold_rect: Option<Rect>,
}

impl Default for MoveDetector {
    fn default() -> Self {
        Self::new(&GesturesConfig::default())
    }
}

impl MoveDetector {
    pub fn new(config: &GesturesConfig) -> Self {
        Self {
            // Fingers of a pan may be close together.
            fingers: MultiFingerTracker::new(0.0, config.edge_slop_px(), config.display_size),
            progress: Progress::default(),
            listener: None,
            move_distances: HashMap::new(),
            previous_focal: Point::ZERO,
            reset_focal: false,
            last_distance: Point::ZERO,
            move_threshold: config.move_threshold_px(),
            move_threshold_rect: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl MoveListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn remove_listener(&mut self) {
        self.listener = None;
    }

    pub fn move_threshold(&self) -> f32 {
        self.move_threshold
    }

    /// Pixels some pointer has to travel on either axis before the gesture
    /// starts.
    pub fn set_move_threshold(&mut self, move_threshold: f32) {
        self.move_threshold = move_threshold;
    }

    pub fn move_threshold_rect(&self) -> Option<Rect> {
        self.move_threshold_rect
    }

    /// While the focal point stays inside `rect` the gesture does not start.
    pub fn set_move_threshold_rect(&mut self, rect: Option<Rect>) {
        self.move_threshold_rect = rect;
    }

    pub fn last_distance_x(&self) -> f32 {
        self.last_distance.x
    }

    pub fn last_distance_y(&self) -> f32 {
        self.last_distance.y
    }

    /// Positions of the pointer at `index` (oldest first). Only available
    /// while a gesture is in progress.
    pub fn move_object(&self, index: usize) -> Option<&MoveDistances> {
        if !self.progress.is_in_progress() {
            return None;
        }
        let id = self.fingers.pointer_ids().get(index)?;
        self.move_distances.get(id)
    }

    multi_finger_accessors!();
    progressive_accessors!();

    fn track_pointers(&mut self, event: &MotionEvent) {
        let id = event.action_pointer_id();
        match event.action() {
            MotionAction::Down => {
                self.move_distances.clear();
                self.reset_focal = true;
                self.add_pointer(event, id);
            }
            MotionAction::PointerDown => {
                self.reset_focal = true;
                self.add_pointer(event, id);
            }
            MotionAction::PointerUp => {
                self.reset_focal = true;
                self.move_distances.remove(&id);
            }
            MotionAction::Up | MotionAction::Cancel => self.move_distances.clear(),
            MotionAction::Move => {}
        }
    }

    fn add_pointer(&mut self, event: &MotionEvent, id: PointerId) {
        if let Some(pointer) = event.find_pointer(id) {
            self.move_distances
                .insert(id, MoveDistances::new(pointer.position));
        }
    }

    fn update_move_distances(&mut self) {
        let Some(event) = self.fingers.core.current_event() else {
            return;
        };
        for id in self.fingers.pointer_ids() {
            let Some(pointer) = event.find_pointer(*id) else {
                continue;
            };
            self.move_distances
                .entry(*id)
                .and_modify(|distances| distances.add_new_position(pointer.position))
                .or_insert_with(|| MoveDistances::new(pointer.position));
        }
    }

    fn any_move_above_threshold(&self) -> bool {
        self.move_distances.values().any(|distances| {
            distances.distance_x_since_start().abs() >= self.move_threshold
                || distances.distance_y_since_start().abs() >= self.move_threshold
        })
    }

    fn focal_in_threshold_rect(&self) -> bool {
        self.move_threshold_rect
            .is_some_and(|rect| rect.contains_point(self.fingers.focal_point()))
    }
}

impl HasListener for MoveDetector {
    type Listener = dyn MoveListener;

    fn listener_slot(&mut self) -> &mut Option<Box<dyn MoveListener>> {
        &mut self.listener
    }
}

impl MultiFingerDetector for MoveDetector {
    fn fingers(&self) -> &MultiFingerTracker {
        &self.fingers
    }

    fn fingers_mut(&mut self) -> &mut MultiFingerTracker {
        &mut self.fingers
    }

    fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    fn required_pointers_count(&self) -> usize {
        1
    }

    fn own_active_types(&self) -> GestureTypeSet {
        active_types(self)
    }

    fn can_execute(&self, gesture: GestureType, arbiter: &Arbiter<'_>) -> bool {
        base_can_execute(self, gesture, arbiter)
            && self.any_move_above_threshold()
            && !self.focal_in_threshold_rect()
    }

    fn analyze_movement(&mut self, arbiter: &Arbiter<'_>) -> bool {
        self.update_move_distances();
        let focal = self.fingers.focal_point();

        if self.progress.is_in_progress() {
            self.last_distance = self.previous_focal - focal;
            self.previous_focal = focal;
            let distance = if self.reset_focal {
                self.reset_focal = false;
                Point::ZERO
            } else {
                self.last_distance
            };
            return notify(self, false, |listener, detector| {
                listener.on_move(detector, distance.x, distance.y)
            });
        }

        if self.can_execute(GestureType::Move, arbiter)
            && notify(self, false, |listener, detector| listener.on_move_begin(detector))
        {
            gesture_started(self);
            self.previous_focal = focal;
            self.reset_focal = false;
            return true;
        }
        false
    }

    fn on_missing_events(&mut self) {
        stop_if_in_progress(self);
    }
}

impl ProgressiveDetector for MoveDetector {
    const NAME: &'static str = "move";

    fn progress(&self) -> &Progress {
        &self.progress
    }

    fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    fn notify_stopped(&mut self, velocity: Point) {
        notify(self, (), |listener, detector| {
            listener.on_move_end(detector, velocity.x, velocity.y)
        });
    }
}

impl GestureDetector for MoveDetector {
    fn handled_types(&self) -> GestureTypeSet {
        GestureType::Move.into()
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
        self.track_pointers(event);
        analyze_progressive(self, event, arbiter)
    }
}
