use tactile_geometry::Size;
use tactile_input::MotionEvent;

use crate::test_support::{log, Log, Touch};
use crate::{
    GestureDetector, GestureType, GestureTypeSet, GesturesConfig, GesturesManager, MoveDetector,
    MoveListener, ScaleDetector, ScaleListener, StandardGestureListener,
};

struct Named {
    name: &'static str,
    calls: Log<String>,
}

impl Named {
    fn push(&self, what: &str) {
        self.calls.borrow_mut().push(format!("{} {what}", self.name));
    }
}

impl MoveListener for Named {
    fn on_move_begin(&mut self, _detector: &mut MoveDetector) -> bool {
        self.push("begin");
        true
    }

    fn on_move_end(&mut self, _detector: &mut MoveDetector, _velocity_x: f32, _velocity_y: f32) {
        self.push("end");
    }
}

impl ScaleListener for Named {
    fn on_scale_begin(&mut self, _detector: &mut ScaleDetector) -> bool {
        self.push("begin");
        true
    }

    fn on_scale_end(&mut self, _detector: &mut ScaleDetector, _velocity_x: f32, _velocity_y: f32) {
        self.push("end");
    }
}

impl StandardGestureListener for Named {
    fn on_down(&mut self, _event: &MotionEvent) -> bool {
        self.push("down");
        true
    }

    fn on_long_press(&mut self, _event: &MotionEvent) {
        self.push("long press");
    }
}

fn named(name: &'static str, calls: &Log<String>) -> Named {
    Named {
        name,
        calls: calls.clone(),
    }
}

fn pinch_from(manager: &mut GesturesManager, left: f32, right: f32, moves: usize) {
    let mut touch = Touch::new();
    manager.on_touch_event(&touch.down(0, left, 500.0));
    manager.on_touch_event(&touch.pointer_down(1, right, 500.0));
    for i in 1..=moves {
        let offset = 10.0 * i as f32;
        manager.on_touch_event(&touch.move_to(&[(1, right + offset, 500.0)]));
    }
    manager.on_touch_event(&touch.pointer_up(1));
    manager.on_touch_event(&touch.up());
}

#[test]
fn every_detector_sees_the_event_in_order() {
    let calls = log();
    let mut manager = GesturesManager::new();
    manager.set_standard_gesture_listener(named("standard", &calls));
    manager.set_standard_scale_gesture_listener(named("scale", &calls));
    manager.set_move_gesture_listener(named("move", &calls));

    pinch_from(&mut manager, 400.0, 600.0, 5);

    assert_eq!(
        *calls.borrow(),
        vec![
            "standard down",
            "move begin",
            "scale begin",
            "scale end",
            "move end",
        ]
    );
}

#[test]
fn running_gesture_blocks_its_exclusive_partners() {
    let calls = log();
    let mut manager = GesturesManager::new();
    manager.set_standard_scale_gesture_listener(named("scale", &calls));
    manager.set_move_gesture_listener(named("move", &calls));
    manager.set_mutually_exclusive_gestures([GestureTypeSet::of(&[
        GestureType::Scale,
        GestureType::Move,
    ])]);

    pinch_from(&mut manager, 400.0, 600.0, 5);

    assert_eq!(*calls.borrow(), vec!["move begin", "move end"]);
    assert_eq!(manager.mutually_exclusive_gestures().len(), 1);
}

#[test]
fn handled_reports_any_listener() {
    let calls = log();
    let mut manager = GesturesManager::new();
    let mut touch = Touch::new();
    assert!(!manager.on_touch_event(&touch.down(0, 100.0, 100.0)));
    manager.on_touch_event(&touch.up());

    manager.set_standard_gesture_listener(named("standard", &calls));
    let mut touch = Touch::starting_at(1_000);
    assert!(manager.on_touch_event(&touch.down(0, 100.0, 100.0)));

    manager.remove_standard_gesture_listener();
    let mut touch = Touch::starting_at(2_000);
    assert!(!manager.on_touch_event(&touch.down(0, 100.0, 100.0)));
}

#[test]
fn poll_fires_delayed_callbacks() {
    let calls = log();
    let mut manager = GesturesManager::new();
    manager.set_standard_gesture_listener(named("standard", &calls));
    let mut touch = Touch::new();

    manager.on_touch_event(&touch.down(0, 100.0, 100.0));
    assert_eq!(manager.next_deadline(), Some(100));
    manager.poll(499);
    assert_eq!(*calls.borrow(), vec!["standard down"]);
    manager.poll(500);
    assert_eq!(*calls.borrow(), vec!["standard down", "standard long press"]);
}

#[test]
fn display_edge_makes_gestures_sloppy() {
    let calls = log();
    let mut manager = GesturesManager::new();
    manager.set_standard_scale_gesture_listener(named("scale", &calls));
    manager.set_display_size(Some(Size::new(1000.0, 1000.0)));
    assert_eq!(manager.config().display_size, Some(Size::new(1000.0, 1000.0)));

    pinch_from(&mut manager, 5.0, 300.0, 5);
    assert!(calls.borrow().is_empty());

    manager.set_display_size(None);
    pinch_from(&mut manager, 5.0, 300.0, 5);
    assert_eq!(*calls.borrow(), vec!["scale begin", "scale end"]);
}

#[test]
fn config_thresholds_reach_the_detectors() {
    let config = GesturesConfig::new().with_density(2.0).with_quick_scale_enabled(false);
    let manager = GesturesManager::with_config(config);

    assert_eq!(manager.shove_gesture_detector().pixel_delta_threshold(), 40.0);
    assert_eq!(manager.sideways_shove_gesture_detector().pixel_delta_threshold(), 40.0);
    assert_eq!(manager.rotate_gesture_detector().angle_threshold(), 15.3);
    assert_eq!(manager.multi_finger_tap_gesture_detector().movement_threshold(), 30.0);
    assert_eq!(manager.multi_finger_tap_gesture_detector().time_threshold_ms(), 150);
    assert_eq!(manager.standard_gesture_detector().thresholds().touch_slop, 16.0);
    assert!(!manager.standard_scale_gesture_detector().is_quick_scale_enabled());
    assert!(manager.move_gesture_detector().is_enabled());
}

#[test]
fn detectors_can_be_tuned_through_the_manager() {
    let calls = log();
    let mut manager = GesturesManager::new();
    manager.set_move_gesture_listener(named("move", &calls));
    manager.move_gesture_detector_mut().set_move_threshold(100.0);

    let mut touch = Touch::new();
    manager.on_touch_event(&touch.down(0, 100.0, 100.0));
    manager.on_touch_event(&touch.move_by(50.0, 0.0));
    assert!(calls.borrow().is_empty());
    manager.on_touch_event(&touch.move_by(50.0, 0.0));
    assert_eq!(*calls.borrow(), vec!["move begin"]);

    manager.move_gesture_detector_mut().set_enabled(false);
    manager.on_touch_event(&touch.up());
    // Disabling does not swallow the end of a running gesture.
    assert_eq!(*calls.borrow(), vec!["move begin", "move end"]);
}
