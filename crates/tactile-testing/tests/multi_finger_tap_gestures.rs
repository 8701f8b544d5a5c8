use tactile_geometry::Point;
use tactile_gestures::GesturesManager;
use tactile_testing::assertions::assert_point_approx_eq;
use tactile_testing::prelude::*;

const CENTER: Point = Point::new(500.0, 500.0);

fn manager_with(taps: &MultiFingerTapRecorder) -> GesturesManager {
    let mut manager = GesturesManager::new();
    manager.set_multi_finger_tap_gesture_listener(taps.clone());
    manager
}

/// Two fingers touching and lifting with a pause in between.
fn slow_two_finger_tap(pause_ms: u64) -> MotionScript {
    let mut script = MotionScript::new();
    script.down(Point::new(350.0, 500.0)).unwrap();
    let second = script.pointer_down(Point::new(650.0, 500.0)).unwrap();
    script.wait(pause_ms);
    script.pointer_up(second).unwrap();
    script.up().unwrap();
    script
}

#[test]
fn two_finger_tap() {
    let taps = MultiFingerTapRecorder::new();
    let mut manager = manager_with(&taps);

    assert!(multi_finger_tap(CENTER, 300.0, 2)
        .unwrap()
        .play(&mut manager));

    assert_eq!(taps.pointer_counts(), vec![2]);
    let tap = &taps.calls()[0];
    assert_eq!(Some(tap.focal_point), tap.event_focal_point);
    // Only the first finger is left on the final event.
    assert_point_approx_eq(tap.focal_point, Point::new(350.0, 500.0), 0.01, "tap focal point");
}

#[test]
fn three_finger_tap() {
    let taps = MultiFingerTapRecorder::new();
    let mut manager = manager_with(&taps);

    multi_finger_tap(CENTER, 400.0, 3)
        .unwrap()
        .play(&mut manager);

    assert_eq!(taps.pointer_counts(), vec![3]);
}

#[test]
fn single_finger_tap_is_not_a_multi_finger_tap() {
    let taps = MultiFingerTapRecorder::new();
    let mut manager = manager_with(&taps);

    multi_finger_tap(CENTER, 0.0, 1)
        .unwrap()
        .play(&mut manager);

    assert!(taps.calls().is_empty());
}

#[test]
fn slow_tap_is_rejected_until_the_time_threshold_grows() {
    let taps = MultiFingerTapRecorder::new();
    let mut manager = manager_with(&taps);

    slow_two_finger_tap(200).play(&mut manager);
    assert!(taps.calls().is_empty());

    manager
        .multi_finger_tap_gesture_detector_mut()
        .set_time_threshold_ms(500);
    slow_two_finger_tap(200).play(&mut manager);
    assert_eq!(taps.pointer_counts(), vec![2]);
}

#[test]
fn moving_fingers_cancel_the_tap() {
    let taps = MultiFingerTapRecorder::new();
    let mut manager = manager_with(&taps);
    let threshold = manager
        .multi_finger_tap_gesture_detector()
        .movement_threshold();

    let mut script = MotionScript::new();
    let first = script.down(Point::new(350.0, 500.0)).unwrap();
    let second = script.pointer_down(Point::new(650.0, 500.0)).unwrap();
    script
        .move_to(&[
            (first, Point::new(350.0 - threshold * 2.0, 500.0)),
            (second, Point::new(650.0 + threshold * 2.0, 500.0)),
        ])
        .unwrap();
    script.pointer_up(second).unwrap();
    script.up().unwrap();
    script.play(&mut manager);

    assert!(taps.calls().is_empty());
}
