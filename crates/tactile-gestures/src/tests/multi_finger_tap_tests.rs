use crate::test_support::{log, Log, Touch};
use crate::{GestureDetector, MultiFingerTapDetector};

fn detector(taps: &Log<usize>) -> MultiFingerTapDetector {
    let taps = taps.clone();
    let mut detector = MultiFingerTapDetector::default();
    detector.set_listener(move |_: &mut MultiFingerTapDetector, count: usize| {
        taps.borrow_mut().push(count);
        true
    });
    detector
}

#[test]
fn two_finger_tap() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 600.0, 500.0));
    detector.on_touch_event(&touch.pointer_up(1));
    assert!(detector.on_touch_event(&touch.up()));

    assert_eq!(*taps.borrow(), vec![2]);
}

#[test]
fn three_finger_tap_with_a_still_move() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 300.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 500.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(2, 700.0, 500.0));
    detector.on_touch_event(&touch.move_by(2.0, 2.0));
    detector.on_touch_event(&touch.pointer_up(2));
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.up());

    assert_eq!(*taps.borrow(), vec![3]);
}

#[test]
fn single_finger_is_not_a_multi_finger_tap() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    assert!(!detector.on_touch_event(&touch.up()));
    assert!(taps.borrow().is_empty());
}

#[test]
fn slow_tap_is_rejected() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 600.0, 500.0));
    touch.wait(200);
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.up());
    assert!(taps.borrow().is_empty());

    detector.set_time_threshold_ms(500);
    let mut touch = Touch::starting_at(1_000);
    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 600.0, 500.0));
    touch.wait(200);
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.up());
    assert_eq!(*taps.borrow(), vec![2]);
}

#[test]
fn spreading_fingers_are_rejected() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 600.0, 500.0));
    detector.on_touch_event(&touch.move_to(&[(1, 630.0, 500.0)]));
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.up());

    assert!(taps.borrow().is_empty());
}

#[test]
fn finger_landing_after_a_lift_is_rejected() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 300.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 500.0, 500.0));
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.pointer_down(2, 700.0, 500.0));
    detector.on_touch_event(&touch.pointer_up(2));
    detector.on_touch_event(&touch.up());

    assert!(taps.borrow().is_empty());
}

#[test]
fn close_fingers_are_sloppy() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 480.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 520.0, 500.0));
    detector.on_touch_event(&touch.move_by(0.0, 0.0));
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.up());

    assert!(taps.borrow().is_empty());
}

#[test]
fn cancel_forgets_the_tap() {
    let taps = log();
    let mut detector = detector(&taps);
    let mut touch = Touch::new();

    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 600.0, 500.0));
    detector.on_touch_event(&touch.cancel());
    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.up());

    assert!(taps.borrow().is_empty());
}
