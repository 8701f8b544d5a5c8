use crate::test_support::{log, Log, Touch};
use crate::{
    GestureDetector, ShoveDetector, ShoveListener, SidewaysShoveDetector, SidewaysShoveListener,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Begin,
    Shove { last: f32, start: f32 },
    End,
}

struct Recorder(Log<Call>);

impl ShoveListener for Recorder {
    fn on_shove_begin(&mut self, _detector: &mut ShoveDetector) -> bool {
        self.0.borrow_mut().push(Call::Begin);
        true
    }

    fn on_shove(&mut self, _detector: &mut ShoveDetector, last: f32, start: f32) -> bool {
        self.0.borrow_mut().push(Call::Shove { last, start });
        true
    }

    fn on_shove_end(&mut self, _detector: &mut ShoveDetector, _velocity_x: f32, _velocity_y: f32) {
        self.0.borrow_mut().push(Call::End);
    }
}

impl SidewaysShoveListener for Recorder {
    fn on_sideways_shove_begin(&mut self, _detector: &mut SidewaysShoveDetector) -> bool {
        self.0.borrow_mut().push(Call::Begin);
        true
    }

    fn on_sideways_shove(
        &mut self,
        _detector: &mut SidewaysShoveDetector,
        last: f32,
        start: f32,
    ) -> bool {
        self.0.borrow_mut().push(Call::Shove { last, start });
        true
    }

    fn on_sideways_shove_end(
        &mut self,
        _detector: &mut SidewaysShoveDetector,
        _velocity_x: f32,
        _velocity_y: f32,
    ) {
        self.0.borrow_mut().push(Call::End);
    }
}

/// Puts two fingers down at `first` and `second` and drags both by
/// `(dx, dy)` per move.
fn drag_pair(
    detector: &mut impl GestureDetector,
    first: (f32, f32),
    second: (f32, f32),
    (dx, dy): (f32, f32),
    moves: usize,
) {
    let mut touch = Touch::new();
    detector.on_touch_event(&touch.down(0, first.0, first.1));
    detector.on_touch_event(&touch.pointer_down(1, second.0, second.1));
    for _ in 0..moves {
        detector.on_touch_event(&touch.move_by(dx, dy));
    }
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.up());
}

#[test]
fn horizontal_fingers_dragged_down_shove() {
    let calls = log();
    let mut detector = ShoveDetector::default();
    detector.set_listener(Recorder(calls.clone()));
    drag_pair(&mut detector, (400.0, 500.0), (600.0, 500.0), (0.0, 10.0), 5);

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Begin,
            Call::Shove { last: 10.0, start: 40.0 },
            Call::Shove { last: 10.0, start: 50.0 },
            Call::End,
        ]
    );
}

#[test]
fn steep_fingers_do_not_shove() {
    let calls = log();
    let mut detector = ShoveDetector::default();
    detector.set_listener(Recorder(calls.clone()));
    drag_pair(&mut detector, (400.0, 400.0), (500.0, 600.0), (0.0, 10.0), 5);
    assert!(calls.borrow().is_empty());

    detector.set_max_shove_angle(70.0);
    drag_pair(&mut detector, (400.0, 400.0), (500.0, 600.0), (0.0, 10.0), 5);
    assert_eq!(calls.borrow().first(), Some(&Call::Begin));
}

#[test]
fn shove_threshold_is_exclusive() {
    let calls = log();
    let mut detector = ShoveDetector::default();
    detector.set_listener(Recorder(calls.clone()));
    drag_pair(&mut detector, (400.0, 500.0), (600.0, 500.0), (0.0, 10.0), 2);
    assert!(calls.borrow().is_empty());

    detector.set_pixel_delta_threshold(5.0);
    drag_pair(&mut detector, (400.0, 500.0), (600.0, 500.0), (0.0, -10.0), 2);
    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Begin,
            Call::Shove { last: -10.0, start: -20.0 },
            Call::End,
        ]
    );
}

#[test]
fn vertical_fingers_dragged_sideways_shove() {
    let calls = log();
    let mut detector = SidewaysShoveDetector::default();
    detector.set_listener(Recorder(calls.clone()));
    drag_pair(&mut detector, (500.0, 400.0), (500.0, 600.0), (10.0, 0.0), 4);

    assert_eq!(
        *calls.borrow(),
        vec![
            Call::Begin,
            Call::Shove { last: 10.0, start: 30.0 },
            Call::Shove { last: 10.0, start: 40.0 },
            Call::End,
        ]
    );
}

#[test]
fn horizontal_fingers_do_not_shove_sideways() {
    let calls = log();
    let mut detector = SidewaysShoveDetector::default();
    detector.set_listener(Recorder(calls.clone()));
    drag_pair(&mut detector, (400.0, 500.0), (600.0, 500.0), (10.0, 0.0), 5);
    assert!(calls.borrow().is_empty());
}

#[test]
fn sideways_shove_threshold_is_inclusive() {
    let calls = log();
    let mut detector = SidewaysShoveDetector::default();
    detector.set_listener(Recorder(calls.clone()));
    detector.set_pixel_delta_threshold(20.0);
    drag_pair(&mut detector, (500.0, 400.0), (500.0, 600.0), (10.0, 0.0), 2);
    assert_eq!(*calls.borrow(), vec![Call::Begin, Call::End]);

    calls.borrow_mut().clear();
    detector.set_pixel_delta_threshold(20.5);
    drag_pair(&mut detector, (500.0, 400.0), (500.0, 600.0), (10.0, 0.0), 2);
    assert!(calls.borrow().is_empty());
}
