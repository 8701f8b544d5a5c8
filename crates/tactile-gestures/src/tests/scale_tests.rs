use tactile_geometry::Point;

use crate::test_support::{assert_close, log, Log, Touch};
use crate::{GestureDetector, ScaleDetector, ScaleListener};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Begin { quick: bool },
    Scale { factor: f32, scaling_out: bool },
    End,
}

impl Call {
    fn is_begin(&self) -> bool {
        matches!(self, Call::Begin { .. })
    }

    fn is_end(&self) -> bool {
        matches!(self, Call::End)
    }
}

struct Recorder {
    calls: Log<Call>,
    interrupt_after_scales: Option<usize>,
    scales: usize,
    begin_deltas: Log<f32>,
}

impl Recorder {
    fn new(calls: &Log<Call>) -> Self {
        Self {
            calls: calls.clone(),
            interrupt_after_scales: None,
            scales: 0,
            begin_deltas: log(),
        }
    }
}

impl ScaleListener for Recorder {
    fn on_scale_begin(&mut self, detector: &mut ScaleDetector) -> bool {
        self.begin_deltas
            .borrow_mut()
            .push(detector.span_delta_since_start());
        self.calls.borrow_mut().push(Call::Begin {
            quick: detector.is_quick_scale(),
        });
        true
    }

    fn on_scale(&mut self, detector: &mut ScaleDetector) -> bool {
        self.calls.borrow_mut().push(Call::Scale {
            factor: detector.scale_factor(),
            scaling_out: detector.is_scaling_out(),
        });
        self.scales += 1;
        if self.interrupt_after_scales == Some(self.scales) {
            detector.interrupt();
        }
        true
    }

    fn on_scale_end(&mut self, _detector: &mut ScaleDetector, _velocity_x: f32, _velocity_y: f32) {
        self.calls.borrow_mut().push(Call::End);
    }
}

fn detector_with(recorder: Recorder) -> ScaleDetector {
    let mut detector = ScaleDetector::default();
    detector.set_listener(recorder);
    detector
}

/// Two fingers on a horizontal line around (500, 500), each moving `step`
/// pixels outwards per move.
fn pinch(detector: &mut ScaleDetector, touch: &mut Touch, half_span: f32, step: f32, moves: usize) {
    detector.on_touch_event(&touch.down(0, 500.0 - half_span, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 500.0 + half_span, 500.0));
    for i in 1..=moves {
        let offset = half_span + step * i as f32;
        detector.on_touch_event(&touch.move_to(&[(0, 500.0 - offset, 500.0), (1, 500.0 + offset, 500.0)]));
    }
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.up());
}

/// Tap, then put the finger down again and drag it by `step` per move.
fn double_tap_and_drag(touch: &mut Touch, step: f32, moves: usize) -> Vec<tactile_input::MotionEvent> {
    let mut events = vec![touch.down(0, 500.0, 500.0), touch.up()];
    touch.wait(80);
    events.push(touch.down(0, 500.0, 500.0));
    for _ in 0..moves {
        events.push(touch.move_by(0.0, step));
    }
    events
}

#[test]
fn spreading_fingers_scale_in() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    pinch(&mut detector, &mut Touch::new(), 100.0, 10.0, 10);

    let calls = calls.borrow();
    assert_eq!(calls.first(), Some(&Call::Begin { quick: false }));
    assert_eq!(calls.last(), Some(&Call::End));
    assert_eq!(calls.iter().filter(|c| c.is_begin()).count(), 1);
    let scales: Vec<_> = calls
        .iter()
        .filter_map(|call| match call {
            Call::Scale { factor, scaling_out } => Some((*factor, *scaling_out)),
            _ => None,
        })
        .collect();
    assert_eq!(scales.len(), 8);
    assert!(scales.iter().all(|(factor, out)| *factor > 1.0 && !out));
    assert_eq!(detector.scale_factor(), 1.0);
    assert!(!detector.is_in_progress());
}

#[test]
fn closing_fingers_scale_out() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    pinch(&mut detector, &mut Touch::new(), 300.0, -10.0, 10);

    let calls = calls.borrow();
    assert_eq!(calls.iter().filter(|c| c.is_begin()).count(), 1);
    assert!(calls.iter().all(|call| match call {
        Call::Scale { factor, scaling_out } => *factor < 1.0 && *scaling_out,
        _ => true,
    }));
}

#[test]
fn begins_once_the_span_changed_enough() {
    let calls = log();
    let recorder = Recorder::new(&calls);
    let deltas = recorder.begin_deltas.clone();
    let mut detector = detector_with(recorder);
    detector.set_span_since_start_threshold(100.0);
    pinch(&mut detector, &mut Touch::new(), 100.0, 10.0, 10);

    // The span grows 20 px per move; the first move sets the start span.
    assert_eq!(*deltas.borrow(), vec![100.0]);
    let scales = calls
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::Scale { .. }))
        .count();
    assert_eq!(scales, 4);
}

#[test]
fn close_fingers_are_ignored() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    pinch(&mut detector, &mut Touch::new(), 20.0, 2.0, 10);
    assert!(calls.borrow().is_empty());
}

#[test]
fn interrupted_pinch_must_qualify_again() {
    let calls = log();
    let mut recorder = Recorder::new(&calls);
    recorder.interrupt_after_scales = Some(2);
    let mut detector = detector_with(recorder);
    pinch(&mut detector, &mut Touch::new(), 100.0, 10.0, 10);

    let calls = calls.borrow();
    let phases: Vec<_> = calls
        .iter()
        .filter(|c| !matches!(c, Call::Scale { .. }))
        .cloned()
        .collect();
    assert_eq!(
        phases,
        vec![
            Call::Begin { quick: false },
            Call::End,
            Call::Begin { quick: false },
            Call::End,
        ]
    );
    // Moves 2 and 6 begin, move 5 only ends the interrupted gesture.
    assert_eq!(calls.len(), 2 + 2 + 6);
}

#[test]
fn double_tap_and_drag_down_quick_scales_in() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    let mut touch = Touch::new();
    for event in double_tap_and_drag(&mut touch, 10.0, 6) {
        detector.on_touch_event(&event);
    }
    assert!(detector.is_quick_scale());
    assert_eq!(detector.quick_scale_anchor(), Some(Point::new(500.0, 500.0)));
    detector.on_touch_event(&touch.up());

    let calls = calls.borrow();
    assert_eq!(calls.first(), Some(&Call::Begin { quick: true }));
    assert_eq!(calls.last(), Some(&Call::End));
    assert_eq!(calls.len(), 1 + 4 + 1);
    assert!(calls.iter().all(|call| match call {
        Call::Scale { factor, scaling_out } => *factor > 1.0 && !scaling_out,
        _ => true,
    }));
    assert!(!detector.is_quick_scale());
    assert_eq!(detector.quick_scale_anchor(), None);
}

#[test]
fn dragging_up_quick_scales_out() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    let mut touch = Touch::new();
    for event in double_tap_and_drag(&mut touch, -10.0, 6) {
        detector.on_touch_event(&event);
    }
    detector.on_touch_event(&touch.up());

    let calls = calls.borrow();
    assert_eq!(calls.first(), Some(&Call::Begin { quick: true }));
    assert!(calls.iter().all(|call| match call {
        Call::Scale { factor, scaling_out } => *factor < 1.0 && *scaling_out,
        _ => true,
    }));
}

#[test]
fn quick_scale_can_be_disabled() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    detector.set_quick_scale_enabled(false);
    let mut touch = Touch::new();
    for event in double_tap_and_drag(&mut touch, 10.0, 6) {
        detector.on_touch_event(&event);
    }
    detector.on_touch_event(&touch.up());

    assert!(calls.borrow().is_empty());
    assert!(!detector.is_quick_scale());
}

#[test]
fn second_finger_ends_a_quick_scale() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    let mut touch = Touch::new();
    for event in double_tap_and_drag(&mut touch, 10.0, 4) {
        detector.on_touch_event(&event);
    }
    assert!(detector.is_in_progress());

    detector.on_touch_event(&touch.pointer_down(1, 700.0, 700.0));
    assert!(!detector.is_in_progress());
    assert!(!detector.is_quick_scale());
    assert_eq!(calls.borrow().last(), Some(&Call::End));

    // Lifting the second finger does not bring the quick-scale back.
    detector.on_touch_event(&touch.pointer_up(1));
    detector.on_touch_event(&touch.move_by(0.0, 10.0));
    detector.on_touch_event(&touch.move_by(0.0, 10.0));
    detector.on_touch_event(&touch.up());

    let calls = calls.borrow();
    assert_eq!(calls.iter().filter(|c| c.is_begin()).count(), 1);
    assert_eq!(calls.iter().filter(|c| c.is_end()).count(), 1);
}

#[test]
fn slow_second_tap_is_not_a_quick_scale() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    let mut touch = Touch::new();
    detector.on_touch_event(&touch.down(0, 500.0, 500.0));
    detector.on_touch_event(&touch.up());
    touch.wait(400);
    detector.on_touch_event(&touch.down(0, 500.0, 500.0));
    for _ in 0..5 {
        detector.on_touch_event(&touch.move_by(0.0, 10.0));
    }
    detector.on_touch_event(&touch.up());

    assert!(calls.borrow().is_empty());
}

#[test]
fn two_finger_span_is_the_finger_distance() {
    let mut detector = detector_with(Recorder::new(&log()));
    let mut touch = Touch::new();
    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 600.0, 500.0));

    detector.on_touch_event(&touch.move_to(&[(0, 399.0, 500.0), (1, 601.0, 500.0)]));
    assert_close(detector.scale_span(), 202.0);
    assert_close(detector.start_span(), 202.0);
    assert_close(detector.span_delta_since_start(), 0.0);

    detector.on_touch_event(&touch.move_to(&[(0, 300.0, 400.0), (1, 600.0, 800.0)]));
    assert_close(detector.scale_span(), 500.0);
    assert_close(detector.previous_scale_span(), 500.0);
    assert_close(detector.start_span(), 202.0);
    assert_close(detector.span_delta_since_start(), 298.0);
}

#[test]
fn three_finger_span_doubles_the_mean_deviation() {
    let mut detector = detector_with(Recorder::new(&log()));
    let mut touch = Touch::new();
    detector.on_touch_event(&touch.down(0, 200.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 500.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(2, 800.0, 500.0));

    // Deviations from the focal x of 500 are 300, 0 and 300.
    detector.on_touch_event(&touch.move_by(0.0, 0.0));
    assert_close(detector.scale_span(), 400.0);
    assert_close(detector.start_span(), 400.0);

    // Deviations of 360, 0 and 360.
    detector.on_touch_event(&touch.move_to(&[(0, 140.0, 500.0), (2, 860.0, 500.0)]));
    assert_close(detector.scale_span(), 480.0);
    assert_close(detector.span_delta_since_start(), 80.0);
}

#[test]
fn quick_scale_span_is_twice_the_distance_to_the_anchor() {
    let mut detector = detector_with(Recorder::new(&log()));
    let mut touch = Touch::new();
    for event in double_tap_and_drag(&mut touch, 10.0, 3) {
        detector.on_touch_event(&event);
    }

    assert!(detector.is_quick_scale());
    assert_close(detector.start_span(), 20.0);
    assert_close(detector.scale_span(), 60.0);
    assert_close(detector.span_delta_since_start(), 40.0);
}

#[test]
fn cancel_ends_a_running_quick_scale() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    let mut touch = Touch::new();
    for event in double_tap_and_drag(&mut touch, 10.0, 4) {
        detector.on_touch_event(&event);
    }
    assert!(detector.is_in_progress());

    detector.on_touch_event(&touch.cancel());

    assert!(!detector.is_in_progress());
    assert!(!detector.is_quick_scale());
    let calls = calls.borrow();
    assert_eq!(calls.iter().filter(|c| c.is_begin()).count(), 1);
    assert_eq!(calls.iter().filter(|c| c.is_end()).count(), 1);
    assert_eq!(calls.last(), Some(&Call::End));
}

#[test]
fn cancel_before_the_drag_drops_the_quick_scale() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    let mut touch = Touch::new();
    for event in double_tap_and_drag(&mut touch, 10.0, 0) {
        detector.on_touch_event(&event);
    }
    assert!(detector.is_quick_scale());
    assert!(!detector.is_in_progress());

    detector.on_touch_event(&touch.cancel());

    assert!(!detector.is_quick_scale());
    assert!(calls.borrow().is_empty());
}

#[test]
fn cancel_ends_a_running_pinch() {
    let calls = log();
    let mut detector = detector_with(Recorder::new(&calls));
    let mut touch = Touch::new();
    detector.on_touch_event(&touch.down(0, 400.0, 500.0));
    detector.on_touch_event(&touch.pointer_down(1, 600.0, 500.0));
    for i in 1..=4 {
        let offset = 100.0 + 10.0 * i as f32;
        detector.on_touch_event(&touch.move_to(&[(0, 500.0 - offset, 500.0), (1, 500.0 + offset, 500.0)]));
    }
    assert!(detector.is_in_progress());

    detector.on_touch_event(&touch.cancel());

    assert!(!detector.is_in_progress());
    assert_eq!(detector.pointers_count(), 0);
    assert_eq!(calls.borrow().last(), Some(&Call::End));
    assert_eq!(calls.borrow().iter().filter(|c| c.is_end()).count(), 1);
}
