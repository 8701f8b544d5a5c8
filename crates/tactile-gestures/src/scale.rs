use tactile_geometry::Point;
use tactile_input::{MotionAction, MotionEvent};

use crate::constants::QUICK_SCALE_MULTIPLIER;
use crate::detector::{notify, Arbiter, GestureDetector, HasListener};
use crate::multi_finger::{multi_finger_accessors, MultiFingerDetector, MultiFingerTracker};
use crate::progressive::{
    active_types, analyze_progressive, gesture_started, gesture_stopped, progressive_accessors,
    stop_if_in_progress, Progress, ProgressiveDetector,
};
use crate::tap::{TapEvent, TapRecognizer, TapThresholds};
use crate::{GestureType, GestureTypeSet, GesturesConfig};

/// Callbacks of [`ScaleDetector`].
pub trait ScaleListener {
    fn on_scale_begin(&mut self, _detector: &mut ScaleDetector) -> bool {
        true
    }

    /// Read [`ScaleDetector::scale_factor`] for the change since the
    /// previous call.
    fn on_scale(&mut self, _detector: &mut ScaleDetector) -> bool {
        false
    }

    fn on_scale_end(&mut self, _detector: &mut ScaleDetector, _velocity_x: f32, _velocity_y: f32) {}
}

/// Two-finger pinch, and quick-scale: a double tap whose second pointer
/// stays down and drags vertically.
pub struct ScaleDetector {
    fingers: MultiFingerTracker,
    progress: Progress,
    listener: Option<Box<dyn ScaleListener>>,
    taps: TapRecognizer,
    quick_scale_enabled: bool,
    quick_scale: bool,
    quick_scale_anchor: Point,
    start_span: f32,
    current_span: f32,
    previous_span: f32,
    span_delta_since_start: f32,
    span_since_start_threshold: f32,
    scale_factor: f32,
    is_scaling_out: bool,
}

impl Default for ScaleDetector {
    fn default() -> Self {
        Self::new(&GesturesConfig::default())
    }
}

impl ScaleDetector {
    pub fn new(config: &GesturesConfig) -> Self {
        let mut taps = TapRecognizer::new(TapThresholds::from_config(config));
        taps.set_long_press_enabled(config.long_press_enabled);
        Self {
            fingers: MultiFingerTracker::new(
                config.min_span_px(),
                config.edge_slop_px(),
                config.display_size,
            ),
            progress: Progress::default(),
            listener: None,
            taps,
            quick_scale_enabled: config.quick_scale_enabled,
            quick_scale: false,
            quick_scale_anchor: Point::ZERO,
            start_span: 0.0,
            current_span: 0.0,
            previous_span: 0.0,
            span_delta_since_start: 0.0,
            span_since_start_threshold: config.scale_span_since_start_threshold_px(),
            scale_factor: 1.0,
            is_scaling_out: false,
        }
    }

    pub fn set_listener(&mut self, listener: impl ScaleListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn remove_listener(&mut self) {
        self.listener = None;
    }

    /// Scale change since the previous `on_scale`, 1 outside a gesture.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn is_scaling_out(&self) -> bool {
        self.is_scaling_out
    }

    /// Span the current gesture started with.
    pub fn start_span(&self) -> f32 {
        self.start_span
    }

    pub fn scale_span(&self) -> f32 {
        self.current_span
    }

    pub fn previous_scale_span(&self) -> f32 {
        self.previous_span
    }

    pub fn span_delta_since_start(&self) -> f32 {
        self.span_delta_since_start
    }

    pub fn span_since_start_threshold(&self) -> f32 {
        self.span_since_start_threshold
    }

    /// Pixels the span has to change before the gesture starts.
    pub fn set_span_since_start_threshold(&mut self, threshold: f32) {
        self.span_since_start_threshold = threshold;
    }

    pub fn is_quick_scale_enabled(&self) -> bool {
        self.quick_scale_enabled
    }

    pub fn set_quick_scale_enabled(&mut self, enabled: bool) {
        self.quick_scale_enabled = enabled;
        if !enabled {
            self.quick_scale = false;
        }
    }

    /// True while a double tap armed or drives a quick-scale.
    pub fn is_quick_scale(&self) -> bool {
        self.quick_scale
    }

    /// Position of the double tap that armed the quick-scale.
    pub fn quick_scale_anchor(&self) -> Option<Point> {
        self.quick_scale.then_some(self.quick_scale_anchor)
    }

    multi_finger_accessors!();
    progressive_accessors!();

    fn calculate_scale_factor(&self) -> f32 {
        if !self.quick_scale {
            return if self.previous_span > 0.0 {
                self.current_span / self.previous_span
            } else {
                1.0
            };
        }
        if self.previous_span <= 0.0 {
            return 1.0;
        }
        let y = self
            .fingers
            .core
            .current_event()
            .map_or(self.quick_scale_anchor.y, |event| event.y());
        let anchor = self.quick_scale_anchor.y;
        // Dragging down scales in, dragging up scales out.
        let scaling_in = (y > anchor && self.current_span > self.previous_span)
            || (y < anchor && self.current_span < self.previous_span);
        let span_diff = (1.0 - self.current_span / self.previous_span).abs() * QUICK_SCALE_MULTIPLIER;
        if scaling_in {
            1.0 + span_diff
        } else {
            1.0 - span_diff
        }
    }

    fn update_quick_scale_before(&mut self, action: MotionAction) {
        if !self.quick_scale_enabled {
            return;
        }
        match action {
            MotionAction::PointerDown | MotionAction::Cancel => {
                if self.progress.is_in_progress() {
                    self.interrupt();
                } else {
                    self.quick_scale = false;
                }
            }
            MotionAction::Up if !self.progress.is_in_progress() => self.quick_scale = false,
            _ => {}
        }
    }

    fn feed_taps(&mut self, event: &MotionEvent) -> bool {
        let mut handled = false;
        for tap in self.taps.on_touch_event(event) {
            if let TapEvent::DoubleTapEvent(tap_event) = tap {
                handled = true;
                if self.quick_scale_enabled && tap_event.action() == MotionAction::Down {
                    self.quick_scale = true;
                    self.quick_scale_anchor = tap_event.position(0).unwrap_or(Point::ZERO);
                    log::debug!(
                        "quick scale armed at ({}, {})",
                        self.quick_scale_anchor.x,
                        self.quick_scale_anchor.y
                    );
                }
            }
        }
        handled
    }
}

impl HasListener for ScaleDetector {
    type Listener = dyn ScaleListener;

    fn listener_slot(&mut self) -> &mut Option<Box<dyn ScaleListener>> {
        &mut self.listener
    }
}

impl MultiFingerDetector for ScaleDetector {
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
        if self.quick_scale {
            1
        } else {
            2
        }
    }

    fn is_sloppy_gesture(&self) -> bool {
        self.fingers.is_sloppy() || (!self.quick_scale && self.fingers.pointers_count() < 2)
    }

    fn own_active_types(&self) -> GestureTypeSet {
        active_types(self)
    }

    fn analyze_movement(&mut self, arbiter: &Arbiter<'_>) -> bool {
        let in_progress = self.progress.is_in_progress();
        if in_progress && self.quick_scale && self.fingers.pointers_count() > 1 {
            // Another finger landed during a quick-scale; a pinch may follow.
            gesture_stopped(self);
            return false;
        }

        let Some(event) = self.fingers.core.current_event() else {
            return false;
        };
        let focal = if self.quick_scale {
            self.quick_scale_anchor
        } else {
            self.fingers.focal_point()
        };
        // Twice the mean deviation from the focal point, so a two finger
        // span equals the distance between the fingers.
        let deviations = event.pointers().iter().fold(Point::ZERO, |acc, pointer| {
            acc + Point::new(
                (pointer.position.x - focal.x).abs(),
                (pointer.position.y - focal.y).abs(),
            )
        });
        let spans = deviations * (2.0 / event.pointer_count() as f32);

        self.current_span = if self.quick_scale {
            spans.y
        } else {
            spans.x.hypot(spans.y)
        };
        if self.start_span == 0.0 {
            self.start_span = self.current_span;
        }
        self.span_delta_since_start = (self.start_span - self.current_span).abs();
        self.scale_factor = self.calculate_scale_factor();
        self.is_scaling_out = self.scale_factor < 1.0;

        let gesture = if self.quick_scale {
            GestureType::QuickScale
        } else {
            GestureType::Scale
        };
        let mut handled = false;
        if in_progress {
            if self.current_span > 0.0 {
                handled = notify(self, false, |listener, detector| listener.on_scale(detector));
            }
        } else if self.can_execute(gesture, arbiter)
            && self.span_delta_since_start >= self.span_since_start_threshold
        {
            handled = notify(self, false, |listener, detector| {
                listener.on_scale_begin(detector)
            });
            if handled {
                gesture_started(self);
            }
        }

        self.previous_span = self.current_span;
        handled
    }

    fn on_missing_events(&mut self) {
        stop_if_in_progress(self);
    }
}

impl ProgressiveDetector for ScaleDetector {
    const NAME: &'static str = "scale";

    fn progress(&self) -> &Progress {
        &self.progress
    }

    fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    fn reset(&mut self) {
        self.start_span = 0.0;
        self.span_delta_since_start = 0.0;
        self.current_span = 0.0;
        self.previous_span = 0.0;
        self.scale_factor = 1.0;
    }

    fn notify_stopped(&mut self, velocity: Point) {
        notify(self, (), |listener, detector| {
            listener.on_scale_end(detector, velocity.x, velocity.y)
        });
        self.quick_scale = false;
    }
}

impl GestureDetector for ScaleDetector {
    fn handled_types(&self) -> GestureTypeSet {
        GestureTypeSet::of(&[GestureType::Scale, GestureType::QuickScale])
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
        self.update_quick_scale_before(event.action());
        let handled = analyze_progressive(self, event, arbiter);
        self.feed_taps(event) || handled
    }
}
