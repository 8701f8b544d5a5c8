//! Pieces shared by every detector: the common trait, the event history and
//! the arbitration of mutually exclusive gestures.

use crate::{GestureType, GestureTypeSet};
use tactile_input::MotionEvent;

/// Decides whether a gesture may execute while other gestures are running.
///
/// `active` holds the types handled by progressive detectors that are
/// currently in progress. A gesture is blocked when any exclusive set that
/// contains it also contains an active type.
#[derive(Clone, Copy, Debug, Default)]
pub struct Arbiter<'a> {
    exclusive: &'a [GestureTypeSet],
    active: GestureTypeSet,
}

impl<'a> Arbiter<'a> {
    pub fn new(exclusive: &'a [GestureTypeSet], active: GestureTypeSet) -> Self {
        Self { exclusive, active }
    }

    /// An arbiter without exclusive sets, used by detectors driven alone.
    pub fn unrestricted() -> Arbiter<'static> {
        Arbiter {
            exclusive: &[],
            active: GestureTypeSet::EMPTY,
        }
    }

    /// `own_active` adds the caller's in-progress types to the active set.
    pub fn permits(&self, gesture: GestureType, own_active: GestureTypeSet) -> bool {
        let active = self.active.union(own_active);
        !self
            .exclusive
            .iter()
            .any(|set| set.contains(gesture) && set.intersects(active))
    }
}

/// A gesture detector fed with motion events.
pub trait GestureDetector {
    /// Types reported while this detector has a gesture in progress.
    /// Detectors without begin/end phases report an empty set.
    fn handled_types(&self) -> GestureTypeSet {
        GestureTypeSet::EMPTY
    }

    fn is_in_progress(&self) -> bool {
        false
    }

    fn is_enabled(&self) -> bool;

    /// Disabled detectors keep tracking pointers but never execute.
    fn set_enabled(&mut self, enabled: bool);

    /// Analyzes `event` and returns whether a listener handled it.
    fn process(&mut self, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool;

    /// Fires callbacks whose deadline is at or before `now` (milliseconds on
    /// the clock of the motion events).
    fn poll(&mut self, _now: u64, _arbiter: &Arbiter<'_>) -> bool {
        false
    }

    fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        self.process(event, &Arbiter::unrestricted())
    }
}

/// Current and previous event of the gesture chain.
#[derive(Clone, Debug)]
pub struct DetectorCore {
    enabled: bool,
    current: Option<MotionEvent>,
    previous: Option<MotionEvent>,
    gesture_duration: u64,
}

impl Default for DetectorCore {
    fn default() -> Self {
        Self {
            enabled: true,
            current: None,
            previous: None,
            gesture_duration: 0,
        }
    }
}

impl DetectorCore {
    pub(crate) fn record(&mut self, event: &MotionEvent) {
        self.previous = self.current.replace(event.clone());
        self.gesture_duration = event.gesture_duration();
    }

    pub fn current_event(&self) -> Option<&MotionEvent> {
        self.current.as_ref()
    }

    pub fn previous_event(&self) -> Option<&MotionEvent> {
        self.previous.as_ref()
    }

    /// Milliseconds between the first down and the most recent event.
    pub fn gesture_duration(&self) -> u64 {
        self.gesture_duration
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A detector owning a boxed listener that receives the detector itself.
pub(crate) trait HasListener {
    type Listener: ?Sized;

    fn listener_slot(&mut self) -> &mut Option<Box<Self::Listener>>;
}

/// Calls `f` with the listener lent out of its slot, so the listener can
/// mutate the detector. A listener replaced during the call is not restored.
pub(crate) fn notify<D, R>(
    detector: &mut D,
    default: R,
    f: impl FnOnce(&mut D::Listener, &mut D) -> R,
) -> R
where
    D: HasListener,
{
    let Some(mut listener) = detector.listener_slot().take() else {
        return default;
    };
    let result = f(&mut *listener, detector);
    let slot = detector.listener_slot();
    if slot.is_none() {
        *slot = Some(listener);
    }
    result
}
