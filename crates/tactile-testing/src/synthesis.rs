//! Synthesis of complete motion event streams
//!
//! Every generated stream starts with `Down`, ends with `Up` and keeps the
//! pointer bookkeeping consistent, so detectors see the same sequence a touch
//! screen would deliver. The preset gestures (`pinch`, `quick_scale`,
//! `move_by`, `multi_finger_tap`) cover the common cases; [`MotionScript`]
//! builds anything else.
//!
//! # Example
//!
//! ```
//! use tactile_geometry::Point;
//! use tactile_gestures::GesturesManager;
//! use tactile_testing::synthesis::pinch;
//!
//! let mut manager = GesturesManager::new();
//! let script = pinch(Point::new(500.0, 500.0), 250.0, 500.0).unwrap();
//! script.play(&mut manager);
//! ```

use tactile_geometry::Point;
use tactile_gestures::{GestureDetector, GesturesManager};
use tactile_input::{MotionAction, MotionEvent, Pointer, PointerId};

use crate::ScriptError;

/// Milliseconds between two synthesised events.
pub const EVENT_INTERVAL_MS: u64 = 10;

/// Length of the movement phase of the preset gestures.
pub const DEFAULT_GESTURE_DURATION_MS: u64 = 500;

/// Rest before lifting the finger of a gesture that should end without
/// velocity.
pub const HOLD_MS: u64 = 100;

/// Time between the first `Up` and the second `Down` of a quick-scale.
pub const DOUBLE_TAP_GAP_MS: u64 = 90;

/// Horizontal distance of the interrupting finger from the dragging one.
pub const INTERRUPTION_OFFSET: f32 = 200.0;

const MOVE_STEPS: u64 = DEFAULT_GESTURE_DURATION_MS / EVENT_INTERVAL_MS;

/// Time source of a script.
///
/// [`tick`](GestureClock::tick) stamps one event and moves on by the event
/// interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureClock {
    now: u64,
    interval: u64,
}

impl Default for GestureClock {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl GestureClock {
    pub fn starting_at(now: u64) -> Self {
        Self {
            now,
            interval: EVENT_INTERVAL_MS,
        }
    }

    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Returns the current time and advances by one interval.
    pub fn tick(&mut self) -> u64 {
        let now = self.now;
        self.now += self.interval;
        now
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

/// A scripted touch sequence.
///
/// Pointer positions persist between steps. New pointers get the smallest
/// free id, so every gesture starts over with pointer 0.
#[derive(Clone, Debug, Default)]
pub struct MotionScript {
    clock: GestureClock,
    down_time: u64,
    pointers: Vec<Pointer>,
    events: Vec<MotionEvent>,
}

impl MotionScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: GestureClock) -> Self {
        Self {
            clock,
            down_time: clock.now(),
            ..Self::default()
        }
    }

    pub fn clock(&self) -> &GestureClock {
        &self.clock
    }

    /// Time the next event will carry.
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn wait(&mut self, ms: u64) {
        self.clock.advance(ms);
    }

    /// Pointers currently down.
    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|pointer| pointer.id == id)
            .map(|pointer| pointer.position)
    }

    pub fn events(&self) -> &[MotionEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<MotionEvent> {
        self.events
    }

    /// Puts the first finger of a new gesture down.
    pub fn down(&mut self, position: Point) -> Result<PointerId, ScriptError> {
        self.pointers.clear();
        self.down_time = self.clock.now();
        let id = self.free_id();
        self.pointers.push(Pointer::at(id, position));
        self.emit(MotionAction::Down, 0)?;
        Ok(id)
    }

    /// Adds a finger to the running gesture.
    pub fn pointer_down(&mut self, position: Point) -> Result<PointerId, ScriptError> {
        let id = self.free_id();
        self.pointers.push(Pointer::at(id, position));
        let index = self.pointers.len() - 1;
        if let Err(err) = self.emit(MotionAction::PointerDown, index) {
            self.pointers.pop();
            return Err(err);
        }
        Ok(id)
    }

    /// Moves the listed pointers; the others stay where they are.
    pub fn move_to(&mut self, moves: &[(PointerId, Point)]) -> Result<(), ScriptError> {
        if let Some(&(id, _)) = moves.iter().find(|(id, _)| self.position(*id).is_none()) {
            return Err(ScriptError::UnknownPointer { id });
        }
        for &(id, position) in moves {
            if let Some(pointer) = self.pointers.iter_mut().find(|pointer| pointer.id == id) {
                pointer.position = position;
            }
        }
        self.emit(MotionAction::Move, 0)
    }

    /// Moves every pointer by the same offset.
    pub fn move_by(&mut self, delta: Point) -> Result<(), ScriptError> {
        for pointer in &mut self.pointers {
            pointer.position += delta;
        }
        self.emit(MotionAction::Move, 0)
    }

    pub fn pointer_up(&mut self, id: PointerId) -> Result<(), ScriptError> {
        let index = self
            .pointers
            .iter()
            .position(|pointer| pointer.id == id)
            .ok_or(ScriptError::UnknownPointer { id })?;
        self.emit(MotionAction::PointerUp, index)?;
        self.pointers.remove(index);
        Ok(())
    }

    /// Lifts the last finger.
    pub fn up(&mut self) -> Result<(), ScriptError> {
        self.emit(MotionAction::Up, 0)?;
        self.pointers.clear();
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), ScriptError> {
        self.emit(MotionAction::Cancel, 0)?;
        self.pointers.clear();
        Ok(())
    }

    /// Feeds every event to `manager`. Returns whether any event was handled.
    pub fn play(&self, manager: &mut GesturesManager) -> bool {
        self.events
            .iter()
            .fold(false, |handled, event| manager.on_touch_event(event) || handled)
    }

    /// Feeds every event to a single detector.
    pub fn play_on(&self, detector: &mut impl GestureDetector) -> bool {
        self.events
            .iter()
            .fold(false, |handled, event| detector.on_touch_event(event) || handled)
    }

    fn free_id(&self) -> PointerId {
        let mut id = 0;
        while self.pointers.iter().any(|pointer| pointer.id == id) {
            id += 1;
        }
        id
    }

    fn emit(&mut self, action: MotionAction, action_index: usize) -> Result<(), ScriptError> {
        let event = MotionEvent::builder(action)
            .down_time(self.down_time)
            .event_time(self.clock.now())
            .action_index(action_index)
            .pointers(self.pointers.iter().copied())
            .build()?;
        self.clock.tick();
        self.events.push(event);
        Ok(())
    }
}

/// Two fingers on a horizontal line through `center`, `start_span` apart,
/// moving symmetrically until they are `end_span` apart.
pub fn pinch(center: Point, start_span: f32, end_span: f32) -> Result<MotionScript, ScriptError> {
    let offset = |span: f32| Point::new(span / 2.0, 0.0);
    let mut script = MotionScript::new();
    let first = script.down(center - offset(start_span))?;
    let second = script.pointer_down(center + offset(start_span))?;

    let step = (end_span - start_span) / MOVE_STEPS as f32;
    for i in 1..=MOVE_STEPS {
        let span = start_span + step * i as f32;
        script.move_to(&[(first, center - offset(span)), (second, center + offset(span))])?;
    }
    script.pointer_up(second)?;
    script.up()?;
    Ok(script)
}

/// A second finger landing in the middle of a quick-scale drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interruption {
    /// The second finger stays down and follows the drag to the end.
    Permanent,
    /// The second finger lifts right after landing and the drag goes on.
    Temporary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuickScaleOptions {
    /// When false the finger rests before lifting, so the gesture ends
    /// without velocity.
    pub with_velocity: bool,
    pub interruption: Option<Interruption>,
}

impl Default for QuickScaleOptions {
    fn default() -> Self {
        Self {
            with_velocity: true,
            interruption: None,
        }
    }
}

impl QuickScaleOptions {
    pub fn without_velocity(mut self) -> Self {
        self.with_velocity = false;
        self
    }

    pub fn interrupted(mut self, interruption: Interruption) -> Self {
        self.interruption = Some(interruption);
        self
    }
}

/// Taps `center`, puts the finger down again and drags it vertically by
/// `delta_y`.
pub fn quick_scale(
    center: Point,
    delta_y: f32,
    options: QuickScaleOptions,
) -> Result<MotionScript, ScriptError> {
    let mut script = MotionScript::new();
    script.down(center)?;
    script.up()?;
    script.wait(DOUBLE_TAP_GAP_MS - EVENT_INTERVAL_MS);
    let finger = script.down(center)?;

    let step = Point::new(0.0, delta_y / MOVE_STEPS as f32);
    let mut helper = None;
    for i in 1..=MOVE_STEPS {
        script.move_by(step)?;
        let Some(interruption) = options.interruption else {
            continue;
        };
        if i != MOVE_STEPS / 2 {
            continue;
        }
        let position = script
            .position(finger)
            .ok_or(ScriptError::UnknownPointer { id: finger })?;
        let id = script.pointer_down(position + Point::new(INTERRUPTION_OFFSET, 0.0))?;
        match interruption {
            Interruption::Temporary => script.pointer_up(id)?,
            Interruption::Permanent => helper = Some(id),
        }
    }

    if !options.with_velocity {
        script.wait(HOLD_MS);
    }
    if let Some(id) = helper {
        script.pointer_up(id)?;
    }
    script.up()?;
    Ok(script)
}

/// One finger dragged from `start` by `(dx, dy)`.
pub fn move_by(start: Point, dx: f32, dy: f32, with_velocity: bool) -> Result<MotionScript, ScriptError> {
    let mut script = MotionScript::new();
    script.down(start)?;
    let step = Point::new(dx / MOVE_STEPS as f32, dy / MOVE_STEPS as f32);
    for _ in 0..MOVE_STEPS {
        script.move_by(step)?;
    }
    if !with_velocity {
        script.wait(HOLD_MS);
    }
    script.up()?;
    Ok(script)
}

/// `fingers` fingers on a horizontal line through `center`, spread over
/// `span`, touching one after another and lifting in reverse order.
pub fn multi_finger_tap(center: Point, span: f32, fingers: usize) -> Result<MotionScript, ScriptError> {
    if fingers == 0 {
        return Err(ScriptError::NoFingers);
    }
    let gap = if fingers > 1 {
        span / (fingers - 1) as f32
    } else {
        0.0
    };
    let left = center.x - gap * (fingers - 1) as f32 / 2.0;
    let position = |i: usize| Point::new(left + gap * i as f32, center.y);

    let mut script = MotionScript::new();
    let mut ids = vec![script.down(position(0))?];
    for i in 1..fingers {
        ids.push(script.pointer_down(position(i))?);
    }
    for id in ids.into_iter().skip(1).rev() {
        script.pointer_up(id)?;
    }
    script.up()?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(script: &MotionScript) -> Vec<MotionAction> {
        script.events().iter().map(MotionEvent::action).collect()
    }

    #[test]
    fn clock_ticks_by_the_interval() {
        let mut clock = GestureClock::starting_at(100).with_interval(16);
        assert_eq!(clock.tick(), 100);
        assert_eq!(clock.tick(), 116);
        clock.advance(4);
        assert_eq!(clock.now(), 136);
    }

    #[test]
    fn pinch_is_a_complete_two_finger_stream() {
        let script = pinch(Point::new(500.0, 500.0), 200.0, 400.0).unwrap();
        let events = script.events();

        assert_eq!(events.len(), 54);
        assert_eq!(events[0].action(), MotionAction::Down);
        assert_eq!(events[1].action(), MotionAction::PointerDown);
        assert!(events[2..52]
            .iter()
            .all(|event| event.action() == MotionAction::Move));
        assert_eq!(events[52].action(), MotionAction::PointerUp);
        assert_eq!(events[53].action(), MotionAction::Up);

        assert_eq!(events[1].position(0), Some(Point::new(400.0, 500.0)));
        assert_eq!(events[1].position(1), Some(Point::new(600.0, 500.0)));
        assert_eq!(events[51].position(0), Some(Point::new(300.0, 500.0)));
        assert_eq!(events[51].position(1), Some(Point::new(700.0, 500.0)));
        assert_eq!(events[53].event_time(), 530);
        assert!(events.iter().all(|event| event.down_time() == 0));
    }

    #[test]
    fn quick_scale_is_a_double_tap_then_drag() {
        let script = quick_scale(Point::new(500.0, 500.0), 100.0, QuickScaleOptions::default()).unwrap();
        let events = script.events();

        assert_eq!(events.len(), 54);
        assert_eq!(&actions(&script)[..3], [MotionAction::Down, MotionAction::Up, MotionAction::Down]);
        assert_eq!(events[2].event_time() - events[1].event_time(), DOUBLE_TAP_GAP_MS);
        assert_eq!(events[2].down_time(), events[2].event_time());
        assert_eq!(events[52].position(0), Some(Point::new(500.0, 600.0)));
        assert_eq!(events[53].event_time() - events[52].event_time(), EVENT_INTERVAL_MS);
    }

    #[test]
    fn quick_scale_interruptions() {
        let temporary = quick_scale(
            Point::new(500.0, 500.0),
            100.0,
            QuickScaleOptions::default().interrupted(Interruption::Temporary),
        )
        .unwrap();
        let actions_temporary = actions(&temporary);
        let landed = actions_temporary
            .iter()
            .position(|action| *action == MotionAction::PointerDown)
            .unwrap();
        assert_eq!(actions_temporary[landed + 1], MotionAction::PointerUp);
        assert_eq!(
            temporary.events()[landed].position(1),
            Some(Point::new(700.0, 550.0))
        );

        let permanent = quick_scale(
            Point::new(500.0, 500.0),
            100.0,
            QuickScaleOptions::default()
                .interrupted(Interruption::Permanent)
                .without_velocity(),
        )
        .unwrap();
        let events = permanent.events();
        let last = events.len() - 1;
        assert_eq!(events[last - 1].action(), MotionAction::PointerUp);
        assert_eq!(events[last - 1].position(1), Some(Point::new(700.0, 600.0)));
        assert_eq!(
            events[last - 1].event_time() - events[last - 2].event_time(),
            EVENT_INTERVAL_MS + HOLD_MS
        );
    }

    #[test]
    fn multi_finger_tap_lifts_in_reverse_order() {
        let script = multi_finger_tap(Point::new(500.0, 500.0), 400.0, 3).unwrap();
        assert_eq!(
            actions(&script),
            [
                MotionAction::Down,
                MotionAction::PointerDown,
                MotionAction::PointerDown,
                MotionAction::PointerUp,
                MotionAction::PointerUp,
                MotionAction::Up,
            ]
        );
        let all_down = &script.events()[2];
        assert_eq!(all_down.position(0), Some(Point::new(300.0, 500.0)));
        assert_eq!(all_down.position(2), Some(Point::new(700.0, 500.0)));
        assert_eq!(script.events()[3].action_pointer_id(), 2);
        assert_eq!(multi_finger_tap(Point::ZERO, 0.0, 0).err(), Some(ScriptError::NoFingers));
    }

    #[test]
    fn script_reports_bad_steps() {
        let mut script = MotionScript::new();
        assert!(matches!(
            script.pointer_down(Point::ZERO),
            Err(ScriptError::Event(_))
        ));
        assert!(script.pointers().is_empty());

        script.down(Point::ZERO).unwrap();
        assert_eq!(
            script.pointer_up(7),
            Err(ScriptError::UnknownPointer { id: 7 })
        );
        assert_eq!(
            script.move_to(&[(3, Point::ZERO)]),
            Err(ScriptError::UnknownPointer { id: 3 })
        );
        assert_eq!(script.events().len(), 1);
    }

    #[test]
    fn ids_are_reused_after_a_lift() {
        let mut script = MotionScript::new();
        script.down(Point::ZERO).unwrap();
        let second = script.pointer_down(Point::new(10.0, 0.0)).unwrap();
        script.pointer_up(second).unwrap();
        assert_eq!(script.pointer_down(Point::new(20.0, 0.0)).unwrap(), second);
    }
}
