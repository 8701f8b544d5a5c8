//! Per-pointer velocity tracking for progressive gestures and flings.
//!
//! Every pointer keeps a ring buffer of timestamped positions. Velocity is
//! derived with the impulse strategy: each pair of consecutive samples imparts
//! kinetic energy, and the accumulated energy is turned back into a velocity.

use crate::{MotionAction, MotionEvent, PointerId};
use smallvec::SmallVec;
use tactile_geometry::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between two samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: Point,
}

#[derive(Clone)]
struct PointerHistory {
    id: PointerId,
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
    velocity: Point,
}

impl PointerHistory {
    fn new(id: PointerId) -> Self {
        Self {
            id,
            samples: [None; HISTORY_SIZE],
            index: 0,
            velocity: Point::ZERO,
        }
    }

    fn push(&mut self, time_ms: i64, position: Point) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Collects the samples still relevant to the newest one, newest first.
    fn recent(&self) -> SmallVec<[Sample; HISTORY_SIZE]> {
        let mut recent = SmallVec::new();
        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return recent,
        };

        let mut cursor = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous.time_ms - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            recent.push(sample);
            previous = sample;
            if recent.len() == HISTORY_SIZE {
                break;
            }
            cursor = cursor.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
        }
        recent
    }

    /// Velocity in pixels per `units` milliseconds.
    fn compute(&mut self, units: f32, max_velocity: f32) {
        let recent = self.recent();
        if recent.len() < 2 {
            self.velocity = Point::ZERO;
            return;
        }
        let per_ms = Point::new(
            impulse_velocity(&recent, |p| p.x),
            impulse_velocity(&recent, |p| p.y),
        );
        self.velocity = Point::new(
            clamp_velocity(per_ms.x * units, max_velocity),
            clamp_velocity(per_ms.y * units, max_velocity),
        );
    }
}

/// Impulse velocity (units per millisecond) along one axis.
///
/// `samples` is ordered newest first.
fn impulse_velocity(samples: &[Sample], axis: impl Fn(Point) -> f32) -> f32 {
    let oldest = samples.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let older = samples[i];
        let newer = samples[i - 1];
        let dt = (newer.time_ms - older.time_ms) as f32;
        if dt == 0.0 {
            continue;
        }
        let v_curr = (axis(newer.position) - axis(older.position)) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

fn clamp_velocity(velocity: f32, max_velocity: f32) -> f32 {
    if velocity.is_nan() {
        return 0.0;
    }
    if !max_velocity.is_finite() || max_velocity <= 0.0 {
        return velocity;
    }
    velocity.clamp(-max_velocity, max_velocity)
}

/// Tracks the velocity of every pointer of a gesture.
///
/// # Usage
/// ```ignore
/// let mut tracker = VelocityTracker::new();
/// tracker.add_movement(&event);
/// // ... more events ...
/// tracker.compute_current_velocity(1000.0, f32::MAX); // px/sec
/// let vx = tracker.x_velocity(id);
/// ```
#[derive(Clone, Default)]
pub struct VelocityTracker {
    pointers: SmallVec<[PointerHistory; 4]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the positions carried by `event`.
    ///
    /// A `Down` starts a fresh gesture. Pointers no longer present in the
    /// event are forgotten.
    pub fn add_movement(&mut self, event: &MotionEvent) {
        if event.action() == MotionAction::Down && !self.pointers.is_empty() {
            log::trace!(
                "new gesture at {}, discarding history of {} pointers",
                event.event_time(),
                self.pointers.len()
            );
            self.clear();
        }
        self.pointers.retain(|history| {
            let present = event.find_pointer_index(history.id).is_some();
            if !present {
                log::trace!("pointer {} left, forgetting its history", history.id);
            }
            present
        });

        let time_ms = event.event_time() as i64;
        for pointer in event.pointers() {
            match self.pointers.iter_mut().find(|h| h.id == pointer.id) {
                Some(history) => history.push(time_ms, pointer.position),
                None => {
                    let mut history = PointerHistory::new(pointer.id);
                    history.push(time_ms, pointer.position);
                    self.pointers.push(history);
                }
            }
        }
    }

    /// Recomputes every pointer's velocity.
    ///
    /// `units` selects the time base: 1 gives pixels per millisecond, 1000
    /// pixels per second. Each axis is clamped to `max_velocity`.
    pub fn compute_current_velocity(&mut self, units: f32, max_velocity: f32) {
        for history in &mut self.pointers {
            history.compute(units, max_velocity);
        }
    }

    /// Last computed horizontal velocity, 0 for an unknown pointer.
    pub fn x_velocity(&self, id: PointerId) -> f32 {
        self.velocity(id).x
    }

    /// Last computed vertical velocity, 0 for an unknown pointer.
    pub fn y_velocity(&self, id: PointerId) -> f32 {
        self.velocity(id).y
    }

    pub fn velocity(&self, id: PointerId) -> Point {
        self.pointers
            .iter()
            .find(|h| h.id == id)
            .map(|h| h.velocity)
            .unwrap_or(Point::ZERO)
    }

    pub fn is_tracking(&self, id: PointerId) -> bool {
        self.pointers.iter().any(|h| h.id == id)
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }
}

impl std::fmt::Debug for VelocityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.pointers.iter().map(|h| (h.id, h.velocity)))
            .finish()
    }
}
