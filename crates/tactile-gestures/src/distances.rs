//! Value records describing pointer positions during a gesture.

use tactile_geometry::Point;
use tactile_input::PointerId;

/// Unordered pair of pointer ids: `(a, b)` and `(b, a)` name the same pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerDistancePair {
    low: PointerId,
    high: PointerId,
}

impl PointerDistancePair {
    pub fn new(first: PointerId, second: PointerId) -> Self {
        Self {
            low: first.min(second),
            high: first.max(second),
        }
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.low == id || self.high == id
    }
}

/// Previous and current offsets between the two pointers of a pair.
///
/// Offsets are `second - first` in the order pointers went down.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MultiFingerDistances {
    pub prev_diff_x: f32,
    pub prev_diff_y: f32,
    pub curr_diff_x: f32,
    pub curr_diff_y: f32,
}

impl MultiFingerDistances {
    pub fn new(previous: Point, current: Point) -> Self {
        Self {
            prev_diff_x: previous.x,
            prev_diff_y: previous.y,
            curr_diff_x: current.x,
            curr_diff_y: current.y,
        }
    }

    pub fn prev_span(&self) -> f32 {
        self.prev_diff_x.hypot(self.prev_diff_y)
    }

    pub fn curr_span(&self) -> f32 {
        self.curr_diff_x.hypot(self.curr_diff_y)
    }

    /// Angle of the current offset against the horizontal axis, in `[0, 180]`.
    pub fn curr_angle_degrees(&self) -> f32 {
        self.curr_diff_y.atan2(self.curr_diff_x).abs().to_degrees()
    }
}

/// Positions of a single pointer since it went down.
///
/// Distances use the `reference - current` convention, so a pointer moving
/// right or down reports negative values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveDistances {
    initial: Point,
    previous: Point,
    current: Point,
}

impl MoveDistances {
    pub fn new(initial: Point) -> Self {
        Self {
            initial,
            previous: initial,
            current: initial,
        }
    }

    pub fn add_new_position(&mut self, position: Point) {
        self.previous = self.current;
        self.current = position;
    }

    pub fn initial(&self) -> Point {
        self.initial
    }

    pub fn previous(&self) -> Point {
        self.previous
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn distance_x_since_last(&self) -> f32 {
        self.previous.x - self.current.x
    }

    pub fn distance_y_since_last(&self) -> f32 {
        self.previous.y - self.current.y
    }

    pub fn distance_x_since_start(&self) -> f32 {
        self.initial.x - self.current.x
    }

    pub fn distance_y_since_start(&self) -> f32 {
        self.initial.y - self.current.y
    }
}
