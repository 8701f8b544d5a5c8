//! Multi-touch gesture detection for Tactile
//!
//! Detectors turn a stream of [`MotionEvent`](tactile_input::MotionEvent)s
//! into move, scale, quick-scale, rotate, shove, sideways shove, multi finger
//! tap and the standard single pointer gestures. [`GesturesManager`] owns one
//! detector of each kind and arbitrates mutually exclusive gestures.

pub mod constants;

mod config;
mod detector;
mod distances;
mod error;
mod gesture_type;
mod manager;
mod move_detector;
mod multi_finger;
mod multi_finger_tap;
mod permitted_actions;
mod progressive;
mod rotate;
mod scale;
mod shove;
mod sideways_shove;
mod standard;
mod tap;

pub use config::GesturesConfig;
pub use detector::{Arbiter, DetectorCore, GestureDetector};
pub use distances::{MoveDistances, MultiFingerDistances, PointerDistancePair};
pub use error::PointerIndexError;
pub use gesture_type::{GestureType, GestureTypeSet};
pub use manager::GesturesManager;
pub use move_detector::{MoveDetector, MoveListener};
pub use multi_finger::MultiFingerTracker;
pub use multi_finger_tap::{MultiFingerTapDetector, MultiFingerTapListener};
pub use progressive::Progress;
pub use rotate::{RotateDetector, RotateListener};
pub use scale::{ScaleDetector, ScaleListener};
pub use shove::{ShoveDetector, ShoveListener};
pub use sideways_shove::{SidewaysShoveDetector, SidewaysShoveListener};
pub use standard::{StandardGestureDetector, StandardGestureListener};
pub use tap::{TapEvent, TapEvents, TapRecognizer, TapThresholds};

pub mod prelude {
    pub use crate::config::GesturesConfig;
    pub use crate::detector::GestureDetector;
    pub use crate::gesture_type::{GestureType, GestureTypeSet};
    pub use crate::manager::GesturesManager;
    pub use crate::move_detector::{MoveDetector, MoveListener};
    pub use crate::multi_finger_tap::{MultiFingerTapDetector, MultiFingerTapListener};
    pub use crate::rotate::{RotateDetector, RotateListener};
    pub use crate::scale::{ScaleDetector, ScaleListener};
    pub use crate::shove::{ShoveDetector, ShoveListener};
    pub use crate::sideways_shove::{SidewaysShoveDetector, SidewaysShoveListener};
    pub use crate::standard::{StandardGestureDetector, StandardGestureListener};
}

#[cfg(test)]
#[path = "tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/move_detector_tests.rs"]
mod move_detector_tests;

#[cfg(test)]
#[path = "tests/scale_tests.rs"]
mod scale_tests;

#[cfg(test)]
#[path = "tests/rotate_tests.rs"]
mod rotate_tests;

#[cfg(test)]
#[path = "tests/shove_tests.rs"]
mod shove_tests;

#[cfg(test)]
#[path = "tests/multi_finger_tap_tests.rs"]
mod multi_finger_tap_tests;

#[cfg(test)]
#[path = "tests/tap_tests.rs"]
mod tap_tests;

#[cfg(test)]
#[path = "tests/manager_tests.rs"]
mod manager_tests;
