//! Platform-neutral multi-touch input for Tactile
//!
//! A [`MotionEvent`] is a snapshot of every pointer touching the surface at
//! the moment an action happened. Hosts translate their native touch stream
//! into motion events and feed them to gesture detectors.

mod error;
mod types;
mod velocity_tracker;

pub use error::MotionEventError;
pub use types::*;
pub use velocity_tracker::{VelocityTracker, ASSUME_STOPPED_MS};

pub mod prelude {
    pub use crate::error::MotionEventError;
    pub use crate::types::{MotionAction, MotionEvent, Pointer, PointerId, ToolType};
    pub use crate::velocity_tracker::VelocityTracker;
}

#[cfg(test)]
#[path = "tests/motion_event_tests.rs"]
mod motion_event_tests;

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod velocity_tracker_tests;
