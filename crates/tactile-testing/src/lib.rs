//! Testing utilities and harness for Tactile
//!
//! Synthesises complete touch sequences, records listener callbacks and
//! provides tolerance based assertions for gesture tests.

pub mod assertions;
pub mod recorders;
pub mod synthesis;

mod error;

pub use error::ScriptError;
pub use recorders::*;
pub use synthesis::{GestureClock, Interruption, MotionScript, QuickScaleOptions};

pub mod prelude {
    pub use crate::assertions;
    pub use crate::error::ScriptError;
    pub use crate::recorders::*;
    pub use crate::synthesis::{
        move_by, multi_finger_tap, pinch, quick_scale, GestureClock, Interruption, MotionScript,
        QuickScaleOptions,
    };
}
