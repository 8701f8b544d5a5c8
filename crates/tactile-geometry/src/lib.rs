//! Pure math/data for Tactile gesture detection
//!
//! This crate contains geometry primitives and the density-aware unit types
//! used to express gesture thresholds.

mod geometry;
mod unit;

pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::unit::{Dp, Mm};
}
