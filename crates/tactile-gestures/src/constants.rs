//! Default thresholds for every detector.
//!
//! Distances are expressed in density-independent units and converted to
//! pixels by [`GesturesConfig`](crate::GesturesConfig) for the configured
//! density. Timeouts are in milliseconds.

use tactile_geometry::{Dp, Mm};

/// Margin along the display edges where touches are treated as accidental.
pub const EDGE_SLOP: Dp = Dp(12.0);

/// Distance a pointer must travel before a press turns into a scroll.
///
/// Matches the platform touch slop so taps and scrolls never overlap.
pub const TOUCH_SLOP: Dp = Dp(8.0);

/// Maximum distance between the two downs of a double tap.
pub const DOUBLE_TAP_SLOP: Dp = Dp(100.0);

/// Minimum span between any pair of fingers for multi-finger gestures.
pub const MIN_SPAN: Mm = Mm(17.0);

/// Span change required before a scale gesture begins.
pub const SCALE_SPAN_SINCE_START_THRESHOLD: Dp = Dp(1.0);

/// Factor applied to span changes while quick-scaling.
pub const QUICK_SCALE_MULTIPLIER: f32 = 0.5;

/// Rotation in degrees required before a rotate gesture begins.
pub const ROTATE_ANGLE_THRESHOLD: f32 = 15.3;

pub const SHOVE_PIXEL_THRESHOLD: Dp = Dp(20.0);

/// Maximum angle in degrees between the fingers and the horizontal axis.
pub const SHOVE_MAX_ANGLE: f32 = 20.0;

pub const SIDEWAYS_SHOVE_PIXEL_THRESHOLD: Dp = Dp(20.0);

/// Maximum angle in degrees between the fingers and the vertical axis.
pub const SIDEWAYS_SHOVE_MAX_ANGLE: f32 = 20.0;

/// A multi-finger tap lasting this long or longer is not a tap.
pub const MULTI_TAP_TIME_THRESHOLD_MS: u64 = 150;

/// Movement of any finger pair beyond this invalidates a multi-finger tap.
pub const MULTI_TAP_MOVEMENT_THRESHOLD: Dp = Dp(15.0);

pub const MOVE_THRESHOLD: Dp = Dp(0.0);

/// Delay before a press is reported as shown.
pub const TAP_TIMEOUT_MS: u64 = 100;

pub const LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Maximum time between the first up and the second down of a double tap.
pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;

/// Minimum time between the first up and the second down of a double tap.
pub const DOUBLE_TAP_MIN_TIME_MS: u64 = 40;

/// Minimum fling velocity in density-independent pixels per second.
pub const MIN_FLING_VELOCITY: Dp = Dp(50.0);

/// Maximum fling velocity in density-independent pixels per second.
pub const MAX_FLING_VELOCITY: Dp = Dp(8_000.0);

/// Ratio between the current and the previous pressure below which a
/// movement is discarded; a rapid pressure drop means a finger is lifting.
pub(crate) const PRESSURE_THRESHOLD: f32 = 0.67;
