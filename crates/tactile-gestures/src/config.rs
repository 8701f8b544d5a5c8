//! Detector thresholds for a concrete display.

use crate::constants;
use tactile_geometry::{Dp, Mm, Size};

/// Thresholds and timeouts applied by [`GesturesManager`](crate::GesturesManager).
///
/// Distances are density independent; use the `*_px` accessors to obtain
/// the pixel values the detectors work with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GesturesConfig {
    /// Pixels per density-independent pixel.
    pub density: f32,
    /// Size of the display in pixels. Edge slop is only checked when known.
    pub display_size: Option<Size>,
    pub edge_slop: Dp,
    pub touch_slop: Dp,
    pub double_tap_slop: Dp,
    pub min_span: Mm,
    pub scale_span_since_start_threshold: Dp,
    pub quick_scale_enabled: bool,
    pub shove_pixel_threshold: Dp,
    pub shove_max_angle: f32,
    pub sideways_shove_pixel_threshold: Dp,
    pub sideways_shove_max_angle: f32,
    pub rotate_angle_threshold: f32,
    pub multi_tap_movement_threshold: Dp,
    pub multi_tap_time_threshold_ms: u64,
    pub move_threshold: Dp,
    pub tap_timeout_ms: u64,
    pub long_press_timeout_ms: u64,
    pub long_press_enabled: bool,
    pub double_tap_timeout_ms: u64,
    pub double_tap_min_time_ms: u64,
    pub min_fling_velocity: Dp,
    pub max_fling_velocity: Dp,
}

impl Default for GesturesConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            display_size: None,
            edge_slop: constants::EDGE_SLOP,
            touch_slop: constants::TOUCH_SLOP,
            double_tap_slop: constants::DOUBLE_TAP_SLOP,
            min_span: constants::MIN_SPAN,
            scale_span_since_start_threshold: constants::SCALE_SPAN_SINCE_START_THRESHOLD,
            quick_scale_enabled: true,
            shove_pixel_threshold: constants::SHOVE_PIXEL_THRESHOLD,
            shove_max_angle: constants::SHOVE_MAX_ANGLE,
            sideways_shove_pixel_threshold: constants::SIDEWAYS_SHOVE_PIXEL_THRESHOLD,
            sideways_shove_max_angle: constants::SIDEWAYS_SHOVE_MAX_ANGLE,
            rotate_angle_threshold: constants::ROTATE_ANGLE_THRESHOLD,
            multi_tap_movement_threshold: constants::MULTI_TAP_MOVEMENT_THRESHOLD,
            multi_tap_time_threshold_ms: constants::MULTI_TAP_TIME_THRESHOLD_MS,
            move_threshold: constants::MOVE_THRESHOLD,
            tap_timeout_ms: constants::TAP_TIMEOUT_MS,
            long_press_timeout_ms: constants::LONG_PRESS_TIMEOUT_MS,
            long_press_enabled: true,
            double_tap_timeout_ms: constants::DOUBLE_TAP_TIMEOUT_MS,
            double_tap_min_time_ms: constants::DOUBLE_TAP_MIN_TIME_MS,
            min_fling_velocity: constants::MIN_FLING_VELOCITY,
            max_fling_velocity: constants::MAX_FLING_VELOCITY,
        }
    }
}

impl GesturesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_display_size(mut self, size: Size) -> Self {
        self.display_size = Some(size);
        self
    }

    pub fn with_min_span(mut self, min_span: Mm) -> Self {
        self.min_span = min_span;
        self
    }

    pub fn with_move_threshold(mut self, threshold: Dp) -> Self {
        self.move_threshold = threshold;
        self
    }

    pub fn with_scale_span_since_start_threshold(mut self, threshold: Dp) -> Self {
        self.scale_span_since_start_threshold = threshold;
        self
    }

    pub fn with_quick_scale_enabled(mut self, enabled: bool) -> Self {
        self.quick_scale_enabled = enabled;
        self
    }

    pub fn with_long_press_enabled(mut self, enabled: bool) -> Self {
        self.long_press_enabled = enabled;
        self
    }

    pub fn edge_slop_px(&self) -> f32 {
        self.edge_slop.to_px(self.density)
    }

    pub fn touch_slop_px(&self) -> f32 {
        self.touch_slop.to_px(self.density)
    }

    pub fn double_tap_slop_px(&self) -> f32 {
        self.double_tap_slop.to_px(self.density)
    }

    pub fn min_span_px(&self) -> f32 {
        self.min_span.to_px(self.density)
    }

    pub fn scale_span_since_start_threshold_px(&self) -> f32 {
        self.scale_span_since_start_threshold.to_px(self.density)
    }

    pub fn shove_pixel_threshold_px(&self) -> f32 {
        self.shove_pixel_threshold.to_px(self.density)
    }

    pub fn sideways_shove_pixel_threshold_px(&self) -> f32 {
        self.sideways_shove_pixel_threshold.to_px(self.density)
    }

    pub fn multi_tap_movement_threshold_px(&self) -> f32 {
        self.multi_tap_movement_threshold.to_px(self.density)
    }

    pub fn move_threshold_px(&self) -> f32 {
        self.move_threshold.to_px(self.density)
    }

    pub fn min_fling_velocity_px(&self) -> f32 {
        self.min_fling_velocity.to_px(self.density)
    }

    pub fn max_fling_velocity_px(&self) -> f32 {
        self.max_fling_velocity.to_px(self.density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_thresholds_follow_density() {
        let config = GesturesConfig::new().with_density(2.0);
        assert_eq!(config.edge_slop_px(), 24.0);
        assert_eq!(config.touch_slop_px(), 16.0);
        assert_eq!(config.multi_tap_movement_threshold_px(), 30.0);
        assert_eq!(config.max_fling_velocity_px(), 16_000.0);
        assert!((config.min_span_px() - 214.173_23).abs() < 0.01);
    }

    #[test]
    fn defaults() {
        let config = GesturesConfig::default();
        assert_eq!(config.density, 1.0);
        assert_eq!(config.display_size, None);
        assert_eq!(config.rotate_angle_threshold, 15.3);
        assert_eq!(config.multi_tap_time_threshold_ms, 150);
        assert_eq!(config.move_threshold_px(), 0.0);
        assert!(config.quick_scale_enabled);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn round_trips_through_json() {
        let config = GesturesConfig::new()
            .with_density(3.0)
            .with_display_size(Size::new(1080.0, 1920.0));
        let json = serde_json::to_string(&config).unwrap();
        let back: GesturesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_take_defaults() {
        let config: GesturesConfig = serde_json::from_str(r#"{ "density": 2.0 }"#).unwrap();
        assert_eq!(config.density, 2.0);
        assert_eq!(config.touch_slop, constants::TOUCH_SLOP);
    }
}
