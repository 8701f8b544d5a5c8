//! Assertion utilities for gesture tests
//!
//! Gesture output is floating point and depends on event timing, so most
//! checks compare within a tolerance.

use tactile_geometry::{Point, Rect};

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that both coordinates of a point are within `tolerance`.
pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

pub fn assert_rect_contains_point(rect: Rect, point: Point, msg: &str) {
    assert!(
        rect.contains_point(point),
        "{}: point ({}, {}) not in rect {:?}",
        msg,
        point.x,
        point.y,
        rect
    );
}

pub fn assert_rect_excludes_point(rect: Rect, point: Point, msg: &str) {
    assert!(
        !rect.contains_point(point),
        "{}: point ({}, {}) unexpectedly in rect {:?}",
        msg,
        point.x,
        point.y,
        rect
    );
}

/// Assert that every value lies strictly on one side of `bound`.
pub fn assert_all_above(values: &[f32], bound: f32, msg: &str) {
    assert!(!values.is_empty(), "{}: no values", msg);
    if let Some(value) = values.iter().find(|value| **value <= bound) {
        panic!("{}: {} is not above {} in {:?}", msg, value, bound, values);
    }
}

pub fn assert_all_below(values: &[f32], bound: f32, msg: &str) {
    assert!(!values.is_empty(), "{}: no values", msg);
    if let Some(value) = values.iter().find(|value| **value >= bound) {
        panic!("{}: {} is not below {} in {:?}", msg, value, bound, values);
    }
}

/// Assert that a collection has an expected count.
pub fn assert_count<T: std::fmt::Debug>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {:?}",
        msg,
        expected,
        items
    );
}
