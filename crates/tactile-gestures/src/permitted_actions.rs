//! Detection of motion events that never reached the detectors.
//!
//! A detector remembers how many pointers are down. Comparing that count
//! with the pointer count of the next event tells which actions may follow;
//! any other action means events went missing and tracking must restart.

use smallvec::SmallVec;
use tactile_input::MotionAction;

type Actions = SmallVec<[MotionAction; 3]>;

/// Actions that can legally follow the tracked pointer state.
///
/// On `Up` and `PointerUp` events the lifted pointer is still counted, so the
/// event holds as many pointers as are tracked. A `Down` while pointers are
/// tracked means an earlier `Up` was lost.
pub(crate) fn permitted_actions(event_pointer_count: usize, tracked_pointer_count: usize) -> Actions {
    let mut permitted = Actions::new();
    if tracked_pointer_count == 0 {
        permitted.push(MotionAction::Down);
        return permitted;
    }
    if event_pointer_count.abs_diff(tracked_pointer_count) > 1
        || event_pointer_count < tracked_pointer_count
    {
        return permitted;
    }
    if event_pointer_count > tracked_pointer_count {
        permitted.push(MotionAction::PointerDown);
    } else {
        permitted.push(if event_pointer_count == 1 {
            MotionAction::Up
        } else {
            MotionAction::PointerUp
        });
        permitted.push(MotionAction::Move);
    }
    permitted
}

/// `Cancel` ends the stream whatever the state, so it is never missing.
pub(crate) fn is_missing_actions(
    action: MotionAction,
    event_pointer_count: usize,
    tracked_pointer_count: usize,
) -> bool {
    action != MotionAction::Cancel
        && !permitted_actions(event_pointer_count, tracked_pointer_count).contains(&action)
}
