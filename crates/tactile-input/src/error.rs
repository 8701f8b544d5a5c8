use crate::{MotionAction, PointerId};

/// Reasons a [`MotionEvent`](crate::MotionEvent) cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionEventError {
    NoPointers,
    ActionIndexOutOfRange { index: usize, count: usize },
    DuplicatePointerId { id: PointerId },
    PointerCountMismatch { action: MotionAction, count: usize },
    EventBeforeDown { down_time: u64, event_time: u64 },
}

impl std::fmt::Display for MotionEventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionEventError::NoPointers => write!(f, "motion event has no pointers"),
            MotionEventError::ActionIndexOutOfRange { index, count } => {
                write!(f, "action index {index} out of range for {count} pointers")
            }
            MotionEventError::DuplicatePointerId { id } => {
                write!(f, "pointer id {id} appears more than once")
            }
            MotionEventError::PointerCountMismatch { action, count } => {
                write!(f, "{action:?} cannot carry {count} pointers")
            }
            MotionEventError::EventBeforeDown {
                down_time,
                event_time,
            } => write!(
                f,
                "event time {event_time} precedes gesture down time {down_time}"
            ),
        }
    }
}

impl std::error::Error for MotionEventError {}
