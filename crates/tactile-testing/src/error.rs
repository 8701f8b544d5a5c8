use tactile_input::{MotionEventError, PointerId};

/// Reasons a [`MotionScript`](crate::MotionScript) step cannot be performed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// The step produced an event the input layer rejects.
    Event(MotionEventError),
    UnknownPointer { id: PointerId },
    NoFingers,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Event(err) => write!(f, "invalid motion event: {err}"),
            ScriptError::UnknownPointer { id } => write!(f, "pointer {id} is not down"),
            ScriptError::NoFingers => write!(f, "gesture needs at least one finger"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Event(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MotionEventError> for ScriptError {
    fn from(err: MotionEventError) -> Self {
        ScriptError::Event(err)
    }
}
