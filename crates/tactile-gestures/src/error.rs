/// Returned when span accessors are asked about a pointer pair that is not
/// part of the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerIndexError {
    /// Both indices name the same pointer.
    SamePointer { index: usize },
    /// An index is not below the number of active pointers.
    OutOfRange { index: usize, count: usize },
    /// The pair is valid but no movement has been measured for it yet.
    NotMeasured { first: usize, second: usize },
}

impl std::fmt::Display for PointerIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerIndexError::SamePointer { index } => {
                write!(f, "pointer index {index} cannot form a pair with itself")
            }
            PointerIndexError::OutOfRange { index, count } => {
                write!(f, "pointer index {index} out of range for {count} active pointers")
            }
            PointerIndexError::NotMeasured { first, second } => {
                write!(f, "no distances measured for pointers {first} and {second}")
            }
        }
    }
}

impl std::error::Error for PointerIndexError {}
