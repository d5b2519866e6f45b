use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "grid size mismatch: expected {expected} pixels, got {actual}")
            }
            Self::OutOfBounds => write!(f, "pixel coordinate out of bounds"),
        }
    }
}

impl std::error::Error for Error {}
