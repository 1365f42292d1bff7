use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    Empty,
    EmptySegment { path: String, position: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "field path must not be empty"),
            PathError::EmptySegment { path, position } => {
                write!(f, "empty segment at position {position} in field path: {path}")
            }
        }
    }
}

impl std::error::Error for PathError {}
