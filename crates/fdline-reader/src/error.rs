use fdline_source::{RawDescriptor, SourceError};

/// Errors that can occur while reading a line.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// The descriptor is negative. Detected before any I/O.
    #[error("invalid descriptor {fd}")]
    InvalidDescriptor { fd: RawDescriptor },

    /// The configured chunk size is zero. Detected before any I/O.
    #[error("invalid chunk size {chunk_size} (must be positive)")]
    InvalidChunkSize { chunk_size: usize },

    /// The underlying read failed. Not retried.
    #[error("line read I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A buffer could not be grown or split.
    #[error("allocation failed ({requested} bytes)")]
    Allocation { requested: usize },
}

impl LineError {
    /// True for errors raised by argument or configuration checks, which
    /// leave all state untouched.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            LineError::InvalidDescriptor { .. } | LineError::InvalidChunkSize { .. }
        )
    }
}

impl From<SourceError> for LineError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::InvalidDescriptor { fd } => LineError::InvalidDescriptor { fd },
            SourceError::Io(io) => LineError::Io(io),
        }
    }
}

pub type Result<T> = std::result::Result<T, LineError>;
