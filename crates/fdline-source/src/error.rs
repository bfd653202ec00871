use crate::descriptor::RawDescriptor;

/// Errors that can occur in descriptor-level operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The descriptor is negative and cannot name an open stream.
    #[error("invalid descriptor {fd}")]
    InvalidDescriptor { fd: RawDescriptor },

    /// The underlying read primitive reported a failure.
    #[error("descriptor I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;
