use tracing::warn;

use crate::error::LineError;

/// Default number of bytes requested per underlying read.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Environment variable that overrides the chunk size.
pub const CHUNK_SIZE_ENV: &str = "FDLINE_CHUNK_SIZE";

/// Controls how a line reader talks to its descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    /// Bytes requested per underlying read. Must be positive. Default: 100.
    pub chunk_size: usize,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl LineConfig {
    /// Configuration with an explicit chunk size.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Load configuration from the environment.
    ///
    /// An unset [`CHUNK_SIZE_ENV`] yields the default. A value that does not
    /// parse as a positive integer is kept as zero, so every read made with
    /// this configuration fails with [`LineError::InvalidChunkSize`].
    pub fn from_env() -> Self {
        let raw = std::env::var(CHUNK_SIZE_ENV).ok();
        Self {
            chunk_size: parse_chunk_size(raw.as_deref()),
        }
    }

    /// Check that the configuration can be used for reading.
    pub fn validate(&self) -> Result<(), LineError> {
        if self.chunk_size == 0 {
            return Err(LineError::InvalidChunkSize {
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

/// Errors from process-wide configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The process-wide reader was already used or configured.
    #[error("line reader already initialized (chunk size {chunk_size})")]
    AlreadyInitialized { chunk_size: usize },

    /// The supplied configuration cannot be used for reading.
    #[error(transparent)]
    Invalid(#[from] LineError),
}

fn parse_chunk_size(raw: Option<&str>) -> usize {
    match raw {
        None => DEFAULT_CHUNK_SIZE,
        Some(value) => match value.trim().parse::<usize>() {
            Ok(size) => size,
            Err(err) => {
                warn!(value, error = %err, "unusable {CHUNK_SIZE_ENV}; reads will fail");
                0
            }
        },
    }
}
