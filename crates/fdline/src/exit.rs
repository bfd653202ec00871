use std::fmt;
use std::io;

use fdline_reader::{ConfigError, LineError};

// Exit codes follow the sysexits-style layout used across our CLIs.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const NOT_FOUND: i32 = 2;
pub const PERMISSION_DENIED: i32 = 50;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::IsADirectory | io::ErrorKind::InvalidInput => USAGE,
        _ => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn line_error(context: &str, err: LineError) -> CliError {
    match err {
        LineError::Io(source) => io_error(context, source),
        LineError::InvalidDescriptor { .. } | LineError::InvalidChunkSize { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        LineError::Allocation { .. } => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}

pub fn config_error(context: &str, err: ConfigError) -> CliError {
    match err {
        ConfigError::Invalid(err) => line_error(context, err),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_to_codes() {
        let missing = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code, NOT_FOUND);
        assert!(missing.message.starts_with("open: "));

        let denied = io_error("open", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.code, PERMISSION_DENIED);
    }

    #[test]
    fn invalid_arguments_are_usage_errors() {
        let err = line_error("read", LineError::InvalidChunkSize { chunk_size: 0 });
        assert_eq!(err.code, USAGE);

        let err = config_error(
            "configure",
            ConfigError::Invalid(LineError::InvalidChunkSize { chunk_size: 0 }),
        );
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn allocation_is_internal() {
        let err = line_error("read", LineError::Allocation { requested: 1 });
        assert_eq!(err.code, INTERNAL);
    }
}
