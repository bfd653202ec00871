use std::fmt;

use crate::error::{Result, SourceError};

/// Raw descriptor number as handed out by the operating system.
pub type RawDescriptor = i32;

/// A validated, borrowed descriptor handle.
///
/// Holding a `Descriptor` does not own the underlying stream: it is never
/// closed or seeked by this crate. The caller keeps the stream open for as
/// long as it reads through the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Descriptor(RawDescriptor);

impl Descriptor {
    /// Standard input.
    pub const STDIN: Descriptor = Descriptor(0);

    /// Validate a raw descriptor number.
    ///
    /// Negative values are rejected. No system call is made, so a
    /// non-negative number that is not open is only detected on read.
    pub fn new(fd: RawDescriptor) -> Result<Self> {
        if fd < 0 {
            return Err(SourceError::InvalidDescriptor { fd });
        }
        Ok(Self(fd))
    }

    /// Borrow the descriptor of an open stream.
    #[cfg(unix)]
    pub fn of(stream: &impl std::os::fd::AsRawFd) -> Self {
        // Open streams never report a negative descriptor.
        Self(stream.as_raw_fd())
    }

    /// The raw descriptor number.
    pub fn raw(self) -> RawDescriptor {
        self.0
    }
}

impl TryFrom<RawDescriptor> for Descriptor {
    type Error = SourceError;

    fn try_from(fd: RawDescriptor) -> Result<Self> {
        Self::new(fd)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fd {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_descriptor() {
        let err = Descriptor::new(-1).unwrap_err();
        assert!(matches!(err, SourceError::InvalidDescriptor { fd: -1 }));
    }

    #[test]
    fn accepts_zero_and_positive() {
        assert_eq!(Descriptor::new(0).unwrap(), Descriptor::STDIN);
        assert_eq!(Descriptor::new(42).unwrap().raw(), 42);
    }

    #[test]
    fn try_from_matches_new() {
        assert!(Descriptor::try_from(-7).is_err());
        assert_eq!(Descriptor::try_from(3).unwrap().raw(), 3);
    }

    #[test]
    #[cfg(unix)]
    fn borrows_open_file_descriptor() {
        use std::os::fd::AsRawFd;

        let file = std::fs::File::open("/dev/null").unwrap();
        let fd = Descriptor::of(&file);
        assert_eq!(fd.raw(), file.as_raw_fd());
        assert_eq!(fd.to_string(), format!("fd {}", file.as_raw_fd()));
    }
}
