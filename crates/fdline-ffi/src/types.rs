#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdlineResult {
    Ok = 0,
    EndOfStream = 1,
    InvalidArgument = 2,
    IoError = 3,
    AllocationError = 4,
    AlreadyInitialized = 5,
    Internal = 99,
}

#[allow(dead_code)]
pub const FDLINE_OK: FdlineResult = FdlineResult::Ok;
#[allow(dead_code)]
pub const FDLINE_END_OF_STREAM: FdlineResult = FdlineResult::EndOfStream;
#[allow(dead_code)]
pub const FDLINE_ERR_INVALID_ARGUMENT: FdlineResult = FdlineResult::InvalidArgument;
#[allow(dead_code)]
pub const FDLINE_ERR_IO: FdlineResult = FdlineResult::IoError;
#[allow(dead_code)]
pub const FDLINE_ERR_ALLOCATION: FdlineResult = FdlineResult::AllocationError;
#[allow(dead_code)]
pub const FDLINE_ERR_ALREADY_INITIALIZED: FdlineResult = FdlineResult::AlreadyInitialized;
#[allow(dead_code)]
pub const FDLINE_ERR_INTERNAL: FdlineResult = FdlineResult::Internal;

/// A line returned across the C boundary.
///
/// `data` is owned by this library until released with `fdline_line_free`.
#[repr(C)]
#[derive(Debug)]
pub struct FdlineLine {
    pub data: *mut u8,
    pub len: usize,
    pub ends_with_newline: bool,
}

impl Default for FdlineLine {
    fn default() -> Self {
        Self {
            data: std::ptr::null_mut(),
            len: 0,
            ends_with_newline: false,
        }
    }
}
