use std::os::raw::c_int;

use fdline_reader::{global, LineConfig, NextLine};

use crate::error;
use crate::line::write_line_out;
use crate::types::{FdlineLine, FdlineResult};

/// Read the next line from descriptor `fd` into `out_line`.
///
/// Returns `FDLINE_OK` with a populated line, `FDLINE_END_OF_STREAM` once
/// `fd` has nothing left, or an error code with details available from
/// `fdline_last_error`. On anything but `FDLINE_OK`, `out_line` is left
/// empty.
///
/// # Safety
/// `out_line` must be a valid writable pointer. If `out_line->data` already
/// holds a line from this library, it is freed first.
#[no_mangle]
pub unsafe extern "C" fn fdline_next_line(fd: c_int, out_line: *mut FdlineLine) -> FdlineResult {
    crate::ffi_boundary(FdlineResult::Internal, || {
        error::clear_error_state();

        if out_line.is_null() {
            return error::set_invalid_argument("out_line cannot be null");
        }

        let result = match global::next_line(fd) {
            Ok(NextLine::Line(line)) => return write_line_out(out_line, line),
            Ok(NextLine::EndOfStream) => FdlineResult::EndOfStream,
            Err(err) => error::map_line_error(&err),
        };
        // SAFETY: `out_line` is non-null and valid per the caller contract.
        unsafe { crate::fdline_line_free(out_line) };
        result
    })
}

/// Forget bytes buffered for `fd`. Call before closing a descriptor whose
/// stream was not read to the end.
#[no_mangle]
pub extern "C" fn fdline_reset(fd: c_int) -> FdlineResult {
    crate::ffi_boundary(FdlineResult::Internal, || {
        error::clear_error_state();

        match global::reset(fd) {
            Ok(_) => FdlineResult::Ok,
            Err(err) => error::map_line_error(&err),
        }
    })
}

/// Set the process-wide chunk size. Only valid before the first read.
#[no_mangle]
pub extern "C" fn fdline_configure(chunk_size: usize) -> FdlineResult {
    crate::ffi_boundary(FdlineResult::Internal, || {
        error::clear_error_state();

        match global::configure(LineConfig::with_chunk_size(chunk_size)) {
            Ok(()) => FdlineResult::Ok,
            Err(err) => error::map_config_error(&err),
        }
    })
}

/// Number of bytes buffered for `fd` but not yet returned.
#[no_mangle]
pub extern "C" fn fdline_pending_len(fd: c_int) -> usize {
    crate::ffi_boundary(0, || global::pending_len(fd))
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;
    use std::io::Write;
    use std::os::fd::AsRawFd;
    use std::os::unix::net::UnixStream;

    use super::*;

    fn line_bytes(line: &FdlineLine) -> Vec<u8> {
        // SAFETY: `line` was populated by `fdline_next_line`.
        unsafe { std::slice::from_raw_parts(line.data, line.len) }.to_vec()
    }

    #[test]
    fn next_line_walks_stream_to_end() {
        let (mut left, right) = UnixStream::pair().unwrap();
        left.write_all(b"ab\ncdef\ngh").unwrap();
        drop(left);
        let fd = right.as_raw_fd();

        let mut line = FdlineLine::default();
        // SAFETY: `line` is a valid FdlineLine owned by this test.
        unsafe {
            assert_eq!(fdline_next_line(fd, &mut line), FdlineResult::Ok);
            assert_eq!(line_bytes(&line), b"ab\n");
            assert!(line.ends_with_newline);

            assert_eq!(fdline_next_line(fd, &mut line), FdlineResult::Ok);
            assert_eq!(line_bytes(&line), b"cdef\n");

            assert_eq!(fdline_next_line(fd, &mut line), FdlineResult::Ok);
            assert_eq!(line_bytes(&line), b"gh");
            assert!(!line.ends_with_newline);

            assert_eq!(fdline_next_line(fd, &mut line), FdlineResult::EndOfStream);
            assert!(line.data.is_null());
            assert_eq!(line.len, 0);
        }
    }

    #[test]
    fn negative_descriptor_sets_last_error() {
        let mut line = FdlineLine::default();
        // SAFETY: `line` is a valid FdlineLine owned by this test.
        let result = unsafe { fdline_next_line(-1, &mut line) };
        assert_eq!(result, FdlineResult::InvalidArgument);

        // SAFETY: fdline_last_error returns a pointer to a thread-local CString.
        let text = unsafe { CStr::from_ptr(crate::fdline_last_error()) }
            .to_str()
            .unwrap()
            .to_owned();
        assert!(text.contains("invalid descriptor"));
    }

    #[test]
    fn failed_read_clears_previous_line() {
        let (mut left, right) = UnixStream::pair().unwrap();
        left.write_all(b"hi\nthere\n").unwrap();
        drop(left);
        let fd = right.as_raw_fd();

        let mut line = FdlineLine::default();
        // SAFETY: `line` is a valid FdlineLine owned by this test.
        unsafe {
            assert_eq!(fdline_next_line(fd, &mut line), FdlineResult::Ok);
            assert_eq!(line_bytes(&line), b"hi\n");

            assert_eq!(fdline_next_line(-1, &mut line), FdlineResult::InvalidArgument);
            assert!(line.data.is_null());
            assert_eq!(line.len, 0);
            assert!(!line.ends_with_newline);

            assert_eq!(fdline_next_line(fd, &mut line), FdlineResult::Ok);
            assert_eq!(line_bytes(&line), b"there\n");
            assert_eq!(fdline_next_line(i32::MAX, &mut line), FdlineResult::IoError);
            assert!(line.data.is_null());
            assert_eq!(line.len, 0);
        }
    }

    #[test]
    fn null_output_is_rejected() {
        // SAFETY: null is handled before any dereference.
        let result = unsafe { fdline_next_line(0, std::ptr::null_mut()) };
        assert_eq!(result, FdlineResult::InvalidArgument);
    }

    #[test]
    fn unopened_descriptor_is_io_error() {
        let mut line = FdlineLine::default();
        // SAFETY: `line` is a valid FdlineLine owned by this test.
        let result = unsafe { fdline_next_line(i32::MAX, &mut line) };
        assert_eq!(result, FdlineResult::IoError);
    }

    #[test]
    fn reset_and_pending_len() {
        let (mut left, right) = UnixStream::pair().unwrap();
        left.write_all(b"x\nyz").unwrap();
        let fd = right.as_raw_fd();

        let mut line = FdlineLine::default();
        // SAFETY: `line` is a valid FdlineLine owned by this test.
        unsafe {
            assert_eq!(fdline_next_line(fd, &mut line), FdlineResult::Ok);
            crate::fdline_line_free(&mut line);
        }
        assert_eq!(fdline_pending_len(fd), 2);
        assert_eq!(fdline_reset(fd), FdlineResult::Ok);
        assert_eq!(fdline_pending_len(fd), 0);
        assert_eq!(fdline_reset(-3), FdlineResult::InvalidArgument);
    }

    #[test]
    fn configure_rejects_zero_chunk_size() {
        assert_eq!(fdline_configure(0), FdlineResult::InvalidArgument);
    }
}
