//! fdline-ffi: C-ABI exports for the process-wide line reader.
//!
//! The calling convention follows the classic `get_next_line(fd)` shape:
//! one call per line, state kept per descriptor inside the library, lines
//! owned by the caller until released with [`fdline_line_free`].

mod error;
mod line;
mod reader;
mod types;

use std::panic::AssertUnwindSafe;

pub use line::fdline_line_free;
pub use reader::{fdline_configure, fdline_next_line, fdline_pending_len, fdline_reset};
pub use types::{
    FdlineLine, FdlineResult, FDLINE_END_OF_STREAM, FDLINE_ERR_ALLOCATION,
    FDLINE_ERR_ALREADY_INITIALIZED, FDLINE_ERR_INTERNAL, FDLINE_ERR_INVALID_ARGUMENT,
    FDLINE_ERR_IO, FDLINE_OK,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

/// Drop every buffered line fragment and clear the error state.
#[no_mangle]
pub extern "C" fn fdline_cleanup() {
    ffi_boundary((), || {
        error::clear_error_state();
        fdline_reader::global::reset_all();
    });
}

#[no_mangle]
pub extern "C" fn fdline_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}
