use std::ptr;

use fdline_reader::Line;

use crate::error;
use crate::types::{FdlineLine, FdlineResult};

/// Free line memory held by an [`FdlineLine`] populated by `fdline_next_line`.
///
/// # Safety
/// `line` must be either null or a valid pointer to an `FdlineLine` created by caller code.
/// If `line->data` is non-null, it must have originated from this library.
#[no_mangle]
pub unsafe extern "C" fn fdline_line_free(line: *mut FdlineLine) {
    crate::ffi_boundary((), || {
        if line.is_null() {
            return;
        }

        let line_ref = {
            // SAFETY: Pointer validity is guaranteed by the caller.
            unsafe { &mut *line }
        };
        release_data(line_ref);
    });
}

fn release_data(line_ref: &mut FdlineLine) {
    if !line_ref.data.is_null() {
        let slice_ptr = ptr::slice_from_raw_parts_mut(line_ref.data, line_ref.len);
        // SAFETY: `data` was allocated as a `Box<[u8]>` by `write_line_out`.
        unsafe {
            drop(Box::from_raw(slice_ptr));
        }
    }
    *line_ref = FdlineLine::default();
}

/// Move `line` into caller-visible memory, releasing whatever `out_line`
/// held before.
pub(crate) fn write_line_out(out_line: *mut FdlineLine, line: Line) -> FdlineResult {
    if out_line.is_null() {
        return error::set_invalid_argument("out_line cannot be null");
    }

    let line_ref = {
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { &mut *out_line }
    };
    release_data(line_ref);

    let ends_with_newline = line.ends_with_newline();
    let boxed: Box<[u8]> = Vec::from(line.into_bytes()).into_boxed_slice();
    let len = boxed.len();
    let data = if len == 0 {
        ptr::null_mut()
    } else {
        Box::into_raw(boxed) as *mut u8
    };

    line_ref.data = data;
    line_ref.len = len;
    line_ref.ends_with_newline = ends_with_newline;

    FdlineResult::Ok
}
