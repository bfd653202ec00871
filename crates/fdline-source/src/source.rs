use std::io;

use tracing::trace;

use crate::descriptor::Descriptor;

/// A primitive that performs one bounded read from a descriptor.
///
/// Implementations must not read more than `buf.len()` bytes and must
/// report end-of-stream as `Ok(0)`. This is the seam the line reader uses
/// for all I/O, so test doubles can count reads or inject failures.
pub trait ChunkSource {
    /// Read at most `buf.len()` bytes from `fd` into `buf`.
    fn read_chunk(&mut self, fd: Descriptor, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn read_chunk(&mut self, fd: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_chunk(fd, buf)
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    fn read_chunk(&mut self, fd: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_chunk(fd, buf)
    }
}

/// Blocking reads through the `read(2)` system call.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct SysRead;

#[cfg(unix)]
impl ChunkSource for SysRead {
    fn read_chunk(&mut self, fd: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: `buf` is a valid writable region of `buf.len()` bytes for the
        // duration of the call. The descriptor is only read from, never closed.
        let rc = unsafe {
            libc::read(
                fd.raw(),
                buf.as_mut_ptr().cast::<libc::c_void>(),
                buf.len(),
            )
        };

        if rc < 0 {
            let err = io::Error::last_os_error();
            trace!(%fd, error = %err, "read failed");
            return Err(err);
        }

        trace!(%fd, requested = buf.len(), read = rc, "read chunk");
        Ok(rc as usize)
    }
}
