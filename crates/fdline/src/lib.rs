//! Buffered, per-descriptor line reading over raw file descriptors.
//!
//! fdline returns one newline-terminated line per call from any open
//! descriptor, reading in fixed-size chunks and carrying leftover bytes
//! between calls for each descriptor independently.
//!
//! # Crate Structure
//!
//! - [`source`] — Descriptor validation and bounded chunk reads
//! - [`reader`] — Line splitting, pending-byte storage and configuration
//!
//! The most common entry point is re-exported at the top level:
//!
//! ```no_run
//! use std::os::fd::AsRawFd;
//!
//! let file = std::fs::File::open("notes.txt")?;
//! while let Some(line) = fdline::next_line(file.as_raw_fd())?.into_line() {
//!     print!("{}", line.to_string_lossy());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Re-export source types.
pub mod source {
    pub use fdline_source::*;
}

/// Re-export reader types.
pub mod reader {
    pub use fdline_reader::*;
}

pub use fdline_reader::global;
pub use fdline_reader::{
    next_line, LineConfig, LineError, LineReader, Line, NextLine, DEFAULT_CHUNK_SIZE,
};
