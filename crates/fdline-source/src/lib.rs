//! Descriptor handles and bounded chunk reads.
//!
//! This is the lowest layer of fdline. It knows nothing about lines: it
//! validates raw descriptors and performs single reads of at most a given
//! number of bytes. Everything else builds on the [`ChunkSource`] trait
//! provided here.

pub mod descriptor;
pub mod error;
pub mod source;

pub use descriptor::{Descriptor, RawDescriptor};
pub use error::{Result, SourceError};
pub use source::ChunkSource;

#[cfg(unix)]
pub use source::SysRead;
