//! Chunked, per-descriptor buffered line reading.
//!
//! This is the core layer of fdline. Every call to [`LineReader::next_line`]:
//! - resumes from the bytes left over by the previous call on that descriptor
//! - reads fixed-size chunks until a newline shows up or the stream ends
//! - hands back everything up to and including the first newline
//! - keeps the remainder, keyed by descriptor, for the next call
//!
//! Callers that do not want to own a reader can use the process-wide entry
//! points in [`global`].

pub mod config;
pub mod error;
pub mod global;
pub mod line;
pub mod reader;
mod scan;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, LineConfig, CHUNK_SIZE_ENV, DEFAULT_CHUNK_SIZE};
pub use error::{LineError, Result};
pub use global::next_line;
pub use line::{Line, NextLine};
pub use reader::{LineReader, Lines};
pub use store::{DescriptorMap, PendingStore};

pub use fdline_source::{ChunkSource, Descriptor, RawDescriptor, SysRead};
