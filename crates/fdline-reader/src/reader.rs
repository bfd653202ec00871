use std::iter::FusedIterator;

use fdline_source::{ChunkSource, Descriptor, RawDescriptor, SysRead};
use tracing::debug;

use crate::config::LineConfig;
use crate::error::Result;
use crate::line::{Line, NextLine};
use crate::scan::scan_line;
use crate::store::{DescriptorMap, PendingStore};

/// Reads newline-terminated lines from any number of descriptors.
///
/// Bytes read past the end of a line are kept per descriptor and served
/// first on the next call for that descriptor. Calls for one descriptor
/// never observe bytes from another.
pub struct LineReader<S = DescriptorMap, R = SysRead> {
    source: R,
    store: S,
    config: LineConfig,
}

impl LineReader {
    /// Create a reader over `read(2)` with default configuration.
    pub fn new() -> Self {
        Self::with_config(LineConfig::default())
    }

    /// Create a reader over `read(2)` with explicit configuration.
    pub fn with_config(config: LineConfig) -> Self {
        Self::from_parts(SysRead, DescriptorMap::new(), config)
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PendingStore, R: ChunkSource> LineReader<S, R> {
    /// Create a reader from a custom source and store.
    pub fn from_parts(source: R, store: S, config: LineConfig) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    /// Read the next line from `fd` (blocking).
    ///
    /// Returns [`NextLine::EndOfStream`] once the descriptor has nothing
    /// left, and keeps returning it for as long as the source stays empty.
    /// A negative descriptor or a zero chunk size fails before any I/O and
    /// without touching pending state. Any other failure drops the pending
    /// bytes for `fd`.
    pub fn next_line(&mut self, fd: RawDescriptor) -> Result<NextLine> {
        let fd = Descriptor::new(fd)?;
        self.config.validate()?;

        let pending = self.store.take(fd).unwrap_or_default();
        let scanned = scan_line(&mut self.source, fd, self.config.chunk_size, pending)?;
        if let Some(carry) = scanned.carry {
            self.store.put(fd, carry);
        }
        Ok(scanned.next)
    }

    /// Iterate over the remaining lines of `fd`.
    pub fn lines(&mut self, fd: RawDescriptor) -> Lines<'_, S, R> {
        Lines {
            reader: self,
            fd,
            done: false,
        }
    }

    /// Forget any bytes pending for `fd`. Returns whether there were any.
    pub fn reset(&mut self, fd: RawDescriptor) -> Result<bool> {
        let fd = Descriptor::new(fd)?;
        let discarded = self.store.discard(fd);
        debug!(%fd, discarded, "reset descriptor");
        Ok(discarded)
    }

    /// Forget pending bytes for every descriptor.
    pub fn reset_all(&mut self) {
        self.store.clear();
    }

    /// Number of bytes read from `fd` but not yet returned.
    pub fn pending_len(&self, fd: RawDescriptor) -> usize {
        Descriptor::new(fd).map_or(0, |fd| self.store.pending_len(fd))
    }

    /// Current reader configuration.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Borrow the pending store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Consume the reader and return its source and store.
    pub fn into_parts(self) -> (R, S) {
        (self.source, self.store)
    }
}

/// Iterator over the lines of one descriptor.
///
/// Ends after end-of-stream, or after yielding the first error.
pub struct Lines<'a, S, R> {
    reader: &'a mut LineReader<S, R>,
    fd: RawDescriptor,
    done: bool,
}

impl<S: PendingStore, R: ChunkSource> Iterator for Lines<'_, S, R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.next_line(self.fd) {
            Ok(NextLine::Line(line)) => Some(Ok(line)),
            Ok(NextLine::EndOfStream) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: PendingStore, R: ChunkSource> FusedIterator for Lines<'_, S, R> {}
