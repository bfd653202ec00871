//! In-memory `ChunkSource` used by the unit tests.

use std::collections::HashMap;
use std::io;

use fdline_source::{ChunkSource, Descriptor, RawDescriptor};

#[derive(Debug, Default)]
struct Script {
    data: Vec<u8>,
    pos: usize,
    max_per_read: Option<usize>,
    fail_on_read: Option<usize>,
    interrupt_first: bool,
    reads: usize,
}

/// Serves scripted byte streams per descriptor and records every read.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    streams: HashMap<RawDescriptor, Script>,
    pub(crate) total_reads: usize,
    pub(crate) largest_request: usize,
    pub(crate) largest_delivery: usize,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stream(mut self, fd: RawDescriptor, data: &[u8]) -> Self {
        self.streams.entry(fd).or_default().data = data.to_vec();
        self
    }

    /// Deliver at most `n` bytes per read on `fd`.
    pub(crate) fn short_reads(mut self, fd: RawDescriptor, n: usize) -> Self {
        self.streams.entry(fd).or_default().max_per_read = Some(n);
        self
    }

    /// Fail the read with zero-based index `index` on `fd`.
    pub(crate) fn fail_on_read(mut self, fd: RawDescriptor, index: usize) -> Self {
        self.streams.entry(fd).or_default().fail_on_read = Some(index);
        self
    }

    pub(crate) fn interrupt_first(mut self, fd: RawDescriptor) -> Self {
        self.streams.entry(fd).or_default().interrupt_first = true;
        self
    }

    /// Append more bytes to an existing stream.
    pub(crate) fn feed(&mut self, fd: RawDescriptor, data: &[u8]) {
        self.streams.entry(fd).or_default().data.extend_from_slice(data);
    }

    pub(crate) fn reads_on(&self, fd: RawDescriptor) -> usize {
        self.streams.get(&fd).map_or(0, |script| script.reads)
    }
}

impl ChunkSource for ScriptedSource {
    fn read_chunk(&mut self, fd: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        self.total_reads += 1;
        self.largest_request = self.largest_request.max(buf.len());

        let script = self
            .streams
            .get_mut(&fd.raw())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such descriptor"))?;
        let index = script.reads;
        script.reads += 1;

        if index == 0 && script.interrupt_first {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        if script.fail_on_read == Some(index) {
            return Err(io::Error::other("scripted read failure"));
        }

        let remaining = script.data.len() - script.pos;
        let limit = script.max_per_read.unwrap_or(usize::MAX);
        let n = remaining.min(buf.len()).min(limit);
        buf[..n].copy_from_slice(&script.data[script.pos..script.pos + n]);
        script.pos += n;
        self.largest_delivery = self.largest_delivery.max(n);
        Ok(n)
    }
}
