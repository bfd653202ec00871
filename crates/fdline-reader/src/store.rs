use std::collections::HashMap;

use fdline_source::Descriptor;

/// Storage for bytes read from a descriptor but not yet returned.
///
/// A reader takes a descriptor's buffer out at the start of a call and puts
/// the remainder back when a line leaves bytes behind. Descriptors that
/// reach end-of-stream or fail are simply never put back, so an entry
/// exists only while there is something to carry.
///
/// Swapping the store is the extension point for sharing readers across
/// threads: an implementation may lock per descriptor.
pub trait PendingStore {
    /// Remove and return the pending bytes for `fd`.
    fn take(&mut self, fd: Descriptor) -> Option<Vec<u8>>;

    /// Record `pending` as the carry for `fd`. Empty buffers are not stored.
    fn put(&mut self, fd: Descriptor, pending: Vec<u8>);

    /// Drop any pending bytes for `fd`. Returns whether there were any.
    fn discard(&mut self, fd: Descriptor) -> bool {
        self.take(fd).is_some()
    }

    /// Number of bytes pending for `fd`.
    fn pending_len(&self, fd: Descriptor) -> usize;

    /// Number of descriptors with pending bytes.
    fn tracked(&self) -> usize;

    /// Drop every pending buffer.
    fn clear(&mut self);
}

/// Default store: one owned buffer per descriptor in a hash map.
#[derive(Debug, Default)]
pub struct DescriptorMap {
    pending: HashMap<Descriptor, Vec<u8>>,
}

impl DescriptorMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PendingStore for DescriptorMap {
    fn take(&mut self, fd: Descriptor) -> Option<Vec<u8>> {
        self.pending.remove(&fd)
    }

    fn put(&mut self, fd: Descriptor, pending: Vec<u8>) {
        if pending.is_empty() {
            self.pending.remove(&fd);
        } else {
            self.pending.insert(fd, pending);
        }
    }

    fn pending_len(&self, fd: Descriptor) -> usize {
        self.pending.get(&fd).map_or(0, Vec::len)
    }

    fn tracked(&self) -> usize {
        self.pending.len()
    }

    fn clear(&mut self) {
        self.pending.clear();
    }
}
