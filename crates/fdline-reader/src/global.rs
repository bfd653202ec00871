//! Process-wide line reading keyed by descriptor.
//!
//! These functions share one pending store and one configuration for the
//! whole process. The configuration is fixed on first use: either by an
//! explicit [`configure`] call or, failing that, from [`LineConfig::from_env`].
//!
//! The store is locked only to take and put a descriptor's pending bytes,
//! never across a read, so a call blocked on one descriptor does not hold
//! up calls on another. Calls for the *same* descriptor must still be
//! serialized by the caller.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use fdline_source::{Descriptor, RawDescriptor, SysRead};
use tracing::debug;

use crate::config::{ConfigError, LineConfig};
use crate::error::Result;
use crate::line::{Line, NextLine};
use crate::reader::LineReader;
use crate::store::{DescriptorMap, PendingStore};

static CONFIG: OnceLock<LineConfig> = OnceLock::new();
static STORE: OnceLock<Mutex<DescriptorMap>> = OnceLock::new();

fn lock_store() -> MutexGuard<'static, DescriptorMap> {
    STORE
        .get_or_init(|| Mutex::new(DescriptorMap::new()))
        .lock()
        // Take and put leave the map consistent even if a holder panicked.
        .unwrap_or_else(PoisonError::into_inner)
}

/// Handle onto the process-wide store. Each operation locks briefly.
#[derive(Debug, Default, Clone, Copy)]
pub struct SharedStore;

impl PendingStore for SharedStore {
    fn take(&mut self, fd: Descriptor) -> Option<Vec<u8>> {
        lock_store().take(fd)
    }

    fn put(&mut self, fd: Descriptor, pending: Vec<u8>) {
        lock_store().put(fd, pending);
    }

    fn pending_len(&self, fd: Descriptor) -> usize {
        lock_store().pending_len(fd)
    }

    fn tracked(&self) -> usize {
        lock_store().tracked()
    }

    fn clear(&mut self) {
        lock_store().clear();
    }
}

/// Fix the process-wide configuration.
///
/// Must run before the first read. Fails with
/// [`ConfigError::AlreadyInitialized`] afterwards, and with
/// [`ConfigError::Invalid`] for a zero chunk size.
pub fn configure(config: LineConfig) -> std::result::Result<(), ConfigError> {
    config.validate()?;
    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized {
            chunk_size: active_config().chunk_size,
        })?;
    debug!(chunk_size = config.chunk_size, "configured process-wide line reader");
    Ok(())
}

/// The configuration in effect, initializing it from the environment if
/// nothing was configured yet.
pub fn active_config() -> LineConfig {
    *CONFIG.get_or_init(LineConfig::from_env)
}

fn shared_reader() -> LineReader<SharedStore, SysRead> {
    LineReader::from_parts(SysRead, SharedStore, active_config())
}

/// Read the next line from `fd` using process-wide state.
///
/// See [`LineReader::next_line`] for the contract. A negative descriptor
/// is rejected before the configuration is fixed, so [`configure`] still
/// works afterwards.
pub fn next_line(fd: RawDescriptor) -> Result<NextLine> {
    Descriptor::new(fd)?;
    shared_reader().next_line(fd)
}

/// Iterate over the remaining lines of `fd` using process-wide state.
pub fn lines(fd: RawDescriptor) -> impl Iterator<Item = Result<Line>> {
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match next_line(fd) {
            Ok(NextLine::Line(line)) => Some(Ok(line)),
            Ok(NextLine::EndOfStream) => {
                done = true;
                None
            }
            Err(err) => {
                done = true;
                Some(Err(err))
            }
        }
    })
}

/// Forget pending bytes for `fd`, e.g. before closing it so a later
/// descriptor with the same number starts clean.
pub fn reset(fd: RawDescriptor) -> Result<bool> {
    Descriptor::new(fd)?;
    shared_reader().reset(fd)
}

/// Forget pending bytes for every descriptor.
pub fn reset_all() {
    SharedStore.clear();
}

/// Number of bytes pending for `fd` in the process-wide store.
pub fn pending_len(fd: RawDescriptor) -> usize {
    Descriptor::new(fd).map_or(0, |fd| SharedStore.pending_len(fd))
}
