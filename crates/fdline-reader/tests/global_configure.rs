#![cfg(unix)]

// Runs in its own process: the global configuration can only be fixed once.

use std::io::Write;
use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream;

use fdline_reader::{global, LineConfig, LineError};

#[test]
fn rejected_descriptor_leaves_configuration_open() {
    let err = global::next_line(-1).unwrap_err();
    assert!(matches!(err, LineError::InvalidDescriptor { fd: -1 }));
    assert!(global::reset(-2).is_err());
    assert_eq!(global::pending_len(-1), 0);

    global::configure(LineConfig::with_chunk_size(4)).expect("configure should still succeed");
    assert_eq!(global::active_config().chunk_size, 4);

    let (mut left, right) = UnixStream::pair().unwrap();
    let fd = right.as_raw_fd();
    left.write_all(b"ab\ncdef\ngh").unwrap();
    drop(left);

    let collected: Vec<Vec<u8>> = global::lines(fd)
        .map(|line| line.unwrap().as_bytes().to_vec())
        .collect();
    assert_eq!(
        collected,
        vec![b"ab\n".to_vec(), b"cdef\n".to_vec(), b"gh".to_vec()]
    );
}
