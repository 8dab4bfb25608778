//! Tests for the driver connection
//!
//! Reader tests run over in-memory streams. Socket tests use a throwaway
//! listener in a temp directory; nothing touches `/tmp/WacKeys.sock`.

use super::*;
use std::io::Cursor;
use std::io::Write;
use std::os::unix::net::UnixListener;
use tempfile::TempDir;

/// Reader that hands out at most `chunk` bytes per call
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
    interrupt_next: bool,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::from(ErrorKind::Interrupted));
        }
        self.interrupt_next = true;

        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[test]
fn test_reads_consecutive_frames() {
    let mut reader = FrameReader::new(Cursor::new(b"BP001M00BR001M00".to_vec()));

    assert_eq!(reader.next_frame().unwrap(), Some(*b"BP001M00"));
    assert_eq!(reader.next_frame().unwrap(), Some(*b"BR001M00"));
    assert_eq!(reader.next_frame().unwrap(), None);
}

#[test]
fn test_empty_stream_is_end() {
    let mut reader = FrameReader::new(Cursor::new(Vec::new()));
    assert_eq!(reader.next_frame().unwrap(), None);
    // Stays closed rather than spinning on empty frames
    assert_eq!(reader.next_frame().unwrap(), None);
}

#[test]
fn test_partial_frame_is_discarded() {
    let mut reader = FrameReader::new(Cursor::new(b"RR010M00RR0".to_vec()));

    assert_eq!(reader.next_frame().unwrap(), Some(*b"RR010M00"));
    assert_eq!(reader.next_frame().unwrap(), None);
}

#[test]
fn test_reassembles_short_reads_and_retries_interrupts() {
    let mut reader = FrameReader::new(Trickle {
        data: b"RR123M02".to_vec(),
        pos: 0,
        chunk: 3,
        interrupt_next: true,
    });

    assert_eq!(reader.next_frame().unwrap(), Some(*b"RR123M02"));
}

#[test]
fn test_connect_missing_socket() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.sock");

    match connect(&path) {
        Err(IpcError::SocketNotFound(p)) => assert_eq!(p, path),
        other => panic!("Expected SocketNotFound, got: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_connect_and_read_over_socket() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pad.sock");
    let listener = UnixListener::bind(&path).unwrap();

    let client = connect(&path).unwrap();
    let (mut server, _) = listener.accept().unwrap();
    server.write_all(b"BP002M01").unwrap();
    drop(server);

    let mut reader = FrameReader::new(client);
    assert_eq!(reader.next_frame().unwrap(), Some(*b"BP002M01"));
    assert_eq!(reader.next_frame().unwrap(), None);
}

#[test]
fn test_socket_not_found_message() {
    let err = IpcError::SocketNotFound(PathBuf::from("/tmp/WacKeys.sock"));
    assert_eq!(
        err.to_string(),
        "Could not connect to /tmp/WacKeys.sock. Are you sure wackeys is running?"
    );
}
