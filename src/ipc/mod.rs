// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Driver socket connection and frame reading
//!
//! The pad driver (`wackeys`) listens on a Unix stream socket and writes one
//! 8-byte frame per pad event. There is no handshake and nothing is ever
//! written back: the client connects and reads.
//!
//! # Example
//! ```no_run
//! use wactions::ipc::{connect, FrameReader};
//! use std::path::Path;
//!
//! let stream = connect(Path::new("/tmp/WacKeys.sock"))?;
//! let mut frames = FrameReader::new(stream);
//!
//! while let Some(frame) = frames.next_frame()? {
//!     println!("{:?}", frame);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, ErrorKind, Read};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::{Frame, FRAME_LEN};

/// Socket path the driver listens on by default.
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/WacKeys.sock";

/// Driver connection errors
#[derive(Debug, Error)]
pub enum IpcError {
    /// No socket file at the given path
    #[error("Could not connect to {0}. Are you sure wackeys is running?")]
    SocketNotFound(PathBuf),

    /// Socket exists but the connection was refused or failed
    #[error("Failed to connect to {path}: {source}")]
    ConnectFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read error on an established connection
    #[error("Socket read failed: {0}")]
    Io(#[from] io::Error),
}

/// Connects to the driver socket at `path`.
pub fn connect(path: &Path) -> Result<UnixStream, IpcError> {
    UnixStream::connect(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IpcError::SocketNotFound(path.to_path_buf()),
        _ => IpcError::ConnectFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// Reads fixed-size frames from a byte stream
///
/// Generic over `Read` so tests can drive it from memory.
pub struct FrameReader<R> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Blocks until one full frame has arrived.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(frame))` - A complete frame
    /// * `Ok(None)` - The peer closed the stream. A frame cut short by the
    ///   close is discarded.
    /// * `Err(IpcError::Io)` - Any other read failure
    pub fn next_frame(&mut self) -> Result<Option<Frame>, IpcError> {
        let mut frame = [0u8; FRAME_LEN];
        let mut filled = 0;

        while filled < FRAME_LEN {
            match self.inner.read(&mut frame[filled..]) {
                Ok(0) => {
                    if filled > 0 {
                        log::warn!(
                            "Connection closed mid-frame, discarding {} byte(s)",
                            filled
                        );
                    }
                    return Ok(None);
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(IpcError::Io(e)),
            }
        }

        log::trace!("Frame {:?}", String::from_utf8_lossy(&frame));
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests;
