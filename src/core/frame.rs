// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! src/core/frame.rs
//!
//! Wire frame decoder
//!
//! The driver writes fixed 8-byte ASCII records, e.g. `BP001M00`:
//! - bytes 0-1: tag (`BP` press, `BR` release, `RR` ring rotating, `RD` ring done)
//! - bytes 2-7: decimal fields separated by arbitrary non-digits
//!
//! Digit runs are extracted left to right. Button frames read
//! `(button_index, layer_index)`, ring frames read `(angle_degrees, layer_index)`.
//! `RD` ignores its payload entirely.
//!
//! Decoding is pure: a bad frame is a `DecodeError`, and the caller decides
//! to drop it.

use regex::bytes::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::core::types::Event;

/// Size of one wire record in bytes.
pub const FRAME_LEN: usize = 8;

/// One raw wire record
pub type Frame = [u8; FRAME_LEN];

#[allow(clippy::unwrap_used)] // literal pattern
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Frame decoding errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// First two bytes are not a known tag
    #[error("Unknown frame tag '{}'", String::from_utf8_lossy(.0))]
    UnknownTag([u8; 2]),

    /// Tag needs two numeric fields but fewer were present
    #[error("Frame '{tag}' needs 2 numeric fields, found {found}")]
    MissingFields { tag: &'static str, found: usize },
}

/// Decode one 8-byte frame into an `Event`.
///
/// # Example
/// ```
/// use wactions::core::{frame::decode, Event};
///
/// assert_eq!(
///     decode(b"BP003M01"),
///     Ok(Event::ButtonPress { button_index: 3, layer_index: 1 })
/// );
/// assert_eq!(decode(b"RD000M00"), Ok(Event::RingRotateEnd));
/// assert!(decode(b"XX000M00").is_err());
/// ```
pub fn decode(raw: &Frame) -> Result<Event, DecodeError> {
    let (tag, payload) = raw.split_at(2);

    match tag {
        b"BP" => {
            let (button_index, layer_index) = two_fields("BP", payload)?;
            Ok(Event::ButtonPress { button_index, layer_index })
        }
        b"BR" => {
            let (button_index, layer_index) = two_fields("BR", payload)?;
            Ok(Event::ButtonRelease { button_index, layer_index })
        }
        b"RR" => {
            let (angle_degrees, layer_index) = two_fields("RR", payload)?;
            Ok(Event::RingRotate { angle_degrees, layer_index })
        }
        b"RD" => Ok(Event::RingRotateEnd),
        _ => Err(DecodeError::UnknownTag([raw[0], raw[1]])),
    }
}

/// Extract all digit runs from a payload, in order.
///
/// Runs too long for a `u32` are skipped (cannot happen with 6 payload bytes).
pub fn digit_runs(payload: &[u8]) -> Vec<u32> {
    DIGITS_RE
        .find_iter(payload)
        .filter_map(|m| std::str::from_utf8(m.as_bytes()).ok()?.parse().ok())
        .collect()
}

fn two_fields(tag: &'static str, payload: &[u8]) -> Result<(u32, u32), DecodeError> {
    let fields = digit_runs(payload);
    match fields.as_slice() {
        [first, second, ..] => Ok((*first, *second)),
        _ => Err(DecodeError::MissingFields {
            tag,
            found: fields.len(),
        }),
    }
}
