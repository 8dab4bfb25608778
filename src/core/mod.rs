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

//! src/core/mod.rs
//!
//! Core event translation logic
//!
//! This module contains the parts of the daemon with real invariants:
//! - Type definitions for events and actions
//! - Wire frame decoding
//! - Section precedence resolution against the config
//! - Ring rotation gesture tracking
//!
//! Everything here is pure or owns only its own state, so it can be unit
//! tested without a socket, a display server or `xdotool`.

pub mod frame;
pub mod resolver;
pub mod rotation;
pub mod types;

pub use frame::{decode, DecodeError, Frame, FRAME_LEN};
pub use resolver::ConfigResolver;
pub use rotation::{RotationState, RotationTracker};
pub use types::*;
