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

//! Wacom pad actions
//!
//! Translates tablet pad events (button presses, ring rotation) coming from
//! the `wackeys` driver socket into synthetic key presses or commands,
//! chosen per focused application and per pad layer.
//!
//! # Features
//!
//! - **Per-application mappings:** `[Firefox]`, `[Firefox/layer_2]` sections
//! - **Layers:** the pad mode switch selects `[layer_N]` banks
//! - **Ring gestures:** 10° of travel fires `ring_cw` / `ring_ccw` once
//! - **Commands:** any value containing `run:` launches a process
//! - **Dry run:** log what would happen without touching the display
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (frame decoding, section precedence, rotation tracking)
//! - **`config`:** INI mapping file loading and validation
//! - **`ipc`:** Driver socket connection and frame reading
//! - **`desktop`:** Window class, key synthesis and process launching (X11)
//! - **`actions`:** Dispatching resolved actions to the desktop collaborators
//! - **`daemon`:** The sequential event loop tying it together
//!
//! # Examples
//!
//! ## Decoding a frame
//!
//! ```
//! use wactions::core::{decode, Event};
//!
//! let event = decode(b"BP002M01")?;
//! assert_eq!(event, Event::ButtonPress { button_index: 2, layer_index: 1 });
//! # Ok::<(), wactions::core::DecodeError>(())
//! ```
//!
//! ## Resolving a mapping
//!
//! ```
//! use wactions::config::parse_config;
//! use wactions::core::{ActionSpec, ConfigResolver, MappingKey};
//!
//! let config = parse_config("[default]\nbutton_1 = run: notify-send hi\n")?;
//! let resolver = ConfigResolver::new(&config);
//!
//! let action = resolver.resolve(MappingKey::Button(0), 0, None);
//! assert_eq!(
//!     action,
//!     Some(ActionSpec::RunCommand(vec!["notify-send".into(), "hi".into()]))
//! );
//! # Ok::<(), wactions::config::ConfigError>(())
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod daemon;
pub mod desktop;
pub mod ipc;

// Re-export commonly used types for convenience
pub use core::{ActionSpec, Event, MappingKey, RingDirection, SynthAction};
