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

//! The event loop
//!
//! One frame is read, decoded and fully handled (including any `xdotool`
//! call) before the next read. The driver already serialises events, so
//! there is no queueing and no locking; the rotation tracker is owned by
//! the loop.
//!
//! ```text
//! socket -> FrameReader -> decode -> { ConfigResolver, RotationTracker } -> ActionDispatcher
//! ```
//!
//! The loop ends cleanly when the driver closes the connection (or when the
//! socket is shut down from a signal handler). Bad frames are dropped.
//!
//! # Example
//! ```no_run
//! use wactions::actions::ActionDispatcher;
//! use wactions::config::load_config;
//! use wactions::daemon::{DaemonContext, EventLoop};
//! use wactions::desktop::{CommandRunner, XdotoolSynthesizer, XpropWindowContext};
//! use wactions::ipc::connect;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("/home/user/.config/wactions/config"))?;
//! let context = DaemonContext::new(config, "/tmp/WacKeys.sock".into());
//! let stream = connect(&context.socket_path)?;
//!
//! let dispatcher = ActionDispatcher::new(Box::new(XdotoolSynthesizer), Box::new(CommandRunner));
//! let mut event_loop = EventLoop::new(&context, stream, Box::new(XpropWindowContext), dispatcher);
//! event_loop.run()?; // Blocks until the driver disconnects
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Read;
use std::path::PathBuf;

use crate::actions::ActionDispatcher;
use crate::config::Config;
use crate::core::{
    decode, ConfigResolver, Event, Frame, MappingKey, RotationState, RotationTracker, SynthAction,
};
use crate::desktop::WindowContextProvider;
use crate::ipc::{FrameReader, IpcError};

/// Startup state shared read-only with the loop
#[derive(Debug)]
pub struct DaemonContext {
    pub config: Config,
    pub socket_path: PathBuf,
}

impl DaemonContext {
    pub fn new(config: Config, socket_path: PathBuf) -> Self {
        Self {
            config,
            socket_path,
        }
    }
}

/// Counters reported when the loop ends
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoopSummary {
    /// Frames read from the socket
    pub frames: usize,
    /// Frames that failed to decode
    pub dropped: usize,
}

/// Sequential frame processor
pub struct EventLoop<'a, R> {
    resolver: ConfigResolver<'a>,
    frames: FrameReader<R>,
    window: Box<dyn WindowContextProvider>,
    dispatcher: ActionDispatcher,
    rotation: RotationTracker,
}

impl<'a, R: Read> EventLoop<'a, R> {
    pub fn new(
        context: &'a DaemonContext,
        stream: R,
        window: Box<dyn WindowContextProvider>,
        dispatcher: ActionDispatcher,
    ) -> Self {
        Self {
            resolver: ConfigResolver::new(&context.config),
            frames: FrameReader::new(stream),
            window,
            dispatcher,
            rotation: RotationTracker::new(),
        }
    }

    /// Processes frames until the peer closes the connection.
    ///
    /// # Errors
    ///
    /// Only a failing read ends the loop with an error. Per-event problems
    /// (bad frames, unmapped inputs, failing tools) never do.
    pub fn run(&mut self) -> Result<LoopSummary, IpcError> {
        let mut summary = LoopSummary::default();

        while let Some(frame) = self.frames.next_frame()? {
            summary.frames += 1;
            if !self.handle_frame(&frame) {
                summary.dropped += 1;
            }
        }

        log::info!(
            "Connection closed after {} frame(s), {} dropped",
            summary.frames,
            summary.dropped
        );
        Ok(summary)
    }

    /// Decodes and handles one frame; returns false if it was dropped.
    pub fn handle_frame(&mut self, frame: &Frame) -> bool {
        match decode(frame) {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(e) => {
                log::debug!("Dropping frame {:?}: {}", String::from_utf8_lossy(frame), e);
                false
            }
        }
    }

    /// Routes one decoded event to the resolver, the tracker and the dispatcher.
    pub fn handle_event(&mut self, event: Event) {
        log::debug!("Event: {}", event);

        match event {
            Event::ButtonPress {
                button_index,
                layer_index,
            } => {
                let key = MappingKey::Button(button_index);
                self.resolve_and_dispatch(key, layer_index, SynthAction::Press);
            }
            Event::ButtonRelease {
                button_index,
                layer_index,
            } => {
                let key = MappingKey::Button(button_index);
                self.resolve_and_dispatch(key, layer_index, SynthAction::Release);
            }
            Event::RingRotate {
                angle_degrees,
                layer_index,
            } => {
                if let Some(direction) = self.rotation.feed(angle_degrees) {
                    log::debug!("Ring turned {}", direction);
                    let key = MappingKey::Ring(direction);
                    self.resolve_and_dispatch(key, layer_index, SynthAction::Tap);
                }
            }
            Event::RingRotateEnd => self.rotation.reset(),
        }
    }

    pub fn rotation_state(&self) -> RotationState {
        self.rotation.state()
    }

    fn resolve_and_dispatch(&mut self, key: MappingKey, layer_index: u32, action: SynthAction) {
        let window_class = self.window.active_window_class();
        let spec = self.resolver.resolve(key, layer_index, window_class.as_deref());

        match &spec {
            Some(spec) => log::debug!("{} -> {}", key, spec),
            None => log::debug!("{} on layer {} is unmapped", key, u64::from(layer_index) + 1),
        }

        self.dispatcher.dispatch(spec.as_ref(), action);
    }
}

#[cfg(test)]
mod tests;
