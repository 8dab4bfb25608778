//! Action dispatch
//!
//! Turns a resolved `ActionSpec` into a call on the desktop collaborators:
//! - `KeyAction(name)` goes to the `Synthesizer` with the requested primitive
//! - `RunCommand(tokens)` goes to the `ProcessRunner`
//! - no mapping does nothing
//!
//! Failures are logged and swallowed. A broken `xdotool` or a typo in a
//! `run:` command must not take the daemon down, and nothing is retried.

use crate::core::{ActionSpec, SynthAction};
use crate::desktop::{ProcessRunner, Synthesizer};

/// Routes actions to the synthesizer or the process runner.
pub struct ActionDispatcher {
    synthesizer: Box<dyn Synthesizer>,
    runner: Box<dyn ProcessRunner>,
}

impl ActionDispatcher {
    pub fn new(synthesizer: Box<dyn Synthesizer>, runner: Box<dyn ProcessRunner>) -> Self {
        Self {
            synthesizer,
            runner,
        }
    }

    /// Performs `spec` as `action`; `None` (no mapping) is a no-op.
    ///
    /// `action` only matters for key actions. Commands are launched whatever
    /// the primitive, so a `run:` button fires on both press and release.
    pub fn dispatch(&mut self, spec: Option<&ActionSpec>, action: SynthAction) {
        let Some(spec) = spec else {
            return;
        };

        let result = match spec {
            ActionSpec::KeyAction(key) if key.is_empty() => {
                log::debug!("Ignoring empty key mapping");
                Ok(())
            }
            ActionSpec::KeyAction(key) => {
                log::debug!("{} {}", action, key);
                self.synthesizer.synthesize(action, key)
            }
            ActionSpec::RunCommand(tokens) => {
                log::debug!("run {:?}", tokens);
                self.runner.spawn(tokens)
            }
        };

        if let Err(e) = result {
            log::warn!("Action '{}' failed: {}", spec, e);
        }
    }
}

#[cfg(test)]
mod tests;
