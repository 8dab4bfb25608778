//! Desktop collaborators
//!
//! The daemon core never talks to the display server directly. It goes
//! through three narrow traits:
//! - `WindowContextProvider`: class of the focused window
//! - `Synthesizer`: key down / key up / key tap
//! - `ProcessRunner`: launch a command and forget about it
//!
//! `x11` implements them with `xdotool` and `xprop`; `DryRun` implements the
//! action traits by logging only.

pub mod tools;
pub mod x11;

use std::io;
use thiserror::Error;

use crate::core::SynthAction;

pub use tools::{find_missing_tools, REQUIRED_TOOLS};
pub use x11::{CommandRunner, XdotoolSynthesizer, XpropWindowContext};

/// Failures of external tools
///
/// These never stop the daemon; the dispatcher logs and drops them.
#[derive(Debug, Error)]
pub enum DesktopError {
    /// Tool ran but exited unsuccessfully
    #[error("'{tool}' exited with {status}")]
    ToolFailed { tool: String, status: String },

    /// Tool could not be started at all
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A `run:` value with nothing after it
    #[error("Empty command")]
    EmptyCommand,
}

/// Supplies the class of the currently focused window.
pub trait WindowContextProvider {
    /// `None` when no window has focus or the class can't be determined.
    fn active_window_class(&mut self) -> Option<String>;
}

/// Generates synthetic key events.
pub trait Synthesizer {
    fn synthesize(&mut self, action: SynthAction, key: &str) -> Result<(), DesktopError>;

    fn press(&mut self, key: &str) -> Result<(), DesktopError> {
        self.synthesize(SynthAction::Press, key)
    }

    fn release(&mut self, key: &str) -> Result<(), DesktopError> {
        self.synthesize(SynthAction::Release, key)
    }

    fn tap(&mut self, key: &str) -> Result<(), DesktopError> {
        self.synthesize(SynthAction::Tap, key)
    }
}

/// Launches external commands without waiting for them.
pub trait ProcessRunner {
    /// `tokens[0]` is the program, the rest are its arguments.
    fn spawn(&mut self, tokens: &[String]) -> Result<(), DesktopError>;
}

/// Logs actions instead of performing them (`--dry-run`)
#[derive(Debug, Default)]
pub struct DryRun;

impl Synthesizer for DryRun {
    fn synthesize(&mut self, action: SynthAction, key: &str) -> Result<(), DesktopError> {
        log::info!("[dry-run] {} {}", action, key);
        Ok(())
    }
}

impl ProcessRunner for DryRun {
    fn spawn(&mut self, tokens: &[String]) -> Result<(), DesktopError> {
        if tokens.is_empty() {
            return Err(DesktopError::EmptyCommand);
        }
        log::info!("[dry-run] run {}", tokens.join(" "));
        Ok(())
    }
}
