//! X11 collaborators backed by `xdotool` and `xprop`.

use regex::Regex;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;

use crate::core::SynthAction;
use crate::desktop::{DesktopError, ProcessRunner, Synthesizer, WindowContextProvider};

#[allow(clippy::unwrap_used)] // literal pattern
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""(.*?)""#).unwrap());

/// Extracts the class from `xprop WM_CLASS` output.
///
/// The output looks like `WM_CLASS(STRING) = "Navigator", "firefox"`; the
/// first quoted string is used.
pub fn parse_wm_class(xprop_output: &str) -> Option<String> {
    CLASS_RE
        .captures(xprop_output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Focused window lookup via `xdotool getactivewindow` + `xprop WM_CLASS`
#[derive(Debug, Default)]
pub struct XpropWindowContext;

impl XpropWindowContext {
    fn run(program: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| log::warn!("Failed to run {}: {}", program, e))
            .ok()?;

        if !output.status.success() {
            log::debug!("{} {:?} exited with {}", program, args, output.status);
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl WindowContextProvider for XpropWindowContext {
    fn active_window_class(&mut self) -> Option<String> {
        // Fails when nothing has focus (e.g. bare root window)
        let window_id = Self::run("xdotool", &["getactivewindow"])?;
        let xprop = Self::run("xprop", &["WM_CLASS", "-id", &window_id])?;
        let class = parse_wm_class(&xprop);

        log::debug!("Active window {} has class {:?}", window_id, class);
        class
    }
}

/// Key synthesis through `xdotool keydown|keyup|key`
///
/// Each call waits for `xdotool` to exit so that a press is on the display
/// before the matching release is sent.
#[derive(Debug, Default)]
pub struct XdotoolSynthesizer;

impl XdotoolSynthesizer {
    pub fn subcommand(action: SynthAction) -> &'static str {
        match action {
            SynthAction::Press => "keydown",
            SynthAction::Release => "keyup",
            SynthAction::Tap => "key",
        }
    }
}

impl Synthesizer for XdotoolSynthesizer {
    fn synthesize(&mut self, action: SynthAction, key: &str) -> Result<(), DesktopError> {
        let status = Command::new("xdotool")
            .arg(Self::subcommand(action))
            .arg(key)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| DesktopError::Spawn {
                program: "xdotool".to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(DesktopError::ToolFailed {
                tool: "xdotool".to_string(),
                status: status.to_string(),
            })
        }
    }
}

/// Fire-and-forget process launcher
///
/// The child is reaped on a detached thread; its exit status is discarded.
#[derive(Debug, Default)]
pub struct CommandRunner;

impl ProcessRunner for CommandRunner {
    fn spawn(&mut self, tokens: &[String]) -> Result<(), DesktopError> {
        let (program, args) = tokens.split_first().ok_or(DesktopError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| DesktopError::Spawn {
                program: program.clone(),
                source,
            })?;

        log::debug!("Spawned '{}' (pid {})", tokens.join(" "), child.id());
        thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }
}
