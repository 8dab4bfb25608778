//! src/core/types.rs
//!
//! Core type definitions for pad event handling
//!
//! This module defines the fundamental types used throughout the application:
//! - `Event`: A decoded pad event (button press/release, ring motion)
//! - `RingDirection`: Which way the ring was turned
//! - `MappingKey`: The config key an event looks up (`button_N`, `ring_cw`, ...)
//! - `ActionSpec`: What a config value asks us to do
//! - `SynthAction`: The key synthesis primitive (press, release, tap)

use std::fmt;

/// Substring that marks a config value as a shell command.
pub const RUN_MARKER: &str = "run:";

/// A decoded pad event
///
/// Indices are zero-based as sent by the driver. The reference hardware has
/// 8 buttons and 4 layers, but nothing here enforces that: out-of-range
/// values simply fail to resolve to a mapping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    /// A button went down
    ButtonPress { button_index: u32, layer_index: u32 },

    /// A button came up
    ButtonRelease { button_index: u32, layer_index: u32 },

    /// The ring reported a new absolute angle (0-359 degrees)
    RingRotate { angle_degrees: u32, layer_index: u32 },

    /// The finger left the ring
    RingRotateEnd,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ButtonPress {
                button_index,
                layer_index,
            } => {
                write!(f, "press button {} (layer {})", button_index, layer_index)
            }
            Event::ButtonRelease {
                button_index,
                layer_index,
            } => {
                write!(f, "release button {} (layer {})", button_index, layer_index)
            }
            Event::RingRotate {
                angle_degrees,
                layer_index,
            } => {
                write!(f, "ring at {}° (layer {})", angle_degrees, layer_index)
            }
            Event::RingRotateEnd => write!(f, "ring released"),
        }
    }
}

/// Direction of a completed ring gesture
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RingDirection {
    Clockwise,
    CounterClockwise,
}

impl RingDirection {
    /// Config key for this direction.
    pub fn key_name(&self) -> &'static str {
        match self {
            RingDirection::Clockwise => "ring_cw",
            RingDirection::CounterClockwise => "ring_ccw",
        }
    }
}

impl fmt::Display for RingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingDirection::Clockwise => write!(f, "clockwise"),
            RingDirection::CounterClockwise => write!(f, "counter-clockwise"),
        }
    }
}

/// The config key an event is looked up under
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MappingKey {
    /// Zero-based button index, written as `button_{index+1}`
    Button(u32),

    /// Ring gesture, written as `ring_cw` / `ring_ccw`
    Ring(RingDirection),
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKey::Button(index) => write!(f, "button_{}", u64::from(*index) + 1),
            MappingKey::Ring(direction) => write!(f, "{}", direction.key_name()),
        }
    }
}

/// What a config value asks for
///
/// A value containing `run:` is a command: everything after the *last*
/// occurrence is split on whitespace into program + arguments. Anything else
/// is a key name for the synthesizer, with all whitespace removed
/// (`"Control L"` becomes `"ControlL"`, `"ctrl + z"` becomes `"ctrl+z"`).
///
/// # Example
/// ```
/// use wactions::core::ActionSpec;
///
/// assert_eq!(
///     ActionSpec::parse("  run:  notify-send hi  "),
///     ActionSpec::RunCommand(vec!["notify-send".to_string(), "hi".to_string()])
/// );
/// assert_eq!(ActionSpec::parse("Control L"), ActionSpec::KeyAction("ControlL".to_string()));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionSpec {
    /// Spawn a process; first token is the program
    RunCommand(Vec<String>),

    /// Forward to the synthesizer as a key name
    KeyAction(String),
}

impl ActionSpec {
    /// Interprets a raw config value.
    pub fn parse(raw: &str) -> Self {
        match raw.rfind(RUN_MARKER) {
            Some(pos) => {
                let command = &raw[pos + RUN_MARKER.len()..];
                ActionSpec::RunCommand(command.split_whitespace().map(str::to_string).collect())
            }
            None => ActionSpec::KeyAction(raw.chars().filter(|c| !c.is_whitespace()).collect()),
        }
    }
}

impl fmt::Display for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionSpec::RunCommand(tokens) => write!(f, "run: {}", tokens.join(" ")),
            ActionSpec::KeyAction(name) => write!(f, "key {}", name),
        }
    }
}

/// Key synthesis primitive
///
/// Buttons map to `Press`/`Release` so that held buttons behave like held
/// keys. Ring gestures have no release, so they map to `Tap`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SynthAction {
    Press,
    Release,
    Tap,
}

impl fmt::Display for SynthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthAction::Press => write!(f, "press"),
            SynthAction::Release => write!(f, "release"),
            SynthAction::Tap => write!(f, "tap"),
        }
    }
}
