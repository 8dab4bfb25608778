//! Mapping configuration: loading, lookup and key validation.
//!
//! The configuration is an INI-style file (see [`parser`] for the grammar)
//! whose sections select *where* a mapping applies and whose keys select
//! *which input* it maps:
//!
//! - sections: `[Firefox/layer_2]`, `[Firefox]`, `[layer_2]`, `[default]`
//! - keys: `button_1` .. `button_8`, `ring_cw`, `ring_ccw`
//!
//! It is loaded once at startup and never mutated afterwards.
//!
//! # Example
//!
//! ```no_run
//! use wactions::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("/home/user/.config/wactions/config"))?;
//! for warning in config.unrecognised_keys() {
//!     eprintln!("{}", warning);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod parser;

use std::fmt;
use std::fs;
use std::path::Path;

pub use error::ConfigError;
pub use parser::parse_config;

/// Number of pad buttons that have a config key (`button_1` .. `button_8`).
pub const BUTTON_COUNT: u32 = 8;

/// A named group of `key = value` entries, in file order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Section name exactly as written in the header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value for `key` (keys are stored lower-cased).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Immutable mapping configuration
///
/// An ordered list of sections. Section lookup is linear; real configs hold
/// a handful of sections with at most ten keys each.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    sections: Vec<Section>,
}

impl Config {
    /// Looks up a section by exact name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Raw value of `key` in `section`, if both exist.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// All sections in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Entries whose key can never be looked up.
    ///
    /// These are not errors (the file still loads), but almost always a
    /// typo such as `button_0` or `ring-cw`.
    pub fn unrecognised_keys(&self) -> Vec<UnknownKey> {
        self.sections
            .iter()
            .flat_map(|section| {
                section
                    .entries()
                    .filter(|(key, _)| !is_known_key(key))
                    .map(|(key, _)| UnknownKey {
                        section: section.name.clone(),
                        key: key.to_string(),
                    })
            })
            .collect()
    }
}

/// A key that no input maps to
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownKey {
    pub section: String,
    pub key: String,
}

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown key '{}' in section [{}] (expected button_1..button_{}, ring_cw or ring_ccw)",
            self.key, self.section, BUTTON_COUNT
        )
    }
}

/// Returns true for `button_1`..`button_8`, `ring_cw` and `ring_ccw`.
pub fn is_known_key(key: &str) -> bool {
    if key == "ring_cw" || key == "ring_ccw" {
        return true;
    }

    key.strip_prefix("button_")
        .filter(|n| n.bytes().all(|b| b.is_ascii_digit()) && !n.starts_with('0'))
        .and_then(|n| n.parse::<u32>().ok())
        .is_some_and(|n| (1..=BUTTON_COUNT).contains(&n))
}

/// Reads and parses the mapping file at `path`.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file doesn't exist, `Io` if it
/// can't be read, or a syntax error with the offending line number.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    log::info!(
        "Loaded {} section(s) from {}",
        config.sections.len(),
        path.display()
    );

    Ok(config)
}

#[cfg(test)]
mod tests;
