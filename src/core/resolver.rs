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

//! src/core/resolver.rs
//!
//! Section precedence resolution
//!
//! A mapping is looked up in up to four sections, most specific first:
//! 1. `{class}/layer_{n}`
//! 2. `{class}`
//! 3. `layer_{n}`
//! 4. `default`
//!
//! where `n` is the one-based layer. The first section that defines the
//! *key* wins; a section that exists but lacks the key is skipped. Without a
//! focused window the two class sections are skipped.

use crate::config::Config;
use crate::core::types::{ActionSpec, MappingKey};

/// Name of the catch-all section.
pub const DEFAULT_SECTION: &str = "default";

/// Resolves pad inputs to actions against a loaded `Config`.
#[derive(Clone, Copy, Debug)]
pub struct ConfigResolver<'a> {
    config: &'a Config,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolves `key` on `layer_index` for the focused `window_class`.
    ///
    /// Returns `None` when no section defines the key ("no mapping").
    ///
    /// # Example
    /// ```
    /// use wactions::config::parse_config;
    /// use wactions::core::{ActionSpec, ConfigResolver, MappingKey};
    ///
    /// let config = parse_config("[default]\nbutton_1 = a\n[Firefox]\nbutton_1 = Control L\n")?;
    /// let resolver = ConfigResolver::new(&config);
    ///
    /// assert_eq!(
    ///     resolver.resolve(MappingKey::Button(0), 0, Some("Firefox")),
    ///     Some(ActionSpec::KeyAction("ControlL".to_string()))
    /// );
    /// assert_eq!(
    ///     resolver.resolve(MappingKey::Button(0), 0, None),
    ///     Some(ActionSpec::KeyAction("a".to_string()))
    /// );
    /// # Ok::<(), wactions::config::ConfigError>(())
    /// ```
    pub fn resolve(
        &self,
        key: MappingKey,
        layer_index: u32,
        window_class: Option<&str>,
    ) -> Option<ActionSpec> {
        self.resolve_raw(key, layer_index, window_class)
            .map(ActionSpec::parse)
    }

    /// Like `resolve`, but returns the raw config value untouched.
    pub fn resolve_raw(
        &self,
        key: MappingKey,
        layer_index: u32,
        window_class: Option<&str>,
    ) -> Option<&'a str> {
        let config = self.config;
        let key_name = key.to_string();

        candidate_sections(layer_index, window_class)
            .iter()
            .find_map(|section| config.get(section, &key_name))
    }
}

/// Section names to search, in precedence order.
pub fn candidate_sections(layer_index: u32, window_class: Option<&str>) -> Vec<String> {
    let layer = format!("layer_{}", u64::from(layer_index) + 1);
    let mut sections = Vec::with_capacity(4);

    if let Some(class) = window_class {
        sections.push(format!("{}/{}", class, layer));
        sections.push(class.to_string());
    }
    sections.push(layer);
    sections.push(DEFAULT_SECTION.to_string());

    sections
}
