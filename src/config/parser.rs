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

//! src/config/parser.rs
//!
//! INI-style mapping file parser
//!
//! Grammar (one construct per line):
//! - `[section]` header; names are case-sensitive (`Firefox/layer_2`). The
//!   name runs to the last `]` and anything after it is ignored, so
//!   `[Firefox] ; browser` is the section `Firefox`
//! - `key = value` or `key: value`; the first delimiter wins, so
//!   `button_1 = run: notify-send hi` keeps `run:` in the value
//! - `#` or `;` at the start of a line is a comment
//! - an indented line continues the previous value (joined with `\n`); blank
//!   lines between continuations are kept, trailing ones are dropped
//!
//! Keys are lower-cased and values trimmed. The parser uses nom combinators
//! for the per-line grammar and a small state machine for sections and
//! continuations.

use nom::{
    bytes::complete::{take_till1, take_while1},
    character::complete::{char, one_of},
    error::ErrorKind,
    IResult, Parser,
};

use crate::config::{Config, ConfigError, Section};

/// A single classified line of the file
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only
    Blank,
    /// `#` / `;` comment
    Comment,
    /// `[name]`
    Header(&'a str),
    /// `key = value`, both trimmed
    Entry { key: &'a str, value: &'a str },
    /// Indented text continuing the previous value (trimmed)
    Continuation(&'a str),
}

/// Parse a complete mapping file
///
/// # Arguments
/// * `content` - The full config file content
///
/// # Returns
/// The sections in file order, or the first error with its line number
///
/// # Example
/// ```
/// use wactions::config::parse_config;
///
/// let config = parse_config("[default]\nbutton_1 = a\n")?;
/// assert_eq!(config.get("default", "button_1"), Some("a"));
/// # Ok::<(), wactions::config::ConfigError>(())
/// ```
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let mut sections: Vec<Section> = Vec::new();
    // Continuations are only legal after an entry, its continuations and blank lines
    let mut in_value = false;
    let mut pending_blanks = 0;

    for (line_num, raw) in content.lines().enumerate() {
        let line_num = line_num + 1;

        match classify_line(raw, in_value) {
            Ok(Line::Blank) => {
                if in_value {
                    pending_blanks += 1;
                }
            }
            Ok(Line::Comment) => {}
            Ok(Line::Header(name)) => {
                if sections.iter().any(|s| s.name == name) {
                    return Err(ConfigError::DuplicateSection {
                        section: name.to_string(),
                        line: line_num,
                    });
                }
                sections.push(Section::new(name));
                in_value = false;
                pending_blanks = 0;
            }
            Ok(Line::Entry { key, value }) => {
                let section = sections
                    .last_mut()
                    .ok_or(ConfigError::MissingSectionHeader { line: line_num })?;
                let key = key.to_lowercase();

                if section.get(&key).is_some() {
                    return Err(ConfigError::DuplicateKey {
                        section: section.name.clone(),
                        key,
                        line: line_num,
                    });
                }
                section.entries.push((key, value.to_string()));
                in_value = true;
                pending_blanks = 0;
            }
            Ok(Line::Continuation(text)) => {
                if let Some((_, value)) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                    value.push_str(&"\n".repeat(pending_blanks + 1));
                    value.push_str(text);
                }
                pending_blanks = 0;
            }
            Err(message) => {
                return Err(ConfigError::InvalidSyntax { line: line_num, message });
            }
        }
    }

    Ok(Config { sections })
}

/// Classify one raw line
///
/// `in_value` is true when the previous meaningful line was an entry, which
/// makes an indented line a continuation rather than a new entry.
pub fn classify_line(raw: &str, in_value: bool) -> Result<Line<'_>, String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return Ok(Line::Comment);
    }
    if in_value && raw.starts_with([' ', '\t']) {
        return Ok(Line::Continuation(trimmed));
    }
    if trimmed.starts_with('[') {
        return parse_header(trimmed)
            .map(|(_, name)| Line::Header(name))
            .map_err(|_| format!("malformed section header '{}'", trimmed));
    }

    match parse_entry(trimmed) {
        Ok((_, (key, value))) => Ok(Line::Entry { key, value }),
        Err(_) => Err(format!("expected 'key = value', found '{}'", trimmed)),
    }
}

/// Parse `[name]`
///
/// The name is everything up to the *last* `]` and must not be empty. Text
/// after the closing bracket is returned as the remaining input.
pub fn parse_header(input: &str) -> IResult<&str, &str> {
    let (body, _) = char('[').parse(input)?;
    let close = body
        .rfind(']')
        .ok_or_else(|| nom::Err::Error(nom::error::Error::new(body, ErrorKind::Char)))?;

    let (name, _) = take_while1(|_: char| true).parse(&body[..close])?;
    Ok((&body[close + 1..], name))
}

/// Parse `key = value` / `key: value`
///
/// Returns the trimmed key and value. The value may be empty.
pub fn parse_entry(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, key) = take_till1(|c: char| c == '=' || c == ':').parse(input)?;
    let (value, _) = one_of("=:").parse(input)?;

    let key = key.trim();
    if key.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            ErrorKind::TakeTill1,
        )));
    }

    Ok(("", (key, value.trim())))
}
