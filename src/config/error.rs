use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the mapping configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    /// An entry appeared before any `[section]` header.
    #[error("Line {line}: entry outside of any section")]
    MissingSectionHeader { line: usize },
    /// Line is neither a header, an entry, a continuation nor a comment.
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },
    /// The same `[section]` header appears twice.
    #[error("Line {line}: section '{section}' already defined")]
    DuplicateSection { section: String, line: usize },
    /// The same key appears twice within one section.
    #[error("Line {line}: key '{key}' already defined in section '{section}'")]
    DuplicateKey {
        section: String,
        key: String,
        line: usize,
    },
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
