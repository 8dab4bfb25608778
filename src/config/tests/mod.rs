//! Config module tests
//!
//! - INI grammar (headers, delimiters, comments, continuations)
//! - Error reporting with line numbers
//! - Loading from disk and key validation
