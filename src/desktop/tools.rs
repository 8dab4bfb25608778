//! Startup check for the external tools the X11 collaborators shell out to.

use std::env;
use std::ffi::OsStr;

/// Tools that must be on `PATH` for the daemon to work.
pub const REQUIRED_TOOLS: &[&str] = &["xdotool", "xprop"];

/// Returns the entries of `tools` not found in any directory of `path_var`.
///
/// `path_var` has the format of the `PATH` environment variable. Only
/// existence is checked, matching what a shell lookup would find first.
///
/// # Example
/// ```
/// use wactions::desktop::find_missing_tools;
/// use std::ffi::OsStr;
///
/// let missing = find_missing_tools(OsStr::new(""), &["xdotool"]);
/// assert_eq!(missing, vec!["xdotool".to_string()]);
/// ```
pub fn find_missing_tools(path_var: &OsStr, tools: &[&str]) -> Vec<String> {
    let dirs: Vec<_> = env::split_paths(path_var).collect();

    tools
        .iter()
        .filter(|tool| !dirs.iter().any(|dir| dir.join(tool).is_file()))
        .map(|tool| tool.to_string())
        .collect()
}
