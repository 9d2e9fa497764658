//! # Error Suggestions
//!
//! Helpers for building error messages that say what went wrong AND how to
//! fix it.
//!
//! ```rust,ignore
//! use git_fusion_url::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for when the configuration file is not found.
///
/// Includes hints about:
/// - Creating a new config file
/// - Using the -c/--config flag
/// - Using the GIT_FUSION_CONFIG environment variable
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a git_fusion.yml file with at least one entry, e.g.\n\
         hint:   default:\n\
         hint:     url: https://gf.example.com\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set GIT_FUSION_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for an entry lookup that failed, listing the entries
/// that can be used instead.
pub fn entry_not_usable(error: Error, available: &[String]) -> anyhow::Error {
    let hint = if available.is_empty() {
        "hint: Add an entry with a 'url' key to the configuration".to_string()
    } else {
        format!("hint: Available entries: {}", available.join(", "))
    };
    anyhow::anyhow!("{error}\n\n{hint}")
}

/// Generate an error for an embedded command outside the vocabulary.
pub fn unknown_command(name: &str) -> String {
    format!(
        "unknown command '{name}'\n\n\
         hint: Git Fusion understands: help, info, list, status, wait"
    )
}
