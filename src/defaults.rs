//! Default values for git-fusion-url configuration.
//!
//! This module provides centralized default values used across the library
//! and the commands, ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// User reported by the global defaults when the `global` entry names none.
pub const DEFAULT_USER: &str = "gitlab";

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "GIT_FUSION_CONFIG";

/// Returns the default configuration file path.
///
/// This can be overridden by the `--config` CLI flag or the
/// `GIT_FUSION_CONFIG` environment variable.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("git_fusion.yml")
}
