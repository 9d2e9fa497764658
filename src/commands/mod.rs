//! # CLI Command Implementations
//!
//! Each subcommand of the `git-fusion-url` tool lives in its own file with:
//! - an `Args` struct, derived using `clap`, when it takes arguments;
//! - an `execute` function that performs the command by calling into the
//!   `git_fusion_url` library.

pub mod list;
pub mod parse;
pub mod run;
pub mod show;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use git_fusion_url::config::{self, ConfigEntry, ConfigStore};
use git_fusion_url::git::GitInfoSource;
use git_fusion_url::suggestions;

/// Load the configuration file into a store.
///
/// With `lookup_info`, entries discover their Perforce port by asking the
/// service through the system `git`.
pub(crate) fn load_store(path: &Path, lookup_info: bool) -> Result<ConfigStore> {
    if !path.exists() {
        return Err(suggestions::config_not_found(path));
    }

    let raw = config::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e))?;

    let store = ConfigStore::new(raw);
    Ok(if lookup_info {
        store.with_info_source(Arc::new(GitInfoSource::default()))
    } else {
        store
    })
}

/// Select an entry, turning lookup failures into hint-bearing errors.
pub(crate) fn select_entry(store: &ConfigStore, id: Option<&str>) -> Result<ConfigEntry> {
    store.entry(id).map_err(|e| {
        let available: Vec<String> = store
            .entries()
            .map(|entries| entries.iter().map(|entry| entry.id().to_string()).collect())
            .unwrap_or_default();
        suggestions::entry_not_usable(e, &available)
    })
}
