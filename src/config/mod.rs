//! # Git Fusion Target Configuration
//!
//! The raw configuration is a mapping from entry id to settings. One id,
//! `global`, is reserved for defaults shared by every entry:
//!
//! ```yaml
//! global:
//!   user: gitlab
//!   perforce:
//!     user: p4admin
//!   auto_create:
//!     path_template: //gitlab/{namespace}/{project-path}/...
//! default:
//!   url: https://gf.example.com
//!   password: s3cret
//!   perforce:
//!     port: ssl:p4.example.com:1666
//!   git_config_params: [http.sslVerify=false]
//! ```
//!
//! ## Key Components
//!
//! - **`ConfigStore`** ([`store`]): filters the raw mapping down to usable
//!   entries and hands them out by id.
//! - **`ConfigEntry`** ([`entry`]): one target, resolving user, password,
//!   Perforce port and auto-create settings against its own settings, its
//!   URL and the global defaults.
//! - **Global defaults** ([`global`]): the normalized view of the `global`
//!   entry.
//!
//! The store does not care where the mapping comes from. [`from_file`] and
//! [`parse`] load it from YAML for the command-line tool; embedding
//! applications can build a [`RawConfig`] directly and share it through a
//! [`SharedConfig`] so later edits are seen by existing entries.

pub mod entry;
pub mod global;
pub mod store;

use std::path::Path;
use std::sync::{Arc, RwLock};

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

pub use entry::{ConfigEntry, InfoSource};
pub use global::{normalize_global, GLOBAL_ENTRY};
pub use store::ConfigStore;

/// Entry id → settings, in document order.
pub type RawConfig = Mapping;

/// A raw configuration shared between a store and the entries it hands out.
pub type SharedConfig = Arc<RwLock<RawConfig>>;

/// Parse a YAML document into a raw configuration.
///
/// An empty document yields an empty configuration; any top-level value
/// other than a mapping is rejected.
pub fn parse(yaml_content: &str) -> Result<RawConfig> {
    match serde_yaml::from_str::<Value>(yaml_content)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(Error::ConfigParse {
            message: format!(
                "expected a mapping of entry ids to settings, found {}",
                describe(&other)
            ),
            hint: Some("Start each entry with '<id>:' followed by its settings".to_string()),
        }),
    }
}

/// Load a raw configuration from a YAML file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RawConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Read a scalar setting as a string. `null`, sequences and mappings are
/// treated as absent.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

/// Clone the sub-map stored under `name`, or an empty map if it is missing
/// or not a mapping.
pub(crate) fn sub_map(settings: &Mapping, name: &str) -> Mapping {
    settings
        .get(name)
        .and_then(Value::as_mapping)
        .cloned()
        .unwrap_or_default()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
