//! Normalized view of the reserved `global` entry.

use serde_yaml::{Mapping, Value};

use super::sub_map;
use crate::defaults::DEFAULT_USER;

/// Id of the entry holding defaults for every other entry.
pub const GLOBAL_ENTRY: &str = "global";

/// Normalize raw global settings into the defaults every entry falls back to.
///
/// - `user` defaults to [`DEFAULT_USER`], `password` to the empty string
/// - `perforce` and `auto_create` become empty maps when missing or malformed
/// - `url`, `label` and `perforce.port` are removed, since the global entry
///   is never a connection target itself
pub fn normalize_global(mut raw: Mapping) -> Mapping {
    raw.remove("url");
    raw.remove("label");

    if raw.get("user").is_none_or(Value::is_null) {
        raw.insert(Value::from("user"), Value::from(DEFAULT_USER));
    }
    if raw.get("password").is_none_or(Value::is_null) {
        raw.insert(Value::from("password"), Value::from(""));
    }

    let mut perforce = sub_map(&raw, "perforce");
    perforce.remove("port");
    raw.insert(Value::from("perforce"), Value::Mapping(perforce));

    let auto_create = sub_map(&raw, "auto_create");
    raw.insert(Value::from("auto_create"), Value::Mapping(auto_create));

    raw
}
