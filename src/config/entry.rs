//! # Config Entries
//!
//! A [`ConfigEntry`] is one named Git Fusion target. Every setting it exposes
//! is resolved on demand from three places, in a fixed order: the entry's own
//! settings, the credentials written into its `url`, and the global defaults.
//!
//! | setting             | resolution order                                                          |
//! |---------------------|---------------------------------------------------------------------------|
//! | `git_fusion_password` | entry `password`, URL password, global `password`                       |
//! | `git_fusion_user`     | entry `user`, URL user (not scp), global `user`                         |
//! | `perforce_password`   | entry `perforce.password`, global `perforce.password`, then as above    |
//! | `perforce_user`       | entry `perforce.user`, global `perforce.user`, then as above            |
//!
//! The Perforce port is either configured explicitly or discovered from the
//! service's `info` output, fetched through an [`InfoSource`] at most once
//! per entry.

use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock, PoisonError};

use log::{debug, warn};
use regex::Regex;
use serde_yaml::{Mapping, Value};

use super::global::{normalize_global, GLOBAL_ENTRY};
use super::{scalar_string, sub_map, SharedConfig};
use crate::error::{Error, Result};
use crate::port::{expand_perforce_port, parse_server_info};
use crate::url::{GitFusionUrl, Scheme};

/// Both placeholders every auto-create template must contain.
const TEMPLATE_PLACEHOLDERS: [&str; 2] = ["{project-path}", "{namespace}"];

/// `//depot/...`: a non-empty first segment followed by another `/`.
static DEPOT_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^//[^/]+/").unwrap());

/// Keys looked up verbatim, entry first and global defaults second.
const PASSTHROUGH_KEYS: [&str; 5] = [
    "url",
    "label",
    "perforce",
    "auto_create",
    "git_config_params",
];

/// Supplies the free-form `info` text of a Git Fusion service.
///
/// Implementations typically run the `info` command against the entry's URL
/// (see [`crate::git::GitInfoSource`]); tests substitute canned text.
pub trait InfoSource: Send + Sync {
    fn info(&self, entry: &ConfigEntry) -> Result<String>;
}

/// One named Git Fusion target.
pub struct ConfigEntry {
    id: String,
    settings: Mapping,
    config: SharedConfig,
    info_source: Option<Arc<dyn InfoSource>>,
    info: OnceLock<String>,
}

impl fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("id", &self.id)
            .field("url", &self.raw_url())
            .field("info_cached", &self.info.get().is_some())
            .finish()
    }
}

impl ConfigEntry {
    /// Wrap the settings of entry `id`. `config` is the full raw
    /// configuration the global defaults are read from.
    pub fn new(id: impl Into<String>, mut settings: Mapping, config: SharedConfig) -> Self {
        for name in ["perforce", "auto_create"] {
            let normalized = sub_map(&settings, name);
            settings.insert(Value::from(name), Value::Mapping(normalized));
        }

        Self {
            id: id.into(),
            settings,
            config,
            info_source: None,
            info: OnceLock::new(),
        }
    }

    /// Use `source` to look up server info for [`perforce_port`](Self::perforce_port).
    pub fn with_info_source(mut self, source: Arc<dyn InfoSource>) -> Self {
        self.info_source = Some(source);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The entry's own settings, with `perforce` and `auto_create`
    /// normalized to maps.
    pub fn settings(&self) -> &Mapping {
        &self.settings
    }

    /// Whether the entry names a non-empty `url`.
    pub fn is_valid(&self) -> bool {
        self.raw_url().is_some_and(|url| !url.is_empty())
    }

    /// The normalized global defaults, read from the shared configuration
    /// on every call.
    pub fn global(&self) -> Mapping {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        let raw = config
            .get(GLOBAL_ENTRY)
            .and_then(Value::as_mapping)
            .cloned()
            .unwrap_or_default();
        normalize_global(raw)
    }

    /// Look up a setting by name.
    ///
    /// `password` and `user` resolve through their precedence chains;
    /// `url`, `label`, `perforce`, `auto_create` and `git_config_params`
    /// come from the entry, falling back to the global defaults.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownConfigKey`] for any other key.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        match key {
            "password" => self.git_fusion_password().map(|p| Some(Value::from(p))),
            "user" => self.git_fusion_user().map(|u| Some(Value::from(u))),
            _ if PASSTHROUGH_KEYS.contains(&key) => Ok(self
                .settings
                .get(key)
                .filter(|value| !value.is_null())
                .cloned()
                .or_else(|| self.global().get(key).cloned())),
            _ => Err(Error::UnknownConfigKey {
                key: key.to_string(),
            }),
        }
    }

    fn raw_url(&self) -> Option<String> {
        self.settings.get("url").and_then(scalar_string)
    }

    fn setting(&self, name: &str) -> Option<String> {
        self.settings.get(name).and_then(scalar_string)
    }

    fn perforce_setting(settings: &Mapping, name: &str) -> Option<String> {
        sub_map(settings, "perforce").get(name).and_then(scalar_string)
    }

    fn global_setting(&self, name: &str) -> String {
        self.global()
            .get(name)
            .and_then(scalar_string)
            .unwrap_or_default()
    }

    /// The entry's URL exactly as written, without credential overlays.
    fn parsed_url(&self) -> Result<GitFusionUrl> {
        GitFusionUrl::parse(&self.raw_url().unwrap_or_default())
    }

    fn url_password(&self) -> Result<Option<String>> {
        self.parsed_url()?.embedded_password()
    }

    /// The user written into a non-scp URL. The user of an scp-style
    /// address is part of the address, not a credential.
    fn url_user(&self) -> Result<Option<String>> {
        let url = self.parsed_url()?;
        if url.scheme() == Scheme::Scp {
            return Ok(None);
        }
        url.embedded_user()
    }

    /// Build the entry's URL, with the resolved user, password and git
    /// config overrides applied. A fresh value is parsed on every call.
    pub fn url(&self) -> Result<GitFusionUrl> {
        let mut url = self.parsed_url()?;
        if url.scheme() != Scheme::Scp {
            url.set_user(Some(&self.git_fusion_user()?))?;
        }
        url.set_password(Some(self.git_fusion_password()?));
        url.set_git_config_params(self.git_config_params());
        Ok(url)
    }

    /// Password for the Git Fusion service.
    pub fn git_fusion_password(&self) -> Result<String> {
        if let Some(password) = self.setting("password") {
            return Ok(password);
        }
        if let Some(password) = self.url_password()? {
            return Ok(password);
        }
        Ok(self.global_setting("password"))
    }

    /// User for the Git Fusion service.
    pub fn git_fusion_user(&self) -> Result<String> {
        if let Some(user) = self.setting("user") {
            return Ok(user);
        }
        if let Some(user) = self.url_user()? {
            return Ok(user);
        }
        Ok(self.global_setting("user"))
    }

    /// Password for the backing Perforce server. Perforce-specific settings,
    /// even global ones, win over the generic Git Fusion password.
    pub fn perforce_password(&self) -> Result<String> {
        if let Some(password) = Self::perforce_setting(&self.settings, "password") {
            return Ok(password);
        }
        if let Some(password) = Self::perforce_setting(&self.global(), "password") {
            return Ok(password);
        }
        self.git_fusion_password()
    }

    /// User for the backing Perforce server.
    pub fn perforce_user(&self) -> Result<String> {
        if let Some(user) = Self::perforce_setting(&self.settings, "user") {
            return Ok(user);
        }
        if let Some(user) = Self::perforce_setting(&self.global(), "user") {
            return Ok(user);
        }
        self.git_fusion_user()
    }

    /// Address of the backing Perforce server.
    ///
    /// An explicit `perforce.port` is returned verbatim. Otherwise the
    /// `Server address:` reported by the service's `info` output is expanded
    /// against the URL's host and marked `ssl:` when the server reports
    /// encryption. `None` means no port could be determined.
    pub fn perforce_port(&self) -> Result<Option<String>> {
        if let Some(port) = Self::perforce_setting(&self.settings, "port") {
            return Ok(Some(port));
        }

        let info = parse_server_info(self.info());
        let Some(address) = info.address else {
            debug!("No server address in info output for '{}'", self.id);
            return Ok(None);
        };

        let host = self.url()?.host()?;
        let port = expand_perforce_port(Some(&address), &host);
        Ok(port.map(|port| {
            if info.encrypted && !port.contains("ssl:") {
                format!("ssl:{}", port)
            } else {
                port
            }
        }))
    }

    /// The service's `info` text, fetched at most once per entry. Lookup
    /// failures are logged and treated as empty text.
    pub fn info(&self) -> &str {
        self.info.get_or_init(|| {
            let Some(source) = &self.info_source else {
                return String::new();
            };
            debug!("Fetching Git Fusion info for '{}'", self.id);
            source.info(self).unwrap_or_else(|e| {
                warn!("Could not fetch Git Fusion info for '{}': {}", self.id, e);
                String::new()
            })
        })
    }

    /// `git -c` overrides: a single string or a list of `key=value` strings,
    /// from the entry or else the global defaults.
    pub fn git_config_params(&self) -> Vec<String> {
        let value = match self.settings.get("git_config_params") {
            Some(value) if !value.is_null() => value.clone(),
            _ => match self.global().get("git_config_params") {
                Some(value) => value.clone(),
                None => return Vec::new(),
            },
        };

        match value {
            Value::String(param) => vec![param],
            Value::Sequence(params) => params
                .iter()
                .filter_map(|param| param.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Global `auto_create` settings overridden key by key by the entry's.
    pub fn auto_create(&self) -> Mapping {
        let mut merged = sub_map(&self.global(), "auto_create");
        for (key, value) in sub_map(&self.settings, "auto_create") {
            merged.insert(key, value);
        }
        merged
    }

    /// Whether the auto-create templates are usable.
    ///
    /// `path_template` and `repo_name_template` must both be strings
    /// containing `{project-path}` and `{namespace}`, and `path_template`
    /// must be a depot path (`//depot/...`) that does not end in `...`.
    pub fn is_auto_create_configured(&self) -> bool {
        let auto_create = self.auto_create();
        let template = |name: &str| {
            auto_create
                .get(name)
                .and_then(Value::as_str)
                .filter(|t| TEMPLATE_PLACEHOLDERS.iter().all(|p| t.contains(p)))
                .map(str::to_string)
        };

        let (Some(path_template), Some(_)) =
            (template("path_template"), template("repo_name_template"))
        else {
            return false;
        };

        DEPOT_PATH.is_match(&path_template) && !path_template.ends_with("...")
    }
}
