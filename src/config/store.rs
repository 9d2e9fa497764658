//! Selection of Git Fusion entries from a raw configuration.

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use serde_yaml::Value;

use super::entry::{ConfigEntry, InfoSource};
use super::global::GLOBAL_ENTRY;
use super::{scalar_string, RawConfig, SharedConfig};
use crate::error::{Error, Result};

/// Holds the raw configuration and hands out validated [`ConfigEntry`]s.
#[derive(Clone)]
pub struct ConfigStore {
    config: SharedConfig,
    info_source: Option<Arc<dyn InfoSource>>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("config", &self.config)
            .field("info_source", &self.info_source.is_some())
            .finish()
    }
}

impl ConfigStore {
    /// Create a store owning `raw`.
    pub fn new(raw: RawConfig) -> Self {
        Self::from_shared(Arc::new(RwLock::new(raw)))
    }

    /// Create a store over a configuration the caller keeps editing.
    pub fn from_shared(config: SharedConfig) -> Self {
        Self {
            config,
            info_source: None,
        }
    }

    /// Attach the server info lookup handed to every entry.
    pub fn with_info_source(mut self, source: Arc<dyn InfoSource>) -> Self {
        self.info_source = Some(source);
        self
    }

    /// The shared configuration behind this store.
    pub fn shared(&self) -> SharedConfig {
        Arc::clone(&self.config)
    }

    fn wrap(&self, id: String, settings: serde_yaml::Mapping) -> ConfigEntry {
        let entry = ConfigEntry::new(id, settings, self.shared());
        match &self.info_source {
            Some(source) => entry.with_info_source(Arc::clone(source)),
            None => entry,
        }
    }

    /// Why the raw settings of `id` are not a connection target, if they
    /// are not.
    fn rejection(id: &str, settings: &Value) -> Option<&'static str> {
        if id == GLOBAL_ENTRY {
            return Some("the global entry holds defaults and is not a connection target");
        }
        let Some(settings) = settings.as_mapping() else {
            return Some("settings must be a mapping");
        };
        match settings.get("url").and_then(scalar_string) {
            Some(url) if !url.is_empty() => None,
            _ => Some("missing 'url'"),
        }
    }

    /// Every usable entry, in configuration order.
    ///
    /// # Errors
    ///
    /// [`Error::NoConfigurationFound`] if no entry is usable.
    pub fn entries(&self) -> Result<Vec<ConfigEntry>> {
        let candidates: Vec<_> = {
            let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
            config
                .iter()
                .filter_map(|(key, settings)| {
                    let id = scalar_string(key)?;
                    if let Some(reason) = Self::rejection(&id, settings) {
                        debug!("Skipping config entry '{}': {}", id, reason);
                        return None;
                    }
                    Some((id, settings.as_mapping()?.clone()))
                })
                .collect()
        };

        if candidates.is_empty() {
            return Err(Error::NoConfigurationFound {
                hint: Some(
                    "Add an entry with a 'url', e.g. 'default: { url: https://gf.example.com }'"
                        .to_string(),
                ),
            });
        }

        Ok(candidates
            .into_iter()
            .map(|(id, settings)| self.wrap(id, settings))
            .collect())
    }

    /// The entry named `id`, or the first usable entry when `id` is `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownConfigEntry`] if `id` is not in the configuration
    /// - [`Error::MalformedConfigEntry`] if it is, but is not usable
    /// - [`Error::NoConfigurationFound`] if `id` is `None` and nothing is usable
    pub fn entry(&self, id: Option<&str>) -> Result<ConfigEntry> {
        let Some(id) = id else {
            return self
                .entries()?
                .into_iter()
                .next()
                .ok_or(Error::NoConfigurationFound { hint: None });
        };

        let settings = {
            let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
            config
                .iter()
                .find(|(key, _)| scalar_string(key).as_deref() == Some(id))
                .map(|(_, settings)| settings.clone())
        };
        let settings = settings.ok_or_else(|| Error::UnknownConfigEntry { id: id.to_string() })?;

        if let Some(reason) = Self::rejection(id, &settings) {
            return Err(Error::MalformedConfigEntry {
                id: id.to_string(),
                message: reason.to_string(),
            });
        }

        let settings = settings.as_mapping().cloned().unwrap_or_default();
        Ok(self.wrap(id.to_string(), settings))
    }
}
