//! User settings.
//!
//! A single settings object, read with defaults and replaced wholesale.

use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StoreError};
use crate::style::CitationStyle;

/// Key the settings object is stored under.
pub const SETTINGS_KEY: &str = "settings";

/// User preferences.
///
/// Fields missing from a persisted object take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Style used when a request does not name one
    pub citation_style: CitationStyle,
    /// Advance the footnote counter before each citation
    pub auto_increment: bool,
    /// Report each copy to the user
    pub show_notification: bool,
    /// Record each citation in the history
    pub save_history: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            citation_style: CitationStyle::Japanese,
            auto_increment: true,
            show_notification: true,
            save_history: true,
        }
    }
}

/// Settings persisted in a [`KeyValueStore`] under [`SETTINGS_KEY`].
#[derive(Debug)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        SettingsStore { store }
    }

    /// Returns the stored settings, or the defaults if none were stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds something that
    /// is not a settings object.
    pub fn get(&self) -> Result<Settings, StoreError> {
        match self.store.get(SETTINGS_KEY)? {
            Some(value) => serde_json::from_value(value).map_err(|source| StoreError::JsonError {
                key: SETTINGS_KEY.to_string(),
                source,
            }),
            None => Ok(Settings::default()),
        }
    }

    /// Replaces the stored settings with `settings`.
    pub fn set(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let value = serde_json::to_value(settings).map_err(|source| StoreError::JsonError {
            key: SETTINGS_KEY.to_string(),
            source,
        })?;
        self.store.set(SETTINGS_KEY, value)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
