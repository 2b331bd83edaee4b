//! Process-wide defaults consumed by the entity model.
//!
//! Settings follow an init-once / read-many lifecycle: install them once at
//! startup with [`Settings::install`], before constructing entities, and read
//! them anywhere through [`Settings::current`]. Until something is installed,
//! readers see [`Settings::default`]; reading does not block a later install.
//!
//! Entities copy the default context when they are constructed, so entities
//! built before [`Settings::install`] keep the context that was current then.

use crate::entity::Entity;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

static INSTALLED: OnceLock<Settings> = OnceLock::new();
static DEFAULTS: OnceLock<Settings> = OnceLock::new();

/// Defaults shared by every entity in the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Language tag used to project a [`LanguageMap`](crate::LanguageMap) to
    /// a single value (`name`, `summary`, `content`).
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Context copied into every newly constructed Object-family entity.
    ///
    /// Must itself carry no context. A bare IRI string in a settings file
    /// decodes as a context-free [`Link`](crate::Link), which satisfies this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_context: Option<Entity>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            default_context: None,
        }
    }
}

impl Settings {
    /// Returns a copy with a different default language.
    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Returns a copy with a default context.
    #[must_use]
    pub fn with_default_context(mut self, context: impl Into<Entity>) -> Self {
        self.default_context = Some(context.into());
        self
    }

    /// Installs these settings for the rest of the process.
    pub fn install(self) -> Result<(), ConfigError> {
        INSTALLED
            .set(self)
            .map_err(|_| ConfigError::AlreadyInitialized)
    }

    /// Returns the installed settings, or the defaults if none were installed.
    pub fn current() -> &'static Settings {
        INSTALLED
            .get()
            .unwrap_or_else(|| DEFAULTS.get_or_init(Settings::default))
    }

    /// Returns true once [`Settings::install`] has succeeded.
    pub fn is_installed() -> bool {
        INSTALLED.get().is_some()
    }

    /// Parses settings from a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads settings from a JSON file.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Loads settings from `path`, falling back to the defaults with a
    /// warning when the file is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read_from(path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "Failed to load settings from {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }
}
