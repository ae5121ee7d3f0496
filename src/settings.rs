//! Process-wide settings.
//! Loaded once from `config/base.yaml` and passed explicitly to whoever needs them.

use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory holding the process-wide settings document.
pub const SETTINGS_DIR: &str = "config";

/// File name of the process-wide settings document.
pub const SETTINGS_FILE: &str = "base.yaml";

/// Environment variable prefix used when the settings do not name one.
pub const DEFAULT_ENV_PREFIX: &str = "SCAFFOLD";

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    global: RawGlobal,
}

#[derive(Debug, Default, Deserialize)]
struct RawGlobal {
    version: Option<String>,
    env_prefix: Option<String>,
}

/// Immutable process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub version: String,
    pub env_prefix: String,
    /// Where the settings were read from, `None` when built-in defaults are used.
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            source: None,
        }
    }
}

impl Settings {
    /// Loads `<dir>/base.yaml`, falling back to defaults when the file is absent.
    ///
    /// `<PREFIX>_VERSION` in the environment overrides the version.
    ///
    /// # Errors
    /// * `Error::ConfigMalformed` if the file exists but cannot be parsed
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::load_with_env(dir, |name| std::env::var(name).ok())
    }

    /// Same as [`Settings::load`] with an explicit environment lookup.
    pub fn load_with_env<P, F>(dir: P, env: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = dir.as_ref().join(SETTINGS_FILE);
        let mut settings = Settings::default();

        if path.is_file() {
            debug!("Loading settings from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .map_err(|source| Error::ConfigNotFound { path: path.display().to_string(), source })?;
            let raw: RawSettings = if content.trim().is_empty() {
                RawSettings::default()
            } else {
                serde_yaml::from_str(&content).map_err(|e| Error::ConfigMalformed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
            };

            if let Some(version) = raw.global.version {
                settings.version = version;
            }
            if let Some(prefix) = raw.global.env_prefix {
                settings.env_prefix = prefix;
            }
            settings.source = Some(path);
        } else {
            debug!("No settings at {}, using defaults", path.display());
        }

        if let Some(version) = env(&settings.env_var("VERSION")) {
            settings.version = version;
        }

        Ok(settings)
    }

    /// Name of the environment variable for `key`: `SCAFFOLD_ID` for `ID`.
    pub fn env_var(&self, key: &str) -> String {
        format!("{}_{}", self.env_prefix, key.to_uppercase())
    }
}
