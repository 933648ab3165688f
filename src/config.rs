//! Configuration stored as TOML.
//!
//! The default file lives in the OS config directory:
//! - Linux: ~/.config/music-finder/config.toml
//! - macOS: ~/Library/Application Support/music-finder/config.toml
//! - Windows: %APPDATA%\music-finder\config.toml
//!
//! Every section is optional. The master access token can also come from
//! `MUSIC_FINDER_TOKEN`, which wins over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::auth::DEFAULT_TOKEN_BASE_URL;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Master token exchanged for per-provider keys
    pub api_tutor_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub token_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_base_url: DEFAULT_TOKEN_BASE_URL.to_string(),
        }
    }
}

/// Defaults for the "email this list" step of the menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub from: Option<String>,
    pub to: Vec<String>,
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-finder"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file gives the default config. An explicit path
    /// must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match config_path() {
                Some(path) if path.exists() => Self::read(&path),
                Some(path) => {
                    tracing::debug!("No config file at {:?}, using defaults", path);
                    Ok(Self::default())
                }
                None => {
                    tracing::warn!("Could not determine config directory, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigRead(path.to_path_buf(), e))?;
        let config =
            toml::from_str(&contents).map_err(|e| Error::ConfigParse(path.to_path_buf(), e))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Replace the file token with `token` when one is given.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.credentials.api_tutor_token = Some(token);
        }
        self
    }
}
