//
//  obs-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the `obs` command line tool, read from an optional TOML file.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/obs/config.toml`
//! - **macOS**: `~/Library/Application Support/obs/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\obs\config\config.toml`
//!
//! The location can be overridden with `--config` or `OBS_CONFIG`. A missing
//! file is the same as an empty one.
//!
//! ## Example Configuration File
//!
//! ```toml
//! api_url = "https://alice@api.opensuse.org"
//! use_keyring = true
//! insecure = false
//! ```
//!
//! ## Precedence
//!
//! Command line flags and their environment variables override the file,
//! which overrides the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_BASE_URL;

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API root, optionally with `user[:password]@`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Whether to look passwords up in the system keyring. Defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_keyring: Option<bool>,

    /// Skip TLS certificate verification.
    pub insecure: bool,
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// # Returns
    ///
    /// The parsed file, or the defaults if it does not exist or no config
    /// directory can be determined.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the configuration from `path`, falling back to the defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Returns the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the configured API URL, or [`DEFAULT_BASE_URL`].
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Returns whether keyring lookups are enabled.
    pub fn use_keyring(&self) -> bool {
        self.use_keyring.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url(), "https://api.opensuse.org");
        assert!(config.use_keyring());
        assert!(!config.insecure);
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_url = \"https://alice@obs.example.com\"\nuse_keyring = false\ninsecure = true\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url(), "https://alice@obs.example.com");
        assert!(!config.use_keyring());
        assert!(config.insecure);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "insecure = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url(), DEFAULT_BASE_URL);
        assert!(config.use_keyring());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "insecure = \"maybe\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }
}
