//! Configuration persistence utilities
//!
//! Loads and saves per-page TOML configuration. Deployment records
//! (`InvitationConfig`, `DeadlineBoardConfig`) and the small UI preference
//! structs each page keeps both go through here.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error while reading/writing config
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "invitation-pages", "invitation")
}

/// Get the base configuration directory shared by all pages
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the base data directory (guestbook storage lives here)
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the configuration file path for a named config
pub fn config_path(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", name)))
}

/// Load a named configuration from the config directory
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;
    load_config_from(&path)
}

/// Load configuration from an explicit file path
pub fn load_config_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save a named configuration
pub fn save_config<T: Serialize>(name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)
}

/// Save configuration to an explicit file path, creating parent directories
pub fn save_config_to<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Delete a named configuration
pub fn delete_config(name: &str) -> Result<(), ConfigError> {
    let path = config_path(name).ok_or(ConfigError::NoConfigDir)?;

    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

/// Load a named config, falling back to `T::default()` on any failure.
///
/// Missing files are silent; unreadable or malformed files are logged.
pub fn load_or_default<T: DeserializeOwned + Default>(name: &str) -> T {
    match load_config(name) {
        Ok(Some(config)) => config,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(config = name, error = %e, "Failed to load config, using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct TestConfig {
        name: String,
        value: i32,
    }

    #[test]
    fn test_config_path() {
        if let Some(path) = config_path("test_page") {
            assert!(path.to_string_lossy().contains("test_page.toml"));
        }
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("page.toml");
        let config = TestConfig {
            name: "hero".to_string(),
            value: 7,
        };

        save_config_to(&path, &config).unwrap();
        let loaded: Option<TestConfig> = load_config_from(&path).unwrap();
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<TestConfig> = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "name = [unterminated").unwrap();
        let result: Result<Option<TestConfig>, _> = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
