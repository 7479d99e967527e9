//! Service configuration
//!
//! The backend base URL is resolved in priority order:
//! 1. An explicit value (CLI flag)
//! 2. The `MONETA_API_URL` environment variable
//! 3. `config.toml` in the platform config dir (`~/.config/moneta/`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::client::API_URL_ENV;
use crate::error::{Error, Result};

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_url: String,
}

/// On-disk shape of `config.toml`
#[derive(Debug, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
}

/// Default config file location (`~/.config/moneta/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("moneta").join("config.toml"))
}

impl ServiceConfig {
    /// Resolve using the default config file location
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        Self::resolve_with_path(explicit, default_config_path().as_deref())
    }

    /// Resolve with an explicit config file path (used by tests)
    pub fn resolve_with_path(explicit: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        if let Some(url) = explicit {
            return Ok(Self {
                api_url: url.trim_end_matches('/').to_string(),
            });
        }

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                return Ok(Self {
                    api_url: url.trim_end_matches('/').to_string(),
                });
            }
        }

        if let Some(path) = config_path {
            if let Some(url) = read_config_file(path)? {
                return Ok(Self {
                    api_url: url.trim_end_matches('/').to_string(),
                });
            }
        }

        Err(Error::InvalidData(format!(
            "No API URL configured. Pass --api-url, set {}, or add api_url to {}",
            API_URL_ENV,
            default_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "config.toml".to_string())
        )))
    }
}

fn read_config_file(path: &Path) -> Result<Option<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let parsed: ConfigFile = toml::from_str(&contents)
        .map_err(|e| Error::InvalidData(format!("Malformed config file {}: {}", path.display(), e)))?;
    Ok(parsed.api_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins_and_is_trimmed() {
        let config =
            ServiceConfig::resolve_with_path(Some("http://localhost:8000/"), None).unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
    }

    #[test]
    fn test_config_file_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"https://api.example.com\"\n").unwrap();

        std::env::remove_var(API_URL_ENV);
        let config = ServiceConfig::resolve_with_path(None, Some(&path)).unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
    }

    #[test]
    fn test_missing_everything_is_an_error() {
        std::env::remove_var(API_URL_ENV);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        assert!(ServiceConfig::resolve_with_path(None, Some(&path)).is_err());
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        std::env::remove_var(API_URL_ENV);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [not toml").unwrap();
        // An explicit URL short-circuits before the file is read
        assert!(ServiceConfig::resolve_with_path(Some("x"), Some(&path)).is_ok());
        assert!(ServiceConfig::resolve_with_path(None, Some(&path)).is_err());
    }
}
