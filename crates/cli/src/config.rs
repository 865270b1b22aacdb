use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use jobwatch_api_client::ApiClient;
use serde::{Deserialize, Serialize};

const DEFAULT_SERVER_URL: &str = "http://localhost:8001";
const CONFIG_FILE_NAME: &str = "jobwatch.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Bearer token obtained via `jobwatch login`.
    #[serde(default)]
    pub token: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            token: String::new(),
        }
    }
}

/// Config directory (~/.config/jobwatch/)
pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("jobwatch"))
}

/// Canonical config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_from(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config at {}", path.display()))
}

pub fn save_to(path: &Path, config: &CliConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config at {}", path.display()))
}

pub fn load_config() -> Result<CliConfig> {
    load_from(&config_path()?)
}

pub fn save_config(config: &CliConfig) -> Result<()> {
    save_to(&config_path()?, config)
}

/// Build an API client from the stored config, applying the token if set.
pub fn api_client(config: &CliConfig) -> Result<ApiClient> {
    let mut client = ApiClient::new(&config.server.url, Duration::from_secs(30))?;
    if !config.server.token.trim().is_empty() {
        client.set_auth(config.server.token.clone());
    }
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.url, DEFAULT_SERVER_URL);
        assert!(config.server.token.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobwatch.toml");

        let mut config = CliConfig::default();
        config.server.url = "https://jobs.example.com".to_string();
        config.server.token = "abc123".to_string();
        save_to(&path, &config).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.server.url, "https://jobs.example.com");
        assert_eq!(loaded.server.token, "abc123");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobwatch.toml");
        std::fs::write(&path, "[server]\ntoken = \"t\"\n").unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.server.url, DEFAULT_SERVER_URL);
        assert_eq!(loaded.server.token, "t");
    }
}
