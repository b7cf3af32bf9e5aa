// Configuration management

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::AppConfig;

pub const SERVER_URL_ENV: &str = "FEEDSTREAM_SERVER_URL";

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("feedstream");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn get_default_log_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("feedstream.log"))
}

/// Load the user's config, writing the defaults on first run, then apply
/// the environment override for the server URL.
pub fn load_config() -> Result<AppConfig> {
    let mut config = load_config_from(&get_config_path()?)?;
    apply_env_overrides(&mut config, std::env::var(SERVER_URL_ENV).ok());
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_config = AppConfig::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path).context("Failed to read config file")?;

    let config: AppConfig = toml::from_str(&contents).context("Failed to parse config file")?;

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, contents).context("Failed to write config file")?;

    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig, server_url: Option<String>) {
    if let Some(url) = server_url.filter(|url| !url.trim().is_empty()) {
        config.server_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(path.exists(), "default config should be written on first load");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = AppConfig {
            server_url: "http://custom:8080".to_string(),
            request_timeout: Some(30),
            ..Default::default()
        };
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.server_url, "http://custom:8080");
        assert_eq!(loaded.request_timeout, Some(30));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "server_url = [").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_override_replaces_server_url() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, Some("http://override:1234".to_string()));
        assert_eq!(config.server_url, "http://override:1234");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, Some("   ".to_string()));
        assert_eq!(config.server_url, "http://localhost:8080");
    }
}
