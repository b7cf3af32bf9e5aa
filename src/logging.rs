// File-based tracing setup. The terminal belongs to the UI, so nothing is
// ever written to stdout or stderr while the app runs.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

use crate::models::LoggingConfig;

pub fn init(config: &LoggingConfig) -> Result<PathBuf> {
    let path = match &config.file {
        Some(path) => path.clone(),
        None => crate::config::get_default_log_path()?,
    };
    init_with_path(&config.level, &path)?;
    Ok(path)
}

fn init_with_path(level: &str, path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("feedstream.log");
        let config = LoggingConfig {
            level: "debug".to_string(),
            file: Some(path.clone()),
        };

        let used = init(&config).unwrap();

        assert_eq!(used, path);
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("feedstream.log");

        assert!(init_with_path("info", &path).is_err());
    }
}
