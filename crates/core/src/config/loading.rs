//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File};
use std::path::{Path, PathBuf};

use super::defaults::DEFAULT_CONFIG_FILE;
use super::Config;

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `DOCSYNC_` and use double underscores
    /// for nested values. For example:
    /// - `DOCSYNC_DOCS__PACKAGE_NAME=date-fns`
    /// - `DOCSYNC_STORAGE__PROVIDER=mock`
    ///
    /// The `POSTGRES_*` variables are honored as well and take precedence.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ConfigLib::builder();

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with DOCSYNC_ prefix
        builder = builder.add_source(
            Environment::with_prefix("DOCSYNC")
                .separator("__")
                .try_parsing(true),
        );

        // Support Postgres environment variables
        if let Ok(host) = std::env::var("POSTGRES_HOST") {
            builder = builder
                .set_override("storage.postgres_host", host)
                .map_err(|e| Error::config(format!("Failed to set POSTGRES_HOST: {e}")))?;
        }
        if let Ok(port) = std::env::var("POSTGRES_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                builder = builder
                    .set_override("storage.postgres_port", port_num)
                    .map_err(|e| Error::config(format!("Failed to set POSTGRES_PORT: {e}")))?;
            }
        }
        if let Ok(db) = std::env::var("POSTGRES_DATABASE") {
            builder = builder
                .set_override("storage.postgres_database", db)
                .map_err(|e| Error::config(format!("Failed to set POSTGRES_DATABASE: {e}")))?;
        }
        if let Ok(user) = std::env::var("POSTGRES_USER") {
            builder = builder
                .set_override("storage.postgres_user", user)
                .map_err(|e| Error::config(format!("Failed to set POSTGRES_USER: {e}")))?;
        }
        if let Ok(password) = std::env::var("POSTGRES_PASSWORD") {
            builder = builder
                .set_override("storage.postgres_password", password)
                .map_err(|e| Error::config(format!("Failed to set POSTGRES_PASSWORD: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration and return it with the directory relative paths resolve against
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (`./docsync.toml` or custom --config path)
    /// 3. Environment variables (DOCSYNC_*, POSTGRES_*)
    ///
    /// An explicitly given config path must exist.
    pub fn load(config_path: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config = Self::from_file(&path)?;
        let base_dir = config_dir(&path)?;
        tracing::debug!(
            config = %path.display(),
            base_dir = %base_dir.display(),
            "Loaded configuration"
        );
        Ok((config, base_dir))
    }
}

/// Directory containing the config file, made absolute
fn config_dir(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if parent.is_absolute() {
        return Ok(parent);
    }

    let cwd = std::env::current_dir()
        .map_err(|e| Error::config(format!("Failed to get current dir: {e}")))?;
    Ok(cwd.join(parent))
}
