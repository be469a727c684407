//! Configuration module for docsync
//!
//! This module provides configuration structures and loading mechanisms for
//! docsync. Configuration can be loaded from TOML files and/or environment
//! variables.

mod defaults;
mod loading;
mod storage;


use crate::error::{Error, Result};
use crate::models::{PageKind, Submodule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use defaults::DEFAULT_CONFIG_FILE;

use defaults::*;

/// Main configuration structure for docsync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Documentation source configuration
    #[serde(default)]
    pub docs: DocsConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// How the exported function of a module reflection is named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FunctionNaming {
    /// The function carries the module's own name (`addDays` in module `addDays`)
    #[default]
    ModuleName,
    /// The function is the module's default export
    Default,
}

/// A static Markdown page published next to the generated pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticDoc {
    pub slug: String,
    pub category: String,
    pub title: String,
    pub summary: String,
    /// Markdown file path, relative to the config file directory
    pub path: PathBuf,
}

/// Overrides the page kind and/or category for modules defined in a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindOverride {
    /// Source file name as reported by TypeDoc (e.g. `src/constants/index.ts`)
    pub file: String,

    /// Page kind to produce for this module
    #[serde(default)]
    pub kind: PageKind,

    /// Category to use instead of the one found in the reflection groups
    #[serde(default)]
    pub category: Option<String>,
}

/// Documentation source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Package name the pages are published under
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Path to the package root (containing package.json)
    #[serde(default = "default_package_path")]
    pub package: PathBuf,

    /// Path to the TypeDoc JSON output
    #[serde(default = "default_json_path")]
    pub json: PathBuf,

    /// Documentation categories in display order
    #[serde(default)]
    pub categories: Vec<String>,

    /// Static Markdown pages
    #[serde(default)]
    pub files: Vec<StaticDoc>,

    /// Per-source-file kind and category overrides
    #[serde(default)]
    pub kinds: Vec<KindOverride>,

    /// Naming convention of exported functions
    #[serde(default)]
    pub function_naming: FunctionNaming,

    /// Submodules every pure page is available in
    #[serde(default = "default_submodules")]
    pub submodules: Vec<Submodule>,
}

impl DocsConfig {
    /// Resolve a configured path against the directory of the config file
    pub fn resolve(&self, base_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Find the kind override registered for a source file
    pub fn kind_override(&self, file_name: &str) -> Option<&KindOverride> {
        self.kinds.iter().find(|k| k.file == file_name)
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            package: default_package_path(),
            json: default_json_path(),
            categories: Vec::new(),
            files: Vec::new(),
            kinds: Vec::new(),
            function_naming: FunctionNaming::default(),
            submodules: default_submodules(),
        }
    }
}

/// Configuration for the document store backend
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider type: "postgres" or "mock"
    #[serde(default = "default_storage_provider")]
    pub provider: String,

    /// Postgres host address
    #[serde(default = "default_postgres_host")]
    pub postgres_host: String,

    /// Postgres port
    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,

    /// Postgres database name
    #[serde(default = "default_postgres_database")]
    pub postgres_database: String,

    /// Postgres username
    #[serde(default = "default_postgres_user")]
    pub postgres_user: String,

    /// Postgres password
    #[serde(default = "default_postgres_password")]
    pub postgres_password: String,

    /// Postgres connection pool size (max connections)
    #[serde(default = "default_postgres_pool_size")]
    pub postgres_pool_size: u32,

    /// Maximum pages written in a single batch
    #[serde(default = "default_max_pages_per_batch")]
    pub max_pages_per_batch: usize,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("provider", &self.provider)
            .field("postgres_host", &self.postgres_host)
            .field("postgres_port", &self.postgres_port)
            .field("postgres_database", &self.postgres_database)
            .field("postgres_user", &self.postgres_user)
            .field("postgres_password", &"***REDACTED***")
            .field("postgres_pool_size", &self.postgres_pool_size)
            .field("max_pages_per_batch", &self.max_pages_per_batch)
            .finish()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_storage_provider(),
            postgres_host: default_postgres_host(),
            postgres_port: default_postgres_port(),
            postgres_database: default_postgres_database(),
            postgres_user: default_postgres_user(),
            postgres_password: default_postgres_password(),
            postgres_pool_size: default_postgres_pool_size(),
            max_pages_per_batch: default_max_pages_per_batch(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.docs.package_name.trim().is_empty() {
            return Err(Error::config(
                "docs.package_name must not be empty".to_string(),
            ));
        }

        if self.docs.submodules.is_empty() {
            return Err(Error::config(
                "docs.submodules must list at least one submodule".to_string(),
            ));
        }
        if !self.docs.submodules.contains(&Submodule::Default) {
            return Err(Error::config(
                "docs.submodules must include the default submodule".to_string(),
            ));
        }

        for file in &self.docs.files {
            if file.slug.trim().is_empty() {
                return Err(Error::config(format!(
                    "Static doc '{}' has an empty slug",
                    file.path.display()
                )));
            }
        }

        let valid_storage_providers = ["postgres", "mock"];
        if !valid_storage_providers.contains(&self.storage.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid storage provider '{}'. Must be one of: {:?}",
                self.storage.provider, valid_storage_providers
            )));
        }

        if self.storage.max_pages_per_batch == 0 || self.storage.max_pages_per_batch > 10_000 {
            return Err(Error::config(format!(
                "Invalid batch size {}. Must be between 1 and 10000",
                self.storage.max_pages_per_batch
            )));
        }

        if self.storage.postgres_port == 0 {
            return Err(Error::config(
                "Invalid port: must be greater than 0".to_string(),
            ));
        }

        if self.storage.postgres_pool_size == 0 {
            return Err(Error::config(
                "storage.postgres_pool_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}
