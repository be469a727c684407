//! Default values and functions for configuration

use crate::models::Submodule;
use std::path::PathBuf;

// Default constants
pub const DEFAULT_CONFIG_FILE: &str = "docsync.toml";
pub(crate) const DEFAULT_PACKAGE_NAME: &str = "date-fns";
pub(crate) const DEFAULT_JSON_PATH: &str = "tmp/docs.json";
pub(crate) const DEFAULT_STORAGE_PROVIDER: &str = "postgres";
pub(crate) const DEFAULT_POSTGRES_HOST: &str = "localhost";
pub(crate) const DEFAULT_POSTGRES_DATABASE: &str = "docsync";
pub(crate) const DEFAULT_POSTGRES_USER: &str = "docsync";
pub(crate) const DEFAULT_POSTGRES_PASSWORD: &str = "docsync";

pub(crate) fn default_package_name() -> String {
    DEFAULT_PACKAGE_NAME.to_string()
}

pub(crate) fn default_package_path() -> PathBuf {
    PathBuf::from(".")
}

pub(crate) fn default_json_path() -> PathBuf {
    PathBuf::from(DEFAULT_JSON_PATH)
}

pub(crate) fn default_submodules() -> Vec<Submodule> {
    Submodule::ALL.to_vec()
}

pub(crate) fn default_storage_provider() -> String {
    DEFAULT_STORAGE_PROVIDER.to_string()
}

pub(crate) fn default_postgres_host() -> String {
    DEFAULT_POSTGRES_HOST.to_string()
}

pub(crate) fn default_postgres_port() -> u16 {
    5432
}

pub(crate) fn default_postgres_database() -> String {
    DEFAULT_POSTGRES_DATABASE.to_string()
}

pub(crate) fn default_postgres_user() -> String {
    DEFAULT_POSTGRES_USER.to_string()
}

pub(crate) fn default_postgres_password() -> String {
    DEFAULT_POSTGRES_PASSWORD.to_string()
}

pub(crate) fn default_postgres_pool_size() -> u32 {
    10
}

/// Page records per insert statement
pub(crate) fn default_max_pages_per_batch() -> usize {
    500
}
