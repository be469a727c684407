//! Storage-related configuration methods

use super::StorageConfig;

impl StorageConfig {
    /// Build the Postgres connection URL from the individual settings
    ///
    /// The password is embedded in the URL; never log the result.
    pub fn postgres_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.postgres_user,
            self.postgres_password,
            self.postgres_host,
            self.postgres_port,
            self.postgres_database
        )
    }

    /// Whether the in-memory mock store is selected
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }
}
