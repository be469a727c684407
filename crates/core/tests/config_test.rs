use docsync_core::config::{Config, FunctionNaming, StorageConfig};
use docsync_core::models::{PageKind, Submodule};

#[test]
fn test_storage_config_defaults() {
    let config = StorageConfig::default();
    assert_eq!(config.provider, "postgres");
    assert_eq!(config.postgres_host, "localhost");
    assert_eq!(config.postgres_port, 5432);
    assert_eq!(config.postgres_database, "docsync");
    assert_eq!(config.postgres_pool_size, 10);
    assert_eq!(config.max_pages_per_batch, 500);
}

#[test]
fn test_config_validation_storage_provider() {
    let mut config = Config::default();

    // Valid provider
    config.storage.provider = "postgres".to_string();
    assert!(config.validate().is_ok());

    config.storage.provider = "mock".to_string();
    assert!(config.validate().is_ok());

    // Invalid provider
    config.storage.provider = "invalid".to_string();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid storage provider"));
}

#[test]
fn test_config_validation_port() {
    let mut config = Config::default();
    config.storage.postgres_port = 0;

    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid port"));
}

#[test]
fn test_docs_config_for_legacy_typedoc_output() {
    let toml = r#"
        [docs]
        package = "."
        json = "tmp/docs.json"
        categories = ["General", "Common Helpers", "Constants"]
        function_naming = "default"
        submodules = ["default"]

        [[docs.kinds]]
        file = "src/constants/index.ts"
        kind = "constants"
        category = "Constants"
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse config");
    assert!(config.validate().is_ok());
    assert_eq!(config.docs.function_naming, FunctionNaming::Default);
    assert_eq!(config.docs.submodules, vec![Submodule::Default]);

    let constants = config
        .docs
        .kind_override("src/constants/index.ts")
        .expect("constants override");
    assert_eq!(constants.kind, PageKind::Constants);
}
