//! Unit tests for configuration loading and path resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate GIGSET_CONFIG or GIGSET_DATABASE are marked with
//! #[serial] to ensure they run sequentially, not in parallel.

use gigset_common::config::{
    resolve_config_path, resolve_database_path, LoggingConfig, MatchingConfig, TomlConfig,
    CONFIG_ENV_VAR, DATABASE_ENV_VAR,
};
use gigset_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = TomlConfig::default();

    assert!(config.database_path.is_none());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.matching.candidate_pool_limit, 1000);
    assert!((config.matching.auto_select_confidence - 0.7).abs() < f64::EPSILON);
}

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gigset-qs.toml");
    std::fs::write(
        &path,
        r#"
        [matching]
        candidate_pool_limit = 250
        "#,
    )
    .unwrap();

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.matching.candidate_pool_limit, 250);
    assert!((config.matching.auto_select_confidence - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_full_file() {
    let config = TomlConfig::from_toml_str(
        r#"
        database_path = "/srv/gigset/catalog.db"

        [logging]
        level = "debug"

        [matching]
        candidate_pool_limit = 5000
        auto_select_confidence = 0.85
        "#,
    )
    .unwrap();

    assert_eq!(
        config.database_path,
        Some(PathBuf::from("/srv/gigset/catalog.db"))
    );
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        config.matching,
        MatchingConfig {
            candidate_pool_limit: 5000,
            auto_select_confidence: 0.85,
        }
    );
}

#[test]
fn test_malformed_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gigset-qs.toml");
    std::fs::write(&path, "matching = [not toml").unwrap();

    let result = TomlConfig::load(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_matching_values_rejected() {
    let zero_pool = TomlConfig::from_toml_str("[matching]\ncandidate_pool_limit = 0\n");
    assert!(matches!(zero_pool, Err(Error::Config(_))));

    let bad_threshold = TomlConfig::from_toml_str("[matching]\nauto_select_confidence = 1.5\n");
    assert!(matches!(bad_threshold, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_config_path_cli_overrides_env() {
    env::set_var(CONFIG_ENV_VAR, "/from/env.toml");

    let resolved = resolve_config_path(Some(Path::new("/from/cli.toml")));
    assert_eq!(resolved, Some(PathBuf::from("/from/cli.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_config_path_env_fallback() {
    env::set_var(CONFIG_ENV_VAR, "/from/env.toml");

    let resolved = resolve_config_path(None);
    assert_eq!(resolved, Some(PathBuf::from("/from/env.toml")));

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_database_path_priority() {
    env::remove_var(DATABASE_ENV_VAR);
    let config = TomlConfig {
        database_path: Some(PathBuf::from("/from/toml.db")),
        ..TomlConfig::default()
    };

    // TOML beats compiled default
    assert_eq!(
        resolve_database_path(None, &config),
        PathBuf::from("/from/toml.db")
    );

    // ENV beats TOML
    env::set_var(DATABASE_ENV_VAR, "/from/env.db");
    assert_eq!(
        resolve_database_path(None, &config),
        PathBuf::from("/from/env.db")
    );

    // CLI beats everything
    assert_eq!(
        resolve_database_path(Some(Path::new("/from/cli.db")), &config),
        PathBuf::from("/from/cli.db")
    );

    env::remove_var(DATABASE_ENV_VAR);
}

#[test]
#[serial]
fn test_database_path_compiled_default() {
    env::remove_var(DATABASE_ENV_VAR);

    let resolved = resolve_database_path(None, &TomlConfig::default());
    assert!(resolved.ends_with("gigset/gigset.db") || resolved.ends_with("gigset.db"));
}
