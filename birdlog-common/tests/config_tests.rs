//! Configuration resolution tests
//!
//! Uses serial_test: these tests set and clear BIRDLOG_* environment
//! variables, which are process-global.

use birdlog_common::config::{
    CliOverrides, Config, TomlConfig, DEFAULT_HOST, DEFAULT_PORT, ENV_DATABASE, ENV_PORT,
    ENV_SEED_DIR,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn clear_env() {
    env::remove_var(ENV_DATABASE);
    env::remove_var(ENV_PORT);
    env::remove_var(ENV_SEED_DIR);
}

#[test]
#[serial]
fn test_defaults_without_overrides() {
    clear_env();

    let config = Config::resolve(CliOverrides::default(), TomlConfig::default()).unwrap();

    assert_eq!(config.database_path, PathBuf::from("birdlog.db"));
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.seed_dir, PathBuf::from("seed"));
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();
    let file = TomlConfig::parse("database_path = \"/data/birds.db\"\nport = 9000\n").unwrap();

    let config = Config::resolve(CliOverrides::default(), file).unwrap();

    assert_eq!(config.database_path, PathBuf::from("/data/birds.db"));
    assert_eq!(config.port, 9000);
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    env::set_var(ENV_DATABASE, "/env/birds.db");
    env::set_var(ENV_PORT, "7001");
    let file = TomlConfig::parse("database_path = \"/data/birds.db\"\nport = 9000\n").unwrap();

    let config = Config::resolve(CliOverrides::default(), file).unwrap();
    clear_env();

    assert_eq!(config.database_path, PathBuf::from("/env/birds.db"));
    assert_eq!(config.port, 7001);
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_DATABASE, "/env/birds.db");
    env::set_var(ENV_SEED_DIR, "/env/seed");

    let cli = CliOverrides {
        database_path: Some(PathBuf::from("/cli/birds.db")),
        port: Some(6000),
        ..Default::default()
    };
    let config = Config::resolve(cli, TomlConfig::default()).unwrap();
    clear_env();

    assert_eq!(config.database_path, PathBuf::from("/cli/birds.db"));
    assert_eq!(config.port, 6000);
    assert_eq!(config.seed_dir, PathBuf::from("/env/seed"));
}

#[test]
#[serial]
fn test_invalid_env_port_is_error() {
    clear_env();
    env::set_var(ENV_PORT, "not-a-port");

    let result = Config::resolve(CliOverrides::default(), TomlConfig::default());
    clear_env();

    assert!(result.is_err());
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = TomlConfig::load_or_default(Some(&dir.path().join("absent.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "host = \"0.0.0.0\"\n[logging]\nlevel = \"warn\"\n").unwrap();

    let file = TomlConfig::load_or_default(Some(&path)).unwrap();

    assert_eq!(file.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(file.logging.level, "warn");
}
