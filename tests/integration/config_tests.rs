use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use file_catalog::config::{Config, DEFAULT_CPU_MULT_FACTOR};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();
    assert_eq!(config.cpu_mult_factor, DEFAULT_CPU_MULT_FACTOR);
}

#[test]
fn test_config_load_from_prefixed_env() {
    std::env::set_var("FILE_CATALOG_TEST_CPU_MULT_FACTOR", "7");

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("FILE_CATALOG_TEST_"))
        .extract()
        .unwrap();

    assert_eq!(config.cpu_mult_factor, 7);
    std::env::remove_var("FILE_CATALOG_TEST_CPU_MULT_FACTOR");
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "cpu_mult_factor = 2\n").unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();

    assert_eq!(config.cpu_mult_factor, 2);
    assert_eq!(config.worker_count(4), 8);
}

#[test]
fn test_config_layered_figment_reads_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "cpu_mult_factor = 5\n").unwrap();

    let config: Config = Config::figment(Some(config_path.as_path())).extract().unwrap();

    // An environment override may be present on the host.
    if std::env::var_os("CPU_MULT_FACTOR").is_none()
        && std::env::var_os("FILE_CATALOG_CPU_MULT_FACTOR").is_none()
    {
        assert_eq!(config.cpu_mult_factor, 5);
    }
}

#[test]
fn test_config_save_toml() {
    let config = Config { cpu_mult_factor: 3 };

    let content = toml::to_string_pretty(&config).unwrap();

    assert!(content.contains("cpu_mult_factor = 3"));
    let parsed: Config = toml::from_str(&content).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_invalid_toml_fallback() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "cpu_mult_factor = [").unwrap();

    let result: Result<Config, _> = Config::figment(Some(config_path.as_path())).extract();
    assert!(result.is_err());
}

#[test]
fn test_config_load_never_fails() {
    assert!(Config::load().worker_count(1) >= 1);
}
