use std::path::PathBuf;

use editora::config::Config;
use editora::search::{SearchSettings, SortBy};
use editora::test_utils::{TestCase, run_table_tests};
use tempfile::tempdir;

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn config_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase::new(
            "default",
            "tests/fixtures/configs/default.toml",
            (12u32, 100u32, "popularity".to_string(), "127.0.0.1:5000".to_string(), true),
        ),
        TestCase::new(
            "custom",
            "tests/fixtures/configs/custom.toml",
            (5u32, 20u32, "price_low".to_string(), "0.0.0.0:8080".to_string(), false),
        ),
    ];

    run_table_tests(cases, |relative_path| {
        let root = tempdir().expect("tempdir");
        let config = Config::load(Some(&fixture_path(relative_path)), root.path()).expect("load");
        (
            config.search.default_limit,
            config.search.max_limit,
            config.search.default_sort,
            config.server.bind,
            config.robot.include_metadata,
        )
    })
}

#[test]
fn explicit_file_skips_project_file() {
    let root = tempdir().unwrap();
    std::fs::write(root.path().join("config.toml"), "[search]\nmax_limit = 7\n").unwrap();

    let config = Config::load(
        Some(&fixture_path("tests/fixtures/configs/custom.toml")),
        root.path(),
    )
    .unwrap();
    assert_eq!(config.search.max_limit, 20);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let root = tempdir().unwrap();
    let err = Config::load(Some(&root.path().join("absent.toml")), root.path()).unwrap_err();
    assert_eq!(err.code(), "config_error");
}

#[test]
fn inconsistent_limits_are_rejected() {
    let root = tempdir().unwrap();
    let result = Config::load(
        Some(&fixture_path("tests/fixtures/configs/invalid_limits.toml")),
        root.path(),
    );
    assert!(result.is_err());
}

#[test]
fn malformed_toml_is_a_config_error() {
    let root = tempdir().unwrap();
    let path = root.path().join("broken.toml");
    std::fs::write(&path, "[search\ndefault_limit = ").unwrap();
    let err = Config::load(Some(&path), root.path()).unwrap_err();
    assert!(err.to_string().contains("parse config"));
}

#[test]
fn search_settings_follow_config() {
    let root = tempdir().unwrap();
    let config = Config::load(
        Some(&fixture_path("tests/fixtures/configs/custom.toml")),
        root.path(),
    )
    .unwrap();
    let settings = SearchSettings::from_config(&config.search);
    assert_eq!(settings.default_limit, 5);
    assert_eq!(settings.max_limit, 20);
    assert_eq!(settings.default_sort, SortBy::PriceLow);
}

#[test]
fn toml_output_reloads() {
    let root = tempdir().unwrap();
    let path = root.path().join("roundtrip.toml");
    std::fs::write(&path, Config::default().to_toml().unwrap()).unwrap();
    let config = Config::load(Some(&path), root.path()).unwrap();
    assert_eq!(config.storage.busy_timeout_ms, 5000);
    assert_eq!(config.robot.format, "json");
}
