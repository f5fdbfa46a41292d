use crate::Config;
use crate::tests::{ScopedEnv, scratch_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_no_config_file_when_load_then_defaults() {
    // Given
    let _temp = scratch_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.host.as_str(), eq("127.0.0.1"));
    assert_that!(config.server.port, eq(8000));
    assert_that!(config.server.environment.as_str(), eq("development"));
    assert_that!(config.database.path.as_str(), eq("hmps.db"));
    assert_that!(config.auth.jwt_secret.is_none(), eq(true));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_toml_file_when_load_then_values_applied() {
    // Given
    let (temp, _guard) = scratch_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [server]
            port = 9000
            environment = "production"

            [auth]
            jwt_secret = "file-secret"
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.server.environment.as_str(), eq("production"));
    assert_that!(config.auth.jwt_secret.as_deref(), eq(Some("file-secret")));
}

#[test]
#[serial]
fn given_env_override_when_load_then_env_wins_over_file() {
    // Given
    let (temp, _guard) = scratch_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server]\nport = 9000\n").unwrap();
    let _port = ScopedEnv::set("HMPS_SERVER_PORT", "9100");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9100));
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = scratch_config_dir();
    std::fs::write(temp.path().join("config.toml"), "not [valid toml").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result.is_err(), eq(true));
}

#[test]
#[serial]
fn given_config_dir_env_when_database_path_then_under_config_dir() {
    // Given
    let (temp, _guard) = scratch_config_dir();

    // When
    let config = Config::load().unwrap();
    let path = config.database_path().unwrap();

    // Then
    assert_that!(path.starts_with(temp.path()), eq(true));
    assert_that!(path.ends_with("hmps.db"), eq(true));
}
