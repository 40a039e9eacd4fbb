// tests/integration/error_handling.rs

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use chocogate::config::{load_and_validate, ConfigOverrides};
use chocogate::errors::GatewayError;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn unknown_key_is_a_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[gateway]
max_concurency = 2
"#
    )
    .unwrap();

    let result = load_and_validate(Some(file.path()), no_env, &ConfigOverrides::default());

    match result {
        Err(GatewayError::TomlError(e)) => {
            assert!(e.to_string().contains("max_concurency"));
        }
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_output_limit_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[gateway]
max_output_bytes = 0
"#
    )
    .unwrap();

    let result = load_and_validate(Some(file.path()), no_env, &ConfigOverrides::default());

    match result {
        Err(GatewayError::ConfigError(msg)) => {
            assert!(msg.contains("max_output_bytes"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_timeout_from_cli_returns_config_error() {
    let file = NamedTempFile::new().unwrap();
    let overrides = ConfigOverrides {
        timeout_ms: Some(0),
        ..Default::default()
    };

    let result = load_and_validate(Some(file.path()), no_env, &overrides);
    assert!(matches!(result, Err(GatewayError::ConfigError(_))));
}

#[test]
fn explicit_missing_file_is_io_error() {
    let result = load_and_validate(
        Some(Path::new("/definitely/not/here/Chocogate.toml")),
        no_env,
        &ConfigOverrides::default(),
    );
    assert!(matches!(result, Err(GatewayError::IoError(_))));
}

#[test]
fn non_numeric_env_returns_config_error() {
    let file = NamedTempFile::new().unwrap();
    let env = |key: &str| (key == "MCP_CHOCOLATEY_MAX_CONCURRENCY").then(|| "many".to_string());

    let result = load_and_validate(Some(file.path()), env, &ConfigOverrides::default());
    match result {
        Err(GatewayError::ConfigError(msg)) => assert!(msg.contains("MCP_CHOCOLATEY_MAX_CONCURRENCY")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}
