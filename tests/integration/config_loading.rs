// tests/integration/config_loading.rs

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use chocogate::config::{load_and_validate, load_from_path, ConfigOverrides, GatewayConfig};

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env() -> impl Fn(&str) -> Option<String> {
    |_| None
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn file_values_are_used() {
    let file = config_file(
        r#"
[gateway]
executable = 'C:\ProgramData\chocolatey\bin\choco.exe'
timeout_ms = 60000
max_concurrency = 2
max_output_bytes = 1048576
"#,
    );

    let cfg = load_and_validate(Some(file.path()), no_env(), &ConfigOverrides::default()).unwrap();

    assert_eq!(
        cfg,
        GatewayConfig {
            executable: r"C:\ProgramData\chocolatey\bin\choco.exe".to_string(),
            default_timeout: Duration::from_secs(60),
            max_concurrency: 2,
            max_output_bytes: 1024 * 1024,
        }
    );
}

#[test]
fn env_beats_file_and_cli_beats_env() {
    let file = config_file(
        r#"
[gateway]
executable = "from-file"
timeout_ms = 1000
max_concurrency = 4
"#,
    );

    let cfg = load_and_validate(
        Some(file.path()),
        env(&[
            ("CHOCO_BIN", "from-env"),
            ("MCP_CHOCOLATEY_TIMEOUT_MS", "2000"),
        ]),
        &ConfigOverrides {
            executable: Some("from-cli".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(cfg.executable, "from-cli");
    assert_eq!(cfg.default_timeout, Duration::from_millis(2000));
    assert_eq!(cfg.max_concurrency, 4);
}

#[test]
fn empty_gateway_section_gives_defaults() {
    let file = config_file("[gateway]\n");
    let cfg = load_and_validate(Some(file.path()), no_env(), &ConfigOverrides::default()).unwrap();
    assert_eq!(cfg, GatewayConfig::default());
    assert_eq!(cfg.executable, "choco");
    assert_eq!(cfg.default_timeout, Duration::from_millis(900_000));
    assert_eq!(cfg.max_concurrency, 1);
    assert_eq!(cfg.max_output_bytes, 10 * 1024 * 1024);
}

#[test]
fn env_concurrency_zero_is_raised_to_one() {
    let file = config_file("");
    let cfg = load_and_validate(
        Some(file.path()),
        env(&[("MCP_CHOCOLATEY_MAX_CONCURRENCY", "0")]),
        &ConfigOverrides::default(),
    )
    .unwrap();
    assert_eq!(cfg.max_concurrency, 1);
}

#[test]
fn env_negative_concurrency_is_raised_to_one() {
    let file = config_file("[gateway]\nmax_concurrency = 3\n");
    let cfg = load_and_validate(
        Some(file.path()),
        env(&[("MCP_CHOCOLATEY_MAX_CONCURRENCY", "-2")]),
        &ConfigOverrides::default(),
    )
    .unwrap();
    assert_eq!(cfg.max_concurrency, 1);
}

#[test]
fn raw_file_parses_without_validation() {
    let file = config_file("[gateway]\ntimeout_ms = 0\n");
    let raw = load_from_path(file.path()).unwrap();
    assert_eq!(raw.gateway.timeout_ms, Some(0));
}
