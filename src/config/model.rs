// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [gateway]
/// executable = "choco"
/// timeout_ms = 900000
/// max_concurrency = 1
/// max_output_bytes = 10485760
/// ```
///
/// Every field is optional; anything left unset falls back to the
/// environment and then to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub gateway: GatewaySection,
}

/// `[gateway]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    /// Executable name or path. Bare names are resolved through `PATH`.
    #[serde(default)]
    pub executable: Option<String>,

    /// Default per-command timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// How many commands may run at once. Values below 1 are raised to 1.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Combined stdout+stderr ceiling per command, in bytes.
    #[serde(default)]
    pub max_output_bytes: Option<usize>,
}

/// Values supplied on the command line; these win over file and env.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub executable: Option<String>,
    pub timeout_ms: Option<u64>,
    pub max_concurrency: Option<usize>,
}

/// Validated, fully-resolved gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub executable: String,
    pub default_timeout: Duration,
    pub max_concurrency: usize,
    pub max_output_bytes: usize,
}

pub const DEFAULT_EXECUTABLE: &str = "choco";
pub const DEFAULT_TIMEOUT_MS: u64 = 900_000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 1;
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            executable: DEFAULT_EXECUTABLE.to_string(),
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl GatewaySection {
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref exe) = overrides.executable {
            self.executable = Some(exe.clone());
        }
        if let Some(ms) = overrides.timeout_ms {
            self.timeout_ms = Some(ms);
        }
        if let Some(n) = overrides.max_concurrency {
            self.max_concurrency = Some(n);
        }
    }
}
