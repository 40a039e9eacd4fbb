// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{
    DEFAULT_EXECUTABLE, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_TIMEOUT_MS,
    GatewayConfig, GatewaySection, RawConfigFile,
};
use crate::errors::{GatewayError, Result};

impl TryFrom<RawConfigFile> for GatewayConfig {
    type Error = GatewayError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_gateway(&raw.gateway)?;
        Ok(resolve(raw.gateway))
    }
}

/// Check the layered values. Concurrency is clamped rather than rejected.
pub fn validate_gateway(section: &GatewaySection) -> Result<()> {
    if let Some(ref exe) = section.executable {
        if exe.trim().is_empty() {
            return Err(GatewayError::ConfigError(
                "[gateway].executable must not be empty".to_string(),
            ));
        }
    }

    if section.timeout_ms == Some(0) {
        return Err(GatewayError::ConfigError(
            "[gateway].timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if section.max_output_bytes == Some(0) {
        return Err(GatewayError::ConfigError(
            "[gateway].max_output_bytes must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn resolve(section: GatewaySection) -> GatewayConfig {
    GatewayConfig {
        executable: section
            .executable
            .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string()),
        default_timeout: Duration::from_millis(section.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
        max_concurrency: section
            .max_concurrency
            .unwrap_or(DEFAULT_MAX_CONCURRENCY)
            .max(1),
        max_output_bytes: section.max_output_bytes.unwrap_or(DEFAULT_MAX_OUTPUT_BYTES),
    }
}
