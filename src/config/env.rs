// src/config/env.rs

//! Environment variable layer.
//!
//! The lookup is injected so tests never have to touch the process
//! environment; production passes [`process_env`].

use std::str::FromStr;

use crate::config::model::GatewaySection;
use crate::errors::{GatewayError, Result};

pub const ENV_EXECUTABLE: &str = "CHOCO_BIN";
pub const ENV_TIMEOUT_MS: &str = "MCP_CHOCOLATEY_TIMEOUT_MS";
pub const ENV_MAX_CONCURRENCY: &str = "MCP_CHOCOLATEY_MAX_CONCURRENCY";

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Overlay any set (non-blank) variables onto `section`.
pub fn apply_env<F>(section: &mut GatewaySection, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(exe) = non_blank(&lookup, ENV_EXECUTABLE) {
        section.executable = Some(exe);
    }
    if let Some(raw) = non_blank(&lookup, ENV_TIMEOUT_MS) {
        section.timeout_ms = Some(parse_number(ENV_TIMEOUT_MS, &raw)?);
    }
    if let Some(raw) = non_blank(&lookup, ENV_MAX_CONCURRENCY) {
        section.max_concurrency = Some(parse_concurrency(&raw)?);
    }
    Ok(())
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        GatewayError::ConfigError(format!(
            "{key} must be a non-negative integer (got {raw:?})"
        ))
    })
}

/// Any integer is accepted; values below 1 become 1.
fn parse_concurrency(raw: &str) -> Result<usize> {
    let n: i64 = raw.parse().map_err(|_| {
        GatewayError::ConfigError(format!(
            "{ENV_MAX_CONCURRENCY} must be an integer (got {raw:?})"
        ))
    })?;
    Ok(usize::try_from(n.max(1)).unwrap_or(usize::MAX))
}
