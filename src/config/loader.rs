// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::env::apply_env;
use crate::config::model::{ConfigOverrides, GatewayConfig, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; layering and validation happen in
/// [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Resolve the final configuration.
///
/// - An explicit `path` must exist and parse.
/// - Without one, [`default_config_path`] is used if present; otherwise the
///   file layer is empty.
/// - Environment (through `env`), then `overrides`, are layered on top.
pub fn load_and_validate<F>(
    path: Option<&Path>,
    env: F,
    overrides: &ConfigOverrides,
) -> Result<GatewayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut raw = match path {
        Some(p) => load_from_path(p)?,
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                load_from_path(&default_path)?
            } else {
                RawConfigFile::default()
            }
        }
    };

    apply_env(&mut raw.gateway, env)?;
    raw.gateway.apply_overrides(overrides);

    GatewayConfig::try_from(raw)
}

/// `Chocogate.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Chocogate.toml")
}
