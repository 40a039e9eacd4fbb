// src/config/mod.rs

//! Configuration loading and validation for chocogate.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Overlay environment variables (`env.rs`).
//! - Load a config file from disk and layer everything (`loader.rs`).
//! - Validate and resolve defaults (`validate.rs`).

pub mod env;
pub mod loader;
pub mod model;
pub mod validate;

pub use env::process_env;
pub use loader::{load_and_validate, load_from_path};
pub use model::{ConfigOverrides, GatewayConfig, GatewaySection, RawConfigFile};
pub use validate::validate_gateway;
