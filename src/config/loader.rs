//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;
use tracing::debug;

use super::types::AppConfig;
use crate::common::errors::{ClientError, Result};

/// Load and validate configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP__, e.g. `APP__SOLVER__FEE`)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    // Pick up a local .env before reading the environment
    dotenvy::dotenv().ok();

    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            debug!("Reading configuration file {}", path);
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    parse_config(config)
}

/// Load and validate configuration from a TOML string
pub fn load_from_str(toml: &str) -> Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(toml, config::FileFormat::Toml))
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    parse_config(config)
}

fn parse_config(config: Config) -> Result<AppConfig> {
    let app: AppConfig = config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;
    app.validate()?;
    Ok(app)
}
