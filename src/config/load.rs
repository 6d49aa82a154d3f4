//! Configuration loading

use super::schema::ServiceConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load and validate a service configuration from a YAML file
///
/// Missing sections and keys take their defaults.
///
/// # Example
///
/// ```no_run
/// use tabserve::config::load_config;
///
/// let config = load_config("tabserve.yaml").unwrap();
/// println!("listening on {}", config.server.address);
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ServiceConfig> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    parse_config(&yaml_content)
}

/// Parse and validate a YAML configuration string
pub fn parse_config(yaml: &str) -> Result<ServiceConfig> {
    // An empty document is a valid all-defaults config
    let config: ServiceConfig = if yaml.trim().is_empty() {
        ServiceConfig::default()
    } else {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?
    };

    validate_config(&config).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;

    tracing::debug!(
        address = %config.server.address,
        cache_capacity = config.cache.capacity,
        "configuration loaded"
    );
    Ok(config)
}
