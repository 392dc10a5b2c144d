//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "WEATHER_GATEWAY_CONFIG";

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidPort(String),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidPort(value) => write!(f, "Invalid PORT value '{}'", value),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the runtime configuration from the process environment.
///
/// Reads the file named by `WEATHER_GATEWAY_CONFIG` when set (defaults
/// otherwise), then applies the `PORT` override, then validates.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_config(Path::new(&path))?,
        Err(_) => GatewayConfig::default(),
    };

    if let Ok(port) = std::env::var(PORT_ENV) {
        let port: u16 = port
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        config
            .listener
            .set_port(port)
            .map_err(|_| ConfigError::InvalidPort(config.listener.bind_address.clone()))?;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
