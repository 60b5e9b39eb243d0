//! Server configuration
//!
//! Settings are read from `GREENLIGHT_`-prefixed environment variables with
//! the `config` crate, falling back to development defaults.

use std::fmt;

use config::{Config, Environment as EnvironmentSource, Map};
use serde::Deserialize;

use crate::error::ConfigResult;

/// Prefix for every environment variable the server reads
pub const ENV_PREFIX: &str = "GREENLIGHT";

/// Deployment environment the server runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration struct
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Deployment environment
    pub env: Environment,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GREENLIGHT_PORT`: API server port (default: 4000)
    /// - `GREENLIGHT_ENV`: development, staging or production (default: development)
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(EnvironmentSource::with_prefix(ENV_PREFIX))
    }

    /// Create a new ServerConfig from an explicit set of variables instead of
    /// the process environment
    pub fn from_source(vars: Map<String, String>) -> ConfigResult<Self> {
        Self::load(EnvironmentSource::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(source: EnvironmentSource) -> ConfigResult<Self> {
        let config = Config::builder()
            .set_default("port", 4000_i64)?
            .set_default("env", Environment::Development.as_str())?
            .add_source(source.try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        let mut map = Map::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), value.to_string());
        }
        map
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_source(vars(&[])).expect("Failed to load config");
        assert_eq!(config.port, 4000);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn test_server_config_overrides() {
        let config = ServerConfig::from_source(vars(&[
            ("GREENLIGHT_PORT", "8080"),
            ("GREENLIGHT_ENV", "production"),
        ]))
        .expect("Failed to load config");

        assert_eq!(config.port, 8080);
        assert_eq!(config.env, Environment::Production);
        assert_eq!(config.env.to_string(), "production");
    }

    #[test]
    fn test_server_config_rejects_unknown_environment() {
        let result = ServerConfig::from_source(vars(&[("GREENLIGHT_ENV", "qa")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_server_config_rejects_invalid_port() {
        let result = ServerConfig::from_source(vars(&[("GREENLIGHT_PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
