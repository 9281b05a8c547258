//! API server configuration module.
//!
//! Configuration is loaded from `TALLY_`-prefixed environment variables with
//! fallback to defaults:
//!
//! | Variable                      | Default                 |
//! |-------------------------------|-------------------------|
//! | `TALLY_HOST`                  | `0.0.0.0`               |
//! | `TALLY_PORT`                  | `8080`                  |
//! | `TALLY_RATE_LIMIT_PER_MINUTE` | `30` (`0` disables)     |
//! | `TALLY_LOG_FILTER`            | `info,tower_http=debug` |
//!
//! `RUST_LOG`, when set, takes precedence over `TALLY_LOG_FILTER`.

use std::net::{IpAddr, SocketAddr};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TALLY";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 30;
const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind (an IP address)
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// Requests allowed per client per minute; 0 disables limiting
    pub rate_limit_per_minute: u32,

    /// Default tracing filter directives
    pub log_filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(Environment::with_prefix(ENV_PREFIX)))
    }

    /// Load configuration from the given sources, filling gaps with defaults.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: ApiConfig = builder
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default(
                "rate_limit_per_minute",
                i64::from(DEFAULT_RATE_LIMIT_PER_MINUTE),
            )?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .build()?
            .try_deserialize()?;

        config.socket_addr()?;
        Ok(config)
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
