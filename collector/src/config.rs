//! Collector configuration module.
//!
//! Reads connectivity parameters out of the configuration bag handed over by
//! the host runtime.

use influxmon_shared::config::{
    ConfigBag, ConfigError, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER,
};
use validator::Validate;

/// Connectivity parameters of the monitored database.
///
/// Items read from the bag:
/// - `host`: database host name (string)
/// - `port`: HTTP API port (int)
/// - `user`: user name (string)
/// - `password`: password (string)
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CollectorConfig {
    /// Database host name.
    #[validate(length(min = 1, message = "host cannot be empty"))]
    pub host: String,
    /// Database HTTP API port.
    #[validate(range(min = 1, message = "port must be between 1 and 65535"))]
    pub port: u16,
    /// User name sent with every query.
    pub user: String,
    /// Password sent with every query.
    pub password: String,
}

impl CollectorConfig {
    /// Reads the configuration from a bag.
    ///
    /// Every item is required here; defaults are the policy's business.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An item is missing or has the wrong type
    /// - `port` does not fit a TCP port
    /// - `host` is empty
    pub fn from_bag(bag: &ConfigBag) -> Result<Self, ConfigError> {
        let host = bag.get_string("host")?.to_string();

        let raw_port = bag.get_int("port")?;
        let port = u16::try_from(raw_port).map_err(|_| ConfigError::OutOfRange {
            key: "port".to_string(),
            value: raw_port,
        })?;

        let user = bag.get_string("user")?.to_string();
        let password = bag.get_string("password")?.to_string();

        let config = Self {
            host,
            port,
            user,
            password,
        };
        config
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(config)
    }

    /// Returns the configuration as a bag.
    #[must_use]
    pub fn to_bag(&self) -> ConfigBag {
        ConfigBag::new()
            .with("host", self.host.as_str())
            .with("port", i64::from(self.port))
            .with("user", self.user.as_str())
            .with("password", self.password.as_str())
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: u16::try_from(DEFAULT_PORT).unwrap_or(8086),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}
