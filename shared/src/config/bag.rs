//! Typed configuration bag.
//!
//! The host runtime hands the collector a flat bag of typed items. Getters are
//! strict: a missing item or an item of another type is an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The item is absent from the bag.
    #[error("config item not found: '{0}'")]
    NotFound(String),

    /// The item exists with another type.
    #[error("config item '{key}' is not an {expected}")]
    WrongType {
        /// Name of the item.
        key: String,
        /// Expected type name.
        expected: &'static str,
    },

    /// The item does not fit the expected range.
    #[error("config item '{key}' is out of range: {value}")]
    OutOfRange {
        /// Name of the item.
        key: String,
        /// Offending value.
        value: i64,
    },

    /// The assembled configuration failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Integer item (e.g. `port`).
    Int(i64),
    /// Float item.
    Float(f64),
    /// Boolean item.
    Bool(bool),
    /// String item (e.g. `host`, `user`).
    String(String),
}

impl ConfigValue {
    /// Returns the name of the contained type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int64",
            Self::Float(_) => "float64",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Flat bag of typed configuration items.
///
/// # Example
///
/// ```
/// use influxmon_shared::config::ConfigBag;
///
/// let bag = ConfigBag::new().with("host", "localhost").with("port", 8086_i64);
/// assert_eq!(bag.get_string("host").unwrap(), "localhost");
/// assert_eq!(bag.get_int("port").unwrap(), 8086);
/// assert!(bag.get_string("user").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigBag {
    items: HashMap<String, ConfigValue>,
}

impl ConfigBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an item, returning the bag.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an item.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.items.insert(key.into(), value.into());
    }

    /// Removes an item, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.items.remove(key)
    }

    /// Returns true if the item is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Returns the raw value of an item.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.items.get(key)
    }

    /// Returns a string item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        match self.items.get(key) {
            Some(ConfigValue::String(v)) => Ok(v),
            Some(_) => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "string",
            }),
            None => Err(ConfigError::NotFound(key.to_string())),
        }
    }

    /// Returns an integer item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is missing or not an integer.
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        match self.items.get(key) {
            Some(ConfigValue::Int(v)) => Ok(*v),
            Some(_) => Err(ConfigError::WrongType {
                key: key.to_string(),
                expected: "int64",
            }),
            None => Err(ConfigError::NotFound(key.to_string())),
        }
    }
}
