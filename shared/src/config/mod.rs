//! Configuration module for Influxmon.
//!
//! This module contains the typed configuration bag handed over by the host
//! runtime and the policy declaring the items the collector understands.

pub mod bag;
pub mod policy;

pub use bag::{ConfigBag, ConfigError, ConfigValue};
pub use policy::{
    ConfigPolicy, ConfigRule, RuleType, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT,
    DEFAULT_USER, POLICY_PREFIX,
};
