//! Declared configuration policy.
//!
//! Describes the items the collector understands, their types and the defaults
//! the host runtime applies before handing over a bag.

use super::bag::{ConfigBag, ConfigValue};
use serde::{Deserialize, Serialize};

/// Key under which the collector's rules are declared.
pub const POLICY_PREFIX: [&str; 2] = ["intel", "influxdb"];

/// Default database host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default database HTTP port.
pub const DEFAULT_PORT: i64 = 8086;

/// Default user name.
pub const DEFAULT_USER: &str = "admin";

/// Default password.
pub const DEFAULT_PASSWORD: &str = "admin";

/// Type of a configuration item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// A string item.
    String,
    /// An integer item.
    Int,
}

/// One declared configuration item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRule {
    /// Item name.
    pub key: String,
    /// Item type.
    pub rule_type: RuleType,
    /// Whether the host must reject a bag without this item.
    pub required: bool,
    /// Value used when the item is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ConfigValue>,
}

/// The set of rules the collector declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPolicy {
    /// Namespace the rules are declared under.
    pub prefix: Vec<String>,
    /// The rules.
    pub rules: Vec<ConfigRule>,
}

impl ConfigPolicy {
    /// Returns the collector's policy: `host`, `port`, `user` and `password`,
    /// all optional with defaults.
    #[must_use]
    pub fn collector() -> Self {
        let rule = |key: &str, rule_type, default: ConfigValue| ConfigRule {
            key: key.to_string(),
            rule_type,
            required: false,
            default: Some(default),
        };

        Self {
            prefix: POLICY_PREFIX.iter().map(ToString::to_string).collect(),
            rules: vec![
                rule("host", RuleType::String, DEFAULT_HOST.into()),
                rule("port", RuleType::Int, DEFAULT_PORT.into()),
                rule("user", RuleType::String, DEFAULT_USER.into()),
                rule("password", RuleType::String, DEFAULT_PASSWORD.into()),
            ],
        }
    }

    /// Fills every absent item that has a default.
    ///
    /// # Example
    ///
    /// ```
    /// use influxmon_shared::config::{ConfigBag, ConfigPolicy};
    ///
    /// let mut bag = ConfigBag::new().with("host", "db1");
    /// ConfigPolicy::collector().apply_defaults(&mut bag);
    ///
    /// assert_eq!(bag.get_string("host").unwrap(), "db1");
    /// assert_eq!(bag.get_int("port").unwrap(), 8086);
    /// ```
    pub fn apply_defaults(&self, bag: &mut ConfigBag) {
        for rule in &self.rules {
            if bag.contains(&rule.key) {
                continue;
            }
            if let Some(default) = &rule.default {
                bag.set(rule.key.clone(), default.clone());
            }
        }
    }

    /// Returns the names of required items missing from `bag`.
    #[must_use]
    pub fn missing_required(&self, bag: &ConfigBag) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.required && !bag.contains(&rule.key))
            .map(|rule| rule.key.as_str())
            .collect()
    }
}
