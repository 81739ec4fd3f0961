//! Metric data model.
//!
//! Defines the canonical metric identity (`MetricKey`), the typed value carried
//! by each metric (`MetricValue`) and the flattened record held in the catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the segments of a rendered `MetricKey`.
pub const KEY_DELIMITER: char = '/';

/// Replacement for delimiter characters found in series or column names.
pub const KEY_SUBSTITUTE: char = '_';

/// Category of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKind {
    /// Live counters from `SHOW STATS`.
    #[serde(rename = "stat")]
    Statistics,
    /// Mostly static build/runtime information from `SHOW DIAGNOSTICS`.
    #[serde(rename = "diagn")]
    Diagnostics,
}

impl MetricKind {
    /// Returns the namespace literal of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Statistics => "stat",
            Self::Diagnostics => "diagn",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stat" => Ok(Self::Statistics),
            "diagn" => Ok(Self::Diagnostics),
            other => Err(KeyError::UnknownKind(other.to_string())),
        }
    }
}

/// The value of a metric.
///
/// Values keep the type they had in the source document: whole numbers stay
/// integers, fractional numbers stay floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// A whole number (counters, sizes).
    Integer(i64),
    /// A fractional number, or a whole number outside the `i64` range.
    Float(f64),
    /// A boolean flag.
    Boolean(bool),
    /// A string (versions, branch names, paths).
    String(String),
}

impl MetricValue {
    /// Returns the integer value if this is an integer metric.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the float value if this is a float metric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value if this is a string metric.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a boolean metric.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the name of the contained type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int64",
            Self::Float(_) => "float64",
            Self::Boolean(_) => "bool",
            Self::String(_) => "string",
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Errors that can occur when reading a rendered key back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key does not have exactly three segments.
    #[error("Metric key '{0}' must have exactly 3 segments")]
    SegmentCount(String),

    /// The kind segment is neither `stat` nor `diagn`.
    #[error("Unknown metric kind: '{0}'")]
    UnknownKind(String),
}

/// Canonical identity of a flattened metric.
///
/// Rendered as `kind/series/column`. Series and column are stored already
/// normalised, so the rendered form always splits back into three segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetricKey {
    kind: MetricKind,
    series: String,
    column: String,
}

impl MetricKey {
    /// Builds a key, replacing delimiter characters in `series` and `column`.
    ///
    /// Substitution is lossy: `shard/1` and `shard_1` produce the same key.
    ///
    /// # Example
    ///
    /// ```
    /// use influxmon_shared::models::{MetricKey, MetricKind};
    ///
    /// let key = MetricKey::new(MetricKind::Statistics, "shard/1", "diskBytes");
    /// assert_eq!(key.to_string(), "stat/shard_1/diskBytes");
    /// ```
    #[must_use]
    pub fn new(kind: MetricKind, series: &str, column: &str) -> Self {
        Self {
            kind,
            series: normalize_segment(series),
            column: normalize_segment(column),
        }
    }

    /// Returns the kind of the metric.
    #[must_use]
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Returns the normalised series name.
    #[must_use]
    pub fn series(&self) -> &str {
        &self.series
    }

    /// Returns the normalised column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }
}

/// Builds the canonical key for a (kind, series, column) triple.
#[must_use]
pub fn build_key(kind: MetricKind, series: &str, column: &str) -> MetricKey {
    MetricKey::new(kind, series, column)
}

fn normalize_segment(segment: &str) -> String {
    segment.replace(KEY_DELIMITER, &KEY_SUBSTITUTE.to_string())
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{KEY_DELIMITER}{}{KEY_DELIMITER}{}",
            self.kind, self.series, self.column
        )
    }
}

impl FromStr for MetricKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(KEY_DELIMITER).collect();
        let [kind, series, column] = segments.as_slice() else {
            return Err(KeyError::SegmentCount(s.to_string()));
        };

        Ok(Self {
            kind: kind.parse()?,
            series: (*series).to_string(),
            column: (*column).to_string(),
        })
    }
}

/// A flattened metric as held by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Identity of the metric.
    pub key: MetricKey,

    /// Latest value.
    pub value: MetricValue,

    /// Tags of the series the value came from.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl MetricRecord {
    /// Creates a record without tags.
    #[must_use]
    pub fn new(key: MetricKey, value: MetricValue) -> Self {
        Self {
            key,
            value,
            tags: HashMap::new(),
        }
    }

    /// Adds a tag to the record.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Flattened metrics keyed by identity.
pub type MetricMap = HashMap<MetricKey, MetricRecord>;
