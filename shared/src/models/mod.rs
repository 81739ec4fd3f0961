//! Data models for Influxmon.
//!
//! This module contains the tabular result model, metric identities and the
//! flattened metric records.

pub mod metric;
pub mod namespace;
pub mod series;

pub use metric::{
    build_key, KeyError, MetricKey, MetricKind, MetricMap, MetricRecord, MetricValue,
    KEY_DELIMITER, KEY_SUBSTITUTE,
};
pub use namespace::{Namespace, NS_CLASS, NS_PREFIX, NS_VENDOR};
pub use series::{ResultSet, Row, Series};
