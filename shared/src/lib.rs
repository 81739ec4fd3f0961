//! Influxmon Shared Library
//!
//! This crate contains the result-flattening and metric-identity engine used
//! by the Influxmon collector.
//!
//! # Modules
//!
//! - [`models`] - Series, metric keys, namespaces and records
//! - [`results`] - Parsing and flattening of introspection results
//! - [`storage`] - The metric catalog
//! - [`config`] - Configuration bag and policy
//!
//! # Example
//!
//! ```
//! use influxmon_shared::models::{MetricKey, MetricKind, MetricValue, Namespace};
//! use influxmon_shared::results::{flatten, parse};
//! use influxmon_shared::storage::{InMemoryMetricCatalog, MetricCatalog};
//!
//! let raw = br#"{"results":[{"series":[
//!     {"name":"shard","tags":{"db":"snap"},"columns":["diskBytes"],"values":[[162900]]}
//! ]}]}"#;
//!
//! let set = parse(MetricKind::Statistics, raw).unwrap();
//! let catalog = InMemoryMetricCatalog::new();
//! catalog.replace_statistics(flatten(MetricKind::Statistics, &set)).unwrap();
//!
//! let key = MetricKey::new(MetricKind::Statistics, "shard", "diskBytes");
//! let record = catalog.resolve(&key).unwrap();
//! assert_eq!(record.value, MetricValue::Integer(162_900));
//! assert_eq!(
//!     Namespace::for_key(&key).to_string(),
//!     "intel/influxdb/stat/shard/diskBytes"
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod models;
pub mod results;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
