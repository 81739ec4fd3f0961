//! Influxmon Collector
//!
//! This crate polls the internal `SHOW STATS` and `SHOW DIAGNOSTICS`
//! endpoints of an InfluxDB instance and republishes them as flat, typed,
//! tagged metrics.
//!
//! # Architecture
//!
//! - [`Fetch`] retrieves raw result documents (blocking HTTP by default)
//! - [`Collector`] drives Discover/Collect cycles, parsing and flattening
//!   results into a [`MetricCatalog`](influxmon_shared::storage::MetricCatalog)
//! - [`CollectorConfig`] holds the connectivity parameters read from the
//!   host's configuration bag
//!
//! # Example
//!
//! ```no_run
//! use influxmon_collector::{Collector, MetricRequest};
//! use influxmon_shared::config::{ConfigBag, ConfigPolicy};
//!
//! let mut config = ConfigBag::new();
//! ConfigPolicy::collector().apply_defaults(&mut config);
//!
//! let collector = Collector::with_http();
//! let namespaces = collector.discover(&config)?;
//!
//! let requests: Vec<MetricRequest> = namespaces
//!     .into_iter()
//!     .map(|ns| MetricRequest::new(ns).with_config(config.clone()))
//!     .collect();
//! for metric in collector.collect(&requests)? {
//!     println!("{} = {}", metric.namespace, metric.value);
//! }
//! # Ok::<(), influxmon_collector::CollectorError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collector;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod fetch;

pub use collector::{CollectedMetric, Collector, MetricRequest, PLUGIN_NAME, PLUGIN_VERSION};
pub use config::CollectorConfig;
pub use endpoints::Endpoints;
pub use error::CollectorError;
pub use fetch::{Fetch, FetchError, HttpFetcher};
