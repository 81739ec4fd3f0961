//! Collector error type.

use crate::fetch::FetchError;
use influxmon_shared::config::ConfigError;
use influxmon_shared::results::ParseError;
use influxmon_shared::storage::CatalogError;
use thiserror::Error;

/// Errors that abort a Discover or Collect cycle.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// A configuration item is missing, mistyped or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Fetching a result document failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A result document could not be decoded.
    #[error("Parse failed: {0}")]
    Parse(#[from] ParseError),

    /// The catalog could not be accessed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Collect was called with an empty request list.
    #[error("No metrics requested")]
    NoMetricsRequested,
}
