//! Collection orchestrator.
//!
//! Drives poll cycles against the statistics and diagnostics endpoints and
//! reconciles the flattened results with the identities a caller asks for.

use crate::config::CollectorConfig;
use crate::endpoints::Endpoints;
use crate::error::CollectorError;
use crate::fetch::{Fetch, HttpFetcher};
use chrono::{DateTime, Utc};
use influxmon_shared::config::ConfigBag;
use influxmon_shared::models::{MetricKind, MetricMap, MetricValue, Namespace};
use influxmon_shared::results::{flatten, parse};
use influxmon_shared::storage::{CatalogError, InMemoryMetricCatalog, MetricCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Name the collector registers under.
pub const PLUGIN_NAME: &str = "influxdb";

/// Version the collector registers under.
pub const PLUGIN_VERSION: u32 = 7;

/// A metric identity the caller wants a value for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRequest {
    /// Namespace of the metric, as returned by discovery.
    pub namespace: Namespace,

    /// Tags the caller already attached to the metric.
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Configuration the metric was requested with.
    #[serde(default)]
    pub config: ConfigBag,
}

impl MetricRequest {
    /// Creates a request without tags or configuration.
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            tags: HashMap::new(),
            config: ConfigBag::new(),
        }
    }

    /// Adds a tag to the request.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Sets the configuration of the request.
    #[must_use]
    pub fn with_config(mut self, config: ConfigBag) -> Self {
        self.config = config;
        self
    }
}

/// A metric value produced by a Collect cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedMetric {
    /// Namespace of the metric.
    pub namespace: Namespace,
    /// Current value.
    pub value: MetricValue,
    /// Request tags merged with the series tags; series tags win.
    pub tags: HashMap<String, String>,
    /// Time of the collection cycle.
    pub timestamp: DateTime<Utc>,
}

/// Polls the database and serves Discover/Collect.
///
/// Endpoints are resolved lazily on the first call and never re-derived.
/// Diagnostics are fetched once and cached; statistics are fetched on every
/// cycle. A failed fetch or parse aborts the cycle before the catalog is
/// touched.
pub struct Collector {
    fetcher: Arc<dyn Fetch>,
    catalog: Arc<dyn MetricCatalog>,
    endpoints: OnceLock<Endpoints>,
}

impl Collector {
    /// Creates a collector with the given transport and catalog.
    pub fn new(fetcher: Arc<dyn Fetch>, catalog: Arc<dyn MetricCatalog>) -> Self {
        Self {
            fetcher,
            catalog,
            endpoints: OnceLock::new(),
        }
    }

    /// Creates a collector over HTTP with a fresh in-memory catalog.
    #[must_use]
    pub fn with_http() -> Self {
        Self::new(
            Arc::new(HttpFetcher::new()),
            Arc::new(InMemoryMetricCatalog::new()),
        )
    }

    /// Returns true once endpoints have been resolved.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.endpoints.get().is_some()
    }

    /// Returns the catalog backing this collector.
    #[must_use]
    pub fn catalog(&self) -> &dyn MetricCatalog {
        self.catalog.as_ref()
    }

    fn init(&self, config: &ConfigBag) -> Result<&Endpoints, CollectorError> {
        if let Some(endpoints) = self.endpoints.get() {
            return Ok(endpoints);
        }

        let config = CollectorConfig::from_bag(config).inspect_err(|e| {
            tracing::error!(error = %e, "Cannot initialize collector from config");
        })?;
        let endpoints = Endpoints::new(&config);

        tracing::info!(host = %config.host, port = config.port, "Collector initialized");
        // A concurrent caller may have won the race; its endpoints stay.
        Ok(self.endpoints.get_or_init(|| endpoints))
    }

    fn poll(&self, endpoints: &Endpoints, kind: MetricKind) -> Result<MetricMap, CollectorError> {
        let raw = self.fetcher.fetch(endpoints.url(kind)).inspect_err(|e| {
            tracing::error!(%kind, error = %e, "Failed to fetch results");
        })?;

        let result_set = parse(kind, &raw).inspect_err(|e| {
            tracing::error!(%kind, error = %e, "Failed to parse results");
        })?;

        let metrics = flatten(kind, &result_set);
        tracing::debug!(%kind, series = result_set.series.len(), metrics = metrics.len(), "Polled results");
        Ok(metrics)
    }

    /// Lists every available metric.
    ///
    /// Fetches both statistics and diagnostics; the catalog is only updated
    /// when both succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is missing an item or has a wrongly typed one
    /// - Either fetch fails
    /// - Either document cannot be parsed
    pub fn discover(&self, config: &ConfigBag) -> Result<Vec<Namespace>, CollectorError> {
        let endpoints = self.init(config)?;

        let statistics = self.poll(endpoints, MetricKind::Statistics)?;
        let diagnostics = self.poll(endpoints, MetricKind::Diagnostics)?;

        self.catalog.replace_statistics(statistics)?;
        self.catalog.replace_diagnostics(diagnostics)?;

        let namespaces: Vec<Namespace> = self
            .catalog
            .list_identities()?
            .iter()
            .map(Namespace::for_key)
            .collect();

        tracing::info!(metrics = namespaces.len(), "Discovered metrics");
        Ok(namespaces)
    }

    /// Returns current values for the requested metrics.
    ///
    /// Endpoints are initialised from the first request's configuration if
    /// needed. Requests that do not resolve are logged and left out of the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `requests` is empty
    /// - The configuration is missing an item or has a wrongly typed one
    /// - A fetch fails or a document cannot be parsed
    pub fn collect(
        &self,
        requests: &[MetricRequest],
    ) -> Result<Vec<CollectedMetric>, CollectorError> {
        let Some(first) = requests.first() else {
            return Err(CollectorError::NoMetricsRequested);
        };
        let endpoints = self.init(&first.config)?;

        if !self.catalog.has_diagnostics()? {
            let diagnostics = self.poll(endpoints, MetricKind::Diagnostics)?;
            self.catalog.set_diagnostics_if_absent(diagnostics)?;
        }

        let statistics = self.poll(endpoints, MetricKind::Statistics)?;
        self.catalog.replace_statistics(statistics)?;

        let timestamp = Utc::now();
        let mut collected = Vec::with_capacity(requests.len());

        for request in requests {
            let Some(key) = request.namespace.to_key() else {
                tracing::warn!(namespace = %request.namespace, "Requested namespace is not a collector metric");
                continue;
            };

            match self.catalog.resolve(&key) {
                Ok(record) => {
                    let mut tags = request.tags.clone();
                    tags.extend(record.tags);
                    collected.push(CollectedMetric {
                        namespace: request.namespace.clone(),
                        value: record.value,
                        tags,
                        timestamp,
                    });
                }
                Err(CatalogError::NotFound(_)) => {
                    tracing::warn!(namespace = %request.namespace, "Requested metric not available, skipping");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!(
            requested = requests.len(),
            collected = collected.len(),
            "Collected metrics"
        );
        Ok(collected)
    }

    /// Refetches diagnostics and replaces the cached set.
    ///
    /// Returns the number of diagnostics metrics now held.
    ///
    /// # Errors
    ///
    /// Returns an error if initialisation, the fetch or the parse fails.
    pub fn refresh_diagnostics(&self, config: &ConfigBag) -> Result<usize, CollectorError> {
        let endpoints = self.init(config)?;
        let diagnostics = self.poll(endpoints, MetricKind::Diagnostics)?;
        let count = diagnostics.len();
        self.catalog.replace_diagnostics(diagnostics)?;

        tracing::info!(metrics = count, "Refreshed diagnostics");
        Ok(count)
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}
