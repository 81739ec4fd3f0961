//! Metric catalog trait and implementations.
//!
//! Provides the `MetricCatalog` trait holding the latest flattened metrics of a
//! collector and an `InMemoryMetricCatalog` implementation.

use crate::models::{MetricKey, MetricKind, MetricMap, MetricRecord};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur during metric catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to acquire lock on the catalog.
    #[error("Failed to acquire lock on metric catalog")]
    LockError,

    /// No metric is held under the key.
    #[error("Metric not found: {0}")]
    NotFound(MetricKey),
}

/// Trait for metric catalog implementations.
///
/// Statistics and diagnostics are held side by side. Statistics are swapped
/// wholesale on every poll; diagnostics are populated once and only replaced
/// when a refresh is forced. Implementations must be thread-safe
/// (Send + Sync) and must never expose a half-swapped mapping.
pub trait MetricCatalog: Send + Sync {
    /// Replaces every statistics entry with the `stat` entries of `metrics`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn replace_statistics(&self, metrics: MetricMap) -> Result<(), CatalogError>;

    /// Stores the `diagn` entries of `metrics` unless diagnostics were already
    /// stored, even if that earlier set was empty.
    ///
    /// Returns `true` if the entries were stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn set_diagnostics_if_absent(&self, metrics: MetricMap) -> Result<bool, CatalogError>;

    /// Replaces every diagnostics entry with the `diagn` entries of `metrics`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn replace_diagnostics(&self, metrics: MetricMap) -> Result<(), CatalogError>;

    /// Returns true once diagnostics have been stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn has_diagnostics(&self) -> Result<bool, CatalogError>;

    /// Lists every key held, sorted by kind, series and column.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn list_identities(&self) -> Result<Vec<MetricKey>, CatalogError>;

    /// Returns a copy of the record held under `key`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no record is held under the key.
    fn resolve(&self, key: &MetricKey) -> Result<MetricRecord, CatalogError>;

    /// Returns the total number of records held.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn len(&self) -> Result<usize, CatalogError>;

    /// Returns true if the catalog holds no records.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn is_empty(&self) -> Result<bool, CatalogError> {
        Ok(self.len()? == 0)
    }

    /// Drops every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be locked.
    fn clear(&self) -> Result<(), CatalogError>;
}

#[derive(Debug, Default)]
struct CatalogState {
    statistics: MetricMap,
    // `None` until the first diagnostics poll lands.
    diagnostics: Option<MetricMap>,
}

impl CatalogState {
    fn partition(&self, kind: MetricKind) -> Option<&MetricMap> {
        match kind {
            MetricKind::Statistics => Some(&self.statistics),
            MetricKind::Diagnostics => self.diagnostics.as_ref(),
        }
    }

    fn diagnostics_len(&self) -> usize {
        self.diagnostics.as_ref().map_or(0, MetricMap::len)
    }
}

/// In-memory metric catalog implementation.
#[derive(Debug, Default)]
pub struct InMemoryMetricCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryMetricCatalog {
    /// Creates a new empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState::default())),
        }
    }

    /// Creates a new in-memory catalog wrapped in an Arc.
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

/// Keeps only entries of `kind`, warning about the rest.
fn retain_kind(mut metrics: MetricMap, kind: MetricKind) -> MetricMap {
    let before = metrics.len();
    metrics.retain(|key, _| key.kind() == kind);
    let dropped = before - metrics.len();
    if dropped > 0 {
        tracing::warn!(%kind, dropped, "Ignoring catalog entries of another kind");
    }
    metrics
}

impl MetricCatalog for InMemoryMetricCatalog {
    fn replace_statistics(&self, metrics: MetricMap) -> Result<(), CatalogError> {
        let metrics = retain_kind(metrics, MetricKind::Statistics);
        let mut state = self.state.write().map_err(|_| CatalogError::LockError)?;
        state.statistics = metrics;
        Ok(())
    }

    fn set_diagnostics_if_absent(&self, metrics: MetricMap) -> Result<bool, CatalogError> {
        let metrics = retain_kind(metrics, MetricKind::Diagnostics);
        let mut state = self.state.write().map_err(|_| CatalogError::LockError)?;
        if state.diagnostics.is_some() {
            return Ok(false);
        }
        state.diagnostics = Some(metrics);
        Ok(true)
    }

    fn replace_diagnostics(&self, metrics: MetricMap) -> Result<(), CatalogError> {
        let metrics = retain_kind(metrics, MetricKind::Diagnostics);
        let mut state = self.state.write().map_err(|_| CatalogError::LockError)?;
        state.diagnostics = Some(metrics);
        Ok(())
    }

    fn has_diagnostics(&self) -> Result<bool, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockError)?;
        Ok(state.diagnostics.is_some())
    }

    fn list_identities(&self) -> Result<Vec<MetricKey>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockError)?;

        let mut keys: Vec<MetricKey> = state
            .statistics
            .keys()
            .chain(state.diagnostics.iter().flat_map(MetricMap::keys))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn resolve(&self, key: &MetricKey) -> Result<MetricRecord, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockError)?;
        state
            .partition(key.kind())
            .and_then(|metrics| metrics.get(key))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.clone()))
    }

    fn len(&self) -> Result<usize, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockError)?;
        Ok(state.statistics.len() + state.diagnostics_len())
    }

    fn clear(&self) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockError)?;
        state.statistics.clear();
        state.diagnostics = None;
        Ok(())
    }
}
