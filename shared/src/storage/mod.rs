//! Storage traits and implementations.
//!
//! This module provides the metric catalog: the per-collector cache of the
//! latest flattened statistics and diagnostics. The `MetricCatalog` trait
//! allows different implementations to be injected into a collector.

pub mod catalog;

pub use catalog::{CatalogError, InMemoryMetricCatalog, MetricCatalog};
