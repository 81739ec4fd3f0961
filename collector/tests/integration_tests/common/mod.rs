//! Common test utilities and helpers for integration tests.
//!
//! This module provides a counting stub transport, canned payloads and
//! collector setup shared by all integration tests.

use influxmon_collector::{Collector, Fetch, FetchError, MetricRequest};
use influxmon_shared::config::ConfigBag;
use influxmon_shared::models::Namespace;
use influxmon_shared::storage::InMemoryMetricCatalog;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Statistics payload with a tagged `shard` series and an untagged `httpd` series.
pub const STATS_PAYLOAD: &str = r#"{
    "results": [
        {
            "statement_id": 0,
            "series": [
                {
                    "name": "shard",
                    "tags": {"db": "snap"},
                    "columns": ["diskBytes", "fieldsCreate"],
                    "values": [[162900, 12]]
                },
                {
                    "name": "httpd",
                    "columns": ["req"],
                    "values": [[424]]
                }
            ]
        }
    ]
}"#;

/// Diagnostics payload with a single `build` series.
pub const DIAGN_PAYLOAD: &str = r#"{
    "results": [
        {
            "statement_id": 0,
            "series": [
                {
                    "name": "build",
                    "columns": ["Branch", "Version"],
                    "values": [["master", "1.1.1"]]
                }
            ]
        }
    ]
}"#;

/// Body or failure served for one kind of query.
#[derive(Clone)]
pub enum Reply {
    /// Serve this body.
    Body(String),
    /// Fail with an HTTP status.
    Status(u16),
}

/// Stub transport counting statistics and diagnostics fetches.
pub struct StubFetcher {
    stats: std::sync::Mutex<Reply>,
    diagn: std::sync::Mutex<Reply>,
    stats_calls: AtomicUsize,
    diagn_calls: AtomicUsize,
}

impl StubFetcher {
    /// Creates a stub serving the given bodies.
    pub fn new(stats: &str, diagn: &str) -> Arc<Self> {
        Self::with_replies(Reply::Body(stats.to_string()), Reply::Body(diagn.to_string()))
    }

    /// Creates a stub serving the given replies.
    pub fn with_replies(stats: Reply, diagn: Reply) -> Arc<Self> {
        Arc::new(Self {
            stats: std::sync::Mutex::new(stats),
            diagn: std::sync::Mutex::new(diagn),
            stats_calls: AtomicUsize::new(0),
            diagn_calls: AtomicUsize::new(0),
        })
    }

    /// Changes the statistics reply for later fetches.
    pub fn set_stats(&self, reply: Reply) {
        *self.stats.lock().unwrap() = reply;
    }

    /// Number of statistics fetches so far.
    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    /// Number of diagnostics fetches so far.
    pub fn diagn_calls(&self) -> usize {
        self.diagn_calls.load(Ordering::SeqCst)
    }
}

impl Fetch for StubFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let reply = if url.contains("q=show%20diagnostics") {
            self.diagn_calls.fetch_add(1, Ordering::SeqCst);
            self.diagn.lock().unwrap().clone()
        } else {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            self.stats.lock().unwrap().clone()
        };

        match reply {
            Reply::Body(body) => Ok(body.into_bytes()),
            Reply::Status(status) => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
        }
    }
}

/// Returns a complete configuration bag.
pub fn mock_config() -> ConfigBag {
    ConfigBag::new()
        .with("host", "hostname")
        .with("port", 1234_i64)
        .with("user", "test")
        .with("password", "passwd")
}

/// Creates a collector over `fetcher` with a fresh catalog.
pub fn test_collector(fetcher: &Arc<StubFetcher>) -> Collector {
    Collector::new(fetcher.clone(), InMemoryMetricCatalog::new_shared())
}

/// Builds a collector namespace.
pub fn ns(kind: &str, series: &str, column: &str) -> Namespace {
    Namespace::new(["intel", "influxdb", kind, series, column])
}

/// Builds requests for `namespaces`, each carrying the mock configuration.
pub fn requests(namespaces: &[Namespace]) -> Vec<MetricRequest> {
    namespaces
        .iter()
        .map(|n| MetricRequest::new(n.clone()).with_config(mock_config()))
        .collect()
}
