//! Integration tests for metric discovery.
//!
//! Tests cover:
//! - Identities reported for statistics and diagnostics
//! - Series names containing the key delimiter
//! - Empty result documents

use influxmon_shared::models::{MetricKey, Namespace};

use super::common::{mock_config, ns, test_collector, StubFetcher, DIAGN_PAYLOAD, STATS_PAYLOAD};

#[test]
fn test_discover_reports_statistics_and_diagnostics() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);

    let namespaces = collector.discover(&mock_config()).unwrap();

    assert_eq!(namespaces.len(), 5);
    for expected in [
        ns("stat", "shard", "diskBytes"),
        ns("stat", "shard", "fieldsCreate"),
        ns("stat", "httpd", "req"),
        ns("diagn", "build", "Branch"),
        ns("diagn", "build", "Version"),
    ] {
        assert!(namespaces.contains(&expected), "missing {expected}");
    }
    assert_eq!(fetcher.stats_calls(), 1);
    assert_eq!(fetcher.diagn_calls(), 1);
}

#[test]
fn test_discover_returns_namespaces_only() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);

    let namespaces = collector.discover(&mock_config()).unwrap();

    let json = serde_json::to_value(&namespaces).unwrap();
    assert_eq!(json[0].as_array().unwrap().len(), 5);
    assert!(namespaces
        .iter()
        .all(|n| n.segments()[..2] == ["intel", "influxdb"]));
}

#[test]
fn test_discover_substitutes_delimiter_in_series_name() {
    let stats = r#"{"results":[{"series":[
        {"name":"shard/1","columns":["columnA","columnB","columnC"],"values":[[1, 10.1, "value"]]}
    ]}]}"#;
    let fetcher = StubFetcher::new(stats, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);

    let namespaces = collector.discover(&mock_config()).unwrap();

    let shard: Vec<&Namespace> = namespaces
        .iter()
        .filter(|n| n.segments()[2] == "stat")
        .collect();
    assert_eq!(shard.len(), 3);
    for namespace in shard {
        assert_eq!(namespace.segments().len(), 5);
        assert_eq!(namespace.segments()[3], "shard_1");

        let key: MetricKey = namespace.to_key().unwrap();
        assert_eq!(key.to_string().split('/').count(), 3);
    }
}

#[test]
fn test_discover_with_empty_documents() {
    let fetcher = StubFetcher::new(r#"{"results":[]}"#, r#"{"results":[{"statement_id":0}]}"#);
    let collector = test_collector(&fetcher);

    let namespaces = collector.discover(&mock_config()).unwrap();

    assert!(namespaces.is_empty());
}

#[test]
fn test_discover_drops_vanished_columns() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);
    collector.discover(&mock_config()).unwrap();

    fetcher.set_stats(super::common::Reply::Body(
        r#"{"results":[{"series":[{"name":"httpd","columns":["req"],"values":[[500]]}]}]}"#
            .to_string(),
    ));
    let namespaces = collector.discover(&mock_config()).unwrap();

    assert_eq!(namespaces.len(), 3);
    assert!(!namespaces.contains(&ns("stat", "shard", "diskBytes")));
}
