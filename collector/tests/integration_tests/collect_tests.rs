//! Integration tests for metric collection.
//!
//! Tests cover:
//! - Values and tags of collected statistics and diagnostics
//! - Diagnostics caching across cycles
//! - Unresolved identities

use influxmon_shared::models::MetricValue;

use super::common::{
    mock_config, ns, requests, test_collector, StubFetcher, DIAGN_PAYLOAD, STATS_PAYLOAD,
};

#[test]
fn test_collect_statistics_values_and_tags() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);
    let namespaces = [
        ns("stat", "shard", "diskBytes"),
        ns("stat", "shard", "fieldsCreate"),
        ns("stat", "httpd", "req"),
    ];

    let collected = collector.collect(&requests(&namespaces)).unwrap();

    assert_eq!(collected.len(), 3);
    assert_eq!(collected[0].namespace, namespaces[0]);
    assert_eq!(collected[0].value, MetricValue::Integer(162_900));
    assert_eq!(collected[1].value, MetricValue::Integer(12));
    assert_eq!(collected[2].value, MetricValue::Integer(424));

    assert_eq!(collected[0].tags.get("db"), Some(&"snap".to_string()));
    assert_eq!(collected[1].tags.get("db"), Some(&"snap".to_string()));
    assert!(collected[2].tags.is_empty());
}

#[test]
fn test_collect_diagnostics_values() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);

    let collected = collector
        .collect(&requests(&[
            ns("diagn", "build", "Branch"),
            ns("diagn", "build", "Version"),
        ]))
        .unwrap();

    assert_eq!(collected[0].value, MetricValue::String("master".to_string()));
    assert_eq!(collected[1].value, MetricValue::String("1.1.1".to_string()));
}

#[test]
fn test_collect_after_discover() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);

    let namespaces = collector.discover(&mock_config()).unwrap();
    let collected = collector.collect(&requests(&namespaces)).unwrap();

    assert_eq!(collected.len(), namespaces.len());
    // Discover already cached diagnostics.
    assert_eq!(fetcher.diagn_calls(), 1);
    assert_eq!(fetcher.stats_calls(), 2);
}

#[test]
fn test_diagnostics_fetched_once_across_collects() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);
    let reqs = requests(&[ns("stat", "httpd", "req"), ns("diagn", "build", "Version")]);

    collector.collect(&reqs).unwrap();
    collector.collect(&reqs).unwrap();

    assert_eq!(fetcher.diagn_calls(), 1);
    assert_eq!(fetcher.stats_calls(), 2);
}

#[test]
fn test_forced_diagnostics_refresh() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);
    let reqs = requests(&[ns("diagn", "build", "Version")]);

    collector.collect(&reqs).unwrap();
    collector.refresh_diagnostics(&mock_config()).unwrap();
    collector.collect(&reqs).unwrap();

    assert_eq!(fetcher.diagn_calls(), 2);
    assert_eq!(fetcher.stats_calls(), 2);
}

#[test]
fn test_collect_skips_unknown_identity() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);
    let reqs = requests(&[
        ns("stat", "httpd", "req"),
        ns("stat", "httpd", "doesNotExist"),
        ns("diagn", "network", "hostname"),
    ]);

    let collected = collector.collect(&reqs).unwrap();

    assert_eq!(collected.len(), 1);
    assert!(collected.len() < reqs.len());
    assert_eq!(collected[0].namespace, ns("stat", "httpd", "req"));
}

#[test]
fn test_collect_keeps_value_types() {
    let stats = r#"{"results":[{"series":[
        {"name":"runtime","columns":["NumGC","PauseAvg","Mode","Enabled"],"values":[[8, 0.25, "fast", true]]}
    ]}]}"#;
    let fetcher = StubFetcher::new(stats, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);

    let collected = collector
        .collect(&requests(&[
            ns("stat", "runtime", "NumGC"),
            ns("stat", "runtime", "PauseAvg"),
            ns("stat", "runtime", "Mode"),
            ns("stat", "runtime", "Enabled"),
        ]))
        .unwrap();

    let types: Vec<&str> = collected.iter().map(|m| m.value.type_name()).collect();
    assert_eq!(types, vec!["int64", "float64", "string", "bool"]);
}

#[test]
fn test_collected_metric_serialization() {
    let fetcher = StubFetcher::new(STATS_PAYLOAD, DIAGN_PAYLOAD);
    let collector = test_collector(&fetcher);

    let collected = collector
        .collect(&requests(&[ns("stat", "shard", "diskBytes")]))
        .unwrap();
    let json = serde_json::to_value(&collected[0]).unwrap();

    assert_eq!(json["value"], 162_900);
    assert_eq!(json["tags"]["db"], "snap");
    assert_eq!(json["namespace"][4], "diskBytes");
}
