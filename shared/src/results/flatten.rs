//! Flattening of tabular results into keyed metric records.

use crate::models::{build_key, MetricKind, MetricMap, MetricRecord, ResultSet};

/// Flattens a result set into a mapping from metric key to record.
///
/// Every non-null cell becomes one record carrying its series' tags. Later
/// cells overwrite earlier ones with the same key, which covers both repeated
/// rows in a series and repeated series names within the set.
///
/// # Example
///
/// ```
/// use influxmon_shared::models::{MetricKey, MetricKind, MetricValue, ResultSet, Series};
/// use influxmon_shared::results::flatten;
///
/// let set = ResultSet::new(vec![
///     Series::new("httpd", ["req"]).with_row([MetricValue::Integer(424)]),
/// ]);
/// let map = flatten(MetricKind::Statistics, &set);
///
/// let key = MetricKey::new(MetricKind::Statistics, "httpd", "req");
/// assert_eq!(map[&key].value, MetricValue::Integer(424));
/// ```
#[must_use]
pub fn flatten(kind: MetricKind, result_set: &ResultSet) -> MetricMap {
    let mut map = MetricMap::new();
    let mut overwritten = 0usize;

    for series in &result_set.series {
        for row in &series.rows {
            for (column, cell) in series.columns.iter().zip(row) {
                let Some(value) = cell else {
                    continue;
                };

                let key = build_key(kind, &series.name, column);
                let record = MetricRecord {
                    key: key.clone(),
                    value: value.clone(),
                    tags: series.tags.clone(),
                };
                if map.insert(key, record).is_some() {
                    overwritten += 1;
                }
            }
        }
    }

    if overwritten > 0 {
        tracing::debug!(%kind, overwritten, "Duplicate metric keys overwritten while flattening");
    }

    map
}
