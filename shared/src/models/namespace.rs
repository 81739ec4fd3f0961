//! Externally visible metric namespaces.
//!
//! A namespace is the metric key un-joined into segments behind a fixed
//! vendor/class prefix: `intel/influxdb/<kind>/<series>/<column>`.

use super::metric::{MetricKey, MetricKind};
use serde::{Deserialize, Serialize};

/// Vendor segment of every namespace.
pub const NS_VENDOR: &str = "intel";

/// Class segment of every namespace.
pub const NS_CLASS: &str = "influxdb";

/// Fixed prefix of every namespace.
pub const NS_PREFIX: [&str; 2] = [NS_VENDOR, NS_CLASS];

const NS_LEN: usize = NS_PREFIX.len() + 3;

/// Hierarchical identity of a metric as seen by the telemetry pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// Creates a namespace from raw segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns the namespace of a metric key.
    ///
    /// # Example
    ///
    /// ```
    /// use influxmon_shared::models::{MetricKey, MetricKind, Namespace};
    ///
    /// let key = MetricKey::new(MetricKind::Statistics, "httpd", "req");
    /// let ns = Namespace::for_key(&key);
    /// assert_eq!(ns.segments(), ["intel", "influxdb", "stat", "httpd", "req"]);
    /// ```
    #[must_use]
    pub fn for_key(key: &MetricKey) -> Self {
        Self::new([
            NS_VENDOR,
            NS_CLASS,
            key.kind().as_str(),
            key.series(),
            key.column(),
        ])
    }

    /// Maps the namespace back to a metric key.
    ///
    /// Returns `None` if the prefix does not match, the segment count is
    /// wrong or the kind segment is unknown.
    #[must_use]
    pub fn to_key(&self) -> Option<MetricKey> {
        if self.0.len() != NS_LEN || self.0[..NS_PREFIX.len()] != NS_PREFIX {
            return None;
        }

        let kind: MetricKind = self.0[2].parse().ok()?;
        let key = MetricKey::new(kind, &self.0[3], &self.0[4]);

        // Segments that needed normalising never came from `for_key`.
        (key.series() == self.0[3] && key.column() == self.0[4]).then_some(key)
    }

    /// Returns the segments of the namespace.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl From<&MetricKey> for Namespace {
    fn from(key: &MetricKey) -> Self {
        Self::for_key(key)
    }
}
