//! Query endpoint construction.

use crate::config::CollectorConfig;
use influxmon_shared::models::MetricKind;

/// Statement returning internal statistics.
pub const STATISTICS_STATEMENT: &str = "show stats";

/// Statement returning build and runtime diagnostics.
pub const DIAGNOSTICS_STATEMENT: &str = "show diagnostics";

/// Builds the query URL for one statement.
///
/// # Example
///
/// ```
/// use influxmon_collector::endpoints::query_url;
///
/// let url = query_url("localhost", 8086, "admin", "s3cret", "show stats");
/// assert_eq!(
///     url,
///     "http://localhost:8086/query?u=admin&p=s3cret&pretty=true&q=show%20stats"
/// );
/// ```
#[must_use]
pub fn query_url(host: &str, port: u16, user: &str, password: &str, statement: &str) -> String {
    format!(
        "http://{host}:{port}/query?u={}&p={}&pretty=true&q={}",
        urlencoding::encode(user),
        urlencoding::encode(password),
        urlencoding::encode(statement),
    )
}

/// Resolved query URLs of one collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    statistics: String,
    diagnostics: String,
}

impl Endpoints {
    /// Resolves both endpoints from the configuration.
    #[must_use]
    pub fn new(config: &CollectorConfig) -> Self {
        let url = |statement| {
            query_url(
                &config.host,
                config.port,
                &config.user,
                &config.password,
                statement,
            )
        };

        Self {
            statistics: url(STATISTICS_STATEMENT),
            diagnostics: url(DIAGNOSTICS_STATEMENT),
        }
    }

    /// Returns the URL serving results of `kind`.
    #[must_use]
    pub fn url(&self, kind: MetricKind) -> &str {
        match kind {
            MetricKind::Statistics => &self.statistics,
            MetricKind::Diagnostics => &self.diagnostics,
        }
    }
}
