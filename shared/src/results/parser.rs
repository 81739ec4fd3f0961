//! Raw result parser.
//!
//! Decodes documents shaped like:
//!
//! ```json
//! {"results": [{"statement_id": 0, "series": [
//!     {"name": "shard", "tags": {"db": "snap"}, "columns": ["diskBytes"], "values": [[162900]]}
//! ]}]}
//! ```

use crate::models::{MetricKind, ResultSet, Series};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while decoding a result document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not valid JSON of the expected shape.
    #[error("Invalid {kind} payload: {source}")]
    Json {
        /// Kind of the payload being decoded.
        kind: MetricKind,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A row does not have one value per column.
    #[error("Malformed series '{series}': row {row} has {found} values, expected {expected}")]
    MalformedSeries {
        /// Name of the offending series.
        series: String,
        /// Index of the offending row.
        row: usize,
        /// Number of columns.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// The server answered with an error message instead of results.
    #[error("Server returned an error for {kind} query: {message}")]
    Server {
        /// Kind of the query that failed.
        kind: MetricKind,
        /// Message reported by the server.
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    results: Vec<RawStatementResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStatementResult {
    #[serde(default)]
    series: Option<Vec<Series>>,
    #[serde(default)]
    error: Option<String>,
}

/// Parses a raw result document into a `ResultSet`.
///
/// Documents with no results or no series yield an empty set.
///
/// # Errors
///
/// Returns a `ParseError` if:
/// - The payload is not JSON of the expected shape
/// - The server reported an error
/// - A row's length differs from its series' column count
///
/// # Examples
///
/// ```
/// use influxmon_shared::models::MetricKind;
/// use influxmon_shared::results::parse;
///
/// let raw = br#"{"results":[{"series":[{"name":"httpd","columns":["req"],"values":[[424]]}]}]}"#;
/// let set = parse(MetricKind::Statistics, raw).unwrap();
/// assert_eq!(set.series[0].name, "httpd");
/// ```
pub fn parse(kind: MetricKind, raw: &[u8]) -> Result<ResultSet, ParseError> {
    let response: RawResponse =
        serde_json::from_slice(raw).map_err(|source| ParseError::Json { kind, source })?;

    if let Some(message) = response.error {
        return Err(ParseError::Server { kind, message });
    }

    let mut series = Vec::new();
    for result in response.results {
        if let Some(message) = result.error {
            return Err(ParseError::Server { kind, message });
        }
        series.extend(result.series.unwrap_or_default());
    }

    for s in &series {
        check_row_lengths(s)?;
    }

    tracing::trace!(%kind, series = series.len(), "Parsed result document");
    Ok(ResultSet::new(series))
}

fn check_row_lengths(series: &Series) -> Result<(), ParseError> {
    let expected = series.columns.len();
    match series.rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(ParseError::MalformedSeries {
            series: series.name.clone(),
            row,
            expected,
            found: series.rows[row].len(),
        }),
        None => Ok(()),
    }
}
