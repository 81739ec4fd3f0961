//! Tabular result model.
//!
//! A `ResultSet` is one decoded poll response; each `Series` is a named,
//! tagged table of columns and rows.

use super::metric::MetricValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single row of a series. `None` marks a JSON `null` cell.
pub type Row = Vec<Option<MetricValue>>;

/// One named, tagged table returned by an introspection query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Name of the series (e.g. `shard`, `httpd`, `build`).
    pub name: String,

    /// Tags of the series; empty when the source has none.
    #[serde(default)]
    pub tags: HashMap<String, String>,

    /// Ordered column names.
    #[serde(default)]
    pub columns: Vec<String>,

    /// Value rows, each as long as `columns`.
    #[serde(default, rename = "values")]
    pub rows: Vec<Row>,
}

impl Series {
    /// Creates a series without tags or rows.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            tags: HashMap::new(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a tag to the series.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Appends a row with no `null` cells.
    #[must_use]
    pub fn with_row<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = MetricValue>,
    {
        self.rows.push(values.into_iter().map(Some).collect());
        self
    }

    /// Returns the number of non-null cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().flatten().filter(|v| v.is_some()).count()
    }
}

/// An ordered sequence of series from one poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// The series, in document order.
    pub series: Vec<Series>,
}

impl ResultSet {
    /// Creates a result set from series.
    #[must_use]
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    /// Returns true if the result set holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Returns the number of non-null cells across all series.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.series.iter().map(Series::cell_count).sum()
    }
}
