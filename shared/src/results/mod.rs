//! Introspection result handling.
//!
//! Turns raw `SHOW STATS` / `SHOW DIAGNOSTICS` documents into flat, keyed
//! metric records.
//!
//! # Example
//!
//! ```
//! use influxmon_shared::models::MetricKind;
//! use influxmon_shared::results::{flatten, parse};
//!
//! let raw = br#"{"results":[{"series":[
//!     {"name":"build","columns":["Branch","Version"],"values":[["master","1.1.1"]]}
//! ]}]}"#;
//!
//! let set = parse(MetricKind::Diagnostics, raw).unwrap();
//! let map = flatten(MetricKind::Diagnostics, &set);
//! assert_eq!(map.len(), 2);
//! ```

mod flatten;
mod parser;

pub use flatten::flatten;
pub use parser::{parse, ParseError};
