//! Monthly per-job CPU time report from a Prometheus-compatible query API.
//! The reporting window, query parameters and output formatting are pure;
//! only [`Client`] touches the network.

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod report;
pub mod window;

pub use client::{Client, DEFAULT_BASE_URL, MetricsSource};
pub use error::ReportError;
pub use models::{JobUsage, QueryResponse, Sample};
pub use query::QueryParams;
pub use report::{generate_report, write_report};
pub use window::ReportingWindow;
