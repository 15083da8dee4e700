use crate::error::ReportError;
use crate::window::ReportingWindow;
use chrono::{Local, TimeZone};

const CPU_COUNTER: &str = "process_cpu_seconds_total";

/// Instant-query parameters sent as the `query` and `time` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub query: String,
    pub time: i64,
}

impl QueryParams {
    /// Per-job CPU increase over the window, evaluated at local midnight.
    pub fn for_window(window: &ReportingWindow) -> Result<Self, ReportError> {
        Self::for_window_in(window, &Local)
    }

    pub fn for_window_in<Tz: TimeZone>(
        window: &ReportingWindow,
        tz: &Tz,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            query: cpu_increase_by_job(&window.duration_token()),
            time: window.timestamp_in(tz)?,
        })
    }

    pub fn as_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("query", self.query.clone()),
            ("time", self.time.to_string()),
        ]
    }
}

/// `sum by (job)(increase(process_cpu_seconds_total<duration>))`
pub fn cpu_increase_by_job(duration: &str) -> String {
    format!("sum by (job)(increase({CPU_COUNTER}{duration}))")
}
