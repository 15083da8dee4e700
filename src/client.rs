use crate::error::ReportError;
use crate::models::{QueryResponse, parse_query_response};
use crate::query::QueryParams;
use log::{debug, info, warn};
use reqwest::{Client as HttpClient, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Default Prometheus address. `METRICS_PATH` is appended verbatim, so the
/// default endpoint carries a doubled separator.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9090/";
pub const METRICS_PATH: &str = "/metrics";

/// Anything that can answer an instant query. The report driver only talks
/// to this, so it runs against a canned response in tests.
pub trait MetricsSource {
    fn query(
        &self,
        params: &QueryParams,
    ) -> impl Future<Output = Result<QueryResponse, ReportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
}

impl Client {
    /// Create a client for the default endpoint. No request timeout is set.
    pub fn new() -> Result<Self, ReportError> {
        let http = HttpClient::builder().build()?;
        info!("Initialized query client with default base URL");
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for tests or other Prometheus hosts).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        info!("Updated query base URL to {}", self.base_url);
        self
    }

    /// Rebuild the underlying HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ReportError> {
        self.http = HttpClient::builder().timeout(timeout).build()?;
        info!("Set query timeout to {:?}", timeout);
        Ok(self)
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, METRICS_PATH)
    }

    async fn get_query(&self, params: &QueryParams) -> Result<QueryResponse, ReportError> {
        let url = self.endpoint();
        debug!("GET request to {} with query {:?} at {}", url, params.query, params.time);
        let response = self.http.get(url).query(&params.as_pairs()).send().await?;
        let status = response.status();
        debug!("Received status {}", status);
        let body = response.text().await?;
        let parsed = handle_body(status, &body)?;
        for warning in &parsed.warnings {
            warn!("Query warning: {}", warning);
        }
        Ok(parsed)
    }
}

impl MetricsSource for Client {
    async fn query(&self, params: &QueryParams) -> Result<QueryResponse, ReportError> {
        self.get_query(params).await
    }
}

fn handle_body(status: StatusCode, body: &str) -> Result<QueryResponse, ReportError> {
    if status.is_success() {
        return parse_query_response(body);
    }
    match parse_query_response(body) {
        Err(api @ ReportError::Api { .. }) => Err(api),
        _ => Err(ReportError::Status(status)),
    }
}
