use crate::error::ReportError;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

pub const JOB_LABEL: &str = "job";

/// Prometheus query API envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub data: QueryData,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryData {
    #[serde(default)]
    pub result_type: Option<String>,
    pub result: Vec<Sample>,
}

/// One `data.result` entry. Fields are checked when the entry is turned into
/// a [`JobUsage`], not at parse time.
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub value: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    status: String,
    #[serde(default)]
    error_type: String,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobUsage {
    pub job: String,
    pub value: String,
}

fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl JobUsage {
    pub fn from_sample(index: usize, sample: &Sample) -> Result<Self, ReportError> {
        let job = sample
            .metric
            .as_ref()
            .and_then(|m| m.get(JOB_LABEL))
            .and_then(json_value_to_string)
            .ok_or(ReportError::MissingLabel {
                index,
                label: JOB_LABEL,
            })?;
        let value = sample
            .value
            .as_ref()
            .and_then(|v| v.get(1))
            .and_then(json_value_to_string)
            .ok_or(ReportError::MissingValue { index })?;
        Ok(JobUsage { job, value })
    }
}

/// Parse a query API body. A body with `"status": "error"` becomes
/// [`ReportError::Api`]; anything without `data.result` is a decode error.
pub fn parse_query_response(data: &str) -> Result<QueryResponse, ReportError> {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(data)
        && envelope.status == "error"
    {
        return Err(ReportError::Api {
            error_type: envelope.error_type,
            error: envelope.error,
        });
    }
    let parsed: QueryResponse = serde_json::from_str(data)?;
    debug!(
        "Parsed {} result entries ({})",
        parsed.data.result.len(),
        parsed.data.result_type.as_deref().unwrap_or("unknown type")
    );
    Ok(parsed)
}
