use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status: {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid or unexpected response format: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("query rejected ({error_type}): {error}")]
    Api { error_type: String, error: String },

    #[error("result entry {index} has no `{label}` label")]
    MissingLabel { index: usize, label: &'static str },

    #[error("result entry {index} has no sample value")]
    MissingValue { index: usize },

    #[error("local midnight of {0} does not exist in this time zone")]
    InvalidTimestamp(chrono::NaiveDate),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
