use crate::client::MetricsSource;
use crate::error::ReportError;
use crate::models::{JobUsage, Sample};
use crate::query::QueryParams;
use crate::window::ReportingWindow;
use chrono::NaiveDate;
use log::debug;
use std::io::Write;

pub fn format_line(usage: &JobUsage) -> String {
    format!(" {}: {}", usage.job, usage.value)
}

/// Write the header and one line per entry, in input order. Lines already
/// written stay written when a later entry is malformed.
pub fn write_report<W: Write>(
    out: &mut W,
    window: &ReportingWindow,
    samples: &[Sample],
) -> Result<(), ReportError> {
    writeln!(out, "{}", window.header())?;
    for (index, sample) in samples.iter().enumerate() {
        let usage = JobUsage::from_sample(index, sample)?;
        writeln!(out, "{}", format_line(&usage))?;
    }
    out.flush()?;
    Ok(())
}

/// Query `source` for the month before the one containing `today` and print
/// the per-job summary to `out`.
pub async fn generate_report<S, W>(
    source: &S,
    today: NaiveDate,
    out: &mut W,
) -> Result<(), ReportError>
where
    S: MetricsSource,
    W: Write,
{
    let window = ReportingWindow::containing(today);
    let params = QueryParams::for_window(&window)?;
    debug!(
        "Reporting {} to {} using {}",
        window.first_of_current_month, window.last_of_previous_month, params.query
    );
    let response = source.query(&params).await?;
    write_report(out, &window, &response.data.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_query_response;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    struct CannedSource {
        body: String,
        seen: Mutex<Vec<QueryParams>>,
    }

    impl CannedSource {
        fn new(body: Value) -> Self {
            Self {
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl MetricsSource for CannedSource {
        async fn query(
            &self,
            params: &QueryParams,
        ) -> Result<crate::models::QueryResponse, ReportError> {
            self.seen.lock().unwrap().push(params.clone());
            parse_query_response(&self.body)
        }
    }

    fn march_2021() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 15).unwrap()
    }

    async fn run(body: Value) -> (Result<(), ReportError>, String, Vec<QueryParams>) {
        let source = CannedSource::new(body);
        let mut out = Vec::new();
        let result = generate_report(&source, march_2021(), &mut out).await;
        let seen = source.seen.lock().unwrap().clone();
        (result, String::from_utf8(out).unwrap(), seen)
    }

    #[tokio::test]
    async fn prints_header_and_entries_in_order() {
        let (result, output, seen) = run(json!({
            "status": "success",
            "data": {
                "resultType": "vector",
                "result": [
                    { "metric": { "job": "web" }, "value": [1700000000, "123.4"] },
                    { "metric": { "job": "batch" }, "value": [1700000000, "56.7"] }
                ]
            }
        }))
        .await;
        result.unwrap();
        assert_eq!(output, "February 2021:\n web: 123.4\n batch: 56.7\n");

        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].query,
            "sum by (job)(increase(process_cpu_seconds_total[28d]))"
        );
    }

    #[tokio::test]
    async fn empty_result_prints_only_header() {
        let (result, output, _) = run(json!({ "status": "success", "data": { "result": [] } })).await;
        assert!(result.is_ok());
        assert_eq!(output, "February 2021:\n");
    }

    #[tokio::test]
    async fn missing_result_path_fails_without_output() {
        let (result, output, _) = run(json!({ "status": "success" })).await;
        assert!(matches!(result, Err(ReportError::Decode(_))));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn entry_without_job_aborts_remaining_lines() {
        let (result, output, _) = run(json!({
            "data": {
                "result": [
                    { "metric": { "job": "web" }, "value": [1700000000, "1"] },
                    { "metric": {}, "value": [1700000000, "2"] },
                    { "metric": { "job": "batch" }, "value": [1700000000, "3"] }
                ]
            }
        }))
        .await;
        assert!(matches!(
            result,
            Err(ReportError::MissingLabel { index: 1, .. })
        ));
        assert_eq!(output, "February 2021:\n web: 1\n");
    }

    #[test]
    fn formats_line_with_leading_space() {
        let usage = JobUsage {
            job: "node".into(),
            value: "0.5".into(),
        };
        assert_eq!(format_line(&usage), " node: 0.5");
    }
}
