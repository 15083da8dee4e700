use chrono::{Local, NaiveDate};
use clap::Parser;
use cpu_report::{Client, DEFAULT_BASE_URL, generate_report};
use std::error::Error;
use std::io;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "cpu-report",
    about = "Print last month's CPU seconds per job from Prometheus"
)]
struct Cli {
    /// Prometheus base URL; "/metrics" is appended as-is
    #[arg(long, env = "PROMETHEUS_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Report the month before this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Request timeout in seconds; waits indefinitely when unset
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut client = Client::new()?.with_base_url(cli.base_url);
    if let Some(secs) = cli.timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs))?;
    }

    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let stdout = io::stdout();
    generate_report(&client, today, &mut stdout.lock()).await?;

    Ok(())
}
