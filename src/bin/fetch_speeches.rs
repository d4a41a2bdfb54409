//! Stage 1: download every speech record from the archive API and write
//! them to a JSON array on disk.

use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use rostrum::error::Result;
use rostrum::fetch::{SpeechArchiveClient, DEFAULT_ENDPOINT};
use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Speech archive endpoint to paginate.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Path of the JSON array to write.
    #[arg(short, long, default_value = "speeches.json")]
    output: String,

    /// How many times a failing request is attempted before giving up.
    #[arg(long, default_value_t = 5)]
    max_attempts: u32,

    /// Base delay between retries in seconds; doubles per attempt.
    #[arg(long, default_value_t = 2)]
    retry_delay_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    info!("Fetching speeches from {}", args.endpoint);

    let client = SpeechArchiveClient::new(
        args.endpoint.clone(),
        args.max_attempts,
        Duration::from_secs(args.retry_delay_secs),
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let start = Instant::now();
    let outcome = client
        .fetch_all(|count| {
            pb.set_message(format!("{} speeches", count));
            pb.tick();
        })
        .await?;
    pb.finish_with_message(format!(
        "Fetched {} speeches in {}",
        outcome.records.len(),
        HumanDuration(start.elapsed())
    ));

    let file = File::create(&args.output)?;
    serde_json::to_writer(BufWriter::new(file), &outcome.records)?;

    info!("--------------------");
    info!("Fetch Summary:");
    info!("  Pages fetched: {}", outcome.pages);
    info!("  Records written: {}", outcome.records.len());
    info!("  Malformed items skipped: {}", outcome.skipped);
    info!("  Output File: {}", args.output);
    info!("--------------------");

    Ok(())
}
