//! Stage 5: one sentiment-over-time line chart per president.

use chrono::NaiveDate;
use clap::Parser;
use rostrum::charts::sentiment_trend_chart;
use rostrum::error::Result;
use rostrum::pipeline::readers::SpeechTableReader;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scored speech table.
    #[arg(short, long, default_value = "analyzed_speeches.parquet")]
    input: String,

    /// Directory the per-president PNGs are written into.
    #[arg(short, long, default_value = "individual_sentiment_plots")]
    output_dir: String,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%B %d, %Y"))
        .ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let documents = SpeechTableReader::new(&args.input).read_documents()?;
    fs::create_dir_all(&args.output_dir)?;

    info!("Generating individual plots for each president...");

    let mut grouped: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    let mut undated = 0u64;
    for doc in &documents {
        let Some(score) = doc.sentiment_score else {
            continue;
        };
        match parse_date(&doc.date) {
            Some(date) => grouped
                .entry(doc.president.clone())
                .or_default()
                .push((date, score)),
            None => undated += 1,
        }
    }
    if undated > 0 {
        warn!(undated, "Rows with unparseable dates were skipped");
    }

    let mut charts = 0usize;
    for (president, mut points) in grouped {
        points.sort_by_key(|(date, _)| *date);
        let filename = format!("{}_sentiment.png", president.replace(' ', "_"));
        let path = Path::new(&args.output_dir).join(filename);
        sentiment_trend_chart(&path, &president, &points)?;
        info!("Created plot for {} at '{}'", president, path.display());
        charts += 1;
    }

    info!(
        "All {} individual plots have been written to '{}'.",
        charts, args.output_dir
    );

    Ok(())
}
