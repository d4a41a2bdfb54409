//! Stage 4: bar chart of average sentiment per president, colored by party.

use clap::Parser;
use rostrum::charts::{sentiment_bar_chart, PresidentSentiment};
use rostrum::error::Result;
use rostrum::parties::{party_map, years_map};
use rostrum::pipeline::readers::SpeechTableReader;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scored speech table.
    #[arg(short, long, default_value = "analyzed_speeches.parquet")]
    input: String,

    /// Chart PNG to write.
    #[arg(short, long, default_value = "average_sentiment_by_president.png")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let documents = SpeechTableReader::new(&args.input).read_documents()?;
    let parties = party_map()?;
    let years = years_map()?;

    info!("Generating the average sentiment bar chart...");

    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
    let mut unscored = 0u64;
    for doc in &documents {
        match doc.sentiment_score {
            Some(score) => {
                let entry = sums.entry(doc.president.clone()).or_insert((0.0, 0));
                entry.0 += score;
                entry.1 += 1;
            }
            None => unscored += 1,
        }
    }
    if unscored > 0 {
        warn!(unscored, "Rows without a sentiment score were skipped");
    }

    let mut rows: Vec<PresidentSentiment> = sums
        .into_iter()
        .map(|(president, (sum, count))| {
            let party = parties.get(president.as_str()).copied().unwrap_or_else(|| {
                warn!(%president, "No party mapping; charting as Unaffiliated");
                "Unaffiliated"
            });
            let years = years.get(president.as_str()).copied().unwrap_or("");
            PresidentSentiment {
                president,
                party: party.to_string(),
                years: years.to_string(),
                mean_score: sum / count as f64,
            }
        })
        .collect();

    // Highest average first, the way the chart is read.
    rows.sort_by(|a, b| b.mean_score.total_cmp(&a.mean_score));

    sentiment_bar_chart(Path::new(&args.output), &rows)?;

    info!(
        "The average sentiment bar chart has been saved as '{}' ({} presidents).",
        args.output,
        rows.len()
    );

    Ok(())
}
