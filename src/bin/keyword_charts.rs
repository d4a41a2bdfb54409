//! Stage 6: keyword frequency charts for positive and negative speeches.

use clap::Parser;
use plotters::style::RGBColor;
use rostrum::charts::keyword_bar_chart;
use rostrum::config::load_config;
use rostrum::error::Result;
use rostrum::pipeline::readers::SpeechTableReader;
use rostrum::utils::text::{top_n_grams, STOP_WORD_SET};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scored speech table.
    #[arg(short, long, default_value = "analyzed_speeches.parquet")]
    input: String,

    /// PNG for the positive-speech keywords.
    #[arg(long, default_value = "positive_keywords.png")]
    positive_output: String,

    /// PNG for the negative-speech keywords.
    #[arg(long, default_value = "negative_keywords.png")]
    negative_output: String,

    /// Optional analysis config YAML.
    #[arg(short, long)]
    config: Option<String>,
}

fn keyword_counts(texts: &[&str], top: usize) -> Vec<(String, usize)> {
    let words: Vec<&str> = texts
        .iter()
        .flat_map(|text| text.split_whitespace())
        .filter(|word| !STOP_WORD_SET.contains(word))
        .collect();
    top_n_grams(&words, 1, top)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let config = load_config(args.config.as_deref())?;
    let documents = SpeechTableReader::new(&args.input).read_documents()?;

    info!("Categorizing speeches by sentiment...");

    let mut positive_texts: Vec<&str> = Vec::new();
    let mut negative_texts: Vec<&str> = Vec::new();
    for doc in &documents {
        match doc.sentiment_score {
            Some(score) if score > config.sentiment.positive_threshold => {
                positive_texts.push(doc.processed_text.as_str())
            }
            Some(score) if score < config.sentiment.negative_threshold => {
                negative_texts.push(doc.processed_text.as_str())
            }
            _ => {}
        }
    }
    info!(
        positive = positive_texts.len(),
        negative = negative_texts.len(),
        "Split speeches by sentiment threshold"
    );

    let positive_counts = keyword_counts(&positive_texts, config.sentiment.keyword_count);
    let negative_counts = keyword_counts(&negative_texts, config.sentiment.keyword_count);

    for (word, count) in positive_counts.iter().take(5) {
        info!("positive keyword: {} ({})", word, count);
    }
    for (word, count) in negative_counts.iter().take(5) {
        info!("negative keyword: {} ({})", word, count);
    }

    if positive_counts.is_empty() {
        warn!("No positive speeches above threshold; skipping positive chart");
    } else {
        keyword_bar_chart(
            Path::new(&args.positive_output),
            "Most Frequent Words in Positive Speeches",
            &positive_counts,
            RGBColor(46, 125, 50),
        )?;
        info!("Wrote '{}'", args.positive_output);
    }

    if negative_counts.is_empty() {
        warn!("No negative speeches below threshold; skipping negative chart");
    } else {
        keyword_bar_chart(
            Path::new(&args.negative_output),
            "Most Frequent Words in Negative Speeches",
            &negative_counts,
            RGBColor(183, 28, 28),
        )?;
        info!("Wrote '{}'", args.negative_output);
    }

    Ok(())
}
