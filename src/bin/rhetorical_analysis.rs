//! Stage 8: lexical diversity, readability and top n-grams per president.

use clap::Parser;
use rostrum::error::Result;
use rostrum::pipeline::readers::SpeechTableReader;
use rostrum::pipeline::writers::tables::write_rhetoric_table;
use rostrum::rhetoric::analyze_by_president;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scored speech table.
    #[arg(short, long, default_value = "analyzed_speeches.parquet")]
    input: String,

    /// Rhetorical-analysis table to write.
    #[arg(short, long, default_value = "rhetorical_analysis_results.parquet")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let documents = SpeechTableReader::new(&args.input).read_documents()?;
    info!(
        "Performing rhetorical analysis on {} speeches...",
        documents.len()
    );

    let rows = analyze_by_president(&documents);
    write_rhetoric_table(&args.output, &rows)?;

    info!("--------------------");
    info!("Rhetorical Analysis Summary:");
    info!("  Presidents analyzed: {}", rows.len());
    info!("  Output File: {}", args.output);
    info!("--------------------");

    Ok(())
}
