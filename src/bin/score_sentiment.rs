//! Stage 3: score every processed row with the valence lexicon and write
//! the table back out with a `sentiment_score` column.

use clap::Parser;
use rostrum::error::Result;
use rostrum::executor::{PipelineExecutor, ProcessingStep};
use rostrum::pipeline::readers::SpeechTableReader;
use rostrum::pipeline::steps::SentimentStep;
use rostrum::pipeline::writers::{BaseWriter, SpeechTableWriter};
use rostrum::sentiment::SentimentLexicon;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Speech table written by the preprocessing stage.
    #[arg(short, long, default_value = "preprocessed_speeches.parquet")]
    input: String,

    /// Scored speech table to write.
    #[arg(short, long, default_value = "analyzed_speeches.parquet")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let documents = SpeechTableReader::new(&args.input).read_documents()?;
    info!("Analyzing sentiment for {} speeches...", documents.len());

    let lexicon = Arc::new(SentimentLexicon::new());
    let steps: Vec<Box<dyn ProcessingStep>> = vec![Box::new(SentimentStep::new(lexicon))];
    let executor = PipelineExecutor::new(steps);

    let results = executor.run_batch_async(documents).await;

    let mut rows = Vec::with_capacity(results.len());
    let mut failures = 0u64;
    for result in results {
        match result {
            Ok(doc) => rows.push(doc),
            Err(e) => {
                failures += 1;
                error!(error = %e, "Sentiment scoring failed for a row");
            }
        }
    }

    let mut writer = SpeechTableWriter::new(&args.output, true)?;
    writer.write_batch(&rows)?;
    writer.close()?;

    info!("--------------------");
    info!("Sentiment Summary:");
    info!("  Rows written: {}", rows.len());
    info!("  Step failures: {}", failures);
    info!("  Output File: {}", args.output);
    info!("--------------------");

    Ok(())
}
