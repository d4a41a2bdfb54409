//! Stage 2: normalize every transcript into a cleaned, stemmed token string
//! and write the speech table.

use clap::Parser;
use rostrum::config::load_config;
use rostrum::data_model::SpeechDocument;
use rostrum::error::Result;
use rostrum::executor::{PipelineExecutor, ProcessingStep};
use rostrum::pipeline::readers::read_speech_records;
use rostrum::pipeline::steps::{LanguageContext, NormalizeStep};
use rostrum::pipeline::writers::{BaseWriter, SpeechTableWriter};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON array written by the fetch stage.
    #[arg(short, long, default_value = "speeches.json")]
    input: String,

    /// Speech table to write.
    #[arg(short, long, default_value = "preprocessed_speeches.parquet")]
    output: String,

    /// Optional analysis config YAML.
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let config = load_config(args.config.as_deref())?;

    let read = read_speech_records(&args.input)?;
    info!(
        "Read {} speech records ({} skipped as malformed)",
        read.records.len(),
        read.skipped
    );

    let documents: Vec<SpeechDocument> = read.records.into_iter().map(Into::into).collect();

    let ctx = Arc::new(LanguageContext::english(config.normalize.min_token_len));
    let steps: Vec<Box<dyn ProcessingStep>> = vec![Box::new(NormalizeStep::new(ctx))];
    let executor = PipelineExecutor::new(steps);

    let results = executor.run_batch_async(documents).await;

    let mut rows = Vec::with_capacity(results.len());
    let mut failures = 0u64;
    for result in results {
        match result {
            Ok(doc) => rows.push(doc),
            Err(e) => {
                failures += 1;
                error!(error = %e, "Preprocessing failed for a record");
            }
        }
    }

    let mut writer = SpeechTableWriter::new(&args.output, false)?;
    writer.write_batch(&rows)?;
    writer.close()?;

    info!("--------------------");
    info!("Preprocessing Summary:");
    info!("  Rows written: {}", rows.len());
    info!("  Malformed input records skipped: {}", read.skipped);
    info!("  Step failures: {}", failures);
    info!("  Output File: {}", args.output);
    info!("--------------------");

    Ok(())
}
