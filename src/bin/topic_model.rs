//! Stage 7: fit topic models across a range of topic counts, select the
//! best by coherence, and export the diagnostics, the report, and the
//! per-president topic distribution table.

use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use rostrum::charts::report::write_topic_report;
use rostrum::charts::{coherence_plot, topic_heatmap};
use rostrum::config::load_config;
use rostrum::error::Result;
use rostrum::pipeline::readers::SpeechTableReader;
use rostrum::pipeline::writers::tables::write_topic_distribution;
use rostrum::topics::distribution::{document_topic_matrix, mean_topic_by_group};
use rostrum::topics::{build_corpus, search_topic_count, Dictionary, LdaParams, TopicCountRange};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scored speech table.
    #[arg(short, long, default_value = "analyzed_speeches.parquet")]
    input: String,

    /// Coherence-by-K diagnostic plot.
    #[arg(long, default_value = "coherence_scores.png")]
    coherence_output: String,

    /// HTML report for the winning model.
    #[arg(long, default_value = "lda_topic_report.html")]
    report_output: String,

    /// Heatmap of mean topic weight per president.
    #[arg(long, default_value = "topic_distribution_by_president.png")]
    heatmap_output: String,

    /// Parquet table of mean topic weight per president.
    #[arg(long, default_value = "topic_distribution_by_president.parquet")]
    table_output: String,

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
    let documents = SpeechTableReader::new(&args.input).read_documents()?;

    // Tokenize, dropping rows with no tokens; presidents stay aligned with
    // the surviving rows so the topic vectors can be grouped afterwards.
    let mut texts: Vec<Vec<String>> = Vec::new();
    let mut groups: Vec<String> = Vec::new();
    let mut empty_rows = 0u64;
    for doc in &documents {
        let tokens: Vec<String> = doc
            .processed_text
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if tokens.is_empty() {
            empty_rows += 1;
            continue;
        }
        texts.push(tokens);
        groups.push(doc.president.clone());
    }
    if empty_rows > 0 {
        warn!(empty_rows, "Rows with empty processed text were left out of the corpus");
    }

    let dictionary = Dictionary::from_documents(&texts);
    let corpus = build_corpus(&dictionary, &texts);
    info!(
        documents = texts.len(),
        vocabulary = dictionary.len(),
        "Built dictionary and bag-of-words corpus"
    );

    let range = TopicCountRange {
        start: config.topics.start,
        limit: config.topics.limit,
        step: config.topics.step,
    };
    let base = LdaParams {
        num_topics: 0, // set per candidate by the search
        alpha: config.topics.alpha,
        beta: config.topics.beta,
        passes: config.topics.passes,
        seed: config.topics.seed,
    };

    info!("Finding optimal number of topics...");
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Fitting topic-count candidates");
    pb.enable_steady_tick(Duration::from_millis(120));

    let search_start = Instant::now();
    let search = search_topic_count(
        &dictionary,
        &corpus,
        &texts,
        range,
        base,
        config.topics.top_words,
    )?;
    pb.finish_with_message(format!(
        "Fitted {} candidates in {}",
        search.candidates.len(),
        HumanDuration(search_start.elapsed())
    ));

    let points: Vec<(usize, f64)> = search
        .candidates
        .iter()
        .map(|c| (c.num_topics, c.coherence))
        .collect();
    coherence_plot(Path::new(&args.coherence_output), &points)?;

    let best = search.best();
    info!("Best number of topics: {}", best.num_topics);
    info!("Coherence Score: {:.4}", best.coherence);

    write_topic_report(
        Path::new(&args.report_output),
        &best.model,
        best.coherence,
        config.topics.top_words,
    )?;
    info!("Topic report saved to '{}'", args.report_output);

    let matrix = document_topic_matrix(&best.model);
    let rows = mean_topic_by_group(&groups, &matrix, best.num_topics)?;

    write_topic_distribution(&args.table_output, &rows, best.num_topics)?;
    topic_heatmap(Path::new(&args.heatmap_output), &rows, best.num_topics)?;

    info!("--------------------");
    info!("Topic Modeling Summary:");
    info!("  Candidates fitted: {}", search.candidates.len());
    info!("  Best K: {}", best.num_topics);
    info!("  Coherence plot: {}", args.coherence_output);
    info!("  Report: {}", args.report_output);
    info!("  Distribution table: {}", args.table_output);
    info!("  Heatmap: {}", args.heatmap_output);
    info!("--------------------");

    Ok(())
}
