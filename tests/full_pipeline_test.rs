//! Drives the stages in-process, JSON input to analysis tables, the way the
//! binaries chain them together on disk.

use rostrum::data_model::SpeechDocument;
use rostrum::executor::{PipelineExecutor, ProcessingStep};
use rostrum::pipeline::readers::{read_speech_records, SpeechTableReader};
use rostrum::pipeline::steps::{LanguageContext, NormalizeStep, SentimentStep};
use rostrum::pipeline::writers::{BaseWriter, SpeechTableWriter};
use rostrum::rhetoric::analyze_by_president;
use rostrum::sentiment::SentimentLexicon;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

const SPEECHES_JSON: &str = r#"[
    {
        "doc_name": "victory-address",
        "president": "President A",
        "date": "1945-05-08",
        "title": "Victory Address",
        "transcript": "This is a GREAT victory. Peace and freedom triumph!"
    },
    {
        "doc_name": "war-message",
        "president": "President A",
        "date": "1941-12-08",
        "title": "War Message",
        "transcript": "War, death and fear. The enemy attacked; danger everywhere."
    },
    {
        "doc_name": "empty-remarks",
        "president": "President B",
        "date": "1950-01-01",
        "title": "Empty Remarks",
        "transcript": ""
    },
    {"doc_name": "broken-item"}
]"#;

#[tokio::test]
async fn test_json_to_scored_table() {
    let dir = tempdir().unwrap();
    let json_path = dir.path().join("speeches.json");
    fs::write(&json_path, SPEECHES_JSON).unwrap();

    // Stage 2: read + normalize.
    let read = read_speech_records(&json_path).unwrap();
    assert_eq!(read.records.len(), 3);
    assert_eq!(read.skipped, 1);

    let documents: Vec<SpeechDocument> = read.records.into_iter().map(Into::into).collect();
    let ctx = Arc::new(LanguageContext::english(3));
    let steps: Vec<Box<dyn ProcessingStep>> = vec![Box::new(NormalizeStep::new(ctx))];
    let executor = PipelineExecutor::new(steps);

    let mut rows = Vec::new();
    for result in executor.run_batch_async(documents).await {
        rows.push(result.unwrap());
    }

    // Empty transcript keeps its row with an empty token string.
    assert_eq!(rows.len(), 3);
    assert!(rows[0].processed_text.contains("victori"));
    assert_eq!(rows[2].processed_text, "");

    let preprocessed_path = dir.path().join("preprocessed_speeches.parquet");
    let mut writer = SpeechTableWriter::new(preprocessed_path.to_str().unwrap(), false).unwrap();
    writer.write_batch(&rows).unwrap();
    writer.close().unwrap();

    // Stage 3: score.
    let documents = SpeechTableReader::new(preprocessed_path.to_str().unwrap())
        .read_documents()
        .unwrap();
    let lexicon = Arc::new(SentimentLexicon::new());
    let steps: Vec<Box<dyn ProcessingStep>> = vec![Box::new(SentimentStep::new(lexicon))];
    let executor = PipelineExecutor::new(steps);

    let mut scored = Vec::new();
    for result in executor.run_batch_async(documents).await {
        scored.push(result.unwrap());
    }

    let analyzed_path = dir.path().join("analyzed_speeches.parquet");
    let mut writer = SpeechTableWriter::new(analyzed_path.to_str().unwrap(), true).unwrap();
    writer.write_batch(&scored).unwrap();
    writer.close().unwrap();

    // The scored table carries all rows in input order, with polarity
    // matching the rhetoric of each speech.
    let final_rows = SpeechTableReader::new(analyzed_path.to_str().unwrap())
        .read_documents()
        .unwrap();
    assert_eq!(final_rows.len(), 3);
    assert_eq!(final_rows[0].doc_name, "victory-address");
    assert!(final_rows[0].sentiment_score.unwrap() > 0.1);
    assert!(final_rows[1].sentiment_score.unwrap() < -0.1);
    assert_eq!(final_rows[2].sentiment_score, Some(0.0));

    // Stage 7 consumes the same table.
    let metrics = analyze_by_president(&final_rows);
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].0, "President A");
    assert!(metrics[0].1.lexical_diversity > 0.0);
    assert_eq!(metrics[1].1.lexical_diversity, 0.0);
}
