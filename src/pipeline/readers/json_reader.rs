use crate::data_model::SpeechRecord;
use crate::error::{PipelineError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// Records read from a fetch-stage JSON array, plus how many items were
/// skipped as malformed.
pub struct JsonReadOutcome {
    pub records: Vec<SpeechRecord>,
    pub skipped: u64,
}

/// Reads the fetch stage's `speeches.json`. A missing file is fatal; a
/// malformed element is skipped with a warning and counted.
pub fn read_speech_records<P: AsRef<Path>>(path: P) -> Result<JsonReadOutcome> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(PipelineError::InputMissing {
            path: path_ref.display().to_string(),
        });
    }

    let file = File::open(path_ref)?;
    let items: Vec<serde_json::Value> = serde_json::from_reader(BufReader::new(file))?;

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0u64;
    for item in items {
        match serde_json::from_value::<SpeechRecord>(item.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                let doc_name = item
                    .get("doc_name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("<unknown>");
                warn!(doc_name, error = %e, "Skipping malformed speech record");
            }
        }
    }

    Ok(JsonReadOutcome { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_input_missing() {
        let result = read_speech_records("no_such_speeches.json");
        assert!(matches!(
            result,
            Err(PipelineError::InputMissing { .. })
        ));
    }

    #[test]
    fn test_malformed_items_are_skipped_not_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"doc_name": "d1", "president": "A", "date": "1801-03-04", "title": "Inaugural", "transcript": "text"}},
                {{"doc_name": "d2"}},
                {{"doc_name": "d3", "president": "B", "date": "1809-03-04", "title": "Address", "transcript": ""}}
            ]"#
        )
        .unwrap();

        let outcome = read_speech_records(file.path()).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.records[0].doc_name, "d1");
        assert_eq!(outcome.records[1].president, "B");
    }

    #[test]
    fn test_missing_transcript_defaults_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"doc_name": "d1", "president": "A", "date": "1801", "title": "T"}}]"#
        )
        .unwrap();

        let outcome = read_speech_records(file.path()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].transcript.is_empty());
    }
}
