use serde::{Deserialize, Serialize};

/// A raw speech record as returned by the archive API and stored in
/// `speeches.json`. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRecord {
    pub doc_name: String,
    pub president: String,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub transcript: String,
}

/// One row of the tabular handoff files. `processed_text` is empty until the
/// preprocessing stage has run, `sentiment_score` is `None` until the scoring
/// stage has run. A record with an empty transcript still produces a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechDocument {
    pub doc_name: String,
    pub president: String,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub processed_text: String,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

impl From<SpeechRecord> for SpeechDocument {
    fn from(record: SpeechRecord) -> Self {
        SpeechDocument {
            doc_name: record.doc_name,
            president: record.president,
            date: record.date,
            title: record.title,
            transcript: record.transcript,
            processed_text: String::new(),
            sentiment_score: None,
        }
    }
}
