use crate::data_model::SpeechDocument;
use crate::error::Result;
use crate::executor::ProcessingStep;
use crate::sentiment::SentimentLexicon;

use async_trait::async_trait;
use std::sync::Arc;

/// Pipeline step that scores `processed_text` with the valence lexicon and
/// stores the compound polarity. An empty token string scores 0.0.
pub struct SentimentStep {
    lexicon: Arc<SentimentLexicon>,
}

impl SentimentStep {
    pub fn new(lexicon: Arc<SentimentLexicon>) -> Self {
        SentimentStep { lexicon }
    }
}

#[async_trait]
impl ProcessingStep for SentimentStep {
    fn name(&self) -> &'static str {
        "SentimentStep"
    }

    async fn process(&self, mut document: SpeechDocument) -> Result<SpeechDocument> {
        let score = self
            .lexicon
            .compound(document.processed_text.split_whitespace());
        document.sentiment_score = Some(score);
        Ok(document)
    }
}
