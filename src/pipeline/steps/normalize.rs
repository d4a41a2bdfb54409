use crate::data_model::SpeechDocument;
use crate::error::Result;
use crate::executor::ProcessingStep;
use crate::utils::text::STOP_WORD_SET;

use async_trait::async_trait;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::Arc;

/// Read-only language resources for the normalizer: stop words, stemmer and
/// the minimum token length. Built once at process start and passed in
/// explicitly; the normalizer keeps no hidden global state.
pub struct LanguageContext {
    stop_words: HashSet<&'static str>,
    stemmer: Stemmer,
    min_token_len: usize,
    strip_pattern: Regex,
}

impl LanguageContext {
    pub fn english(min_token_len: usize) -> Self {
        LanguageContext {
            stop_words: STOP_WORD_SET.clone(),
            stemmer: Stemmer::create(Algorithm::English),
            min_token_len,
            strip_pattern: Regex::new(r"[^a-z\s]").expect("static pattern"),
        }
    }

    /// Normalizes raw text into a token sequence: lowercase, strip
    /// non-alphabetic characters, whitespace-tokenize, drop stop words and
    /// short tokens, stem. Pure and deterministic; empty input yields an
    /// empty sequence, never an error.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let stripped = self.strip_pattern.replace_all(&lowered, "");

        stripped
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token))
            .filter(|token| token.chars().count() >= self.min_token_len)
            .map(|token| self.stemmer.stem(token).to_string())
            .collect()
    }
}

/// Pipeline step that fills `processed_text` with the space-joined
/// normalized tokens of the transcript. Rows with empty transcripts get an
/// empty string, never an error.
pub struct NormalizeStep {
    ctx: Arc<LanguageContext>,
}

impl NormalizeStep {
    pub fn new(ctx: Arc<LanguageContext>) -> Self {
        NormalizeStep { ctx }
    }
}

#[async_trait]
impl ProcessingStep for NormalizeStep {
    fn name(&self) -> &'static str {
        "NormalizeStep"
    }

    async fn process(&self, mut document: SpeechDocument) -> Result<SpeechDocument> {
        document.processed_text = self.ctx.normalize(&document.transcript).join(" ");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_input() {
        let ctx = LanguageContext::english(3);
        assert!(ctx.normalize("").is_empty());
        assert!(ctx.normalize("   \n\t  ").is_empty());
        assert!(ctx.normalize("!!! ... ???").is_empty());
    }

    #[test]
    fn test_cats_ran() {
        let ctx = LanguageContext::english(3);
        assert_eq!(ctx.normalize("The, THE cats ran!!"), vec!["cat", "ran"]);
    }

    #[test]
    fn test_stop_words_never_survive() {
        let ctx = LanguageContext::english(1);
        let tokens = ctx.normalize("We the people of the United States");
        for token in &tokens {
            assert!(!STOP_WORD_SET.contains(token.as_str()), "{} survived", token);
        }
        assert!(tokens.contains(&"peopl".to_string()));
    }

    #[test]
    fn test_output_is_lowercase_alphabetic() {
        let ctx = LanguageContext::english(3);
        let tokens = ctx.normalize("Four score & 7 years ago, our FATHERS...");
        for token in &tokens {
            assert!(token.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_min_token_len_filter() {
        let ctx = LanguageContext::english(5);
        let tokens = ctx.normalize("small words fall away entirely");
        // "small", "words", "fall", "away" have fewer than 5 chars? "small"
        // and "words" have exactly 5 and stay; "fall"/"away" are dropped.
        assert!(tokens.contains(&"small".to_string()));
        assert!(!tokens.contains(&"fall".to_string()));
        assert!(!tokens.contains(&"away".to_string()));
    }

    #[test]
    fn test_deterministic() {
        let ctx = LanguageContext::english(3);
        let text = "Government of the people, by the people, for the people";
        assert_eq!(ctx.normalize(text), ctx.normalize(text));
    }

    #[tokio::test]
    async fn test_step_fills_processed_text() {
        let ctx = Arc::new(LanguageContext::english(3));
        let step = NormalizeStep::new(ctx);
        let doc = SpeechDocument {
            doc_name: "d1".into(),
            president: "A".into(),
            date: "1801".into(),
            title: "T".into(),
            transcript: "The, THE cats ran!!".into(),
            processed_text: String::new(),
            sentiment_score: None,
        };
        let out = step.process(doc).await.unwrap();
        assert_eq!(out.processed_text, "cat ran");
    }

    #[tokio::test]
    async fn test_step_empty_transcript_keeps_row() {
        let ctx = Arc::new(LanguageContext::english(3));
        let step = NormalizeStep::new(ctx);
        let doc = SpeechDocument {
            doc_name: "d1".into(),
            president: "A".into(),
            date: "1801".into(),
            title: "T".into(),
            transcript: String::new(),
            processed_text: String::new(),
            sentiment_score: None,
        };
        let out = step.process(doc).await.unwrap();
        assert_eq!(out.processed_text, "");
        assert_eq!(out.doc_name, "d1");
    }
}
