//! Per-president rhetorical metrics: lexical diversity, readability and the
//! most frequent n-grams.

use crate::data_model::SpeechDocument;
use crate::utils::text::{count_syllables, split_into_sentences, top_n_grams, STOP_WORD_SET};
use itertools::Itertools;
use std::collections::{BTreeMap, HashSet};

/// Metrics for one speaker's combined speeches.
#[derive(Debug, Clone, PartialEq)]
pub struct RhetoricalMetrics {
    /// Type-token ratio of the stop-word-filtered tokens.
    pub lexical_diversity: f64,
    /// Flesch-Kincaid grade level of the combined text.
    pub readability_score: f64,
    pub top_bigrams: Vec<(String, usize)>,
    pub top_trigrams: Vec<(String, usize)>,
}

fn format_n_grams(grams: &[(String, usize)]) -> String {
    grams
        .iter()
        .map(|(gram, count)| format!("'{}' ({})", gram, count))
        .join(", ")
}

impl RhetoricalMetrics {
    pub fn format_bigrams(&self) -> String {
        format_n_grams(&self.top_bigrams)
    }

    pub fn format_trigrams(&self) -> String {
        format_n_grams(&self.top_trigrams)
    }
}

/// Flesch-Kincaid grade level. Empty text scores 0.0; a text without
/// sentence breaks counts as a single sentence.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let sentences = split_into_sentences(text).len().max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59
}

/// Computes the metrics over one group's processed texts.
pub fn analyze_group<'a, I>(texts: I) -> RhetoricalMetrics
where
    I: IntoIterator<Item = &'a str>,
{
    let combined = texts.into_iter().collect::<Vec<_>>().join(" ");
    let words: Vec<&str> = combined.split_whitespace().collect();

    // Stemming can land on a stop-word form ("willing" -> "will"), so the
    // n-gram and diversity tokens get filtered once more.
    let cleaned: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !STOP_WORD_SET.contains(w))
        .collect();

    let lexical_diversity = if cleaned.is_empty() {
        0.0
    } else {
        let distinct: HashSet<&str> = cleaned.iter().copied().collect();
        distinct.len() as f64 / cleaned.len() as f64
    };

    RhetoricalMetrics {
        lexical_diversity,
        readability_score: flesch_kincaid_grade(&combined),
        top_bigrams: top_n_grams(&cleaned, 2, 5),
        top_trigrams: top_n_grams(&cleaned, 3, 5),
    }
}

/// Groups rows by president and computes the metrics per group, sorted by
/// president name.
pub fn analyze_by_president(documents: &[SpeechDocument]) -> Vec<(String, RhetoricalMetrics)> {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for doc in documents {
        grouped
            .entry(doc.president.as_str())
            .or_default()
            .push(doc.processed_text.as_str());
    }

    grouped
        .into_iter()
        .map(|(president, texts)| (president.to_string(), analyze_group(texts)))
        .collect()
}
