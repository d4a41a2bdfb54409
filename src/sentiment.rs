//! Lexicon-based polarity scoring.
//!
//! A compact valence table in the VADER weight range [-4, 4]; the compound
//! score for a document is the valence sum normalized into [-1, 1] with
//! `s / sqrt(s^2 + 15)`.

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;

/// Word valences. Keys are stemmed at lexicon construction so they line up
/// with the normalizer's stemmed tokens; inflected entries collapse onto one
/// key and their valences are averaged.
const VALENCES: &[(&str, f64)] = &[
    // positive
    ("good", 1.9),
    ("great", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("honor", 2.3),
    ("freedom", 3.0),
    ("free", 2.3),
    ("liberty", 2.4),
    ("peace", 2.5),
    ("prosperity", 2.5),
    ("prosper", 2.2),
    ("hope", 1.9),
    ("happy", 2.7),
    ("victory", 2.4),
    ("triumph", 2.4),
    ("success", 2.7),
    ("strong", 2.3),
    ("strength", 2.2),
    ("secure", 1.6),
    ("justice", 2.4),
    ("faith", 1.9),
    ("trust", 2.3),
    ("love", 3.2),
    ("friend", 2.2),
    ("progress", 1.8),
    ("improve", 1.9),
    ("courage", 2.2),
    ("brave", 2.2),
    ("proud", 2.1),
    ("pride", 1.4),
    ("unity", 1.8),
    ("opportunity", 1.8),
    ("benefit", 1.7),
    ("protect", 1.3),
    ("support", 1.7),
    ("achieve", 1.8),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("celebrate", 2.7),
    ("blessing", 2.9),
    ("glory", 2.5),
    ("noble", 2.1),
    ("generous", 2.3),
    ("safe", 1.9),
    ("thrive", 2.4),
    ("welcome", 2.0),
    ("grateful", 2.6),
    ("dream", 1.6),
    ("renew", 1.5),
    ("heal", 1.9),
    // negative
    ("war", -2.9),
    ("crisis", -2.5),
    ("threat", -2.0),
    ("danger", -2.4),
    ("enemy", -2.5),
    ("fear", -2.2),
    ("death", -2.9),
    ("kill", -3.4),
    ("destroy", -2.9),
    ("fail", -2.3),
    ("failure", -2.3),
    ("crime", -2.5),
    ("violence", -2.9),
    ("poverty", -2.2),
    ("corruption", -2.6),
    ("terror", -3.0),
    ("attack", -2.0),
    ("weapon", -1.9),
    ("struggle", -1.5),
    ("suffer", -2.3),
    ("loss", -1.7),
    ("lose", -1.6),
    ("debt", -1.6),
    ("unemployment", -1.9),
    ("recession", -2.0),
    ("conflict", -1.8),
    ("hate", -2.7),
    ("evil", -3.3),
    ("tyranny", -2.9),
    ("oppression", -2.5),
    ("slavery", -3.1),
    ("disaster", -3.1),
    ("depression", -2.5),
    ("wrong", -1.6),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("problem", -1.4),
    ("burden", -1.5),
    ("pain", -2.3),
    ("grief", -2.2),
    ("tragedy", -2.8),
    ("hostile", -2.0),
    ("invasion", -2.1),
    ("abuse", -2.8),
    ("fraud", -2.6),
    ("injustice", -2.4),
    ("illegal", -1.7),
    ("deficit", -1.4),
];

/// VADER's normalization constant.
const NORMALIZATION_ALPHA: f64 = 15.0;

pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
    stemmer: Stemmer,
}

impl SentimentLexicon {
    pub fn new() -> Self {
        let stemmer = Stemmer::create(Algorithm::English);
        let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
        for (word, valence) in VALENCES {
            let key = stemmer.stem(word).to_string();
            let entry = sums.entry(key).or_insert((0.0, 0));
            entry.0 += valence;
            entry.1 += 1;
        }
        let valences = sums
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();
        SentimentLexicon { valences, stemmer }
    }

    /// Valence for a single token, if the lexicon knows its stem.
    pub fn valence(&self, token: &str) -> Option<f64> {
        let lowered = token.to_lowercase();
        let key = self.stemmer.stem(&lowered);
        self.valences.get(key.as_ref()).copied()
    }

    /// Compound polarity of a token sequence in [-1, 1]. Empty or entirely
    /// unknown input scores 0.0.
    pub fn compound<'a, I>(&self, tokens: I) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sum: f64 = tokens
            .into_iter()
            .filter_map(|token| self.valence(token))
            .sum();
        if sum == 0.0 {
            return 0.0;
        }
        let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
        score.clamp(-1.0, 1.0)
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        SentimentLexicon::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_scores_zero() {
        let lexicon = SentimentLexicon::new();
        assert_eq!(lexicon.compound(std::iter::empty()), 0.0);
        assert_eq!(lexicon.compound(vec!["unmapped", "tokens"]), 0.0);
    }

    #[test]
    fn test_positive_and_negative_polarity() {
        let lexicon = SentimentLexicon::new();
        let positive = lexicon.compound(vec!["great", "strong", "peace"]);
        let negative = lexicon.compound(vec!["war", "fear", "evil"]);
        assert!(positive > 0.0);
        assert!(negative < 0.0);
    }

    #[test]
    fn test_compound_stays_in_bounds() {
        let lexicon = SentimentLexicon::new();
        let many_positive: Vec<&str> = std::iter::repeat("great").take(500).collect();
        let score = lexicon.compound(many_positive);
        assert!(score > 0.9);
        assert!(score <= 1.0);

        let many_negative: Vec<&str> = std::iter::repeat("war").take(500).collect();
        let score = lexicon.compound(many_negative);
        assert!(score < -0.9);
        assert!(score >= -1.0);
    }

    #[test]
    fn test_stemmed_tokens_match() {
        let lexicon = SentimentLexicon::new();
        // The normalizer hands this module stemmed tokens.
        let stemmer = Stemmer::create(Algorithm::English);
        let stemmed = stemmer.stem("victory").to_string();
        assert!(lexicon.valence(&stemmed).is_some());
    }

    #[test]
    fn test_case_insensitive() {
        let lexicon = SentimentLexicon::new();
        assert_eq!(lexicon.valence("War"), lexicon.valence("war"));
    }
}
