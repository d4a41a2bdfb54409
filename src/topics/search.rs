//! Coherence-driven topic-count search.

use crate::error::{PipelineError, Result};
use crate::topics::coherence::coherence_score;
use crate::topics::dictionary::{Bow, Dictionary};
use crate::topics::lda::{LdaModel, LdaParams};
use tracing::info;

/// Inclusive-exclusive candidate range `[start, limit)` with step.
#[derive(Debug, Clone, Copy)]
pub struct TopicCountRange {
    pub start: usize,
    pub limit: usize,
    pub step: usize,
}

impl TopicCountRange {
    pub fn candidates(&self) -> impl Iterator<Item = usize> {
        (self.start..self.limit).step_by(self.step.max(1))
    }
}

/// One fitted model in the scan, with its topic count and coherence.
pub struct TopicCandidate {
    pub num_topics: usize,
    pub model: LdaModel,
    pub coherence: f64,
}

/// The full ordered scan plus the index of the winning candidate.
pub struct TopicSearch {
    pub candidates: Vec<TopicCandidate>,
    pub best_index: usize,
}

impl TopicSearch {
    pub fn best(&self) -> &TopicCandidate {
        &self.candidates[self.best_index]
    }
}

/// Index of the maximum score. Scanning with a strict `>` keeps the first
/// maximum, so a tie resolves to the smallest topic count.
pub(crate) fn index_of_max(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

/// Fits one model per candidate K (fixed seed and pass count per fit),
/// scores each against the tokenized documents, and selects the candidate
/// with the highest coherence. Allocates the fitted models and nothing else;
/// no disk writes happen here.
pub fn search_topic_count<S: AsRef<str>>(
    dictionary: &Dictionary,
    corpus: &[Bow],
    texts: &[Vec<S>],
    range: TopicCountRange,
    base: LdaParams,
    coherence_top_n: usize,
) -> Result<TopicSearch> {
    if range.step == 0 || range.start >= range.limit {
        return Err(PipelineError::ConfigValidationError(format!(
            "topic-count range [{}, {}) with step {} is empty",
            range.start, range.limit, range.step
        )));
    }
    if texts.is_empty() || corpus.is_empty() {
        return Err(PipelineError::DegenerateCorpus(
            "cannot search topic counts over an empty document collection".to_string(),
        ));
    }
    if corpus.len() != texts.len() {
        return Err(PipelineError::Unexpected(format!(
            "corpus has {} documents but texts has {}",
            corpus.len(),
            texts.len()
        )));
    }
    if dictionary.is_empty() {
        return Err(PipelineError::DegenerateCorpus(
            "cannot search topic counts with an empty vocabulary".to_string(),
        ));
    }
    if corpus.iter().all(|bow| bow.is_empty()) {
        return Err(PipelineError::DegenerateCorpus(
            "every document contains zero known terms".to_string(),
        ));
    }

    let mut candidates = Vec::new();
    for num_topics in range.candidates() {
        let params = LdaParams { num_topics, ..base };
        let model = LdaModel::fit(dictionary, corpus, params)?;
        let coherence = coherence_score(&model, texts, dictionary, coherence_top_n);
        info!(num_topics, coherence, "Fitted topic-count candidate");
        candidates.push(TopicCandidate {
            num_topics,
            model,
            coherence,
        });
    }

    let scores: Vec<f64> = candidates.iter().map(|c| c.coherence).collect();
    let best_index = index_of_max(&scores);

    Ok(TopicSearch {
        candidates,
        best_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::dictionary::build_corpus;

    fn texts() -> Vec<Vec<String>> {
        let docs = [
            "war army battle soldier war",
            "army battle war soldier",
            "farm harvest grain field farm",
            "harvest field grain farm",
            "war soldier battle army",
            "grain farm field harvest",
            "law court justice judge law",
            "court judge law justice",
        ];
        docs.iter()
            .map(|d| d.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    fn base_params() -> LdaParams {
        LdaParams {
            num_topics: 0, // overridden per candidate
            alpha: 0.1,
            beta: 0.01,
            passes: 20,
            seed: 42,
        }
    }

    #[test]
    fn test_index_of_max_prefers_first_on_tie() {
        assert_eq!(index_of_max(&[0.1, 0.5, 0.5, 0.2]), 1);
        assert_eq!(index_of_max(&[0.7]), 0);
        assert_eq!(index_of_max(&[0.3, 0.3, 0.3]), 0);
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let empty: Vec<Vec<String>> = Vec::new();
        let dictionary = Dictionary::from_documents(&empty);
        let corpus = build_corpus(&dictionary, &empty);
        let range = TopicCountRange {
            start: 2,
            limit: 4,
            step: 1,
        };
        let result = search_topic_count(&dictionary, &corpus, &empty, range, base_params(), 10);
        assert!(matches!(result, Err(PipelineError::DegenerateCorpus(_))));
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let texts = texts();
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = build_corpus(&dictionary, &texts);
        let range = TopicCountRange {
            start: 5,
            limit: 5,
            step: 1,
        };
        let result = search_topic_count(&dictionary, &corpus, &texts, range, base_params(), 10);
        assert!(matches!(
            result,
            Err(PipelineError::ConfigValidationError(_))
        ));
    }

    #[test]
    fn test_scan_is_ordered_and_complete() {
        let texts = texts();
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = build_corpus(&dictionary, &texts);
        let range = TopicCountRange {
            start: 2,
            limit: 6,
            step: 2,
        };
        let search =
            search_topic_count(&dictionary, &corpus, &texts, range, base_params(), 4).unwrap();

        let counts: Vec<usize> = search.candidates.iter().map(|c| c.num_topics).collect();
        assert_eq!(counts, vec![2, 4]);
        assert!(search.best_index < search.candidates.len());
        assert_eq!(
            search.best().num_topics,
            search.candidates[search.best_index].num_topics
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let texts = texts();
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = build_corpus(&dictionary, &texts);
        let range = TopicCountRange {
            start: 2,
            limit: 5,
            step: 1,
        };

        let a = search_topic_count(&dictionary, &corpus, &texts, range, base_params(), 4).unwrap();
        let b = search_topic_count(&dictionary, &corpus, &texts, range, base_params(), 4).unwrap();

        assert_eq!(a.best_index, b.best_index);
        assert_eq!(a.best().num_topics, b.best().num_topics);
        let scores_a: Vec<f64> = a.candidates.iter().map(|c| c.coherence).collect();
        let scores_b: Vec<f64> = b.candidates.iter().map(|c| c.coherence).collect();
        assert_eq!(scores_a, scores_b);
    }
}
