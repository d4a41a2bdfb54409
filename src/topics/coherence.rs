//! Topic coherence scoring.
//!
//! Mean pairwise NPMI of each topic's top terms, estimated from boolean
//! document co-occurrence over the tokenized corpus. Purely count-based, so
//! scoring the same model against the same texts always yields the same
//! value. Higher is better; each pair contributes a value in [-1, 1].

use crate::topics::dictionary::Dictionary;
use crate::topics::lda::LdaModel;
use std::collections::{HashMap, HashSet};

const SMOOTHING: f64 = 1e-12;

/// Per-term document occurrence sets for the scoring corpus.
pub struct CoOccurrence {
    doc_sets: HashMap<u32, HashSet<usize>>,
    num_docs: usize,
}

impl CoOccurrence {
    pub fn build<S: AsRef<str>>(texts: &[Vec<S>], dictionary: &Dictionary) -> Self {
        let mut doc_sets: HashMap<u32, HashSet<usize>> = HashMap::new();
        for (doc_index, text) in texts.iter().enumerate() {
            for token in text {
                if let Some(id) = dictionary.id(token.as_ref()) {
                    doc_sets.entry(id).or_default().insert(doc_index);
                }
            }
        }
        CoOccurrence {
            doc_sets,
            num_docs: texts.len(),
        }
    }

    fn doc_count(&self, term: u32) -> usize {
        self.doc_sets.get(&term).map_or(0, |set| set.len())
    }

    fn co_doc_count(&self, a: u32, b: u32) -> usize {
        match (self.doc_sets.get(&a), self.doc_sets.get(&b)) {
            (Some(sa), Some(sb)) => {
                let (small, large) = if sa.len() <= sb.len() { (sa, sb) } else { (sb, sa) };
                small.iter().filter(|doc| large.contains(doc)).count()
            }
            _ => 0,
        }
    }

    /// NPMI for one term pair; `None` when either term never occurs.
    fn npmi(&self, a: u32, b: u32) -> Option<f64> {
        let da = self.doc_count(a);
        let db = self.doc_count(b);
        if da == 0 || db == 0 || self.num_docs == 0 {
            return None;
        }
        let n = self.num_docs as f64;
        let p_a = da as f64 / n;
        let p_b = db as f64 / n;
        let p_ab = self.co_doc_count(a, b) as f64 / n + SMOOTHING;

        let pmi = (p_ab / (p_a * p_b)).ln();
        Some(pmi / -p_ab.ln())
    }
}

/// Coherence of a fitted model against the tokenized documents it should
/// explain: mean pairwise NPMI over the top `top_n` terms of each topic,
/// averaged across topics.
pub fn coherence_score<S: AsRef<str>>(
    model: &LdaModel,
    texts: &[Vec<S>],
    dictionary: &Dictionary,
    top_n: usize,
) -> f64 {
    let co = CoOccurrence::build(texts, dictionary);
    let topic_terms = model.top_word_ids(top_n);

    let mut topic_scores = Vec::with_capacity(topic_terms.len());
    for terms in &topic_terms {
        let mut pair_sum = 0.0;
        let mut pairs = 0usize;
        for i in 0..terms.len() {
            for j in (i + 1)..terms.len() {
                if let Some(value) = co.npmi(terms[i], terms[j]) {
                    pair_sum += value;
                    pairs += 1;
                }
            }
        }
        if pairs > 0 {
            topic_scores.push(pair_sum / pairs as f64);
        }
    }

    if topic_scores.is_empty() {
        return 0.0;
    }
    topic_scores.iter().sum::<f64>() / topic_scores.len() as f64
}
