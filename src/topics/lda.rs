//! Latent Dirichlet Allocation fit with collapsed Gibbs sampling.
//!
//! The sampler runs a fixed number of passes from a fixed seed, so a fit
//! over the same dictionary and corpus is reproducible run to run.

use crate::error::{PipelineError, Result};
use crate::topics::dictionary::{Bow, Dictionary};

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy)]
pub struct LdaParams {
    pub num_topics: usize,
    /// Document-topic Dirichlet prior.
    pub alpha: f64,
    /// Topic-word Dirichlet prior.
    pub beta: f64,
    /// Gibbs sampling passes over the whole corpus.
    pub passes: usize,
    pub seed: u64,
}

/// A fitted topic model: topic assignments counted over the corpus plus the
/// vocabulary it was fit against.
#[derive(Debug)]
pub struct LdaModel {
    num_topics: usize,
    alpha: f64,
    beta: f64,
    vocab: Vec<String>,
    /// [doc][topic]: tokens in doc assigned to topic.
    ndk: Vec<Vec<usize>>,
    /// [topic][word]: occurrences of word assigned to topic.
    nkw: Vec<Vec<usize>>,
    /// [topic]: total tokens assigned to topic.
    nk: Vec<usize>,
    doc_lengths: Vec<usize>,
}

impl LdaModel {
    /// Fits one model on the given corpus. Fails with `DegenerateCorpus`
    /// when there are no documents, no vocabulary, or no document contains a
    /// known term; no meaningful model exists in those cases.
    pub fn fit(dictionary: &Dictionary, corpus: &[Bow], params: LdaParams) -> Result<LdaModel> {
        if params.num_topics == 0 {
            return Err(PipelineError::ConfigValidationError(
                "LdaParams: num_topics must be greater than 0".to_string(),
            ));
        }
        if corpus.is_empty() {
            return Err(PipelineError::DegenerateCorpus(
                "cannot fit a topic model on an empty document collection".to_string(),
            ));
        }
        let vocab_size = dictionary.len();
        if vocab_size == 0 {
            return Err(PipelineError::DegenerateCorpus(
                "cannot fit a topic model on an empty vocabulary".to_string(),
            ));
        }

        // Expand each sparse bag into a flat sequence of term ids; token
        // order within a document does not matter to the sampler.
        let docs: Vec<Vec<usize>> = corpus
            .iter()
            .map(|bow| {
                bow.iter()
                    .flat_map(|&(id, count)| std::iter::repeat(id as usize).take(count as usize))
                    .collect()
            })
            .collect();

        if docs.iter().all(|doc| doc.is_empty()) {
            return Err(PipelineError::DegenerateCorpus(
                "every document contains zero known terms".to_string(),
            ));
        }

        let k = params.num_topics;
        let num_docs = docs.len();
        let mut rng = StdRng::seed_from_u64(params.seed);

        let mut ndk = vec![vec![0usize; k]; num_docs];
        let mut nkw = vec![vec![0usize; vocab_size]; k];
        let mut nk = vec![0usize; k];
        let mut assignments: Vec<Vec<usize>> = docs.iter().map(|doc| vec![0; doc.len()]).collect();

        for (di, doc) in docs.iter().enumerate() {
            for (pi, &w) in doc.iter().enumerate() {
                let topic = rng.gen_range(0..k);
                assignments[di][pi] = topic;
                ndk[di][topic] += 1;
                nkw[topic][w] += 1;
                nk[topic] += 1;
            }
        }

        let vb = vocab_size as f64 * params.beta;
        let mut weights = vec![0.0f64; k];
        for _ in 0..params.passes {
            for (di, doc) in docs.iter().enumerate() {
                for (pi, &w) in doc.iter().enumerate() {
                    let old_topic = assignments[di][pi];
                    ndk[di][old_topic] -= 1;
                    nkw[old_topic][w] -= 1;
                    nk[old_topic] -= 1;

                    // p(t) ∝ (ndk[d][t] + alpha) * (nkw[t][w] + beta) / (nk[t] + V*beta)
                    for (t, weight) in weights.iter_mut().enumerate() {
                        let left = ndk[di][t] as f64 + params.alpha;
                        let right = (nkw[t][w] as f64 + params.beta) / (nk[t] as f64 + vb);
                        *weight = left * right;
                    }

                    let total: f64 = weights.iter().sum();
                    let new_topic = if total <= f64::EPSILON {
                        rng.gen_range(0..k)
                    } else {
                        let sampler = WeightedIndex::new(&weights).map_err(|e| {
                            PipelineError::Unexpected(format!("topic sampling failed: {}", e))
                        })?;
                        sampler.sample(&mut rng)
                    };

                    assignments[di][pi] = new_topic;
                    ndk[di][new_topic] += 1;
                    nkw[new_topic][w] += 1;
                    nk[new_topic] += 1;
                }
            }
        }

        let doc_lengths = docs.iter().map(|doc| doc.len()).collect();

        Ok(LdaModel {
            num_topics: k,
            alpha: params.alpha,
            beta: params.beta,
            vocab: dictionary.tokens().to_vec(),
            ndk,
            nkw,
            nk,
            doc_lengths,
        })
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    pub fn num_documents(&self) -> usize {
        self.ndk.len()
    }

    /// θ[d][t] = (ndk[d][t] + α) / (N_d + K·α): the per-document topic
    /// distribution, each row summing to 1.
    pub fn doc_topics(&self) -> Vec<Vec<f64>> {
        let k = self.num_topics;
        self.ndk
            .iter()
            .zip(&self.doc_lengths)
            .map(|(row, &len)| {
                let denom = len as f64 + k as f64 * self.alpha;
                row.iter()
                    .map(|&count| (count as f64 + self.alpha) / denom)
                    .collect()
            })
            .collect()
    }

    /// φ[t][w] = (nkw[t][w] + β) / (nk[t] + V·β): the per-topic word
    /// distribution.
    pub fn topic_words(&self) -> Vec<Vec<f64>> {
        let vocab_size = self.vocab.len();
        let vb = vocab_size as f64 * self.beta;
        self.nkw
            .iter()
            .zip(&self.nk)
            .map(|(row, &total)| {
                let denom = total as f64 + vb;
                row.iter()
                    .map(|&count| (count as f64 + self.beta) / denom)
                    .collect()
            })
            .collect()
    }

    /// Top `n` vocabulary terms per topic by φ, with their probabilities.
    pub fn top_words(&self, n: usize) -> Vec<Vec<(String, f64)>> {
        let phi = self.topic_words();
        phi.iter()
            .map(|row| {
                let mut pairs: Vec<(usize, f64)> =
                    row.iter().copied().enumerate().collect();
                pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
                pairs
                    .into_iter()
                    .take(n)
                    .map(|(w, p)| (self.vocab[w].clone(), p))
                    .collect()
            })
            .collect()
    }

    /// Top `n` term ids per topic by φ.
    pub fn top_word_ids(&self, n: usize) -> Vec<Vec<u32>> {
        let phi = self.topic_words();
        phi.iter()
            .map(|row| {
                let mut pairs: Vec<(usize, f64)> =
                    row.iter().copied().enumerate().collect();
                pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
                pairs.into_iter().take(n).map(|(w, _)| w as u32).collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::dictionary::build_corpus;

    fn sample_texts() -> Vec<Vec<String>> {
        let docs = [
            "war army battle soldier war army",
            "army battle war soldier battle",
            "farm harvest grain field farm",
            "harvest field grain farm grain",
            "war soldier battle army war",
            "grain farm field harvest field",
        ];
        docs.iter()
            .map(|d| d.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    fn params(k: usize) -> LdaParams {
        LdaParams {
            num_topics: k,
            alpha: 0.1,
            beta: 0.01,
            passes: 30,
            seed: 42,
        }
    }

    #[test]
    fn test_fit_rejects_empty_corpus() {
        let texts: Vec<Vec<String>> = Vec::new();
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = build_corpus(&dictionary, &texts);
        let result = LdaModel::fit(&dictionary, &corpus, params(2));
        assert!(matches!(result, Err(PipelineError::DegenerateCorpus(_))));
    }

    #[test]
    fn test_fit_rejects_unknown_only_corpus() {
        let texts = sample_texts();
        let dictionary = Dictionary::from_documents(&texts);
        // Bags built against a foreign dictionary: every doc is empty.
        let foreign: Vec<Vec<String>> = vec![vec!["zebra".into()], vec!["quartz".into()]];
        let corpus = build_corpus(&dictionary, &foreign);
        let result = LdaModel::fit(&dictionary, &corpus, params(2));
        assert!(matches!(result, Err(PipelineError::DegenerateCorpus(_))));
    }

    #[test]
    fn test_theta_rows_are_distributions() {
        let texts = sample_texts();
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = build_corpus(&dictionary, &texts);
        let model = LdaModel::fit(&dictionary, &corpus, params(2)).unwrap();

        let theta = model.doc_topics();
        assert_eq!(theta.len(), texts.len());
        for row in &theta {
            assert_eq!(row.len(), 2);
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|&p| p > 0.0));
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let texts = sample_texts();
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = build_corpus(&dictionary, &texts);

        let a = LdaModel::fit(&dictionary, &corpus, params(3)).unwrap();
        let b = LdaModel::fit(&dictionary, &corpus, params(3)).unwrap();
        assert_eq!(a.doc_topics(), b.doc_topics());
        assert_eq!(a.top_words(5), b.top_words(5));
    }

    #[test]
    fn test_top_words_length() {
        let texts = sample_texts();
        let dictionary = Dictionary::from_documents(&texts);
        let corpus = build_corpus(&dictionary, &texts);
        let model = LdaModel::fit(&dictionary, &corpus, params(2)).unwrap();

        let tops = model.top_words(4);
        assert_eq!(tops.len(), 2);
        for topic in &tops {
            assert_eq!(topic.len(), 4);
        }
    }
}
