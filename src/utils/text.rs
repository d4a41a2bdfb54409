// Text utils

use icu::segmenter::SentenceSegmenter;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// English stop words (the NLTK list, apostrophes stripped to match the
/// normalizer's alphabetic-only tokens).
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre", "youve",
    "youll", "youd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "shes", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "thatll", "these",
    "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "dont", "should",
    "shouldve", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "arent", "couldn",
    "couldnt", "didn", "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven",
    "havent", "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt", "needn", "neednt",
    "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt", "weren", "werent", "won", "wont",
    "wouldn", "wouldnt",
];

/// Lazily-initialized set view of [`ENGLISH_STOP_WORDS`].
pub static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

pub fn split_into_sentences(text: &str) -> Vec<&str> {
    let trimmed_text = text.trim();
    if trimmed_text.is_empty() {
        return Vec::new();
    }

    let segmenter = SentenceSegmenter::new();
    let start_indices: Vec<usize> = segmenter.segment_str(trimmed_text).collect();

    // No breaks found: the whole trimmed string is one sentence.
    if start_indices.is_empty() {
        return vec![trimmed_text];
    }

    let mut sentences = Vec::new();
    for i in 0..start_indices.len() {
        let start = start_indices[i];
        let end = if i + 1 < start_indices.len() {
            start_indices[i + 1]
        } else {
            trimmed_text.len()
        };

        if start <= end && end <= trimmed_text.len() {
            let sentence_slice = trimmed_text[start..end].trim();
            if !sentence_slice.is_empty() {
                sentences.push(sentence_slice);
            }
        }
    }
    sentences
}

/// Generate all contiguous n-grams of words, joined by spaces.
pub fn get_n_grams(words: &[&str], n: usize) -> Vec<String> {
    if n > 0 {
        words.windows(n).map(|window| window.join(" ")).collect()
    } else {
        Vec::new()
    }
}

/// Count the `k` most frequent n-grams. Ties break alphabetically so the
/// ranking is stable across runs.
pub fn top_n_grams(words: &[&str], n: usize, k: usize) -> Vec<(String, usize)> {
    let mut counter: HashMap<String, usize> = HashMap::new();
    for gram in get_n_grams(words, n) {
        *counter.entry(gram).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counter.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

/// Estimate syllables in an English word by counting vowel groups, with the
/// usual silent-e adjustment. Never returns 0 for a non-empty word.
pub fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    if chars.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut groups: usize = 0;
    let mut previous_was_vowel = false;
    for &c in &chars {
        let vowel = is_vowel(c);
        if vowel && !previous_was_vowel {
            groups += 1;
        }
        previous_was_vowel = vowel;
    }

    // Trailing silent e: "time" has one syllable, but keep "le" endings
    // like "table" intact.
    let len = chars.len();
    if len >= 3 && chars[len - 1] == 'e' && !is_vowel(chars[len - 2]) && chars[len - 2] != 'l' {
        groups = groups.saturating_sub(1);
    }

    groups.max(1)
}
