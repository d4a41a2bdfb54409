//! Term dictionary and bag-of-words corpus.

use std::collections::HashMap;

/// Sparse bag-of-words for one document: `(term id, occurrence count)`
/// pairs sorted by term id.
pub type Bow = Vec<(u32, u32)>;

/// Bidirectional mapping between tokens and small integer ids. Ids are
/// assigned in first-appearance order across the document collection, so the
/// mapping is deterministic for a fixed corpus.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    tokens: Vec<String>,
    ids: HashMap<String, u32>,
}

impl Dictionary {
    pub fn from_documents<S: AsRef<str>>(documents: &[Vec<S>]) -> Self {
        let mut dictionary = Dictionary::default();
        for document in documents {
            for token in document {
                let token = token.as_ref();
                if !dictionary.ids.contains_key(token) {
                    let id = dictionary.tokens.len() as u32;
                    dictionary.tokens.push(token.to_string());
                    dictionary.ids.insert(token.to_string(), id);
                }
            }
        }
        dictionary
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(|s| s.as_str())
    }

    /// All tokens in id order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Converts a tokenized document into its sparse bag-of-words. Unknown
    /// tokens are ignored; pairs come out sorted by term id.
    pub fn doc_to_bow<S: AsRef<str>>(&self, document: &[S]) -> Bow {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in document {
            if let Some(id) = self.id(token.as_ref()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut bow: Bow = counts.into_iter().collect();
        bow.sort_by_key(|(id, _)| *id);
        bow
    }
}

/// Builds the corpus in document order, one bag per input document.
pub fn build_corpus<S: AsRef<str>>(dictionary: &Dictionary, documents: &[Vec<S>]) -> Vec<Bow> {
    documents
        .iter()
        .map(|document| dictionary.doc_to_bow(document))
        .collect()
}
