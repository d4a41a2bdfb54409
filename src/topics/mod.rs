pub mod coherence;
pub mod dictionary;
pub mod distribution;
pub mod lda;
pub mod search;

pub use dictionary::{build_corpus, Bow, Dictionary};
pub use lda::{LdaModel, LdaParams};
pub use search::{search_topic_count, TopicCandidate, TopicCountRange, TopicSearch};
