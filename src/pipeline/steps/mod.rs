pub mod normalize;
pub mod sentiment;

pub use normalize::{LanguageContext, NormalizeStep};
pub use sentiment::SentimentStep;
