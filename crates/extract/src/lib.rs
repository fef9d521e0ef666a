pub mod capability;
pub mod llm;
pub mod models;
pub mod normalizer;
pub mod prompt;
pub mod schema;
pub mod segment;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use capability::{EntailmentClassifier, LinguisticAnalyzer, Summarizer};
pub use llm::InferenceClient;
pub use models::{HfEntailmentClassifier, HfSummarizer, NerAnalyzer};
pub use prompt::{PAIR_SEPARATOR, build_entailment_pair};
pub use schema::{
    Analysis, Classification, EntityCategory, EntityMention, GenerationConstraints, NliLabel,
    SentenceSpan,
};
