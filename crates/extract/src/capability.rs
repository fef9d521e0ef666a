//! The three model capabilities the pipeline is built on.
//!
//! Implementations are loaded once and shared read-only across requests,
//! so every trait is `Send + Sync` and takes `&self`.

use anyhow::Result;
use async_trait::async_trait;

use crate::schema::{Analysis, Classification, GenerationConstraints};

/// Abstractive summarization.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, constraints: &GenerationConstraints) -> Result<String>;
}

/// Natural-language-inference classification over a single encoded pair.
///
/// `pair_text` carries both segments joined by the separator from
/// [`crate::prompt::build_entailment_pair`]. With `truncate` set the
/// implementation must cut over-long input rather than fail.
#[async_trait]
pub trait EntailmentClassifier: Send + Sync {
    async fn classify(
        &self,
        pair_text: &str,
        max_length: usize,
        truncate: bool,
    ) -> Result<Classification>;
}

/// Sentence segmentation and named-entity recognition in one pass.
#[async_trait]
pub trait LinguisticAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Analysis>;
}
