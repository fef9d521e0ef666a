use anyhow::Result;
use extract::{GenerationConstraints, Summarizer};
use ingest::{BoundKind, Bounds};
use std::sync::Arc;

/// Runs the summarization capability on the summarization excerpt with
/// fixed decoding constraints. Errors are passed through untouched.
pub struct SummaryGenerator {
    summarizer: Arc<dyn Summarizer>,
    bounds: Bounds,
    constraints: GenerationConstraints,
}

impl SummaryGenerator {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        bounds: Bounds,
        constraints: GenerationConstraints,
    ) -> Self {
        Self {
            summarizer,
            bounds,
            constraints,
        }
    }

    pub async fn generate(&self, text: &str) -> Result<String> {
        let excerpt = self.bounds.excerpt(text, BoundKind::Summarization);

        tracing::debug!(
            chars = excerpt.chars,
            estimated_tokens = excerpt.estimated_tokens(),
            truncated = excerpt.truncated,
            "Summarizing excerpt"
        );

        self.summarizer
            .summarize(excerpt.as_str(), &self.constraints)
            .await
    }
}
