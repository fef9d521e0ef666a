use anyhow::{Context, Result};
use extract::{EntailmentClassifier, LinguisticAnalyzer, build_entailment_pair};
use ingest::{BoundKind, Bounds};
use std::sync::Arc;

use crate::isolate::map_isolated;
use crate::status::SummarySentence;

/// Default combined token limit for the entailment model.
pub const DEFAULT_MAX_PAIR_LENGTH: usize = 512;

#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub sentences: Vec<SummarySentence>,
    /// Sentences the classifier failed on and that were degraded.
    pub failures: usize,
}

/// Fact-checks a summary sentence by sentence against the source text.
pub struct Verifier {
    classifier: Arc<dyn EntailmentClassifier>,
    analyzer: Arc<dyn LinguisticAnalyzer>,
    bounds: Bounds,
    max_pair_length: usize,
}

impl Verifier {
    pub fn new(
        classifier: Arc<dyn EntailmentClassifier>,
        analyzer: Arc<dyn LinguisticAnalyzer>,
        bounds: Bounds,
        max_pair_length: usize,
    ) -> Self {
        Self {
            classifier,
            analyzer,
            bounds,
            max_pair_length,
        }
    }

    /// Verify every sentence of `summary` against the verification excerpt
    /// of `source`.
    ///
    /// Only segmentation can fail the whole pass. A classifier error is
    /// confined to its sentence, which is recorded as Unverified with
    /// confidence 0.0.
    pub async fn verify(&self, summary: &str, source: &str) -> Result<Verification> {
        let sentences: Vec<String> = self
            .analyzer
            .analyze(summary)
            .await
            .context("Failed to segment summary into sentences")?
            .sentence_texts()
            .map(str::to_string)
            .collect();

        let reference = self.bounds.excerpt(source, BoundKind::Verification);
        let classifier = self.classifier.as_ref();
        let max_length = self.max_pair_length;

        let outcome = map_isolated(
            "verify_sentence",
            sentences,
            |sentence: String| {
                let pair = build_entailment_pair(reference.as_str(), &sentence);
                async move {
                    let classification = classifier.classify(&pair, max_length, true).await?;
                    Ok::<_, anyhow::Error>(SummarySentence::new(
                        sentence,
                        classification.label,
                        classification.score,
                    ))
                }
            },
            |sentence, _| SummarySentence::degraded(sentence),
        )
        .await;

        Ok(Verification {
            sentences: outcome.values,
            failures: outcome.failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::VerificationStatus;
    use extract::NliLabel;
    use extract::testing::{MockAnalyzer, MockCall, MockEntailment};

    const SUMMARY: &str = "Alice works at Acme. Bob is the CEO. Acme is in Paris.";
    const SOURCE: &str = "Alice works at Acme. Bob founded Acme in 2001.";

    fn verifier(classifier: Arc<MockEntailment>) -> Verifier {
        Verifier::new(
            classifier,
            Arc::new(MockAnalyzer::new()),
            Bounds::default(),
            DEFAULT_MAX_PAIR_LENGTH,
        )
    }

    #[tokio::test]
    async fn test_contradiction_is_hallucination_risk() {
        let classifier = Arc::new(
            MockEntailment::new().with_result("Bob is the CEO.", NliLabel::Contradiction, 0.91),
        );

        let result = verifier(classifier).verify(SUMMARY, SOURCE).await.unwrap();

        assert_eq!(result.sentences.len(), 3);
        assert_eq!(result.sentences[1].text, "Bob is the CEO.");
        assert_eq!(result.sentences[1].status, VerificationStatus::HallucinationRisk);
        assert_eq!(result.sentences[1].confidence, 0.91);
        assert_eq!(result.failures, 0);
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let classifier = Arc::new(
            MockEntailment::new()
                .with_default(NliLabel::Entailment, 0.876)
                .with_result("Acme is in Paris.", NliLabel::Neutral, 0.55)
                .failing_on("Bob is the CEO."),
        );

        let result = verifier(classifier.clone()).verify(SUMMARY, SOURCE).await.unwrap();

        assert_eq!(result.sentences.len(), 3);
        assert_eq!(result.failures, 1);

        assert_eq!(result.sentences[0].status, VerificationStatus::Verified);
        assert_eq!(result.sentences[0].confidence, 0.88);

        assert_eq!(result.sentences[1].text, "Bob is the CEO.");
        assert_eq!(result.sentences[1].status, VerificationStatus::Unverified);
        assert_eq!(result.sentences[1].confidence, 0.0);

        assert_eq!(result.sentences[2].status, VerificationStatus::Unverified);
        assert_eq!(result.sentences[2].confidence, 0.55);

        // the failing sentence did not stop later calls
        assert_eq!(classifier.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_verification_is_identical() {
        let classifier = Arc::new(
            MockEntailment::new().with_result("Acme is in Paris.", NliLabel::Neutral, 0.42),
        );
        let verifier = verifier(classifier);

        let first = verifier.verify(SUMMARY, SOURCE).await.unwrap();
        let second = verifier.verify(SUMMARY, SOURCE).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_pairs_use_verification_excerpt() {
        let classifier = Arc::new(MockEntailment::new());
        let bounds = Bounds {
            summarization: 100,
            verification: 5,
            graph: 200,
        };
        let verifier = Verifier::new(classifier.clone(), Arc::new(MockAnalyzer::new()), bounds, 256);

        verifier.verify("Short summary.", SOURCE).await.unwrap();

        assert_eq!(
            classifier.calls(),
            vec![MockCall::Classify {
                pair: "Alice </s></s> Short summary.".to_string(),
                max_length: 256,
                truncate: true,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_summary_yields_no_sentences() {
        let classifier = Arc::new(MockEntailment::new());
        let result = verifier(classifier.clone()).verify("", SOURCE).await.unwrap();

        assert!(result.sentences.is_empty());
        assert!(classifier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_segmentation_failure_is_fatal() {
        let verifier = Verifier::new(
            Arc::new(MockEntailment::new()),
            Arc::new(MockAnalyzer::failing("segmenter down")),
            Bounds::default(),
            DEFAULT_MAX_PAIR_LENGTH,
        );

        assert!(verifier.verify(SUMMARY, SOURCE).await.is_err());
    }
}
