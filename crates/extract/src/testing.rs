//! Deterministic capability doubles.
//!
//! Enabled for this crate's tests and for dependents through the
//! `testing` feature.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::capability::{EntailmentClassifier, LinguisticAnalyzer, Summarizer};
use crate::prompt::PAIR_SEPARATOR;
use crate::schema::{Analysis, Classification, GenerationConstraints, NliLabel};
use crate::segment::split_sentences;

/// Record of a call made to one of the mocks.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Summarize { text: String, constraints: GenerationConstraints },
    Classify { pair: String, max_length: usize, truncate: bool },
    Analyze { text: String },
}

pub type CallLog = Arc<RwLock<Vec<MockCall>>>;

fn record(log: &CallLog, call: MockCall) {
    log.write().unwrap().push(call);
}

/// Returns a fixed summary, or fails when configured to.
pub struct MockSummarizer {
    summary: String,
    failure: Option<String>,
    calls: CallLog,
}

impl MockSummarizer {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            failure: None,
            calls: CallLog::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            summary: String::new(),
            failure: Some(message.into()),
            calls: CallLog::default(),
        }
    }

    pub fn with_call_log(mut self, calls: CallLog) -> Self {
        self.calls = calls;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str, constraints: &GenerationConstraints) -> Result<String> {
        record(
            &self.calls,
            MockCall::Summarize {
                text: text.to_string(),
                constraints: constraints.clone(),
            },
        );

        match &self.failure {
            Some(message) => anyhow::bail!("{}", message),
            None => Ok(self.summary.clone()),
        }
    }
}

/// Classifies by hypothesis: scripted results keyed on the text after the
/// pair separator, with a default for everything else.
pub struct MockEntailment {
    scripted: HashMap<String, Classification>,
    failures: Vec<String>,
    default: Classification,
    calls: CallLog,
}

impl Default for MockEntailment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEntailment {
    pub fn new() -> Self {
        Self {
            scripted: HashMap::new(),
            failures: Vec::new(),
            default: Classification {
                label: NliLabel::Entailment,
                score: 0.9,
            },
            calls: CallLog::default(),
        }
    }

    pub fn with_default(mut self, label: NliLabel, score: f32) -> Self {
        self.default = Classification { label, score };
        self
    }

    pub fn with_result(mut self, hypothesis: impl Into<String>, label: NliLabel, score: f32) -> Self {
        self.scripted
            .insert(hypothesis.into(), Classification { label, score });
        self
    }

    /// Fail whenever the hypothesis equals `hypothesis`.
    pub fn failing_on(mut self, hypothesis: impl Into<String>) -> Self {
        self.failures.push(hypothesis.into());
        self
    }

    pub fn with_call_log(mut self, calls: CallLog) -> Self {
        self.calls = calls;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl EntailmentClassifier for MockEntailment {
    async fn classify(
        &self,
        pair_text: &str,
        max_length: usize,
        truncate: bool,
    ) -> Result<Classification> {
        record(
            &self.calls,
            MockCall::Classify {
                pair: pair_text.to_string(),
                max_length,
                truncate,
            },
        );

        let hypothesis = pair_text
            .split_once(PAIR_SEPARATOR)
            .map(|(_, h)| h.trim())
            .unwrap_or(pair_text);

        if self.failures.iter().any(|f| f == hypothesis) {
            anyhow::bail!("input length exceeds model maximum");
        }

        Ok(self
            .scripted
            .get(hypothesis)
            .copied()
            .unwrap_or(self.default))
    }
}

/// Returns scripted analyses by exact text; falls back to sentence
/// segmentation with no entities.
#[derive(Default)]
pub struct MockAnalyzer {
    scripted: HashMap<String, Analysis>,
    failure: Option<String>,
    failing_texts: Vec<String>,
    calls: CallLog,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analysis(mut self, text: impl Into<String>, analysis: Analysis) -> Self {
        self.scripted.insert(text.into(), analysis);
        self
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Fail only when asked to analyze exactly `text`.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.failing_texts.push(text.into());
        self
    }

    pub fn with_call_log(mut self, calls: CallLog) -> Self {
        self.calls = calls;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl LinguisticAnalyzer for MockAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Analysis> {
        record(
            &self.calls,
            MockCall::Analyze {
                text: text.to_string(),
            },
        );

        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }

        if self.failing_texts.iter().any(|t| t == text) {
            anyhow::bail!("analysis pipeline failed");
        }

        Ok(self.scripted.get(text).cloned().unwrap_or_else(|| Analysis {
            sentences: split_sentences(text),
            entities: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_entailment_pair;

    #[tokio::test]
    async fn test_mock_entailment_keys_on_hypothesis() {
        let mock = MockEntailment::new()
            .with_result("Bob is CEO.", NliLabel::Contradiction, 0.91)
            .failing_on("Broken.");

        let scripted = mock
            .classify(&build_entailment_pair("ref", "Bob is CEO."), 512, true)
            .await
            .unwrap();
        assert_eq!(scripted.label, NliLabel::Contradiction);

        let fallback = mock
            .classify(&build_entailment_pair("ref", "Other."), 512, true)
            .await
            .unwrap();
        assert_eq!(fallback.label, NliLabel::Entailment);

        assert!(
            mock.classify(&build_entailment_pair("ref", "Broken."), 512, true)
                .await
                .is_err()
        );
        assert_eq!(mock.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_analyzer_fallback_segments() {
        let mock = MockAnalyzer::new();
        let analysis = mock.analyze("One. Two.").await.unwrap();
        assert_eq!(analysis.sentences.len(), 2);
        assert!(analysis.entities.is_empty());
    }
}
