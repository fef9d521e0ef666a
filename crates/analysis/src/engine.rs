use extract::{EntailmentClassifier, GenerationConstraints, LinguisticAnalyzer, Summarizer};
use graph::{GraphBuilder, KnowledgeGraph};
use ingest::Bounds;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use verify::{DEFAULT_MAX_PAIR_LENGTH, SummarySentence, Verifier};

use crate::error::{AnalysisError, Result};
use crate::summarizer::SummaryGenerator;

/// The three loaded model capabilities.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct Capabilities {
    pub summarizer: Arc<dyn Summarizer>,
    pub classifier: Arc<dyn EntailmentClassifier>,
    pub analyzer: Arc<dyn LinguisticAnalyzer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub bounds: Bounds,
    pub generation: GenerationConstraints,
    pub max_pair_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            generation: GenerationConstraints::default(),
            max_pair_length: DEFAULT_MAX_PAIR_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: Vec<SummarySentence>,
    #[serde(rename = "graph_data")]
    pub graph: KnowledgeGraph,
}

/// Per-request counters and stage timings, reported next to the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisStats {
    pub summarize_time: Duration,
    pub verify_time: Duration,
    pub graph_time: Duration,
    pub sentences: usize,
    pub degraded_sentences: usize,
    pub nodes: usize,
    pub edges: usize,
}

pub struct AnalysisEngine {
    summary: SummaryGenerator,
    verifier: Verifier,
    graph_builder: GraphBuilder,
}

impl AnalysisEngine {
    pub fn new(capabilities: Capabilities, config: EngineConfig) -> Self {
        let Capabilities {
            summarizer,
            classifier,
            analyzer,
        } = capabilities;

        Self {
            summary: SummaryGenerator::new(summarizer, config.bounds, config.generation),
            verifier: Verifier::new(
                classifier,
                analyzer.clone(),
                config.bounds,
                config.max_pair_length,
            ),
            graph_builder: GraphBuilder::new(analyzer, config.bounds),
        }
    }

    /// Summarize, fact-check and graph `raw_text`.
    pub async fn analyze_text(&self, raw_text: &str) -> Result<AnalysisResult> {
        self.analyze_text_with_stats(raw_text)
            .await
            .map(|(result, _)| result)
    }

    /// Same as [`Self::analyze_text`], also returning stage timings.
    pub async fn analyze_text_with_stats(
        &self,
        raw_text: &str,
    ) -> Result<(AnalysisResult, AnalysisStats)> {
        if raw_text.is_empty() {
            return Err(AnalysisError::InvalidInput("Text is empty".to_string()));
        }

        let mut stats = AnalysisStats::default();

        let started = Instant::now();
        let summary_text = self
            .summary
            .generate(raw_text)
            .await
            .map_err(AnalysisError::Summarization)?;
        stats.summarize_time = started.elapsed();

        let started = Instant::now();
        let verification = self
            .verifier
            .verify(&summary_text, raw_text)
            .await
            .map_err(AnalysisError::Segmentation)?;
        stats.verify_time = started.elapsed();
        stats.sentences = verification.sentences.len();
        stats.degraded_sentences = verification.failures;

        let started = Instant::now();
        let graph = self
            .graph_builder
            .build(raw_text)
            .await
            .map_err(AnalysisError::GraphConstruction)?;
        stats.graph_time = started.elapsed();
        stats.nodes = graph.nodes.len();
        stats.edges = graph.edges.len();

        tracing::info!(
            sentences = stats.sentences,
            degraded = stats.degraded_sentences,
            nodes = stats.nodes,
            edges = stats.edges,
            summarize_ms = stats.summarize_time.as_millis() as u64,
            verify_ms = stats.verify_time.as_millis() as u64,
            graph_ms = stats.graph_time.as_millis() as u64,
            "Analysis complete"
        );

        Ok((
            AnalysisResult {
                summary: verification.sentences,
                graph,
            },
            stats,
        ))
    }
}
