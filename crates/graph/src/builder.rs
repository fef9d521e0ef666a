use anyhow::{Context, Result};
use extract::{Analysis, EntityMention, LinguisticAnalyzer};
use ingest::{BoundKind, Bounds};
use std::sync::Arc;

use crate::graph_data::KnowledgeGraph;

/// Builds the entity co-occurrence graph for one request.
pub struct GraphBuilder {
    analyzer: Arc<dyn LinguisticAnalyzer>,
    bounds: Bounds,
}

impl GraphBuilder {
    pub fn new(analyzer: Arc<dyn LinguisticAnalyzer>, bounds: Bounds) -> Self {
        Self { analyzer, bounds }
    }

    /// Analyze the graph excerpt of `text` and derive nodes and edges.
    ///
    /// A single analyzer call; its failure is returned as-is.
    pub async fn build(&self, text: &str) -> Result<KnowledgeGraph> {
        let excerpt = self.bounds.excerpt(text, BoundKind::Graph);

        let analysis = self
            .analyzer
            .analyze(excerpt.as_str())
            .await
            .context("Failed to analyze text for entity graph")?;

        let graph = build_graph(&analysis);

        tracing::debug!(
            sentences = analysis.sentences.len(),
            mentions = analysis.entities.len(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Entity graph built"
        );

        Ok(graph)
    }
}

/// Derive the graph from an analysis.
///
/// Nodes: accepted mentions in document order, keyed by surface text.
/// Edges: for each sentence, one edge per consecutive pair of accepted
/// mentions inside it.
pub fn build_graph(analysis: &Analysis) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();

    for mention in analysis.entities.iter().filter(|m| m.category.is_accepted()) {
        graph.add_entity(&mention.text, mention.category.clone());
    }

    for idx in 0..analysis.sentences.len() {
        let mentions: Vec<&EntityMention> = analysis
            .mentions_in(idx)
            .filter(|m| m.category.is_accepted())
            .collect();

        for pair in mentions.windows(2) {
            graph.add_edge(&pair[0].text, &pair[1].text);
        }
    }

    graph
}
