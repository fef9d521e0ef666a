use extract::EntityCategory;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityNode {
    /// Surface text of the first mention.
    pub id: String,
    pub group: EntityCategory,
}

/// Co-occurrence of two consecutive accepted mentions in one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationEdge {
    pub source: String,
    pub target: String,
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<EntityNode>,
    #[serde(rename = "links")]
    pub edges: Vec<RelationEdge>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with the same id exists; first occurrence wins.
    pub fn add_entity(&mut self, id: &str, group: EntityCategory) -> bool {
        if self.seen.contains(id) {
            return false;
        }

        self.seen.insert(id.to_string());
        self.nodes.push(EntityNode {
            id: id.to_string(),
            group,
        });
        true
    }

    /// Edges are not deduplicated: repeated pairs yield parallel edges.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        self.edges.push(RelationEdge {
            source: source.to_string(),
            target: target.to_string(),
            value: 1,
        });
    }
}
