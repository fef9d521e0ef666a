pub mod builder;
pub mod graph_data;

pub use builder::{GraphBuilder, build_graph};
pub use graph_data::{EntityNode, KnowledgeGraph, RelationEdge};
