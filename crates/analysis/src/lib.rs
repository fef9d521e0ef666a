pub mod engine;
pub mod error;
pub mod summarizer;

pub use engine::{AnalysisEngine, AnalysisResult, AnalysisStats, Capabilities, EngineConfig};
pub use error::{AnalysisError, Result};
pub use summarizer::SummaryGenerator;
