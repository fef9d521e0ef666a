use thiserror::Error;

/// Request-level failures. Per-sentence verification errors never show up
/// here; they degrade the affected sentence instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("summarization failed: {0:#}")]
    Summarization(anyhow::Error),

    #[error("summary segmentation failed: {0:#}")]
    Segmentation(anyhow::Error),

    #[error("graph construction failed: {0:#}")]
    GraphConstruction(anyhow::Error),
}

impl AnalysisError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
